use serde::Serialize;

use crate::models::{TeamMember, TeamWithOrganizationInfo, ThesisSurvey};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    pub participant: TeamMember,
    pub team: TeamWithOrganizationInfo,
    pub survey: ThesisSurvey,
}

impl SurveySummary {
    pub fn new(
        participant: TeamMember,
        team: TeamWithOrganizationInfo,
        survey: ThesisSurvey,
    ) -> Self {
        Self {
            participant,
            team,
            survey,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.participant.id.is_assigned() && self.team.id.is_assigned() && self.survey.is_complete()
    }

    pub fn unanswered_voice_surveys(&self) -> usize {
        self.survey
            .voice_surveys
            .iter()
            .filter(|s| s.response.is_none())
            .count()
    }
}

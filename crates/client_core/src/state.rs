//! Session state and the synchronous mutations that change it.

use rand::{seq::SliceRandom, Rng};
use tracing::error;

use crate::{
    config::{TeamSizeBounds, SITE_TITLE, TEAM_NAME_PREFIX},
    models::{
        GeneralSurvey, LikertResponse, MinMaxResponse, OrganizationGeneralInfo, OrganizationInfo,
        Stats, SurveySummary, Team, TeamMember, TeamWithOrganizationInfo, ThesisSurvey,
        VoiceSurvey,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamRef(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef(pub usize);

#[derive(Debug, Clone)]
pub enum Mutation {
    SetTeamInfo(TeamWithOrganizationInfo),
    SetActiveParticipant(TeamMember),
    SetGeneralSurvey(GeneralSurvey),
    SetOverconfidenceResponse {
        index: usize,
        response: MinMaxResponse,
    },
    SetTeamCoordinationResponse {
        index: usize,
        response: LikertResponse,
    },
    GenerateVoiceSurveys,
    SetVoiceSurveyResponse(VoiceSurvey),
    ReplaceRegistrationInfo(OrganizationInfo),
    UpdateGeneralInfo(OrganizationGeneralInfo),
    AddTeam,
    RemoveTeam {
        team: TeamRef,
    },
    UpdateTeam {
        team: TeamRef,
        name: String,
        link: String,
    },
    AddMember {
        team: TeamRef,
    },
    RemoveMember {
        team: TeamRef,
        member: MemberRef,
    },
    UpdateMember {
        team: TeamRef,
        member: MemberRef,
        name: String,
    },
    SetLoading(bool),
    SetProgress(u32),
    SetStats(Stats),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    SetTeamInfo,
    SetActiveParticipant,
    SetGeneralSurvey,
    SetOverconfidenceResponse,
    SetTeamCoordinationResponse,
    GenerateVoiceSurveys,
    SetVoiceSurveyResponse,
    ReplaceRegistrationInfo,
    UpdateGeneralInfo,
    AddTeam,
    RemoveTeam,
    UpdateTeam,
    AddMember,
    RemoveMember,
    UpdateMember,
    SetLoading,
    SetProgress,
    SetStats,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::SetTeamInfo(_) => MutationKind::SetTeamInfo,
            Mutation::SetActiveParticipant(_) => MutationKind::SetActiveParticipant,
            Mutation::SetGeneralSurvey(_) => MutationKind::SetGeneralSurvey,
            Mutation::SetOverconfidenceResponse { .. } => MutationKind::SetOverconfidenceResponse,
            Mutation::SetTeamCoordinationResponse { .. } => {
                MutationKind::SetTeamCoordinationResponse
            }
            Mutation::GenerateVoiceSurveys => MutationKind::GenerateVoiceSurveys,
            Mutation::SetVoiceSurveyResponse(_) => MutationKind::SetVoiceSurveyResponse,
            Mutation::ReplaceRegistrationInfo(_) => MutationKind::ReplaceRegistrationInfo,
            Mutation::UpdateGeneralInfo(_) => MutationKind::UpdateGeneralInfo,
            Mutation::AddTeam => MutationKind::AddTeam,
            Mutation::RemoveTeam { .. } => MutationKind::RemoveTeam,
            Mutation::UpdateTeam { .. } => MutationKind::UpdateTeam,
            Mutation::AddMember { .. } => MutationKind::AddMember,
            Mutation::RemoveMember { .. } => MutationKind::RemoveMember,
            Mutation::UpdateMember { .. } => MutationKind::UpdateMember,
            Mutation::SetLoading(_) => MutationKind::SetLoading,
            Mutation::SetProgress(_) => MutationKind::SetProgress,
            Mutation::SetStats(_) => MutationKind::SetStats,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    registration_info: OrganizationInfo,
    team_info: TeamWithOrganizationInfo,
    active_participant: TeamMember,
    survey: ThesisSurvey,
    loading: bool,
    progress: u32,
    stats: Option<Stats>,
    bounds: TeamSizeBounds,
    site_title: String,
    team_name_prefix: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TeamSizeBounds::default(), SITE_TITLE, TEAM_NAME_PREFIX)
    }
}

impl AppState {
    pub fn new(
        bounds: TeamSizeBounds,
        site_title: impl Into<String>,
        team_name_prefix: impl Into<String>,
    ) -> Self {
        let team_name_prefix = team_name_prefix.into();
        let first_team = Team::with_empty_members(
            format!("{team_name_prefix} 1"),
            bounds.minimum(),
        );
        Self {
            registration_info: OrganizationInfo {
                teams: vec![first_team],
                ..OrganizationInfo::default()
            },
            team_info: TeamWithOrganizationInfo::default(),
            active_participant: TeamMember::default(),
            survey: ThesisSurvey::default(),
            loading: false,
            progress: 0,
            stats: None,
            bounds,
            site_title: site_title.into(),
            team_name_prefix,
        }
    }

    // getters

    pub fn survey_summary(&self) -> SurveySummary {
        SurveySummary::new(
            self.active_participant.clone(),
            self.team_info.clone(),
            self.survey.clone(),
        )
    }

    pub fn team_size(&self) -> usize {
        self.team_info.members.len()
    }

    pub fn members_not_yet_responded(&self) -> Vec<&TeamMember> {
        self.team_info
            .members
            .iter()
            .filter(|member| !member.has_participated)
            .collect()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn survey_title(&self) -> &str {
        &self.site_title
    }

    pub fn registration_info(&self) -> &OrganizationInfo {
        &self.registration_info
    }

    pub fn team_info(&self) -> &TeamWithOrganizationInfo {
        &self.team_info
    }

    pub fn active_participant(&self) -> &TeamMember {
        &self.active_participant
    }

    pub fn survey(&self) -> &ThesisSurvey {
        &self.survey
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn team_size_bounds(&self) -> TeamSizeBounds {
        self.bounds
    }

    // mutations

    /// Returns false when the mutation was rejected and state is unchanged.
    pub fn apply<R: Rng + ?Sized>(&mut self, mutation: Mutation, rng: &mut R) -> bool {
        match mutation {
            Mutation::SetTeamInfo(team_info) => {
                self.team_info = team_info;
                true
            }
            Mutation::SetActiveParticipant(participant) => {
                self.active_participant = participant;
                true
            }
            Mutation::SetGeneralSurvey(general) => {
                self.survey.general_survey = general;
                true
            }
            Mutation::SetOverconfidenceResponse { index, response } => {
                self.set_overconfidence_response(index, response)
            }
            Mutation::SetTeamCoordinationResponse { index, response } => {
                self.set_team_coordination_response(index, response)
            }
            Mutation::GenerateVoiceSurveys => {
                self.generate_voice_surveys(rng);
                true
            }
            Mutation::SetVoiceSurveyResponse(updated) => self.set_voice_survey_response(updated),
            Mutation::ReplaceRegistrationInfo(info) => {
                self.registration_info = info;
                true
            }
            Mutation::UpdateGeneralInfo(general) => {
                self.registration_info.general_info = general;
                true
            }
            Mutation::AddTeam => {
                self.add_team();
                true
            }
            Mutation::RemoveTeam { team } => self.remove_team(team),
            Mutation::UpdateTeam { team, name, link } => self.update_team(team, name, link),
            Mutation::AddMember { team } => self.add_member(team),
            Mutation::RemoveMember { team, member } => self.remove_member(team, member),
            Mutation::UpdateMember { team, member, name } => {
                self.update_member(team, member, name)
            }
            Mutation::SetLoading(loading) => {
                self.loading = loading;
                true
            }
            Mutation::SetProgress(step) => self.set_progress(step),
            Mutation::SetStats(stats) => {
                self.stats = Some(stats);
                true
            }
        }
    }

    pub fn set_overconfidence_response(&mut self, index: usize, response: MinMaxResponse) -> bool {
        self.survey
            .overconfidence_survey
            .set_response(index, response)
    }

    pub fn set_team_coordination_response(
        &mut self,
        index: usize,
        response: LikertResponse,
    ) -> bool {
        self.survey
            .team_coordination_survey
            .set_response(index, response)
    }

    pub fn generate_voice_surveys<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut members = self.team_info.members.clone();
        members.shuffle(rng);
        self.survey.voice_surveys = members.into_iter().map(VoiceSurvey::new).collect();
    }

    pub fn set_voice_survey_response(&mut self, updated: VoiceSurvey) -> bool {
        match self
            .survey
            .voice_surveys
            .iter_mut()
            .find(|survey| survey.id() == updated.id())
        {
            Some(existing) => {
                *existing = updated;
                true
            }
            None => {
                error!(member_id = %updated.id(), "could not find voice survey for member");
                false
            }
        }
    }

    pub fn add_team(&mut self) {
        let team_count = self.registration_info.teams.len();
        self.registration_info.teams.push(Team::with_empty_members(
            format!("{} {}", self.team_name_prefix, team_count + 1),
            self.bounds.minimum(),
        ));
    }

    pub fn remove_team(&mut self, team: TeamRef) -> bool {
        let teams = &mut self.registration_info.teams;
        if teams.len() == 1 {
            return false;
        }
        if team.0 >= teams.len() {
            error!(team = team.0, "target team does not exist in state");
            return false;
        }
        teams.remove(team.0);
        true
    }

    pub fn update_team(&mut self, team: TeamRef, name: String, link: String) -> bool {
        let Some(target) = self.registration_team_mut(team) else {
            return false;
        };
        target.name = name;
        target.link = link;
        true
    }

    pub fn add_member(&mut self, team: TeamRef) -> bool {
        let maximum = self.bounds.maximum();
        let Some(target) = self.registration_team_mut(team) else {
            return false;
        };
        if target.members.len() >= maximum {
            return false;
        }
        target.members.push(TeamMember::default());
        true
    }

    pub fn remove_member(&mut self, team: TeamRef, member: MemberRef) -> bool {
        let minimum = self.bounds.minimum();
        let Some(target) = self.registration_team_mut(team) else {
            return false;
        };
        if target.members.len() <= minimum {
            return false;
        }
        if member.0 >= target.members.len() {
            error!(team = team.0, member = member.0, "target member does not exist in team");
            return false;
        }
        target.members.remove(member.0);
        true
    }

    pub fn update_member(&mut self, team: TeamRef, member: MemberRef, name: String) -> bool {
        let Some(target) = self.registration_team_mut(team) else {
            return false;
        };
        match target.members.get_mut(member.0) {
            Some(existing) => {
                existing.name = name;
                true
            }
            None => {
                error!(team = team.0, member = member.0, "target member does not exist in team");
                false
            }
        }
    }

    /// Accepts `step` only when it equals the current step or the next one.
    pub fn set_progress(&mut self, step: u32) -> bool {
        if step != self.progress && self.progress.checked_add(1) != Some(step) {
            return false;
        }
        self.progress = step;
        true
    }

    fn registration_team_mut(&mut self, team: TeamRef) -> Option<&mut Team> {
        let found = self.registration_info.teams.get_mut(team.0);
        if found.is_none() {
            error!(team = team.0, "target team does not exist in state");
        }
        found
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;

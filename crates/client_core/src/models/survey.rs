use serde::{Serialize, Serializer};
use shared::domain::MemberId;

use crate::{error::ResponseError, models::TeamMember};

pub const OVERCONFIDENCE_QUESTION_COUNT: usize = 10;
pub const TEAM_COORDINATION_QUESTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMaxResponse {
    min: f64,
    max: f64,
}

impl MinMaxResponse {
    pub fn new(min: f64, max: f64) -> Result<Self, ResponseError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ResponseError::NonFiniteRange);
        }
        if min > max {
            return Err(ResponseError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Five-point agreement scale, 1 (strongly disagree) to 5 (strongly agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LikertResponse(u8);

impl LikertResponse {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ResponseError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ResponseError::LikertOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Questionnaire with a fixed set of `N` questions addressed by 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSurvey<R, const N: usize> {
    responses: [Option<R>; N],
}

pub type OverconfidenceSurvey = FixedSurvey<MinMaxResponse, OVERCONFIDENCE_QUESTION_COUNT>;
pub type TeamCoordinationSurvey = FixedSurvey<LikertResponse, TEAM_COORDINATION_QUESTION_COUNT>;

impl<R, const N: usize> FixedSurvey<R, N> {
    pub fn response(&self, index: usize) -> Option<&R> {
        let slot = index.checked_sub(1)?;
        self.responses.get(slot)?.as_ref()
    }

    /// Returns false and leaves the survey untouched when `index` is outside `1..=N`.
    pub fn set_response(&mut self, index: usize, response: R) -> bool {
        match index
            .checked_sub(1)
            .and_then(|slot| self.responses.get_mut(slot))
        {
            Some(slot) => {
                *slot = Some(response);
                true
            }
            None => false,
        }
    }

    pub fn responses(&self) -> &[Option<R>; N] {
        &self.responses
    }

    pub fn answered_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == N
    }
}

impl<R, const N: usize> Default for FixedSurvey<R, N> {
    fn default() -> Self {
        Self {
            responses: std::array::from_fn(|_| None),
        }
    }
}

impl<R: Serialize, const N: usize> Serialize for FixedSurvey<R, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.responses.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralSurvey {
    pub id: Option<i64>,
    pub age: u32,
    pub sex: String,
}

impl GeneralSurvey {
    pub fn is_complete(&self) -> bool {
        self.age > 0 && !self.sex.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceSurvey {
    pub team_member: TeamMember,
    pub response: Option<LikertResponse>,
}

impl VoiceSurvey {
    pub fn new(team_member: TeamMember) -> Self {
        Self {
            team_member,
            response: None,
        }
    }

    pub fn with_response(mut self, response: LikertResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn id(&self) -> &MemberId {
        &self.team_member.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThesisSurvey {
    pub general_survey: GeneralSurvey,
    pub overconfidence_survey: OverconfidenceSurvey,
    pub team_coordination_survey: TeamCoordinationSurvey,
    pub voice_surveys: Vec<VoiceSurvey>,
}

impl ThesisSurvey {
    pub fn is_complete(&self) -> bool {
        self.general_survey.is_complete()
            && self.overconfidence_survey.is_complete()
            && self.team_coordination_survey.is_complete()
            && self.voice_surveys.iter().all(|s| s.response.is_some())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MemberId, OrganizationId, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDto {
    #[serde(default, skip_serializing_if = "MemberId::is_unassigned")]
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub has_participated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDto {
    #[serde(default, skip_serializing_if = "TeamId::is_unassigned")]
    pub id: TeamId,
    pub name: String,
    pub members: Vec<MemberDto>,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDto {
    #[serde(default, skip_serializing_if = "OrganizationId::is_unassigned")]
    pub id: OrganizationId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub teams: Vec<TeamDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationGeneralInfoDto {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfoDto {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub link: String,
    pub members: Vec<MemberDto>,
    pub organization: OrganizationGeneralInfoDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSurveyResponseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub age: u32,
    pub sex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxResponseDto {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverconfidenceSurveyResponseDto {
    pub q01: Option<MinMaxResponseDto>,
    pub q02: Option<MinMaxResponseDto>,
    pub q03: Option<MinMaxResponseDto>,
    pub q04: Option<MinMaxResponseDto>,
    pub q05: Option<MinMaxResponseDto>,
    pub q06: Option<MinMaxResponseDto>,
    pub q07: Option<MinMaxResponseDto>,
    pub q08: Option<MinMaxResponseDto>,
    pub q09: Option<MinMaxResponseDto>,
    pub q10: Option<MinMaxResponseDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamCoordinationSurveyResponseDto {
    pub q1: Option<u8>,
    pub q2: Option<u8>,
    pub q3: Option<u8>,
    pub q4: Option<u8>,
    pub q5: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSurveyResponseDto {
    pub team_member: MemberId,
    pub response: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponseDto {
    pub general_survey_response: GeneralSurveyResponseDto,
    pub overconfidence_survey_response: OverconfidenceSurveyResponseDto,
    pub team_coordination_survey_response: TeamCoordinationSurveyResponseDto,
    pub voice_survey_responses: Vec<VoiceSurveyResponseDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    pub organizations_count: u64,
    pub teams_count: u64,
    pub participants_count: u64,
    pub responses_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unpersisted_ids_are_omitted_from_registration_payload() {
        let dto = OrganizationDto {
            id: OrganizationId::default(),
            name: "Acme".into(),
            email: String::new(),
            phone: String::new(),
            teams: vec![TeamDto {
                id: TeamId::default(),
                name: "Team 1".into(),
                members: vec![MemberDto {
                    id: MemberId::default(),
                    name: "Sara".into(),
                    has_participated: false,
                }],
                link: String::new(),
            }],
        };

        let value = serde_json::to_value(&dto).expect("serialize");
        assert!(value.get("id").is_none());
        assert!(value["teams"][0].get("id").is_none());
        assert!(value["teams"][0]["members"][0].get("id").is_none());
    }

    #[test]
    fn team_info_accepts_missing_optional_fields() {
        let dto: TeamInfoDto = serde_json::from_value(json!({
            "id": "t-1",
            "name": "Blue",
            "members": [{ "id": "m-1", "name": "Ali" }],
            "organization": { "name": "Acme" }
        }))
        .expect("deserialize");

        assert_eq!(dto.link, "");
        assert!(!dto.members[0].has_participated);
        assert_eq!(dto.organization.email, "");
    }

    #[test]
    fn unanswered_survey_questions_are_sent_as_null() {
        let value = serde_json::to_value(TeamCoordinationSurveyResponseDto {
            q1: Some(4),
            ..Default::default()
        })
        .expect("serialize");

        assert_eq!(value["q1"], json!(4));
        assert!(value["q5"].is_null());
    }
}

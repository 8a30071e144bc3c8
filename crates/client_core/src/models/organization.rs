use serde::Serialize;
use shared::domain::{MemberId, OrganizationId, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub has_participated: bool,
}

impl TeamMember {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_participated: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub members: Vec<TeamMember>,
    pub link: String,
}

impl Team {
    pub fn with_empty_members(name: impl Into<String>, size: usize) -> Self {
        Self {
            id: TeamId::default(),
            name: name.into(),
            members: vec![TeamMember::default(); size],
            link: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationGeneralInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationInfo {
    pub id: OrganizationId,
    pub general_info: OrganizationGeneralInfo,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamWithOrganizationInfo {
    pub id: TeamId,
    pub name: String,
    pub link: String,
    pub members: Vec<TeamMember>,
    pub organization: OrganizationGeneralInfo,
}

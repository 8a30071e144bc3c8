//! In-memory models the store works with. Wire shapes live in `shared::dto`.

mod organization;
mod stats;
mod summary;
mod survey;

pub use organization::{
    OrganizationGeneralInfo, OrganizationInfo, Team, TeamMember, TeamWithOrganizationInfo,
};
pub use stats::Stats;
pub use summary::SurveySummary;
pub use survey::{
    FixedSurvey, GeneralSurvey, LikertResponse, MinMaxResponse, OverconfidenceSurvey,
    TeamCoordinationSurvey, ThesisSurvey, VoiceSurvey,
};

//! Conversions between wire DTOs and store models.
//!
//! Every mapper implements [`Mapper`]. A mapper that only supports one direction
//! keeps the default body for the other, which fails with
//! [`MapperError::NotImplemented`].

mod organization;
mod stats;
mod survey;

pub use organization::{OrganizationRegistrationMapper, TeamWithOrganizationInfoMapper};
pub use stats::StatsMapper;
pub use survey::{
    GeneralSurveyMapper, OverconfidenceMapper, SurveyResponseMapper, TeamCoordinationMapper,
    VoiceSurveyMapper,
};

use crate::error::{MapperError, MappingDirection};

pub trait Mapper {
    type Dto;
    type Model;

    const NAME: &'static str;

    fn create_model_from_dto(&self, _dto: Self::Dto) -> Result<Self::Model, MapperError> {
        Err(MapperError::NotImplemented {
            mapper: Self::NAME,
            direction: MappingDirection::DtoToModel,
        })
    }

    fn create_dto_from_model(&self, _model: &Self::Model) -> Result<Self::Dto, MapperError> {
        Err(MapperError::NotImplemented {
            mapper: Self::NAME,
            direction: MappingDirection::ModelToDto,
        })
    }
}

#[cfg(test)]
#[path = "../tests/mapper_tests.rs"]
mod tests;

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no active participant is set")]
    NoActiveParticipant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingDirection {
    DtoToModel,
    ModelToDto,
}

impl fmt::Display for MappingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingDirection::DtoToModel => f.write_str("dto-to-model"),
            MappingDirection::ModelToDto => f.write_str("model-to-dto"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResponseError {
    #[error("likert response must be between 1 and 5, got {0}")]
    LikertOutOfRange(u8),
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("range bounds must be finite numbers")]
    NonFiniteRange,
}

#[derive(Debug, Error, PartialEq)]
pub enum MapperError {
    #[error("{mapper} does not implement {direction} mapping")]
    NotImplemented {
        mapper: &'static str,
        direction: MappingDirection,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid team size bounds: minimum {minimum}, maximum {maximum}")]
    InvalidTeamSizeBounds { minimum: usize, maximum: usize },
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

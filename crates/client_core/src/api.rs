use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{MemberId, TeamId},
    dto::{OrganizationDto, StatsDto, SurveyResponseDto, TeamInfoDto},
    error::{ApiError, ApiException},
};
use url::Url;

use crate::{config::Settings, error::ConfigError};

/// Requests the store issues against the survey backend.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    async fn get_team_info(&self, team_id: &TeamId) -> Result<TeamInfoDto>;
    async fn submit_organization_info(&self, organization: &OrganizationDto)
        -> Result<OrganizationDto>;
    async fn submit_participant_response(
        &self,
        participant_id: &MemberId,
        response: &SurveyResponseDto,
    ) -> Result<()>;
    async fn get_stats(&self) -> Result<StatsDto>;
}

pub struct MissingSurveyApi;

#[async_trait]
impl SurveyApi for MissingSurveyApi {
    async fn get_team_info(&self, team_id: &TeamId) -> Result<TeamInfoDto> {
        Err(anyhow!("survey backend unavailable for team {team_id}"))
    }

    async fn submit_organization_info(
        &self,
        _organization: &OrganizationDto,
    ) -> Result<OrganizationDto> {
        Err(anyhow!("survey backend unavailable"))
    }

    async fn submit_participant_response(
        &self,
        participant_id: &MemberId,
        _response: &SurveyResponseDto,
    ) -> Result<()> {
        Err(anyhow!(
            "survey backend unavailable for participant {participant_id}"
        ))
    }

    async fn get_stats(&self) -> Result<StatsDto> {
        Err(anyhow!("survey backend unavailable"))
    }
}

pub struct HttpSurveyApi {
    http: Client,
    base_url: Url,
}

impl HttpSurveyApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings.request_timeout())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "url cannot carry a path".into(),
        });
    }
    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
        return Err(ApiException::from(api_error))
            .with_context(|| format!("survey backend returned {status}"));
    }
    Err(anyhow!("survey backend returned {status}: {body}"))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    response
        .json()
        .await
        .context("failed to decode survey backend response")
}

#[async_trait]
impl SurveyApi for HttpSurveyApi {
    async fn get_team_info(&self, team_id: &TeamId) -> Result<TeamInfoDto> {
        let response = self
            .http
            .get(self.endpoint(&["teams", team_id.as_str()]))
            .send()
            .await?;
        decode(response).await
    }

    async fn submit_organization_info(
        &self,
        organization: &OrganizationDto,
    ) -> Result<OrganizationDto> {
        let response = self
            .http
            .post(self.endpoint(&["organizations"]))
            .json(organization)
            .send()
            .await?;
        decode(response).await
    }

    async fn submit_participant_response(
        &self,
        participant_id: &MemberId,
        response: &SurveyResponseDto,
    ) -> Result<()> {
        let res = self
            .http
            .post(self.endpoint(&["participants", participant_id.as_str(), "responses"]))
            .json(response)
            .send()
            .await?;
        ensure_success(res).await?;
        Ok(())
    }

    async fn get_stats(&self) -> Result<StatsDto> {
        let response = self.http.get(self.endpoint(&["stats"])).send().await?;
        decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;

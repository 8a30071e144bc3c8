use std::sync::Arc;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use shared::domain::TeamId;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, error, info};

pub mod api;
pub mod config;
pub mod error;
pub mod mappers;
pub mod models;
pub mod state;

pub use api::{HttpSurveyApi, MissingSurveyApi, SurveyApi};
pub use config::{Settings, TeamSizeBounds};
pub use error::{ConfigError, MapperError, ResponseError, StoreError};
pub use state::{AppState, MemberRef, Mutation, MutationKind, TeamRef};

use mappers::{
    Mapper, OrganizationRegistrationMapper, StatsMapper, SurveyResponseMapper,
    TeamWithOrganizationInfoMapper,
};
use models::{OrganizationInfo, Stats, SurveySummary, TeamMember, TeamWithOrganizationInfo};

const STATE_CHANGE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub mutation: MutationKind,
}

// No lock is held across a backend request.
pub struct SurveyStore {
    api: Arc<dyn SurveyApi>,
    state: RwLock<AppState>,
    rng: Mutex<StdRng>,
    events: broadcast::Sender<StateChange>,
}

impl SurveyStore {
    pub fn new(api: Arc<dyn SurveyApi>, state: AppState) -> Arc<Self> {
        Self::with_rng(api, state, StdRng::from_entropy())
    }

    pub fn with_rng(api: Arc<dyn SurveyApi>, state: AppState, rng: StdRng) -> Arc<Self> {
        let (events, _) = broadcast::channel(STATE_CHANGE_CAPACITY);
        Arc::new(Self {
            api,
            state: RwLock::new(state),
            rng: Mutex::new(rng),
            events,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Arc<Self>> {
        let bounds = settings.team_size_bounds()?;
        let api = HttpSurveyApi::from_settings(settings)?;
        let state = AppState::new(bounds, &settings.site_title, &settings.team_name_prefix);
        Ok(Self::new(Arc::new(api), state))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    pub async fn commit(&self, mutation: Mutation) -> bool {
        let kind = mutation.kind();
        let applied = {
            let mut rng = self.rng.lock().await;
            let mut state = self.state.write().await;
            state.apply(mutation, &mut *rng)
        };
        if !applied {
            debug!(mutation = ?kind, "mutation rejected");
            return false;
        }
        debug!(mutation = ?kind, "committed mutation");
        let _ = self.events.send(StateChange { mutation: kind });
        true
    }

    pub async fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn survey_summary(&self) -> SurveySummary {
        self.read(AppState::survey_summary).await
    }

    pub async fn team_size(&self) -> usize {
        self.read(AppState::team_size).await
    }

    pub async fn members_not_yet_responded(&self) -> Vec<TeamMember> {
        self.read(|state| {
            state
                .members_not_yet_responded()
                .into_iter()
                .cloned()
                .collect()
        })
        .await
    }

    pub async fn stats(&self) -> Option<Stats> {
        self.read(|state| state.stats().cloned()).await
    }

    pub async fn survey_title(&self) -> String {
        self.read(|state| state.survey_title().to_string()).await
    }

    pub async fn is_loading(&self) -> bool {
        self.read(AppState::is_loading).await
    }

    pub async fn progress(&self) -> u32 {
        self.read(AppState::progress).await
    }

    pub async fn registration_info(&self) -> OrganizationInfo {
        self.read(|state| state.registration_info().clone()).await
    }

    pub async fn team_info(&self) -> TeamWithOrganizationInfo {
        self.read(|state| state.team_info().clone()).await
    }

    pub async fn fetch_team_info(&self, team_id: &TeamId) {
        self.commit(Mutation::SetLoading(true)).await;
        match self.load_team_info(team_id).await {
            Ok(team_info) => {
                info!(
                    team_id = %team_id,
                    members = team_info.members.len(),
                    "fetched team info"
                );
                self.commit(Mutation::SetTeamInfo(team_info)).await;
                self.commit(Mutation::GenerateVoiceSurveys).await;
            }
            Err(err) => error!(team_id = %team_id, "failed to fetch team info: {err:#}"),
        }
        self.commit(Mutation::SetLoading(false)).await;
    }

    async fn load_team_info(&self, team_id: &TeamId) -> Result<TeamWithOrganizationInfo> {
        let dto = self.api.get_team_info(team_id).await?;
        Ok(TeamWithOrganizationInfoMapper.create_model_from_dto(dto)?)
    }

    pub async fn register_organization<F>(&self, on_success: F)
    where
        F: FnOnce() + Send,
    {
        let registration = self.registration_info().await;
        let mapper = OrganizationRegistrationMapper;
        let dto = match mapper.create_dto_from_model(&registration) {
            Ok(dto) => dto,
            Err(err) => {
                error!("failed to map registration info: {err}");
                return;
            }
        };

        self.commit(Mutation::SetLoading(true)).await;
        match self.submit_registration(&mapper, dto).await {
            Ok(created) => {
                info!(
                    organization_id = %created.id,
                    teams = created.teams.len(),
                    "registered organization"
                );
                self.commit(Mutation::ReplaceRegistrationInfo(created)).await;
                on_success();
            }
            Err(err) => error!("failed to register organization: {err:#}"),
        }
        self.commit(Mutation::SetLoading(false)).await;
    }

    async fn submit_registration(
        &self,
        mapper: &OrganizationRegistrationMapper,
        dto: shared::dto::OrganizationDto,
    ) -> Result<OrganizationInfo> {
        let created = self.api.submit_organization_info(&dto).await?;
        Ok(mapper.create_model_from_dto(created)?)
    }

    /// Runs exactly one continuation unless no participant is set, in which case
    /// nothing is sent.
    pub async fn submit_response<S, F>(
        &self,
        on_success: S,
        on_failure: F,
    ) -> Result<(), StoreError>
    where
        S: FnOnce() + Send,
        F: FnOnce() + Send,
    {
        let (participant_id, survey) = self
            .read(|state| {
                (
                    state.active_participant().id.clone(),
                    state.survey().clone(),
                )
            })
            .await;
        if participant_id.is_unassigned() {
            return Err(StoreError::NoActiveParticipant);
        }

        let dto = match SurveyResponseMapper.create_dto_from_model(&survey) {
            Ok(dto) => dto,
            Err(err) => {
                error!(participant_id = %participant_id, "failed to map survey response: {err}");
                on_failure();
                return Ok(());
            }
        };

        self.commit(Mutation::SetLoading(true)).await;
        match self
            .api
            .submit_participant_response(&participant_id, &dto)
            .await
        {
            Ok(()) => {
                info!(participant_id = %participant_id, "submitted survey response");
                on_success();
            }
            Err(err) => {
                error!(
                    participant_id = %participant_id,
                    "failed to submit survey response: {err:#}"
                );
                on_failure();
            }
        }
        self.commit(Mutation::SetLoading(false)).await;
        Ok(())
    }

    pub async fn fetch_stats(&self) {
        match self.load_stats().await {
            Ok(stats) => {
                self.commit(Mutation::SetStats(stats)).await;
            }
            Err(err) => error!("failed to fetch stats: {err:#}"),
        }
    }

    async fn load_stats(&self) -> Result<Stats> {
        let dto = self.api.get_stats().await?;
        Ok(StatsMapper.create_model_from_dto(dto)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

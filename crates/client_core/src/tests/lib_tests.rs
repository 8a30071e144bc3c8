use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use crate::models::{LikertResponse, MinMaxResponse, VoiceSurvey};
use shared::{
    domain::{MemberId, OrganizationId},
    dto::{
        MemberDto, OrganizationDto, OrganizationGeneralInfoDto, StatsDto, SurveyResponseDto,
        TeamInfoDto,
    },
};
use tokio::sync::Notify;

fn team_info_dto() -> TeamInfoDto {
    TeamInfoDto {
        id: TeamId::new("t-1"),
        name: "Blue".into(),
        link: "https://meet.example/blue".into(),
        members: ["m-1", "m-2", "m-3", "m-4"]
            .iter()
            .enumerate()
            .map(|(i, id)| MemberDto {
                id: MemberId::new(*id),
                name: format!("Member {i}"),
                has_participated: i == 0,
            })
            .collect(),
        organization: OrganizationGeneralInfoDto {
            name: "Acme".into(),
            email: "ops@acme.example".into(),
            phone: String::new(),
        },
    }
}

fn stats_dto(responses: u64) -> StatsDto {
    StatsDto {
        organizations_count: 1,
        teams_count: 2,
        participants_count: 8,
        responses_count: responses,
        generated_at: None,
    }
}

/// Backend stand-in that records every request it receives.
struct RecordingApi {
    fail_with: Option<String>,
    calls: Mutex<Vec<&'static str>>,
    registered: Mutex<Vec<OrganizationDto>>,
    submitted: Mutex<Vec<(MemberId, SurveyResponseDto)>>,
}

impl RecordingApi {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            calls: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(err.into()),
            calls: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        })
    }

    async fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().await.push(call);
        match &self.fail_with {
            Some(err) => Err(anyhow!(err.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SurveyApi for RecordingApi {
    async fn get_team_info(&self, _team_id: &TeamId) -> Result<TeamInfoDto> {
        self.record("get_team_info").await?;
        Ok(team_info_dto())
    }

    async fn submit_organization_info(
        &self,
        organization: &OrganizationDto,
    ) -> Result<OrganizationDto> {
        self.record("submit_organization_info").await?;
        self.registered.lock().await.push(organization.clone());

        let mut created = organization.clone();
        created.id = OrganizationId::new("org-1");
        for (t, team) in created.teams.iter_mut().enumerate() {
            team.id = TeamId::new(format!("team-{t}"));
            for (m, member) in team.members.iter_mut().enumerate() {
                member.id = MemberId::new(format!("member-{t}-{m}"));
            }
        }
        Ok(created)
    }

    async fn submit_participant_response(
        &self,
        participant_id: &MemberId,
        response: &SurveyResponseDto,
    ) -> Result<()> {
        self.record("submit_participant_response").await?;
        self.submitted
            .lock()
            .await
            .push((participant_id.clone(), response.clone()));
        Ok(())
    }

    async fn get_stats(&self) -> Result<StatsDto> {
        self.record("get_stats").await?;
        Ok(stats_dto(3))
    }
}

/// Holds `get_team_info` open until the test releases it.
struct GatedApi {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl SurveyApi for GatedApi {
    async fn get_team_info(&self, _team_id: &TeamId) -> Result<TeamInfoDto> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(team_info_dto())
    }

    async fn submit_organization_info(
        &self,
        _organization: &OrganizationDto,
    ) -> Result<OrganizationDto> {
        Err(anyhow!("not used"))
    }

    async fn submit_participant_response(
        &self,
        _participant_id: &MemberId,
        _response: &SurveyResponseDto,
    ) -> Result<()> {
        Err(anyhow!("not used"))
    }

    async fn get_stats(&self) -> Result<StatsDto> {
        Err(anyhow!("not used"))
    }
}

fn store_with(api: Arc<dyn SurveyApi>) -> Arc<SurveyStore> {
    SurveyStore::with_rng(api, AppState::default(), StdRng::seed_from_u64(11))
}

fn drain(rx: &mut broadcast::Receiver<StateChange>) -> Vec<MutationKind> {
    let mut kinds = Vec::new();
    while let Ok(change) = rx.try_recv() {
        kinds.push(change.mutation);
    }
    kinds
}

async fn fill_registration(store: &SurveyStore) {
    store
        .commit(Mutation::UpdateGeneralInfo(crate::models::OrganizationGeneralInfo {
            name: "Acme".into(),
            email: "ops@acme.example".into(),
            phone: "021-555".into(),
        }))
        .await;
    store.commit(Mutation::AddTeam).await;
    for member in 0..3 {
        store
            .commit(Mutation::UpdateMember {
                team: TeamRef(1),
                member: MemberRef(member),
                name: format!("Person {member}"),
            })
            .await;
    }
}

#[tokio::test]
async fn fetch_team_info_commits_team_and_generates_voice_surveys() {
    let api = RecordingApi::ok();
    let store = store_with(api.clone());
    let mut rx = store.subscribe();

    store.fetch_team_info(&TeamId::new("t-1")).await;

    assert_eq!(store.team_size().await, 4);
    assert!(!store.is_loading().await);
    let pending: Vec<String> = store
        .members_not_yet_responded()
        .await
        .into_iter()
        .map(|m| m.id.0)
        .collect();
    assert_eq!(pending, vec!["m-2", "m-3", "m-4"]);

    let summary = store.survey_summary().await;
    assert_eq!(summary.team.organization.name, "Acme");
    assert_eq!(summary.survey.voice_surveys.len(), 4);
    assert_eq!(summary.unanswered_voice_surveys(), 4);

    assert_eq!(
        drain(&mut rx),
        vec![
            MutationKind::SetLoading,
            MutationKind::SetTeamInfo,
            MutationKind::GenerateVoiceSurveys,
            MutationKind::SetLoading,
        ]
    );
}

#[tokio::test]
async fn fetch_team_info_failure_leaves_state_untouched() {
    let store = store_with(RecordingApi::failing("connection refused"));
    let mut rx = store.subscribe();

    store.fetch_team_info(&TeamId::new("t-1")).await;

    assert_eq!(store.team_size().await, 0);
    assert!(store.survey_summary().await.survey.voice_surveys.is_empty());
    assert!(!store.is_loading().await);
    assert_eq!(
        drain(&mut rx),
        vec![MutationKind::SetLoading, MutationKind::SetLoading]
    );
}

#[tokio::test]
async fn state_is_readable_while_a_request_is_in_flight() {
    let api = Arc::new(GatedApi {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let store = store_with(api.clone());

    let task = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.fetch_team_info(&TeamId::new("t-1")).await })
    };

    api.entered.notified().await;
    assert!(store.is_loading().await);
    assert_eq!(store.team_size().await, 0);

    api.release.notify_one();
    task.await.expect("fetch task");

    assert!(!store.is_loading().await);
    assert_eq!(store.team_size().await, 4);
}

#[tokio::test]
async fn register_organization_replaces_registration_with_created_one() {
    let api = RecordingApi::ok();
    let store = store_with(api.clone());
    fill_registration(&store).await;
    let calls = AtomicUsize::new(0);

    store
        .register_organization(|| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!store.is_loading().await);

    let registered = api.registered.lock().await;
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].teams.len(), 2);
    assert_eq!(registered[0].teams[1].members[2].name, "Person 2");

    let info = store.registration_info().await;
    assert_eq!(info.id.as_str(), "org-1");
    assert_eq!(info.teams[1].id.as_str(), "team-1");
    assert_eq!(info.teams[1].members[0].id.as_str(), "member-1-0");
    assert_eq!(info.teams[1].members[0].name, "Person 0");
}

#[tokio::test]
async fn register_organization_failure_skips_continuation() {
    let store = store_with(RecordingApi::failing("500 internal"));
    fill_registration(&store).await;
    let before = store.registration_info().await;
    let calls = AtomicUsize::new(0);

    store
        .register_organization(|| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.registration_info().await, before);
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn submit_response_without_participant_rejects_before_any_request() {
    let api = RecordingApi::ok();
    let store = store_with(api.clone());
    let mut rx = store.subscribe();
    let successes = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    let result = store
        .submit_response(
            || {
                successes.fetch_add(1, Ordering::SeqCst);
            },
            || {
                failures.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;

    assert_eq!(result, Err(StoreError::NoActiveParticipant));
    assert_eq!(successes.load(Ordering::SeqCst), 0);
    assert_eq!(failures.load(Ordering::SeqCst), 0);
    assert!(api.calls.lock().await.is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn submit_response_sends_survey_keyed_by_participant() {
    let api = RecordingApi::ok();
    let store = store_with(api.clone());
    store.fetch_team_info(&TeamId::new("t-1")).await;
    let participant = store.team_info().await.members[1].clone();
    store
        .commit(Mutation::SetActiveParticipant(participant.clone()))
        .await;
    store
        .commit(Mutation::SetOverconfidenceResponse {
            index: 2,
            response: MinMaxResponse::new(1.0, 9.0).expect("range"),
        })
        .await;
    store
        .commit(Mutation::SetVoiceSurveyResponse(
            VoiceSurvey::new(participant.clone())
                .with_response(LikertResponse::new(3).expect("likert")),
        ))
        .await;
    let successes = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    store
        .submit_response(
            || {
                successes.fetch_add(1, Ordering::SeqCst);
            },
            || {
                failures.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await
        .expect("participant is set");

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(failures.load(Ordering::SeqCst), 0);
    assert!(!store.is_loading().await);

    let submitted = api.submitted.lock().await;
    assert_eq!(submitted.len(), 1);
    let (participant_id, dto) = &submitted[0];
    assert_eq!(participant_id, &participant.id);
    assert!(dto.overconfidence_survey_response.q02.is_some());
    assert_eq!(dto.voice_survey_responses.len(), 4);
    let rated = dto
        .voice_survey_responses
        .iter()
        .find(|v| v.team_member == participant.id)
        .expect("voice response");
    assert_eq!(rated.response, Some(3));
}

#[tokio::test]
async fn submit_response_failure_runs_only_failure_continuation() {
    let store = store_with(RecordingApi::failing("timed out"));
    store
        .commit(Mutation::SetActiveParticipant(crate::models::TeamMember::new("m-1", "Ali")))
        .await;
    let successes = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    store
        .submit_response(
            || {
                successes.fetch_add(1, Ordering::SeqCst);
            },
            || {
                failures.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await
        .expect("participant is set");

    assert_eq!(successes.load(Ordering::SeqCst), 0);
    assert_eq!(failures.load(Ordering::SeqCst), 1);
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn fetch_stats_commits_without_touching_loading() {
    let store = store_with(RecordingApi::ok());
    let mut rx = store.subscribe();

    store.fetch_stats().await;

    let stats = store.stats().await.expect("stats");
    assert_eq!(stats.responses, 3);
    assert_eq!(drain(&mut rx), vec![MutationKind::SetStats]);
}

#[tokio::test]
async fn fetch_stats_failure_keeps_previous_stats() {
    let store = store_with(RecordingApi::failing("connection reset"));
    store
        .commit(Mutation::SetStats(crate::models::Stats {
            responses: 9,
            ..crate::models::Stats::default()
        }))
        .await;
    let mut rx = store.subscribe();

    store.fetch_stats().await;

    assert_eq!(store.stats().await.map(|s| s.responses), Some(9));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn store_exposes_title_and_progress() {
    let store = store_with(RecordingApi::ok());
    store.commit(Mutation::SetProgress(1)).await;
    store.commit(Mutation::SetProgress(3)).await;

    assert_eq!(store.progress().await, 1);
    assert_eq!(store.survey_title().await, config::SITE_TITLE);
    assert_eq!(store.snapshot().await.progress(), 1);
}

#[tokio::test]
async fn rejected_mutations_are_not_broadcast() {
    let store = store_with(RecordingApi::ok());
    let mut rx = store.subscribe();

    assert!(store.commit(Mutation::SetProgress(1)).await);
    assert!(!store.commit(Mutation::SetProgress(4)).await);
    assert!(!store.commit(Mutation::RemoveTeam { team: TeamRef(0) }).await);
    assert!(
        !store
            .commit(Mutation::RemoveMember {
                team: TeamRef(0),
                member: MemberRef(0),
            })
            .await
    );

    assert_eq!(drain(&mut rx), vec![MutationKind::SetProgress]);
    assert_eq!(store.progress().await, 1);
}

#[test]
fn from_settings_rejects_invalid_bounds() {
    let settings = Settings {
        minimum_team_size: 5,
        maximum_team_size: 4,
        ..Settings::default()
    };
    assert!(SurveyStore::from_settings(&settings).is_err());
}

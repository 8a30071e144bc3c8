use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings,
    models::{GeneralSurvey, LikertResponse, MinMaxResponse, OrganizationGeneralInfo},
    AppState, MemberRef, Mutation, SurveyStore, TeamRef,
};
use serde_json::json;
use shared::domain::TeamId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod input;

use input::{read_json, AnswersFile, RegistrationFile};

#[derive(Parser, Debug)]
#[command(name = "survey_cli", about = "Team coordination survey client")]
struct Cli {
    /// Overrides the backend base URL from settings.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints aggregate backend stats.
    Stats,
    /// Prints the survey summary for a team.
    TeamInfo { team_id: String },
    /// Registers an organization and its teams.
    Register { file: PathBuf },
    /// Submits one participant's answers.
    Submit {
        file: PathBuf,
        #[arg(long)]
        team: String,
        #[arg(long)]
        participant: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    info!(api_base_url = %settings.api_base_url, "starting survey client");
    let store = SurveyStore::from_settings(&settings)?;

    match cli.command {
        Command::Stats => {
            store.fetch_stats().await;
            let Some(stats) = store.stats().await else {
                bail!("could not fetch stats from {}", settings.api_base_url);
            };
            let response_rate = stats.response_rate();
            print_json(&json!({
                "stats": stats,
                "response_rate": response_rate,
            }))?;
        }
        Command::TeamInfo { team_id } => {
            load_team(&store, &team_id).await?;
            let summary = store.survey_summary().await;
            let unanswered_voice_surveys = summary.unanswered_voice_surveys();
            print_json(&json!({
                "title": store.survey_title().await,
                "summary": summary,
                "unanswered_voice_surveys": unanswered_voice_surveys,
                "team_size": store.team_size().await,
                "not_yet_responded": store.members_not_yet_responded().await,
            }))?;
        }
        Command::Register { file } => {
            let registration: RegistrationFile = read_json(&file)?;
            let bounds = store.read(AppState::team_size_bounds).await;
            registration
                .validate(bounds)
                .with_context(|| format!("invalid registration file '{}'", file.display()))?;
            fill_registration(&store, registration).await;

            let registered = Arc::new(AtomicBool::new(false));
            let flag = registered.clone();
            store
                .register_organization(move || flag.store(true, Ordering::SeqCst))
                .await;
            if !registered.load(Ordering::SeqCst) {
                bail!("organization registration failed");
            }
            print_json(&store.registration_info().await)?;
        }
        Command::Submit {
            file,
            team,
            participant,
        } => {
            let answers: AnswersFile = read_json(&file)?;
            load_team(&store, &team).await?;

            let team_info = store.team_info().await;
            let Some(member) = team_info
                .members
                .iter()
                .find(|m| m.id.as_str() == participant)
                .cloned()
            else {
                bail!("participant {participant} is not a member of team {team}");
            };
            if member.has_participated {
                warn!(participant_id = %member.id, "participant has already responded");
            }
            store.commit(Mutation::SetActiveParticipant(member)).await;
            apply_answers(&store, answers).await?;

            let submitted = Arc::new(AtomicBool::new(false));
            let flag = submitted.clone();
            store
                .submit_response(move || flag.store(true, Ordering::SeqCst), || {})
                .await?;
            if !submitted.load(Ordering::SeqCst) {
                bail!("survey submission failed for participant {participant}");
            }
            print_json(&json!({
                "participant": participant,
                "submitted": true,
                "summary": store.survey_summary().await,
            }))?;
        }
    }

    Ok(())
}

async fn load_team(store: &SurveyStore, team_id: &str) -> Result<()> {
    store.fetch_team_info(&TeamId::new(team_id)).await;
    if store.team_info().await.id.as_str() != team_id {
        bail!("could not load team {team_id}");
    }
    Ok(())
}

/// Replays a validated registration file as form edits.
async fn fill_registration(store: &SurveyStore, registration: RegistrationFile) {
    store
        .commit(Mutation::UpdateGeneralInfo(OrganizationGeneralInfo {
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
        }))
        .await;

    for (t, entry) in registration.teams.into_iter().enumerate() {
        let team = TeamRef(t);
        if t > 0 {
            store.commit(Mutation::AddTeam).await;
        }
        store
            .commit(Mutation::UpdateTeam {
                team,
                name: entry.name.clone(),
                link: entry.link,
            })
            .await;

        let current = store.read(|state| team_len(state, team)).await;
        for _ in current..entry.members.len() {
            store.commit(Mutation::AddMember { team }).await;
        }
        for (m, name) in entry.members.into_iter().enumerate() {
            store
                .commit(Mutation::UpdateMember {
                    team,
                    member: MemberRef(m),
                    name,
                })
                .await;
        }
    }
}

fn team_len(state: &AppState, team: TeamRef) -> usize {
    state
        .registration_info()
        .teams
        .get(team.0)
        .map_or(0, |t| t.members.len())
}

async fn apply_answers(store: &SurveyStore, answers: AnswersFile) -> Result<()> {
    store
        .commit(Mutation::SetGeneralSurvey(GeneralSurvey {
            id: None,
            age: answers.age,
            sex: answers.sex,
        }))
        .await;
    store.commit(Mutation::SetProgress(1)).await;

    for answer in answers.overconfidence {
        let response = MinMaxResponse::new(answer.min, answer.max)
            .with_context(|| format!("overconfidence question {}", answer.question))?;
        store
            .commit(Mutation::SetOverconfidenceResponse {
                index: answer.question,
                response,
            })
            .await;
    }
    store.commit(Mutation::SetProgress(2)).await;

    for answer in answers.team_coordination {
        let response = LikertResponse::new(answer.value)
            .with_context(|| format!("team coordination question {}", answer.question))?;
        store
            .commit(Mutation::SetTeamCoordinationResponse {
                index: answer.question,
                response,
            })
            .await;
    }
    store.commit(Mutation::SetProgress(3)).await;

    let voice_surveys = store.read(|state| state.survey().voice_surveys.clone()).await;
    for answer in answers.voice {
        let Some(survey) = voice_surveys
            .iter()
            .find(|s| s.id().as_str() == answer.member)
            .cloned()
        else {
            warn!(member_id = %answer.member, "no voice survey for member, skipping");
            continue;
        };
        let response = LikertResponse::new(answer.value)
            .with_context(|| format!("voice answer for member {}", answer.member))?;
        store
            .commit(Mutation::SetVoiceSurveyResponse(
                survey.with_response(response),
            ))
            .await;
    }
    store.commit(Mutation::SetProgress(4)).await;
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! JSON input files accepted by the `register` and `submit` subcommands.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use client_core::TeamSizeBounds;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Deserialize)]
pub struct RegistrationFile {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub teams: Vec<TeamEntry>,
}

impl RegistrationFile {
    /// Rejects files the registration form could not reproduce as written.
    pub fn validate(&self, bounds: TeamSizeBounds) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("organization name must not be blank");
        }
        if self.teams.is_empty() {
            bail!("registration must list at least one team");
        }
        for (t, team) in self.teams.iter().enumerate() {
            let label = if team.name.trim().is_empty() {
                format!("team #{}", t + 1)
            } else {
                format!("team '{}'", team.name)
            };
            if !bounds.contains(team.members.len()) {
                bail!(
                    "{label} has {} members, expected between {} and {}",
                    team.members.len(),
                    bounds.minimum(),
                    bounds.maximum()
                );
            }
            if let Some(m) = team.members.iter().position(|name| name.trim().is_empty()) {
                bail!("{label} has a blank name for member #{}", m + 1);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    #[serde(default)]
    pub link: String,
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswersFile {
    pub age: u32,
    pub sex: String,
    #[serde(default)]
    pub overconfidence: Vec<RangeAnswer>,
    #[serde(default)]
    pub team_coordination: Vec<ScaleAnswer>,
    #[serde(default)]
    pub voice: Vec<VoiceAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct RangeAnswer {
    pub question: usize,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize)]
pub struct ScaleAnswer {
    pub question: usize,
    pub value: u8,
}

#[derive(Debug, Deserialize)]
pub struct VoiceAnswer {
    pub member: String,
    pub value: u8,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

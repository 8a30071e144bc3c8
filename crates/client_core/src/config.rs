use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

pub const SITE_TITLE: &str = "Team Coordination Survey";
pub const MINIMUM_TEAM_SIZE: usize = 3;
pub const MAXIMUM_TEAM_SIZE: usize = 10;
pub const TEAM_NAME_PREFIX: &str = "Team";
pub const SETTINGS_FILE: &str = "survey.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSizeBounds {
    minimum: usize,
    maximum: usize,
}

impl TeamSizeBounds {
    pub fn new(minimum: usize, maximum: usize) -> Result<Self, ConfigError> {
        if minimum == 0 || minimum > maximum {
            return Err(ConfigError::InvalidTeamSizeBounds { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    pub fn contains(&self, size: usize) -> bool {
        (self.minimum..=self.maximum).contains(&size)
    }
}

impl Default for TeamSizeBounds {
    fn default() -> Self {
        Self {
            minimum: MINIMUM_TEAM_SIZE,
            maximum: MAXIMUM_TEAM_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub site_title: String,
    pub minimum_team_size: usize,
    pub maximum_team_size: usize,
    pub team_name_prefix: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".into(),
            site_title: SITE_TITLE.into(),
            minimum_team_size: MINIMUM_TEAM_SIZE,
            maximum_team_size: MAXIMUM_TEAM_SIZE,
            team_name_prefix: TEAM_NAME_PREFIX.into(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn team_size_bounds(&self) -> Result<TeamSizeBounds, ConfigError> {
        TeamSizeBounds::new(self.minimum_team_size, self.maximum_team_size)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    site_title: Option<String>,
    minimum_team_size: Option<usize>,
    maximum_team_size: Option<usize>,
    team_name_prefix: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Settings {
    let mut settings = load_settings_from(Path::new(SETTINGS_FILE));
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Defaults overlaid with the given TOML file. A missing or malformed file leaves
/// the defaults in place.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    let Ok(raw) = fs::read_to_string(path) else {
        return settings;
    };

    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
        Err(err) => warn!(path = %path.display(), "ignoring malformed settings file: {err}"),
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.site_title {
        settings.site_title = v;
    }
    if let Some(v) = file_cfg.minimum_team_size {
        settings.minimum_team_size = v;
    }
    if let Some(v) = file_cfg.maximum_team_size {
        settings.maximum_team_size = v;
    }
    if let Some(v) = file_cfg.team_name_prefix {
        settings.team_name_prefix = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SURVEY_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__SITE_TITLE") {
        settings.site_title = v;
    }
    if let Some(v) = lookup("APP__TEAM_NAME_PREFIX") {
        settings.team_name_prefix = v;
    }

    if let Some(v) = lookup("APP__MINIMUM_TEAM_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.minimum_team_size = parsed;
        }
    }
    if let Some(v) = lookup("APP__MAXIMUM_TEAM_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.maximum_team_size = parsed;
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

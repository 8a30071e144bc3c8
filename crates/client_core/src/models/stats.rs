use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub organizations: u64,
    pub teams: u64,
    pub participants: u64,
    pub responses: u64,
    pub generated_at: Option<DateTime<Utc>>,
}

impl Stats {
    /// Share of registered participants that have submitted, in `0.0..=1.0`.
    pub fn response_rate(&self) -> f64 {
        if self.participants == 0 {
            return 0.0;
        }
        (self.responses as f64 / self.participants as f64).min(1.0)
    }
}

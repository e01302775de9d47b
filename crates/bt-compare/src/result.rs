//! Simulator run results.
//!
//! The `battle` tool prints a JSON array of per-scenario summaries when run
//! with `-j`. Only the first entry is used.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors turning simulator output into a `RunResult`.
#[derive(Debug, Error)]
pub enum ResultError {
    #[error("Simulator output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Simulator output contained no results")]
    Empty,
}

/// One summary entry as emitted by the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SimulatorEntry {
    times: Vec<f64>,
    average_time: f64,
    #[serde(default)]
    wins: Vec<u32>,
    #[serde(default)]
    losses: Vec<u32>,
    #[serde(default)]
    draws: Vec<u32>,
}

/// Result of a single simulator invocation for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub scenario_name: String,
    /// Per-trial durations; the index identifies the trial seed.
    pub times: Vec<f64>,
    pub average_time: f64,
    /// Seeds won, lost and drawn.
    pub wins: Vec<u32>,
    pub losses: Vec<u32>,
    pub draws: Vec<u32>,
}

impl RunResult {
    /// Parse the simulator's stdout for `scenario_name`.
    pub fn from_simulator_output(scenario_name: &str, output: &str) -> Result<Self, ResultError> {
        let entries: Vec<SimulatorEntry> = serde_json::from_str(output)?;
        let entry = entries.into_iter().next().ok_or(ResultError::Empty)?;
        Ok(Self {
            scenario_name: scenario_name.to_string(),
            times: entry.times,
            average_time: entry.average_time,
            wins: entry.wins,
            losses: entry.losses,
            draws: entry.draws,
        })
    }

    /// True if any trial was lost or drawn.
    pub fn has_unfinished(&self) -> bool {
        !self.losses.is_empty() || !self.draws.is_empty()
    }
}

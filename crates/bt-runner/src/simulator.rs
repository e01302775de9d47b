//! Runs the Oort `battle` simulator and parses its JSON summary.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use bt_compare::RunResult;

use crate::config::{Config, ResolvedScenario};
use crate::error::RunnerError;

/// Log filter handed to the simulator so only its JSON reaches stdout.
const SIMULATOR_LOG: &str = "error";

pub struct Simulator {
    battle: PathBuf,
    source: PathBuf,
}

impl Simulator {
    pub fn new(battle: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            battle: battle.into(),
            source: source.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.battle, &config.source)
    }

    /// `battle -j <scenario> <source> <enemy>`
    pub fn command(&self, scenario: &ResolvedScenario) -> Command {
        let mut cmd = Command::new(&self.battle);
        cmd.arg("-j")
            .arg(&scenario.name)
            .arg(&self.source)
            .arg(&scenario.enemy)
            .env("RUST_LOG", SIMULATOR_LOG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run the scenario to completion. Blocks with no timeout.
    pub fn run(&self, scenario: &ResolvedScenario) -> Result<RunResult, RunnerError> {
        let mut cmd = self.command(scenario);
        log::debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|source| RunnerError::Spawn {
            program: self.battle.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RunnerError::SimulatorFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(RunResult::from_simulator_output(&scenario.name, &stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn scenario() -> ResolvedScenario {
        ResolvedScenario {
            requested: "lead".into(),
            name: "tutorial_lead".into(),
            enemy: PathBuf::from("/o/enemy.rs"),
        }
    }

    #[test]
    fn test_command_shape() {
        let sim = Simulator::new("/o/target/debug/battle", "/ai/target/bundle_output.rs");
        let cmd = sim.command(&scenario());
        assert_eq!(cmd.get_program(), OsStr::new("/o/target/debug/battle"));
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("-j"),
                OsStr::new("tutorial_lead"),
                OsStr::new("/ai/target/bundle_output.rs"),
                OsStr::new("/o/enemy.rs"),
            ]
        );
        let log = cmd
            .get_envs()
            .find(|(k, _)| *k == OsStr::new("RUST_LOG"))
            .and_then(|(_, v)| v);
        assert_eq!(log, Some(OsStr::new("error")));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let sim = Simulator::new("/nonexistent/battle", "/ai/src.rs");
        let err = sim.run(&scenario()).unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
        assert!(!err.is_missing_artifact());
    }
}

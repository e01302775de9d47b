//! Paths to the Oort checkout, the AI under test and the history file.

use std::path::{Path, PathBuf};

use crate::error::RunnerError;

/// AI source, relative to the AI root.
pub const DEFAULT_SOURCE: &str = "./target/bundle_output.rs";
/// History document, relative to the working directory.
pub const DEFAULT_TIMES_FILE: &str = "./times.json";

const SCENARIO_DIR: &str = "shared/simulator/src/scenario";
const BUILTIN_AI_DIR: &str = "shared/builtin_ai/src";
const TUTORIAL_AI_DIR: &str = "tutorial";
const DEFAULT_ENEMY: &str = "tutorial_acceleration_initial.rs";
const BATTLE_BINARY: &str = "target/debug/battle";

/// Resolved locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Checkout of the Oort game (simulator, scenarios, built-in AIs).
    pub oort_root: PathBuf,
    /// Repository holding the AI under test; git runs here.
    pub ai_root: PathBuf,
    pub source: PathBuf,
    pub battle: PathBuf,
    pub times_path: PathBuf,
}

impl Config {
    /// Config with every path derived from the two roots.
    pub fn new(oort_root: impl Into<PathBuf>, ai_root: impl Into<PathBuf>) -> Self {
        let oort_root = oort_root.into();
        let ai_root = ai_root.into();
        Self {
            source: join_relative(&ai_root, Path::new(DEFAULT_SOURCE)),
            battle: oort_root.join(BATTLE_BINARY),
            times_path: PathBuf::from(DEFAULT_TIMES_FILE),
            oort_root,
            ai_root,
        }
    }

    /// Roots default to `~/repos/oort3` and `~/repos/oort_ai`.
    pub fn from_roots(oort_root: Option<PathBuf>, ai_root: Option<PathBuf>) -> Result<Self, RunnerError> {
        let oort_root = match oort_root {
            Some(p) => p,
            None => home_repo("oort3")?,
        };
        let ai_root = match ai_root {
            Some(p) => p,
            None => home_repo("oort_ai")?,
        };
        Ok(Self::new(oort_root, ai_root))
    }

    /// Source path relative to the AI root.
    pub fn with_source(mut self, relative: &Path) -> Self {
        self.source = join_relative(&self.ai_root, relative);
        self
    }

    pub fn with_battle(mut self, battle: PathBuf) -> Self {
        self.battle = battle;
        self
    }

    pub fn with_times_path(mut self, times_path: PathBuf) -> Self {
        self.times_path = times_path;
        self
    }

    fn builtin_ai_dir(&self) -> PathBuf {
        self.oort_root.join(BUILTIN_AI_DIR).join(TUTORIAL_AI_DIR)
    }

    /// Enemy used when a scenario has no tutorial opponent of its own.
    pub fn default_enemy(&self) -> PathBuf {
        self.builtin_ai_dir().join(DEFAULT_ENEMY)
    }

    /// Map a requested scenario to the simulator's name and its enemy AI.
    ///
    /// Scenarios with a `tutorial_<name>` definition run under that name
    /// against `tutorial_<name>_enemy.rs`, falling back to the default enemy
    /// when that file is absent.
    pub fn resolve_scenario(&self, requested: &str) -> ResolvedScenario {
        let tutorial = format!("tutorial_{}", requested);
        let scenario_file = self
            .oort_root
            .join(SCENARIO_DIR)
            .join(format!("{}.rs", tutorial));

        let (name, enemy) = if scenario_file.exists() {
            let enemy = self.builtin_ai_dir().join(format!("{}_enemy.rs", tutorial));
            (tutorial, enemy)
        } else {
            (requested.to_string(), self.default_enemy())
        };

        let enemy = if enemy.exists() {
            enemy
        } else {
            self.default_enemy()
        };

        log::debug!("Resolved scenario {} -> {} (enemy {})", requested, name, enemy.display());
        ResolvedScenario {
            requested: requested.to_string(),
            name,
            enemy,
        }
    }

    pub fn check_source(&self) -> Result<(), RunnerError> {
        if self.source.exists() {
            Ok(())
        } else {
            Err(RunnerError::MissingSource(self.source.clone()))
        }
    }
}

/// A scenario as the simulator knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScenario {
    /// Name given on the command line; used for tags.
    pub requested: String,
    /// Name passed to the simulator and used as the history key.
    pub name: String,
    pub enemy: PathBuf,
}

impl ResolvedScenario {
    pub fn is_tutorial(&self) -> bool {
        self.name != self.requested
    }

    pub fn check_enemy(&self) -> Result<(), RunnerError> {
        if self.enemy.exists() {
            Ok(())
        } else {
            Err(RunnerError::MissingEnemy(self.enemy.clone()))
        }
    }
}

fn home_repo(name: &str) -> Result<PathBuf, RunnerError> {
    dirs::home_dir()
        .map(|home| home.join("repos").join(name))
        .ok_or(RunnerError::NoHomeDir)
}

/// Join, dropping a leading `./` so printed paths stay clean.
fn join_relative(root: &Path, relative: &Path) -> PathBuf {
    root.join(relative.strip_prefix(".").unwrap_or(relative))
}

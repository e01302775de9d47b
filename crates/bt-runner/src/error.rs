use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use bt_compare::ResultError;

/// Runner errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Source file does not exist!")]
    MissingSource(PathBuf),

    #[error("Enemy AI file does not exist!")]
    MissingEnemy(PathBuf),

    #[error("Could not determine home directory; pass --oort-root and --ai-root")]
    NoHomeDir,

    #[error("Failed to launch simulator {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Simulator exited with {status}: {stderr}")]
    SimulatorFailed { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Output(#[from] ResultError),
}

impl RunnerError {
    /// Missing input files end the run quietly instead of failing it.
    pub fn is_missing_artifact(&self) -> bool {
        matches!(self, RunnerError::MissingSource(_) | RunnerError::MissingEnemy(_))
    }
}

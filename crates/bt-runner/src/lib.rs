//! Plumbing around the comparator: locating the Oort checkout and the AI
//! source, running the `battle` simulator, and publishing through git.

pub mod config;
pub mod error;
pub mod git;
pub mod simulator;

pub use config::{Config, ResolvedScenario};
pub use error::RunnerError;
pub use git::GitPublisher;
pub use simulator::Simulator;

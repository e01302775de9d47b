//! Publishing a new best to version control.
//!
//! Every step is attempted even if an earlier one fails; failures are
//! collected in the `PublishReport` rather than returned as errors.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// A version-control step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PublishStep {
    #[strum(serialize = "stage")]
    Stage,
    #[strum(serialize = "commit")]
    Commit,
    #[strum(serialize = "tag")]
    Tag,
    #[strum(serialize = "push")]
    Push,
    #[strum(serialize = "push tags")]
    PushTags,
}

#[derive(Debug, Error)]
#[error("{step} failed: {reason}")]
pub struct PublishError {
    pub step: PublishStep,
    pub reason: String,
}

impl PublishError {
    pub fn new(step: PublishStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

/// Version-control capability used to publish a new best.
pub trait Publisher {
    /// Stage all changes in the working tree.
    fn stage_all(&mut self) -> Result<(), PublishError>;
    fn commit(&mut self, message: &str) -> Result<(), PublishError>;
    fn tag(&mut self, name: &str) -> Result<(), PublishError>;
    /// Push the current branch.
    fn push(&mut self) -> Result<(), PublishError>;
    fn push_tags(&mut self) -> Result<(), PublishError>;
}

/// Commit message and tag for a new best.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    pub commit_message: String,
    pub tag: String,
}

impl PublishPlan {
    /// `scenario` is the resolved name stored in history; `tag_scenario` is
    /// the name as requested on the command line.
    pub fn new(scenario: &str, tag_scenario: &str, average_time: f64) -> Self {
        Self {
            commit_message: format!("New best {}: {:.3}", scenario, average_time),
            tag: format!("{}-{:.3}", tag_scenario, average_time),
        }
    }
}

/// What happened while publishing.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub completed: Vec<PublishStep>,
    pub failures: Vec<PublishError>,
}

impl PublishReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, step: PublishStep, outcome: Result<(), PublishError>) {
        match outcome {
            Ok(()) => {
                log::debug!("publish: {} ok", step);
                self.completed.push(step);
            }
            Err(e) => {
                log::debug!("publish: {}", e);
                self.failures.push(e);
            }
        }
    }
}

/// Stage, commit, tag, push and push tags, in that order.
pub fn publish_best(publisher: &mut dyn Publisher, plan: &PublishPlan) -> PublishReport {
    let mut report = PublishReport::default();
    report.record(PublishStep::Stage, publisher.stage_all());
    report.record(PublishStep::Commit, publisher.commit(&plan.commit_message));
    report.record(PublishStep::Tag, publisher.tag(&plan.tag));
    report.record(PublishStep::Push, publisher.push());
    report.record(PublishStep::PushTags, publisher.push_tags());
    report
}

/// In-memory publisher that records calls; steps in `fail_on` fail.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub calls: Vec<String>,
    pub fail_on: Vec<PublishStep>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(steps: &[PublishStep]) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: steps.to_vec(),
        }
    }

    fn call(&mut self, step: PublishStep, entry: String) -> Result<(), PublishError> {
        self.calls.push(entry);
        if self.fail_on.contains(&step) {
            Err(PublishError::new(step, "simulated failure"))
        } else {
            Ok(())
        }
    }
}

impl Publisher for RecordingPublisher {
    fn stage_all(&mut self) -> Result<(), PublishError> {
        self.call(PublishStep::Stage, "stage".into())
    }

    fn commit(&mut self, message: &str) -> Result<(), PublishError> {
        self.call(PublishStep::Commit, format!("commit {}", message))
    }

    fn tag(&mut self, name: &str) -> Result<(), PublishError> {
        self.call(PublishStep::Tag, format!("tag {}", name))
    }

    fn push(&mut self) -> Result<(), PublishError> {
        self.call(PublishStep::Push, "push".into())
    }

    fn push_tags(&mut self) -> Result<(), PublishError> {
        self.call(PublishStep::PushTags, "push tags".into())
    }
}

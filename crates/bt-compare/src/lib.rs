//! Best-time comparison for Oort scenario runs.
//!
//! Parses simulator results, diffs them trial-by-trial against the stored
//! best record, renders the comparison, and decides whether the run becomes
//! the new best. Persistence and publication are explicit steps the caller
//! takes on the new-best branch.

pub mod diff;
pub mod history;
pub mod policy;
pub mod publish;
pub mod report;
pub mod result;

pub use diff::{AverageDiff, Delta, TrialDiff};
pub use history::{BestRecord, HistoryError, HistoryStore};
pub use policy::{Decision, Evaluation, RunFlags, evaluate, is_new_best};
pub use publish::{PublishError, PublishPlan, PublishReport, PublishStep, Publisher};
pub use report::{Comparison, RenderOptions};
pub use result::{ResultError, RunResult};

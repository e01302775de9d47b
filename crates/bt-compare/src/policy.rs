//! New-best policy.
//!
//! The history store goes in by value and comes back out in the `Decision`,
//! updated only when the run is a new best and persistence is allowed.

use crate::history::{BestRecord, HistoryStore};
use crate::report::{Comparison, RenderOptions};
use crate::result::RunResult;

pub const NEW_BEST_MESSAGE: &str = "New best time!";

/// Per-run switches from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Treat the run as a new best regardless of the comparison.
    pub force: bool,
    /// Never touch the store or version control.
    pub no_commit: bool,
}

/// True when the run should replace the scenario's best record.
pub fn is_new_best(result: &RunResult, best: Option<&BestRecord>, force: bool) -> bool {
    match best {
        None => true,
        Some(best) => force || result.average_time < best.average_time,
    }
}

/// Outcome of applying the policy to a run.
#[derive(Debug, Clone)]
pub struct Decision {
    pub new_best: bool,
    /// The store to write back; changed only if `should_persist`.
    pub store: HistoryStore,
    persist: bool,
}

impl Decision {
    /// Apply the policy, inserting the run into `store` when it is kept.
    pub fn apply(mut store: HistoryStore, result: &RunResult, flags: RunFlags) -> Self {
        let new_best = is_new_best(result, store.get(&result.scenario_name), flags.force);
        let persist = new_best && !flags.no_commit;
        if persist {
            store.insert(result.scenario_name.clone(), BestRecord::from(result));
        }
        Self {
            new_best,
            store,
            persist,
        }
    }

    /// Whether the caller should save the store and publish it.
    pub fn should_persist(&self) -> bool {
        self.persist
    }
}

/// Comparison and decision for one run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub comparison: Comparison,
    pub decision: Decision,
}

impl Evaluation {
    /// All output lines, including the new-best notice.
    pub fn render(&self, options: &RenderOptions) -> Vec<String> {
        let mut lines = self.comparison.render(options);
        if self.decision.new_best {
            lines.push(NEW_BEST_MESSAGE.to_string());
        }
        lines
    }

    pub fn print(&self, options: &RenderOptions) {
        for line in self.render(options) {
            println!("{}", line);
        }
    }
}

/// Compare `result` against its best in `store` and decide whether to keep it.
pub fn evaluate(result: &RunResult, store: HistoryStore, flags: RunFlags) -> Evaluation {
    let comparison = Comparison::new(result, store.get(&result.scenario_name));
    let decision = Decision::apply(store, result, flags);
    Evaluation {
        comparison,
        decision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(avg: f64) -> RunResult {
        RunResult {
            scenario_name: "lead".into(),
            times: vec![avg],
            average_time: avg,
            wins: vec![],
            losses: vec![],
            draws: vec![],
        }
    }

    fn store_with(avg: f64) -> HistoryStore {
        let mut store = HistoryStore::new();
        store.insert("lead", BestRecord::from(&run(avg)));
        store
    }

    #[test]
    fn test_first_run_is_new_best() {
        assert!(is_new_best(&run(100.0), None, false));
    }

    #[test]
    fn test_slower_run_not_new_best() {
        let best = BestRecord::from(&run(5.0));
        assert!(!is_new_best(&run(6.0), Some(&best), false));
        assert!(!is_new_best(&run(5.0), Some(&best), false));
        assert!(is_new_best(&run(4.0), Some(&best), false));
    }

    #[test]
    fn test_force_overrides() {
        let best = BestRecord::from(&run(5.0));
        assert!(is_new_best(&run(6.0), Some(&best), true));
    }

    #[test]
    fn test_apply_updates_store() {
        let d = Decision::apply(store_with(5.0), &run(4.0), RunFlags::default());
        assert!(d.new_best);
        assert!(d.should_persist());
        assert_eq!(d.store.get("lead").unwrap().average_time, 4.0);
    }

    #[test]
    fn test_apply_no_commit_keeps_store() {
        let before = store_with(5.0);
        let flags = RunFlags {
            force: false,
            no_commit: true,
        };
        let d = Decision::apply(before.clone(), &run(4.0), flags);
        assert!(d.new_best);
        assert!(!d.should_persist());
        assert_eq!(d.store, before);
    }

    #[test]
    fn test_apply_not_new_best_keeps_store() {
        let before = store_with(5.0);
        let d = Decision::apply(before.clone(), &run(7.0), RunFlags::default());
        assert!(!d.new_best);
        assert!(!d.should_persist());
        assert_eq!(d.store, before);
    }

    #[test]
    fn test_evaluate_compares_against_prior() {
        let eval = evaluate(&run(4.0), store_with(5.0), RunFlags::default());
        // The comparison is against the old record, not the one just inserted.
        assert_eq!(eval.comparison.average.unwrap().best, 5.0);
        let lines = eval.render(&RenderOptions { color: false });
        assert_eq!(lines.last().map(String::as_str), Some(NEW_BEST_MESSAGE));
    }
}

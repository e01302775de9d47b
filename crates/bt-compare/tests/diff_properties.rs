//! Property tests for trial diffing and the new-best policy.

use bt_compare::diff::{Delta, crosses_boundary, diff_times, format_time};
use bt_compare::{BestRecord, Comparison, RunResult, is_new_best};
use proptest::prelude::*;

fn times_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0.0f64..200.0, n),
            prop::collection::vec(0.0f64..200.0, n),
        )
    })
}

fn run(times: Vec<f64>, avg: f64) -> RunResult {
    RunResult {
        scenario_name: "prop".into(),
        times,
        average_time: avg,
        wins: vec![],
        losses: vec![],
        draws: vec![],
    }
}

proptest! {
    #[test]
    fn magnitude_is_absolute_difference((current, best) in times_pair()) {
        let diffs = diff_times(&current, &best);
        prop_assert_eq!(diffs.len(), current.len());
        for d in &diffs {
            let (c, b) = (current[d.index], best[d.index]);
            prop_assert!((d.magnitude - (c - b).abs()).abs() < 1e-9);
            let expected = if c < b {
                Delta::Improved
            } else if c > b {
                Delta::Regressed
            } else {
                Delta::Equal
            };
            prop_assert_eq!(d.delta, expected);
        }
    }

    #[test]
    fn shorter_history_never_panics(
        current in prop::collection::vec(0.0f64..50.0, 0..8),
        best in prop::collection::vec(0.0f64..50.0, 0..8),
    ) {
        let record = BestRecord { average_time: 1.0, times: best.clone() };
        let cmp = Comparison::new(&run(current.clone(), 1.0), Some(&record));
        prop_assert_eq!(cmp.diffs.unwrap().len(), current.len().min(best.len()));
    }

    #[test]
    fn padding_width(reference in 0.0f64..100.0, value in 0.0f64..9.999) {
        let text = format_time(value, crosses_boundary(reference, value));
        if reference >= 10.0 {
            prop_assert_eq!(text.len(), 6);
        } else {
            prop_assert_eq!(text.len(), 5);
        }
    }

    #[test]
    fn no_record_is_always_new_best(avg in 0.0f64..1000.0) {
        prop_assert!(is_new_best(&run(vec![avg], avg), None, false));
    }

    #[test]
    fn force_is_always_new_best(avg in 0.0f64..1000.0, best in 0.0f64..1000.0) {
        let record = BestRecord { average_time: best, times: vec![best] };
        prop_assert!(is_new_best(&run(vec![avg], avg), Some(&record), true));
    }
}

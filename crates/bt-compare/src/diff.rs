//! Trial-by-trial diffing against a best record.
//!
//! Each compared value is classified as an improvement, a regression or
//! unchanged. Rendering of the classification lives in `report`.

use serde::{Deserialize, Serialize};

/// Values at or above this cross into a wider column.
pub const PAD_BOUNDARY: f64 = 10.0;

/// Direction of a change relative to the best record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delta {
    Improved,
    Regressed,
    Equal,
}

impl Delta {
    /// Classify `current` against `best`; lower is better.
    pub fn classify(current: f64, best: f64) -> Self {
        if current < best {
            Delta::Improved
        } else if current > best {
            Delta::Regressed
        } else {
            Delta::Equal
        }
    }

    /// Sign shown in front of the magnitude.
    pub fn sign(self) -> char {
        match self {
            Delta::Improved => '-',
            Delta::Regressed => '+',
            Delta::Equal => ' ',
        }
    }
}

/// True when `reference` sits in the wide column and `value` does not, so
/// `value` needs zero padding to stay aligned.
pub fn crosses_boundary(reference: f64, value: f64) -> bool {
    reference >= PAD_BOUNDARY && value < PAD_BOUNDARY
}

/// Format a time with three decimals, zero padded to width 6 when `padded`.
pub fn format_time(value: f64, padded: bool) -> String {
    if padded {
        format!("{:06.3}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Difference for a single trial index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialDiff {
    pub index: usize,
    pub current: f64,
    pub best: f64,
    pub delta: Delta,
    /// Absolute difference; zero when `delta` is `Equal`.
    pub magnitude: f64,
}

impl TrialDiff {
    pub fn new(index: usize, current: f64, best: f64) -> Self {
        let delta = Delta::classify(current, best);
        let magnitude = match delta {
            Delta::Improved => best - current,
            Delta::Regressed => current - best,
            Delta::Equal => 0.0,
        };
        Self {
            index,
            current,
            best,
            delta,
            magnitude,
        }
    }

    /// Whether the magnitude is padded to line up under a wide current value.
    pub fn padded(&self) -> bool {
        crosses_boundary(self.current, self.magnitude)
    }

    /// Signed, unstyled text such as `-01.500` or `+0.300`.
    pub fn signed_text(&self) -> String {
        format!("{}{}", self.delta.sign(), format_time(self.magnitude, self.padded()))
    }
}

/// Diff every index present in both sequences.
///
/// Sequences of different length are compared over their common prefix.
pub fn diff_times(current: &[f64], best: &[f64]) -> Vec<TrialDiff> {
    current
        .iter()
        .zip(best)
        .enumerate()
        .map(|(i, (&c, &b))| TrialDiff::new(i, c, b))
        .collect()
}

/// Difference between the fresh and best average times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageDiff {
    pub current: f64,
    pub best: f64,
    pub delta: Delta,
    pub magnitude: f64,
}

impl AverageDiff {
    pub fn new(current: f64, best: f64) -> Self {
        let trial = TrialDiff::new(0, current, best);
        Self {
            current,
            best,
            delta: trial.delta,
            magnitude: trial.magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Delta::classify(1.0, 2.0), Delta::Improved);
        assert_eq!(Delta::classify(2.0, 1.0), Delta::Regressed);
        assert_eq!(Delta::classify(1.5, 1.5), Delta::Equal);
    }

    #[test]
    fn test_format_time_widths() {
        assert_eq!(format_time(3.5, false), "3.500");
        assert_eq!(format_time(3.5, true), "03.500");
        assert_eq!(format_time(12.25, false), "12.250");
        // Padding never truncates wide values.
        assert_eq!(format_time(12.25, true), "12.250");
    }

    #[test]
    fn test_crosses_boundary() {
        assert!(crosses_boundary(10.0, 9.999));
        assert!(!crosses_boundary(9.9, 3.0));
        assert!(!crosses_boundary(12.0, 10.0));
        assert!(!crosses_boundary(3.0, 12.0));
    }

    #[test]
    fn test_trial_diff_improvement_padded() {
        let d = TrialDiff::new(0, 11.0, 12.5);
        assert_eq!(d.delta, Delta::Improved);
        assert!((d.magnitude - 1.5).abs() < 1e-9);
        assert!(d.padded());
        assert_eq!(d.signed_text(), "-01.500");
    }

    #[test]
    fn test_trial_diff_regression_unpadded() {
        let d = TrialDiff::new(1, 3.5, 3.2);
        assert_eq!(d.delta, Delta::Regressed);
        assert!(!d.padded());
        assert_eq!(d.signed_text(), "+0.300");
    }

    #[test]
    fn test_trial_diff_equal() {
        let d = TrialDiff::new(0, 4.0, 4.0);
        assert_eq!(d.delta, Delta::Equal);
        assert_eq!(d.magnitude, 0.0);
        assert_eq!(d.signed_text(), " 0.000");
    }

    #[test]
    fn test_large_difference_not_padded() {
        let d = TrialDiff::new(0, 25.0, 12.0);
        assert!(!d.padded());
        assert_eq!(d.signed_text(), "+13.000");
    }

    #[test]
    fn test_diff_times_shorter_history() {
        let diffs = diff_times(&[1.0, 2.0, 3.0], &[1.5]);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].index, 0);

        let diffs = diff_times(&[1.0], &[1.5, 2.0]);
        assert_eq!(diffs.len(), 1);

        assert!(diff_times(&[1.0], &[]).is_empty());
    }

    #[test]
    fn test_average_diff() {
        let a = AverageDiff::new(11.0, 12.5);
        assert_eq!(a.delta, Delta::Improved);
        assert!((a.magnitude - 1.5).abs() < 1e-9);
        assert_eq!(AverageDiff::new(2.0, 2.0).delta, Delta::Equal);
    }
}

//! Comparison reporting: turns a run and its best record into the
//! `Times` / `Bests` / `Diffs` lines printed after every run.

use crossterm::style::{StyledContent, Stylize};
use serde::{Deserialize, Serialize};

use crate::diff::{AverageDiff, Delta, TrialDiff, crosses_boundary, diff_times, format_time};
use crate::history::BestRecord;
use crate::result::RunResult;

const CELL_SEPARATOR: &str = ",  ";
const DIFF_SEPARATOR: &str = ",    ";

/// How the comparison is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI colours for diff classifications.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// A single rendered time in the `Times` or `Bests` line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialCell {
    pub index: usize,
    pub value: f64,
    pub padded: bool,
}

impl TrialCell {
    fn text(&self) -> String {
        format!("{}: {}", self.index, format_time(self.value, self.padded))
    }
}

/// Full comparison of a run against the scenario's best record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub scenario: String,
    pub times: Vec<TrialCell>,
    /// Present only when a best record exists.
    pub bests: Option<Vec<TrialCell>>,
    pub diffs: Option<Vec<TrialDiff>>,
    pub average: Option<AverageDiff>,
    pub average_time: f64,
    pub wins: Vec<u32>,
    pub losses: Vec<u32>,
    pub draws: Vec<u32>,
}

impl Comparison {
    /// Compare `result` against `best`.
    pub fn new(result: &RunResult, best: Option<&BestRecord>) -> Self {
        let best_times: &[f64] = best.map(|b| b.times.as_slice()).unwrap_or(&[]);

        let times = result
            .times
            .iter()
            .enumerate()
            .map(|(index, &value)| TrialCell {
                index,
                value,
                padded: best_times.get(index).is_some_and(|&b| crosses_boundary(b, value)),
            })
            .collect();

        let bests = best.map(|b| {
            b.times
                .iter()
                .enumerate()
                .map(|(index, &value)| TrialCell {
                    index,
                    value,
                    padded: result
                        .times
                        .get(index)
                        .is_some_and(|&c| crosses_boundary(c, value)),
                })
                .collect()
        });

        Self {
            scenario: result.scenario_name.clone(),
            times,
            bests,
            diffs: best.map(|b| diff_times(&result.times, &b.times)),
            average: best.map(|b| AverageDiff::new(result.average_time, b.average_time)),
            average_time: result.average_time,
            wins: result.wins.clone(),
            losses: result.losses.clone(),
            draws: result.draws.clone(),
        }
    }

    /// Render to output lines, without trailing newlines.
    pub fn render(&self, options: &RenderOptions) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(cells_line("Times:  ", &self.times));

        if let Some(bests) = &self.bests {
            lines.push(cells_line("Bests:  ", bests));
        }

        if let Some(diffs) = &self.diffs {
            let rendered: Vec<String> = diffs
                .iter()
                .map(|d| paint(d.delta, d.signed_text(), options))
                .collect();
            lines.push(format!("Diffs:    {}", rendered.join(DIFF_SEPARATOR)));
        }

        if let Some(avg) = &self.average {
            let mut line = format!("Best Time:    {:.3} ", avg.best);
            if avg.delta != Delta::Equal {
                let text = format!("{}{:.3}", avg.delta.sign(), avg.magnitude);
                line.push_str(&paint(avg.delta, text, options));
            }
            lines.push(line);
        }

        lines.push(format!("Average Time: {:.3}", self.average_time));

        if !self.losses.is_empty() || !self.draws.is_empty() {
            lines.push(format!("Losses: {:?}", self.losses));
            lines.push(format!("Draws: {:?}", self.draws));
            lines.push(format!("Wins : {:?}", self.wins));
        }

        lines
    }
}

fn cells_line(label: &str, cells: &[TrialCell]) -> String {
    let rendered: Vec<String> = cells.iter().map(TrialCell::text).collect();
    format!("{}{}", label, rendered.join(CELL_SEPARATOR))
}

fn styled(delta: Delta, text: String) -> StyledContent<String> {
    match delta {
        Delta::Improved => text.dark_green(),
        Delta::Regressed => text.dark_red(),
        Delta::Equal => text.dark_blue(),
    }
}

fn paint(delta: Delta, text: String, options: &RenderOptions) -> String {
    if options.color {
        styled(delta, text).to_string()
    } else {
        text
    }
}

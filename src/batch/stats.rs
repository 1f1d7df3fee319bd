//! Aggregate statistics over a batch of finished sessions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{GameState, LimitReached};

/// Summary of a numeric sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
}

impl SummaryStats {
    /// Compute from a sample. An empty sample gives all zeros.
    #[must_use]
    pub fn from_samples(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self::default();
        }

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let len = sorted.len();
        let mean = data.iter().sum::<f64>() / len as f64;
        let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len as f64;

        Self {
            mean,
            median: median_of_sorted(&sorted),
            min: sorted[0],
            max: sorted[len - 1],
            standard_deviation: variance.sqrt(),
        }
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// One histogram bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// `"start - end"`, rounded to whole numbers.
    pub label: String,
    pub count: usize,
}

/// Bucket `data` into `bin_count` equal-width bins.
///
/// A sample with a single distinct value collapses to one bin.
#[must_use]
pub fn histogram(data: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if data.is_empty() || bin_count == 0 {
        return Vec::new();
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            label: format!("{min}"),
            count: data.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &value in data {
        let index = if value == max {
            bin_count - 1
        } else {
            (((value - min) / width) as usize).min(bin_count - 1)
        };
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = (min + i as f64 * width).round();
            let end = (min + (i + 1) as f64 * width).round();
            HistogramBin {
                label: format!("{start} - {end}"),
                count,
            }
        })
        .collect()
}

/// How many sessions ended on each limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitCounts {
    pub bankroll_max: u32,
    pub bankroll_min: u32,
    pub busted: u32,
    pub max_rolls: u32,
}

impl LimitCounts {
    #[must_use]
    pub fn get(&self, kind: LimitReached) -> u32 {
        match kind {
            LimitReached::BankrollMax => self.bankroll_max,
            LimitReached::BankrollMin => self.bankroll_min,
            LimitReached::Busted => self.busted,
            LimitReached::MaxRolls => self.max_rolls,
        }
    }

    pub fn record(&mut self, kind: LimitReached) {
        let slot = match kind {
            LimitReached::BankrollMax => &mut self.bankroll_max,
            LimitReached::BankrollMin => &mut self.bankroll_min,
            LimitReached::Busted => &mut self.busted,
            LimitReached::MaxRolls => &mut self.max_rolls,
        };
        *slot += 1;
    }
}

/// Results of a batch, reduced to what the report shows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub sessions: u32,
    /// Final bankrolls.
    pub bankroll: SummaryStats,
    /// Rolls played per session.
    pub rolls: SummaryStats,
    pub limits: LimitCounts,
    pub winning_sessions: u32,
    pub losing_sessions: u32,
    pub even_sessions: u32,
}

impl BatchSummary {
    /// Summarize finished sessions.
    #[must_use]
    pub fn from_states(states: &[GameState]) -> Self {
        let mut summary = Self::default();
        let mut bankrolls = Vec::with_capacity(states.len());
        let mut rolls = Vec::with_capacity(states.len());

        for state in states {
            summary.sessions += 1;
            bankrolls.push(state.bankroll);
            rolls.push(f64::from(state.roll_num));
            if let Some(kind) = state.limit_reached() {
                summary.limits.record(kind);
            }
            let net = state.net();
            if net > 0.0 {
                summary.winning_sessions += 1;
            } else if net < 0.0 {
                summary.losing_sessions += 1;
            } else {
                summary.even_sessions += 1;
            }
        }

        summary.bankroll = SummaryStats::from_samples(&bankrolls);
        summary.rolls = SummaryStats::from_samples(&rolls);
        summary
    }

    /// Share of sessions that ended on `kind`, as a percentage.
    #[must_use]
    pub fn limit_percentage(&self, kind: LimitReached) -> f64 {
        percentage(self.limits.get(kind), self.sessions)
    }

    /// Share of sessions that finished ahead, as a percentage.
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        percentage(self.winning_sessions, self.sessions)
    }
}

fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(total) * 100.0
    }
}

/// Rough pace of a live table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableSpeed {
    Slow,
    Average,
    Fast,
}

impl TableSpeed {
    pub const ALL: [TableSpeed; 3] = [TableSpeed::Slow, TableSpeed::Average, TableSpeed::Fast];

    #[must_use]
    pub const fn seconds_per_roll(self) -> u64 {
        match self {
            TableSpeed::Slow => 60,
            TableSpeed::Average => 45,
            TableSpeed::Fast => 30,
        }
    }

    /// Wall-clock time to play `rolls` at this pace.
    #[must_use]
    pub fn estimated_duration(self, rolls: u32) -> Duration {
        Duration::from_secs(self.seconds_per_roll() * u64::from(rolls))
    }
}

impl std::fmt::Display for TableSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSpeed::Slow => write!(f, "Slow"),
            TableSpeed::Average => write!(f, "Average"),
            TableSpeed::Fast => write!(f, "Fast"),
        }
    }
}

/// Format a duration as hours and minutes, rounded to the nearest minute.
#[must_use]
pub fn readable_duration(duration: Duration) -> String {
    let minutes = (duration.as_secs() + 30) / 60;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

//! In-memory high score log
//!
//! Lives only as long as the page; nothing is written to storage.

use serde::{Deserialize, Serialize};

/// Runs kept in the log
pub const MAX_RUNS: usize = 10;

/// A finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub score: u64,
    /// How long the run lasted (ms)
    pub survived_ms: f64,
}

/// Finished runs, best first. Equal scores keep arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    runs: Vec<Run>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a run. Returns its 1-based rank, or `None` for a scoreless run
    /// or one that falls off the bottom. Rank 1 is a new best.
    pub fn record(&mut self, run: Run) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let slot = self.runs.partition_point(|r| r.score >= run.score);
        if slot >= MAX_RUNS {
            return None;
        }
        self.runs.insert(slot, run);
        self.runs.truncate(MAX_RUNS);
        Some(slot + 1)
    }

    /// Best score so far (0 when nothing is logged)
    pub fn best(&self) -> u64 {
        self.runs.first().map_or(0, |r| r.score)
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64) -> Run {
        Run {
            score,
            survived_ms: 1_000.0,
        }
    }

    #[test]
    fn test_ranking() {
        let mut scores = HighScores::new();
        assert_eq!(scores.best(), 0);
        assert_eq!(scores.record(run(0)), None);
        assert_eq!(scores.record(run(120)), Some(1));
        assert_eq!(scores.record(run(80)), Some(2));
        assert_eq!(scores.record(run(300)), Some(1));
        // Tying the best is not a new best
        assert_eq!(scores.record(run(300)), Some(2));
        assert_eq!(scores.best(), 300);
        let order: Vec<u64> = scores.runs().iter().map(|r| r.score).collect();
        assert_eq!(order, vec![300, 300, 120, 80]);
    }

    #[test]
    fn test_log_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=(MAX_RUNS as u64 + 5) {
            scores.record(run(s * 10));
        }
        assert_eq!(scores.runs().len(), MAX_RUNS);
        // Lower than everything kept
        assert_eq!(scores.record(run(10)), None);
        assert_eq!(scores.best(), (MAX_RUNS as u64 + 5) * 10);
        assert_eq!(scores.runs().last().map(|r| r.score), Some(60));
    }
}

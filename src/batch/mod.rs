//! Bulk simulation: many independent sessions of one configuration.
//!
//! The total is split into shards, one per worker, and played on a
//! `rayon` pool. Each worker gets its own forked [`DiceRng`] so results are
//! reproducible for a given seed and worker count. Workers talk to the
//! runner only through [`WorkerMessage`] values.
//!
//! ```no_run
//! use craps_sim::batch::{BatchConfig, BatchRunner, BatchSummary};
//! use craps_sim::core::Configuration;
//!
//! let runner = BatchRunner::new(BatchConfig::default().with_seed(7));
//! let states = runner.run(&Configuration::default(), 10_000, |done| {
//!     eprintln!("{done} sessions");
//! })?;
//! let summary = BatchSummary::from_states(&states);
//! # Ok::<(), craps_sim::SimError>(())
//! ```

pub mod stats;
pub mod worker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::{Configuration, DiceRng, GameState, SessionSnapshot};
use crate::error::{Result, SimError};

pub use stats::{histogram, readable_duration, BatchSummary, HistogramBin, LimitCounts, SummaryStats, TableSpeed};
pub use worker::{ShardRequest, ShardWorker, WorkerMessage};

/// Configuration for a batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Worker threads. Defaults to available parallelism.
    pub workers: usize,

    /// Sessions between progress reports from each worker.
    pub progress_interval: u32,

    /// Master seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            progress_interval: 1000,
            seed: None,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_interval(mut self, interval: u32) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Split `total` sessions over `workers` shards as evenly as possible.
///
/// Empty shards are dropped.
#[must_use]
pub fn split_shards(configuration: &Configuration, total: u32, workers: usize) -> Vec<ShardRequest> {
    let workers = workers.max(1) as u32;
    let base = total / workers;
    let extra = total % workers;
    (0..workers)
        .map(|i| base + u32::from(i < extra))
        .filter(|&count| count > 0)
        .map(|session_count| ShardRequest {
            configuration: configuration.clone(),
            session_count,
        })
        .collect()
}

/// Runs batches and owns the cancellation flag.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    config: BatchConfig,
    cancelled: Arc<AtomicBool>,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Shared flag; setting it stops every worker before its next session.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Play `total` sessions of `configuration` and return their final states.
    ///
    /// `on_progress` receives the number of sessions finished across all
    /// workers each time any worker reports. Results are in shard order.
    pub fn run(
        &self,
        configuration: &Configuration,
        total: u32,
        mut on_progress: impl FnMut(u32),
    ) -> Result<Vec<GameState>> {
        let invalid = configuration.invalid_fields();
        if !invalid.is_empty() {
            return Err(SimError::InvalidConfiguration { fields: invalid });
        }

        let shards = split_shards(configuration, total, self.config.workers);
        let mut master = match self.config.seed {
            Some(seed) => DiceRng::new(seed),
            None => DiceRng::from_entropy(),
        };
        let dice: Vec<DiceRng> = shards.iter().map(|_| master.fork()).collect();

        info!(
            total,
            workers = shards.len(),
            seed = master.seed(),
            "starting batch simulation"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(shards.len().max(1))
            .build()
            .map_err(|e| SimError::WorkerPool(e.to_string()))?;

        let shared = Arc::new(configuration.clone());
        let progress_interval = self.config.progress_interval;
        let cancelled = self.cancelled.as_ref();
        let (tx, rx) = mpsc::channel::<(usize, WorkerMessage)>();

        let mut finished: Vec<Option<Vec<SessionSnapshot>>> = vec![None; shards.len()];
        let mut completed = vec![0u32; shards.len()];

        let outcomes = std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                let tx = tx;
                pool.install(|| {
                    shards
                        .par_iter()
                        .zip(dice)
                        .enumerate()
                        .map(|(index, (shard, dice))| {
                            let tx = tx.clone();
                            ShardWorker::new(shared.clone(), dice, cancelled)
                                .with_progress_interval(progress_interval)
                                .run(shard.session_count, |message| {
                                    // The runner outlives every worker.
                                    let _ = tx.send((index, message));
                                })
                        })
                        .collect::<Vec<Result<()>>>()
                })
            });

            for (index, message) in rx {
                match message {
                    WorkerMessage::Progress { completed: done } => {
                        completed[index] = done;
                        on_progress(completed.iter().sum());
                    }
                    WorkerMessage::Finished { snapshots } => {
                        completed[index] = shards[index].session_count;
                        on_progress(completed.iter().sum());
                        finished[index] = Some(snapshots);
                    }
                }
            }

            handle.join()
        });

        let outcomes = outcomes.map_err(|_| SimError::WorkerPool("worker thread panicked".to_string()))?;
        if let Err(err) = outcomes.into_iter().collect::<Result<Vec<()>>>() {
            if err == SimError::Cancelled {
                warn!(completed = completed.iter().sum::<u32>(), total, "batch simulation cancelled");
            }
            return Err(err);
        }

        let states: Vec<GameState> = finished
            .into_iter()
            .flatten()
            .flatten()
            .map(|snapshot| GameState::from_snapshot(shared.clone(), snapshot))
            .collect();

        info!(sessions = states.len(), "batch simulation finished");
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_config_builders() {
        let config = BatchConfig::new().with_workers(0).with_progress_interval(10).with_seed(5);
        assert_eq!(config.workers, 1);
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.seed, Some(5));
        assert_eq!(BatchConfig::default().progress_interval, 1000);
    }

    #[test]
    fn test_split_shards() {
        let config = Configuration::default();
        let counts: Vec<u32> = split_shards(&config, 10, 4).iter().map(|s| s.session_count).collect();
        assert_eq!(counts, vec![3, 3, 2, 2]);

        let counts: Vec<u32> = split_shards(&config, 2, 4).iter().map(|s| s.session_count).collect();
        assert_eq!(counts, vec![1, 1]);

        assert!(split_shards(&config, 0, 4).is_empty());
    }

    #[test]
    fn test_run_collects_every_session() {
        let runner = BatchRunner::new(BatchConfig::new().with_workers(3).with_seed(11).with_progress_interval(5));
        let mut reports = Vec::new();
        let states = runner.run(&Configuration::default(), 20, |n| reports.push(n)).unwrap();

        assert_eq!(states.len(), 20);
        assert!(states.iter().all(GameState::is_done));
        assert_eq!(reports.iter().copied().max(), Some(20));
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = Configuration::default();
        let run = || {
            BatchRunner::new(BatchConfig::new().with_workers(2).with_seed(99))
                .run(&config, 12, |_| {})
                .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_cancelled_run() {
        let runner = BatchRunner::new(BatchConfig::new().with_workers(2).with_seed(1));
        runner.cancel();
        let err = runner.run(&Configuration::default(), 10, |_| {}).unwrap_err();
        assert_eq!(err, SimError::Cancelled);
    }

    #[test]
    fn test_invalid_configuration() {
        let runner = BatchRunner::new(BatchConfig::new().with_seed(1));
        let config = Configuration::default().with_initial_bankroll(Some(0.0));
        let err = runner.run(&config, 10, |_| {}).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));
    }
}

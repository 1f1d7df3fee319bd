//! Batch worker: plays a shard of sessions and reports back as plain data.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Configuration, DiceSource, SessionSnapshot};
use crate::error::{Result, SimError};
use crate::session::Session;

/// Work handed to one worker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardRequest {
    pub configuration: Configuration,
    pub session_count: u32,
}

/// What a worker sends back while it runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerMessage {
    /// Sessions this worker has finished so far.
    Progress { completed: u32 },
    /// Final state of every session, in play order.
    Finished { snapshots: Vec<SessionSnapshot> },
}

/// Plays the sessions of one shard.
pub struct ShardWorker<'a, D: DiceSource> {
    configuration: Arc<Configuration>,
    dice: D,
    progress_interval: u32,
    cancelled: &'a AtomicBool,
}

impl<'a, D: DiceSource> ShardWorker<'a, D> {
    pub fn new(configuration: Arc<Configuration>, dice: D, cancelled: &'a AtomicBool) -> Self {
        Self {
            configuration,
            dice,
            progress_interval: 1000,
            cancelled,
        }
    }

    /// Report progress every `interval` sessions. Zero disables reports.
    pub fn with_progress_interval(mut self, interval: u32) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Play `session_count` sessions back to back on this worker's dice.
    ///
    /// Emits `Progress` every interval and `Finished` at the end. The
    /// cancellation flag is checked between sessions.
    pub fn run(&mut self, session_count: u32, mut emit: impl FnMut(WorkerMessage)) -> Result<()> {
        let mut snapshots = Vec::with_capacity(session_count as usize);

        for completed in 1..=session_count {
            if self.cancelled.load(Ordering::Relaxed) {
                return Err(SimError::Cancelled);
            }
            let session = Session::new(self.configuration.clone(), &mut self.dice)?;
            snapshots.push(session.run_to_completion().snapshot());

            if self.progress_interval > 0 && completed % self.progress_interval == 0 {
                emit(WorkerMessage::Progress { completed });
            }
        }

        emit(WorkerMessage::Finished { snapshots });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceRng;

    #[test]
    fn test_worker_reports_progress_then_finishes() {
        let cancelled = AtomicBool::new(false);
        let mut worker = ShardWorker::new(Arc::new(Configuration::default()), DiceRng::new(3), &cancelled)
            .with_progress_interval(2);

        let mut messages = Vec::new();
        worker.run(5, |m| messages.push(m)).unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], WorkerMessage::Progress { completed: 2 });
        assert_eq!(messages[1], WorkerMessage::Progress { completed: 4 });
        let WorkerMessage::Finished { snapshots } = &messages[2] else {
            panic!("expected Finished");
        };
        assert_eq!(snapshots.len(), 5);
        assert!(snapshots.iter().all(|s| s.roll_num > 0));
    }

    #[test]
    fn test_worker_honors_cancellation() {
        let cancelled = AtomicBool::new(true);
        let mut worker = ShardWorker::new(Arc::new(Configuration::default()), DiceRng::new(3), &cancelled);

        let err = worker.run(10, |_| {}).unwrap_err();
        assert_eq!(err, SimError::Cancelled);
    }

    #[test]
    fn test_messages_serialize_tagged() {
        let json = serde_json::to_string(&WorkerMessage::Progress { completed: 1000 }).unwrap();
        assert_eq!(json, r#"{"type":"progress","completed":1000}"#);

        let request = ShardRequest {
            configuration: Configuration::default(),
            session_count: 250,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: ShardRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}

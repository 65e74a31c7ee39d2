use std::collections::VecDeque;
use std::time::Duration;

use super::event::EmissionEvent;
use super::metrics::{compute_snapshot, EmissionSnapshot, SessionSummary};

const MAX_EVENTS: usize = 10_000;

#[derive(Debug)]
pub struct EmissionRecorder {
    buffer: VecDeque<EmissionEvent>,
}

impl Default for EmissionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmissionRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: EmissionEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn snapshot(&self) -> EmissionSnapshot {
        compute_snapshot(&self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Folds the window into the shutdown summary.
    pub fn aggregate_session(&self, elapsed: Duration) -> SessionSummary {
        let snap = self.snapshot();

        let fail_ratio = if snap.records_written > 0 {
            snap.fail_status as f64 / snap.records_written as f64
        } else {
            0.0
        };

        SessionSummary {
            duration_secs: elapsed.as_secs(),
            ticks: snap.ticks,
            records_written: snap.records_written,
            open_failures: snap.open_failures,
            write_failures: snap.write_failures,
            fail_ratio,
        }
    }
}

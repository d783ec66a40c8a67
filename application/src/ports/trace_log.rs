//! Decision history port
//!
//! The orchestrator appends every frozen trace to a [`TraceLog`]. The
//! default [`InMemoryTraceLog`] honours a [`HistoryRetention`] policy;
//! callers can inject a persistent implementation instead.

use crate::config::HistoryRetention;
use parliament_domain::DecisionTrace;
use std::collections::VecDeque;
use std::sync::Arc;

/// Append-only history of frozen decision traces
pub trait TraceLog: Send + Sync {
    fn append(&mut self, trace: Arc<DecisionTrace>);

    /// Number of traces currently retained
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to `limit` traces, most recent first
    fn recent(&self, limit: usize) -> Vec<Arc<DecisionTrace>>;

    /// Every retained trace, oldest first
    fn all(&self) -> Vec<Arc<DecisionTrace>>;
}

/// In-process history with an optional size bound.
///
/// When bounded and full, appending evicts the oldest trace.
#[derive(Debug, Default)]
pub struct InMemoryTraceLog {
    traces: VecDeque<Arc<DecisionTrace>>,
    retention: HistoryRetention,
}

impl InMemoryTraceLog {
    /// `Bounded(0)` is treated as unbounded, see [`HistoryRetention::normalized`]
    pub fn new(retention: HistoryRetention) -> Self {
        Self {
            traces: VecDeque::new(),
            retention: retention.normalized(),
        }
    }

    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }
}

impl TraceLog for InMemoryTraceLog {
    fn append(&mut self, trace: Arc<DecisionTrace>) {
        self.traces.push_back(trace);
        if let Some(capacity) = self.retention.capacity() {
            while self.traces.len() > capacity {
                self.traces.pop_front();
            }
        }
    }

    fn len(&self) -> usize {
        self.traces.len()
    }

    fn recent(&self, limit: usize) -> Vec<Arc<DecisionTrace>> {
        self.traces.iter().rev().take(limit).cloned().collect()
    }

    fn all(&self) -> Vec<Arc<DecisionTrace>> {
        self.traces.iter().cloned().collect()
    }
}

//! Bounded record of published snapshots.
//!
//! Snapshots are shared `Arc`s, so recording one costs a pointer copy.
//! Uses `im::Vector` for O(1) clone when a debugger wants its own copy
//! of the timeline.

use std::sync::Arc;

use im::Vector;

use crate::core::GameState;

/// Ring of the most recent snapshots, oldest first.
#[derive(Clone, Debug)]
pub struct SnapshotHistory {
    snapshots: Vector<Arc<GameState>>,
    capacity: usize,
}

impl SnapshotHistory {
    /// Create a history keeping at most `capacity` snapshots.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a snapshot, dropping the oldest when full.
    pub fn record(&mut self, snapshot: Arc<GameState>) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Maximum number of snapshots kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at an index, 0 being the oldest kept.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<GameState>> {
        self.snapshots.get(index)
    }

    /// Most recently recorded snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&Arc<GameState>> {
        self.snapshots.last()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<GameState>> {
        self.snapshots.iter()
    }
}

//! Linear undo/redo history over the whole tile set.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;

use crate::tiles::{TILE_SIZE, TileStore};
use crate::world::TileCoord;

/// The entire tile set's pixel contents at one point in time.
///
/// Surfaces are captured as shared handles, so taking a snapshot is
/// O(tiles), not O(pixels): a tile's pixel data is only copied when a later
/// stroke mutates it (`Arc::make_mut` in the store). Unchanged tiles stay
/// shared between the live store and any number of snapshots.
pub struct TileSnapshot {
    surfaces: HashMap<TileCoord, Arc<RgbaImage>>,
}

impl TileSnapshot {
    fn capture(store: &TileStore) -> Self {
        Self {
            surfaces: store.share_surfaces(),
        }
    }

    fn restore_into(&self, store: &mut TileStore) {
        store.restore_surfaces(&self.surfaces);
    }

    /// Number of tiles captured.
    pub fn tile_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Bytes uniquely owned by this snapshot. Surfaces still shared with
    /// the live store or other snapshots count only their handle.
    pub fn memory_bytes(&self) -> usize {
        let tile_bytes = (TILE_SIZE * TILE_SIZE * 4) as usize;
        self.surfaces
            .values()
            .map(|surface| {
                if Arc::strong_count(surface) == 1 {
                    tile_bytes
                } else {
                    std::mem::size_of::<usize>() * 2
                }
            })
            .sum()
    }
}

/// Ordered sequence of snapshots plus a cursor into it.
///
/// The cursor always indexes a valid snapshot (`None` only while the log is
/// empty). Checkpointing after an undo discards the redo branch, keeping
/// the history strictly linear.
#[derive(Default)]
pub struct HistoryLog {
    snapshots: Vec<TileSnapshot>,
    cursor: Option<usize>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the store's current state, discarding any snapshots beyond
    /// the cursor, and move the cursor to the new tail.
    pub fn checkpoint(&mut self, store: &TileStore) {
        match self.cursor {
            Some(at) => self.snapshots.truncate(at + 1),
            None => self.snapshots.clear(),
        }
        self.snapshots.push(TileSnapshot::capture(store));
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot and restore the store from it. A no-op at
    /// the start of history (or while empty); returns whether anything
    /// changed.
    pub fn undo(&mut self, store: &mut TileStore) -> bool {
        match self.cursor {
            Some(at) if at > 0 => {
                self.cursor = Some(at - 1);
                self.snapshots[at - 1].restore_into(store);
                true
            }
            _ => false,
        }
    }

    /// Step forward one snapshot and restore the store from it. A no-op at
    /// the tail; returns whether anything changed.
    pub fn redo(&mut self, store: &mut TileStore) -> bool {
        match self.cursor {
            Some(at) if at + 1 < self.snapshots.len() => {
                self.cursor = Some(at + 1);
                self.snapshots[at + 1].restore_into(store);
                true
            }
            _ => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(at) if at > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(at) if at + 1 < self.snapshots.len())
    }

    /// Number of snapshots currently held (both sides of the cursor).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Bytes uniquely owned by the history, for diagnostics.
    pub fn memory_bytes(&self) -> usize {
        self.snapshots.iter().map(TileSnapshot::memory_bytes).sum()
    }
}

//! Chunk-grid addressing for a single layer.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identifies a chunk within one layer by its integer grid position.
///
/// World position `p` falls in chunk `floor(p / tile_size)` on each axis, so
/// negative world coordinates map to negative addresses without a seam at 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkAddress {
    /// Chunk-grid X coordinate.
    pub x: i64,
    /// Chunk-grid Y coordinate.
    pub y: i64,
}

impl ChunkAddress {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Address of the chunk containing `position` on a grid of `tile_size` edges.
    ///
    /// `tile_size` must be positive; layers validate this at construction.
    pub fn from_world(position: DVec2, tile_size: f64) -> Self {
        debug_assert!(tile_size > 0.0, "tile size must be positive");
        let cell = (position / tile_size).floor();
        Self {
            x: cell.x as i64,
            y: cell.y as i64,
        }
    }

    /// World-space origin (minimum corner) of this chunk.
    pub fn world_origin(self, tile_size: f64) -> DVec2 {
        DVec2::new(self.x as f64 * tile_size, self.y as f64 * tile_size)
    }

    /// Seed string for this chunk within a layer seeded `layer_seed`.
    pub fn chunk_seed(self, layer_seed: &str) -> String {
        format!("{layer_seed}_{}_{}", self.x, self.y)
    }
}

impl fmt::Display for ChunkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

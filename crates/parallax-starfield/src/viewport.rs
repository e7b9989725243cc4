//! Viewpoint tracking: detects when a tracked position crosses a chunk edge.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::address::ChunkAddress;

/// A tracked point at a fixed offset from the viewer position.
///
/// Several offset viewpoints (e.g. the corners of the screen) make sure chunks
/// visible anywhere in a wide viewport are loaded, not only the one under the
/// viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewpoint {
    pub offset: DVec2,
}

impl Viewpoint {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset: DVec2::new(offset_x, offset_y),
        }
    }

    /// Viewpoints at `(±half_extent, ±half_extent)`.
    pub fn corners(half_extent: f64) -> Vec<Self> {
        vec![
            Self::new(-half_extent, -half_extent),
            Self::new(half_extent, -half_extent),
            Self::new(-half_extent, half_extent),
            Self::new(half_extent, half_extent),
        ]
    }
}

#[derive(Clone, Debug)]
struct TrackedViewpoint {
    viewpoint: Viewpoint,
    /// One entry per tracked tile size.
    last: Vec<Option<ChunkAddress>>,
}

/// Records the last chunk address of each viewpoint at every layer's tile size.
///
/// Tile sizes need not divide one another: a viewpoint counts as crossed when
/// its address changes at any of them.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    tile_sizes: Vec<f64>,
    tracked: Vec<TrackedViewpoint>,
}

impl ViewportTracker {
    pub fn new(tile_sizes: &[f64], viewpoints: &[Viewpoint]) -> Self {
        Self {
            tile_sizes: tile_sizes.to_vec(),
            tracked: viewpoints
                .iter()
                .map(|&viewpoint| TrackedViewpoint {
                    viewpoint,
                    last: vec![None; tile_sizes.len()],
                })
                .collect(),
        }
    }

    pub fn tile_sizes(&self) -> &[f64] {
        &self.tile_sizes
    }

    pub fn viewpoints(&self) -> impl Iterator<Item = Viewpoint> + '_ {
        self.tracked.iter().map(|t| t.viewpoint)
    }

    /// Last recorded addresses of each viewpoint, in tile-size order. Entries
    /// are `None` before the first update.
    pub fn last_addresses(&self) -> impl Iterator<Item = &[Option<ChunkAddress>]> + '_ {
        self.tracked.iter().map(|t| t.last.as_slice())
    }

    /// Move the viewer to `position`. `on_crossing` is called with the world
    /// position of every viewpoint that entered a new chunk at any tile size.
    ///
    /// Returns whether any viewpoint crossed.
    pub fn update(&mut self, position: DVec2, mut on_crossing: impl FnMut(DVec2)) -> bool {
        let mut changed = false;
        for tracked in &mut self.tracked {
            let point = position + tracked.viewpoint.offset;
            let mut crossed = false;
            for (last, &tile_size) in tracked.last.iter_mut().zip(&self.tile_sizes) {
                let address = Some(ChunkAddress::from_world(point, tile_size));
                if *last != address {
                    *last = address;
                    crossed = true;
                }
            }
            if crossed {
                on_crossing(point);
                changed = true;
            }
        }
        changed
    }

    /// Forget recorded addresses so the next update reports a crossing.
    pub fn reset(&mut self) {
        for tracked in &mut self.tracked {
            tracked.last.fill(None);
        }
    }
}

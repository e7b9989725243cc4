//! Deterministic chunk content generation.
//!
//! A [`ChunkGenerator`] turns a chunk seed string and a tile size into a list of
//! [`CelestialObject`]s. Two strategies exist and a layer uses exactly one:
//!
//! - **Counted placement** (default): one sequential source per chunk. For each
//!   tier in order, draw `count = round(r * max) + forced`, then per object draw
//!   `x`, `y`, and a skip count of `round(r * max_skip)` discarded draws.
//! - **Density threshold**: per tier, two axis streams seeded
//!   `"{seed}_{suffix}_x"` / `"{seed}_{suffix}_y"`; every cell of the
//!   `floor(tile_size)` square grid whose axis values both reach the tier
//!   threshold gets an object.
//!
//! The draw order above is part of the output format. Changing it changes every
//! generated starfield.

use serde::{Deserialize, Serialize};

use crate::chunk::{CelestialObject, ObjectKind};
use crate::random::{AxisStreams, SequentialRandom};

/// Default number of extra draws that may be discarded after each placement.
pub const DEFAULT_MAX_SKIP: u32 = 5;

/// Largest tile size a threshold layer may use. Threshold generation visits
/// every integer cell, so the work grows with the square of the tile size.
pub const MAX_THRESHOLD_TILE_SIZE: f64 = 4096.0;

/// One size/color class for counted placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountedTier {
    /// Label used in logs.
    pub name: String,
    /// Upper bound of the random part of the count.
    pub max: u32,
    /// Objects always placed on top of the random part.
    pub forced: u32,
    /// Edge length of each object in world units.
    pub size: f64,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    /// What the renderer draws for objects of this tier.
    pub kind: ObjectKind,
}

impl Default for CountedTier {
    fn default() -> Self {
        Self {
            name: "star".to_string(),
            max: 0,
            forced: 0,
            size: 1.0,
            color: 0xffffff,
            kind: ObjectKind::Star,
        }
    }
}

/// Parameters for counted placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountedParams {
    /// Placed in order; each tier draws from where the previous one stopped.
    pub tiers: Vec<CountedTier>,
    /// Upper bound of the draws discarded after each placement.
    pub max_skip: u32,
}

impl Default for CountedParams {
    fn default() -> Self {
        Self {
            tiers: Vec::new(),
            max_skip: DEFAULT_MAX_SKIP,
        }
    }
}

/// One size/color class for density-threshold placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTier {
    /// Appended to the chunk seed to derive this tier's axis streams.
    pub suffix: String,
    /// Both axis values must be `>=` this to place an object. `1.0` disables the tier.
    pub threshold: f64,
    /// Edge length of each object in world units.
    pub size: f64,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    /// What the renderer draws for objects of this tier.
    pub kind: ObjectKind,
}

impl Default for ThresholdTier {
    fn default() -> Self {
        Self {
            suffix: "star".to_string(),
            threshold: 1.0,
            size: 1.0,
            color: 0xffffff,
            kind: ObjectKind::Star,
        }
    }
}

/// Parameters for density-threshold placement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Evaluated independently, each on its own pair of axis streams.
    pub tiers: Vec<ThresholdTier>,
}

/// Generation strategy and its tuning for one layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GeneratorParams {
    Counted(CountedParams),
    Threshold(ThresholdParams),
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self::Counted(CountedParams::default())
    }
}

impl GeneratorParams {
    /// Sparse, large, bright stars.
    pub fn foreground() -> Self {
        Self::single_counted_tier("large", 1000, 1000, 15.0 / 30.0, 0xffffff)
    }

    /// Medium density and size.
    pub fn middle() -> Self {
        Self::single_counted_tier("medium", 5000, 5000, 10.0 / 30.0, 0xffffd4)
    }

    /// Dense, small, dim stars.
    pub fn background() -> Self {
        Self::single_counted_tier("small", 30000, 30000, 8.0 / 30.0, 0xffdad4)
    }

    fn single_counted_tier(name: &str, max: u32, forced: u32, size: f64, color: u32) -> Self {
        Self::Counted(CountedParams {
            tiers: vec![CountedTier {
                name: name.to_string(),
                max,
                forced,
                size,
                color,
                kind: ObjectKind::Star,
            }],
            max_skip: DEFAULT_MAX_SKIP,
        })
    }

    /// Upper bound on the objects a single chunk can hold, when it is known up
    /// front. Threshold layers depend on the grid, so they report `None`.
    pub fn max_objects_per_chunk(&self) -> Option<u64> {
        match self {
            Self::Counted(params) => Some(
                params.tiers.iter().fold(0u64, |total, t| {
                    total.saturating_add(u64::from(t.max) + u64::from(t.forced))
                }),
            ),
            Self::Threshold(_) => None,
        }
    }
}

/// Generates chunk content for one layer's parameters.
#[derive(Clone, Debug, Default)]
pub struct ChunkGenerator {
    params: GeneratorParams,
}

impl ChunkGenerator {
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate the objects for the chunk seeded `seed` with edge `tile_size`.
    ///
    /// Pure: the same arguments always yield the same list in the same order.
    /// A non-positive or non-finite `tile_size` yields an empty list.
    pub fn generate(&self, seed: &str, tile_size: f64) -> Vec<CelestialObject> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Vec::new();
        }
        match &self.params {
            GeneratorParams::Counted(params) => generate_counted(params, seed, tile_size),
            GeneratorParams::Threshold(params) => generate_threshold(params, seed, tile_size),
        }
    }
}

fn generate_counted(params: &CountedParams, seed: &str, tile_size: f64) -> Vec<CelestialObject> {
    let mut random = SequentialRandom::new(seed);
    let mut objects = Vec::new();

    for tier in &params.tiers {
        let count = ((random.next_value() * tier.max as f64).round() as u32)
            .saturating_add(tier.forced);
        objects.reserve(count as usize);

        for _ in 0..count {
            let x = (random.next_value() * tile_size).round();
            let y = (random.next_value() * tile_size).round();
            objects.push(CelestialObject {
                x,
                y,
                size: tier.size,
                color: tier.color,
                kind: tier.kind,
            });

            let skip = (random.next_value() * params.max_skip as f64).round() as u32;
            random.skip(skip);
        }
    }

    objects
}

fn generate_threshold(
    params: &ThresholdParams,
    seed: &str,
    tile_size: f64,
) -> Vec<CelestialObject> {
    let grid = tile_size.floor() as usize;
    let mut objects = Vec::new();

    for tier in &params.tiers {
        // Values are in [0, 1), so nothing can pass a threshold of 1 or more.
        if tier.threshold >= 1.0 {
            continue;
        }
        let mut streams = AxisStreams::new(&format!("{seed}_{}", tier.suffix));
        for cell in streams.cells(grid, grid) {
            if cell.vx >= tier.threshold && cell.vy >= tier.threshold {
                objects.push(CelestialObject {
                    x: cell.x as f64,
                    y: cell.y as f64,
                    size: tier.size,
                    color: tier.color,
                    kind: tier.kind,
                });
            }
        }
    }

    objects
}

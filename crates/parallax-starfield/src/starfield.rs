//! The layered starfield: N parallax layers driven by one position update.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::address::ChunkAddress;
use crate::error::StarfieldError;
use crate::layer::{LayerCache, LayerConfig};
use crate::viewport::{Viewpoint, ViewportTracker};

/// Half-extent of the default corner viewpoints.
pub const DEFAULT_VIEWPOINT_EXTENT: f64 = 100.0;

/// Everything needed to build a [`StarfieldSystem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Base seed; each layer appends its `seed_suffix`.
    pub seed: String,
    pub layers: Vec<LayerConfig>,
    pub viewpoints: Vec<Viewpoint>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            seed: "glap".to_string(),
            layers: LayerConfig::standard_layers(),
            viewpoints: Viewpoint::corners(DEFAULT_VIEWPOINT_EXTENT),
        }
    }
}

impl StarfieldConfig {
    /// The standard three-layer stack for `seed`.
    pub fn standard(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Upper bound on resident objects across all layers, when every layer's
    /// generator has a known per-chunk maximum. Saturates at `u64::MAX`.
    pub fn object_budget(&self) -> Option<u64> {
        self.layers.iter().try_fold(0u64, |total, l| {
            let per_chunk = l.generator.max_objects_per_chunk()?;
            let capacity = u64::try_from(l.capacity).unwrap_or(u64::MAX);
            Some(total.saturating_add(per_chunk.saturating_mul(capacity)))
        })
    }
}

/// Parallax layers plus the viewpoints that decide when they load.
///
/// The host calls [`update_position`](Self::update_position) every frame. Only
/// when a viewpoint crosses a chunk edge does any layer do work, and only then
/// does the host need to re-read the resident chunks.
#[derive(Debug)]
pub struct StarfieldSystem {
    seed: String,
    layers: Vec<LayerCache>,
    tracker: ViewportTracker,
    position: Option<DVec2>,
}

impl StarfieldSystem {
    pub fn new(config: StarfieldConfig) -> Result<Self, StarfieldError> {
        if config.layers.is_empty() {
            return Err(StarfieldError::NoLayers);
        }
        if config.viewpoints.is_empty() {
            return Err(StarfieldError::NoViewpoints);
        }

        let layers = config
            .layers
            .into_iter()
            .map(|layer| {
                let layer_seed = format!("{}{}", config.seed, layer.seed_suffix);
                LayerCache::new(layer, layer_seed)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tile_sizes: Vec<f64> = layers.iter().map(LayerCache::tile_size).collect();

        tracing::info!(
            seed = %config.seed,
            layers = layers.len(),
            viewpoints = config.viewpoints.len(),
            ?tile_sizes,
            "starfield created"
        );

        Ok(Self {
            seed: config.seed,
            layers,
            tracker: ViewportTracker::new(&tile_sizes, &config.viewpoints),
            position: None,
        })
    }

    /// Move the viewer to `(x, y)` in world units.
    ///
    /// For every viewpoint that entered a new chunk on any layer's grid, each
    /// layer ensures the chunk under that viewpoint at its own tile size.
    /// Returns `true` if any viewpoint crossed, meaning the resident sets may
    /// have changed.
    pub fn update_position(&mut self, x: f64, y: f64) -> bool {
        let position = DVec2::new(x, y);
        self.position = Some(position);
        let layers = &mut self.layers;
        let changed = self.tracker.update(position, |point| {
            for layer in layers.iter_mut() {
                layer.ensure(ChunkAddress::from_world(point, layer.tile_size()));
            }
        });
        if changed {
            tracing::trace!(x, y, "viewpoint crossed a chunk edge");
        }
        changed
    }

    /// Last position passed to [`update_position`](Self::update_position).
    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Layers from nearest to farthest, in configuration order.
    pub fn layers(&self) -> &[LayerCache] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&LayerCache> {
        self.layers.get(index)
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&LayerCache> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Total resident chunks across layers.
    pub fn resident_chunks(&self) -> usize {
        self.layers.iter().map(LayerCache::len).sum()
    }

    /// Drop all resident chunks and forget viewpoint history, so the next
    /// update reloads from scratch.
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
        self.tracker.reset();
        self.position = None;
    }
}

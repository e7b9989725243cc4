//! Per-layer chunk cache with bounded capacity and recency-ordered eviction.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::address::ChunkAddress;
use crate::chunk::Chunk;
use crate::error::StarfieldError;
use crate::generator::{ChunkGenerator, GeneratorParams, MAX_THRESHOLD_TILE_SIZE};
use crate::recency::{RecencyList, Slot};

/// Configuration of one parallax layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Name used in logs and for lookup.
    pub name: String,
    /// World units per chunk edge.
    pub tile_size: f64,
    /// Maximum number of resident chunks.
    pub capacity: usize,
    /// Appended to the starfield seed to form the layer seed.
    pub seed_suffix: String,
    /// Fraction of the viewer's displacement this layer scrolls by when drawn.
    pub parallax: f64,
    /// Placement strategy and its tiers.
    pub generator: GeneratorParams,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self::foreground()
    }
}

impl LayerConfig {
    /// Base tile size of the standard layer stack.
    pub const STANDARD_TILE_SIZE: f64 = 200.0;

    pub fn foreground() -> Self {
        Self {
            name: "foreground".to_string(),
            tile_size: Self::STANDARD_TILE_SIZE,
            capacity: 12,
            seed_suffix: "_f".to_string(),
            parallax: 1.0,
            generator: GeneratorParams::foreground(),
        }
    }

    pub fn middle() -> Self {
        Self {
            name: "middle".to_string(),
            tile_size: Self::STANDARD_TILE_SIZE * 2.0,
            capacity: 8,
            seed_suffix: "_m".to_string(),
            parallax: 0.5,
            generator: GeneratorParams::middle(),
        }
    }

    pub fn background() -> Self {
        Self {
            name: "background".to_string(),
            tile_size: Self::STANDARD_TILE_SIZE * 4.0,
            capacity: 4,
            seed_suffix: "_b".to_string(),
            parallax: 0.25,
            generator: GeneratorParams::background(),
        }
    }

    /// Foreground, middle and background, from nearest to farthest.
    pub fn standard_layers() -> Vec<Self> {
        vec![Self::foreground(), Self::middle(), Self::background()]
    }

    /// Check tile size and capacity.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(StarfieldError::InvalidTileSize {
                layer: self.name.clone(),
                tile_size: self.tile_size,
            });
        }
        if matches!(self.generator, GeneratorParams::Threshold(_))
            && self.tile_size > MAX_THRESHOLD_TILE_SIZE
        {
            return Err(StarfieldError::ThresholdTileTooLarge {
                layer: self.name.clone(),
                tile_size: self.tile_size,
                max: MAX_THRESHOLD_TILE_SIZE,
            });
        }
        if self.capacity == 0 {
            return Err(StarfieldError::InvalidCapacity {
                layer: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// What [`LayerCache::ensure`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// Already resident; moved to most recently touched.
    Hit,
    /// Generated and inserted, possibly evicting the least recently touched chunk.
    Generated { evicted: Option<ChunkAddress> },
}

/// Running counters for one layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerStats {
    pub hits: u64,
    pub generated: u64,
    pub evicted: u64,
}

struct Resident {
    chunk: Chunk,
    slot: Slot,
}

/// Owns the resident chunks of one layer.
///
/// Invariant: the map and the recency list hold the same addresses and never
/// more than `capacity` of them once an operation returns.
pub struct LayerCache {
    config: LayerConfig,
    seed: String,
    generator: ChunkGenerator,
    chunks: FxHashMap<ChunkAddress, Resident>,
    recency: RecencyList<ChunkAddress>,
    stats: LayerStats,
}

impl LayerCache {
    /// Build a cache for `config`, seeding chunks from `layer_seed`.
    pub fn new(
        config: LayerConfig,
        layer_seed: impl Into<String>,
    ) -> Result<Self, StarfieldError> {
        config.validate()?;
        let capacity = config.capacity;
        Ok(Self {
            generator: ChunkGenerator::new(config.generator.clone()),
            seed: layer_seed.into(),
            chunks: FxHashMap::with_capacity_and_hasher(capacity + 1, Default::default()),
            recency: RecencyList::with_capacity(capacity + 1),
            stats: LayerStats::default(),
            config,
        })
    }

    /// Make the chunk at `address` resident and most recently touched.
    pub fn ensure(&mut self, address: ChunkAddress) -> EnsureOutcome {
        if let Some(resident) = self.chunks.get(&address) {
            self.recency.move_to_back(resident.slot);
            self.stats.hits += 1;
            tracing::trace!(layer = %self.config.name, %address, "chunk hit");
            return EnsureOutcome::Hit;
        }

        let objects = self
            .generator
            .generate(&address.chunk_seed(&self.seed), self.config.tile_size);
        tracing::debug!(
            layer = %self.config.name,
            %address,
            objects = objects.len(),
            "generated chunk"
        );
        let slot = self.recency.push_back(address);
        self.chunks.insert(
            address,
            Resident {
                chunk: Chunk::new(address, objects),
                slot,
            },
        );
        self.stats.generated += 1;

        let evicted = if self.recency.len() > self.config.capacity {
            self.evict_oldest()
        } else {
            None
        };
        EnsureOutcome::Generated { evicted }
    }

    fn evict_oldest(&mut self) -> Option<ChunkAddress> {
        let address = self.recency.pop_front()?;
        self.chunks.remove(&address);
        self.stats.evicted += 1;
        tracing::debug!(layer = %self.config.name, %address, "evicted chunk");
        Some(address)
    }

    pub fn get(&self, address: ChunkAddress) -> Option<&Chunk> {
        self.chunks.get(&address).map(|r| &r.chunk)
    }

    pub fn contains(&self, address: ChunkAddress) -> bool {
        self.chunks.contains_key(&address)
    }

    /// Resident chunks from least to most recently touched.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.recency
            .iter()
            .filter_map(move |address| self.chunks.get(&address).map(|r| &r.chunk))
    }

    /// Resident addresses from least to most recently touched.
    pub fn addresses(&self) -> impl Iterator<Item = ChunkAddress> + '_ {
        self.recency.iter()
    }

    /// The address that the next over-capacity insertion would evict.
    pub fn eviction_candidate(&self) -> Option<ChunkAddress> {
        self.recency.front()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn tile_size(&self) -> f64 {
        self.config.tile_size
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn stats(&self) -> LayerStats {
        self.stats
    }

    /// Drop every resident chunk. Counters are kept.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.recency.clear();
    }
}

impl std::fmt::Debug for LayerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCache")
            .field("name", &self.config.name)
            .field("seed", &self.seed)
            .field("resident", &self.chunks.len())
            .field("capacity", &self.config.capacity)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{CountedParams, CountedTier, ThresholdParams, ThresholdTier};

    fn small_config(capacity: usize) -> LayerConfig {
        LayerConfig {
            name: "test".to_string(),
            tile_size: 100.0,
            capacity,
            seed_suffix: "_t".to_string(),
            parallax: 1.0,
            generator: GeneratorParams::Counted(CountedParams {
                tiers: vec![CountedTier {
                    max: 5,
                    forced: 5,
                    ..CountedTier::default()
                }],
                ..CountedParams::default()
            }),
        }
    }

    fn addr(x: i64, y: i64) -> ChunkAddress {
        ChunkAddress::new(x, y)
    }

    fn resident(cache: &LayerCache) -> Vec<ChunkAddress> {
        cache.addresses().collect()
    }

    #[test]
    fn test_rejects_invalid_tile_size() {
        for tile_size in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let config = LayerConfig {
                tile_size,
                ..small_config(3)
            };
            let err = LayerCache::new(config, "seed").unwrap_err();
            assert!(matches!(err, StarfieldError::InvalidTileSize { .. }));
        }
    }

    #[test]
    fn test_threshold_tile_size_is_bounded() {
        let threshold = GeneratorParams::Threshold(ThresholdParams {
            tiers: vec![ThresholdTier {
                threshold: 0.9,
                ..ThresholdTier::default()
            }],
        });
        let huge = LayerConfig {
            tile_size: 1e6,
            generator: threshold.clone(),
            ..small_config(3)
        };
        assert!(matches!(
            huge.validate(),
            Err(StarfieldError::ThresholdTileTooLarge { max, .. })
                if max == MAX_THRESHOLD_TILE_SIZE
        ));

        let at_limit = LayerConfig {
            tile_size: MAX_THRESHOLD_TILE_SIZE,
            generator: threshold,
            ..small_config(3)
        };
        assert!(at_limit.validate().is_ok());

        // Counted placement does not depend on the tile area.
        let counted = LayerConfig {
            tile_size: 1e6,
            ..small_config(3)
        };
        assert!(counted.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = LayerCache::new(small_config(0), "seed").unwrap_err();
        assert_eq!(
            err,
            StarfieldError::InvalidCapacity {
                layer: "test".to_string()
            }
        );
    }

    #[test]
    fn test_miss_generates_then_hit_reuses() {
        let mut cache = LayerCache::new(small_config(3), "seed").unwrap();
        assert_eq!(
            cache.ensure(addr(0, 0)),
            EnsureOutcome::Generated { evicted: None }
        );
        let before = cache.get(addr(0, 0)).unwrap().clone();
        assert_eq!(cache.ensure(addr(0, 0)), EnsureOutcome::Hit);
        assert_eq!(cache.get(addr(0, 0)).unwrap(), &before);
        assert_eq!(
            cache.stats(),
            LayerStats {
                hits: 1,
                generated: 1,
                evicted: 0
            }
        );
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut cache = LayerCache::new(small_config(4), "seed").unwrap();
        for i in 0..50 {
            cache.ensure(addr(i % 7, i / 7));
            assert!(cache.len() <= 4, "resident {} after step {i}", cache.len());
            assert_eq!(cache.len(), cache.addresses().count());
        }
    }

    #[test]
    fn test_lru_evicts_first_inserted() {
        let mut cache = LayerCache::new(small_config(3), "seed").unwrap();
        cache.ensure(addr(0, 0));
        cache.ensure(addr(1, 0));
        cache.ensure(addr(2, 0));
        assert_eq!(
            cache.ensure(addr(3, 0)),
            EnsureOutcome::Generated {
                evicted: Some(addr(0, 0))
            }
        );
        assert!(!cache.contains(addr(0, 0)));
        assert_eq!(resident(&cache), vec![addr(1, 0), addr(2, 0), addr(3, 0)]);
    }

    #[test]
    fn test_touch_protects_from_eviction() {
        let mut cache = LayerCache::new(small_config(3), "seed").unwrap();
        cache.ensure(addr(0, 0));
        cache.ensure(addr(1, 0));
        cache.ensure(addr(2, 0));
        cache.ensure(addr(0, 0));
        assert_eq!(cache.eviction_candidate(), Some(addr(1, 0)));
        assert_eq!(
            cache.ensure(addr(3, 0)),
            EnsureOutcome::Generated {
                evicted: Some(addr(1, 0))
            }
        );
        assert!(cache.contains(addr(0, 0)));
        assert_eq!(resident(&cache), vec![addr(2, 0), addr(0, 0), addr(3, 0)]);
    }

    #[test]
    fn test_regenerated_chunk_is_identical() {
        let mut cache = LayerCache::new(small_config(1), "seed").unwrap();
        cache.ensure(addr(5, -5));
        let original = cache.get(addr(5, -5)).unwrap().clone();
        cache.ensure(addr(6, -5));
        assert!(!cache.contains(addr(5, -5)));
        cache.ensure(addr(5, -5));
        assert_eq!(cache.get(addr(5, -5)).unwrap(), &original);
        assert_eq!(cache.stats().generated, 3);
    }

    #[test]
    fn test_layer_seed_changes_content() {
        let mut a = LayerCache::new(small_config(2), "alpha").unwrap();
        let mut b = LayerCache::new(small_config(2), "beta").unwrap();
        a.ensure(addr(0, 0));
        b.ensure(addr(0, 0));
        assert_ne!(a.get(addr(0, 0)), b.get(addr(0, 0)));
    }

    #[test]
    fn test_iter_matches_addresses() {
        let mut cache = LayerCache::new(small_config(3), "seed").unwrap();
        cache.ensure(addr(1, 1));
        cache.ensure(addr(2, 2));
        let from_iter: Vec<ChunkAddress> = cache.iter().map(Chunk::address).collect();
        assert_eq!(from_iter, resident(&cache));
    }

    #[test]
    fn test_clear_keeps_stats() {
        let mut cache = LayerCache::new(small_config(3), "seed").unwrap();
        cache.ensure(addr(1, 1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.eviction_candidate(), None);
        assert_eq!(cache.stats().generated, 1);
    }

    #[test]
    fn test_standard_layers_are_valid() {
        for config in LayerConfig::standard_layers() {
            config.validate().unwrap();
        }
    }
}

//! Infinite, deterministic 2D starfield streamed in chunks across parallax layers.
//!
//! Each layer divides the plane into square chunks. A chunk's stars are a pure
//! function of the layer seed, the chunk address and the layer's generator
//! parameters, so chunks can be dropped and regenerated at will. Each layer
//! keeps at most `capacity` chunks resident and evicts the least recently
//! touched one when a new chunk pushes it over.
//!
//! ```
//! use parallax_starfield::{StarfieldConfig, StarfieldSystem};
//!
//! let mut starfield = StarfieldSystem::new(StarfieldConfig::standard("demo")).unwrap();
//! if starfield.update_position(0.0, 0.0) {
//!     for layer in starfield.layers() {
//!         for chunk in layer.iter() {
//!             let _origin = chunk.address().world_origin(layer.tile_size());
//!         }
//!     }
//! }
//! ```

pub mod address;
pub mod chunk;
pub mod error;
pub mod generator;
pub mod layer;
pub mod random;
pub mod reconcile;
pub mod recency;
pub mod starfield;
pub mod viewport;

pub use address::ChunkAddress;
pub use chunk::{CelestialObject, Chunk, ObjectKind};
pub use error::StarfieldError;
pub use generator::{
    ChunkGenerator, CountedParams, CountedTier, DEFAULT_MAX_SKIP, GeneratorParams,
    MAX_THRESHOLD_TILE_SIZE, ThresholdParams, ThresholdTier,
};
pub use layer::{EnsureOutcome, LayerCache, LayerConfig, LayerStats};
pub use random::{AxisStreams, CoordinateRandomStream, GridCell, SequentialRandom};
pub use reconcile::{LayerChunk, ResidentDiff, ResidentSet};
pub use starfield::{DEFAULT_VIEWPOINT_EXTENT, StarfieldConfig, StarfieldSystem};
pub use viewport::{Viewpoint, ViewportTracker};

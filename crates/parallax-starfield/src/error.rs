//! Starfield construction errors.

/// Invalid configuration rejected when building a layer or a starfield.
///
/// Generation and cache maintenance themselves never fail; these errors only
/// come out of constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StarfieldError {
    /// Tile size was zero, negative, or not finite.
    #[error("layer '{layer}': tile size must be positive and finite, got {tile_size}")]
    InvalidTileSize { layer: String, tile_size: f64 },

    /// Threshold placement visits every integer cell of the tile.
    #[error("layer '{layer}': threshold tile size {tile_size} exceeds {max}")]
    ThresholdTileTooLarge {
        layer: String,
        tile_size: f64,
        max: f64,
    },

    /// A layer must be able to hold at least one chunk.
    #[error("layer '{layer}': capacity must be at least 1")]
    InvalidCapacity { layer: String },

    /// A starfield needs at least one layer.
    #[error("starfield has no layers")]
    NoLayers,

    /// A starfield needs at least one viewpoint to drive loading.
    #[error("starfield has no viewpoints")]
    NoViewpoints,
}

//! Generated chunk content: celestial objects placed in chunk-local space.

use serde::{Deserialize, Serialize};

use crate::address::ChunkAddress;

/// What a renderer should draw for a [`CelestialObject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A plain star, drawn as a small square.
    #[default]
    Star,
    /// Reserved decorative kind.
    TopHat,
    /// Reserved decorative kind.
    OldLogo,
}

/// A single object in a chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialObject {
    /// Chunk-local X in `[0, tile_size]`.
    pub x: f64,
    /// Chunk-local Y in `[0, tile_size]`.
    pub y: f64,
    /// Edge length in world units.
    pub size: f64,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub kind: ObjectKind,
}

impl CelestialObject {
    /// Split the packed color into `[r, g, b]` bytes.
    pub fn rgb(&self) -> [u8; 3] {
        [
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        ]
    }
}

/// The immutable content of one chunk of one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    address: ChunkAddress,
    objects: Vec<CelestialObject>,
}

impl Chunk {
    pub fn new(address: ChunkAddress, objects: Vec<CelestialObject>) -> Self {
        Self { address, objects }
    }

    pub fn address(&self) -> ChunkAddress {
        self.address
    }

    /// Objects in generation order.
    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

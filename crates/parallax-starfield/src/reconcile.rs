//! Resident-set snapshots for renderers.
//!
//! A renderer keeps one visual group per resident chunk. After
//! [`StarfieldSystem::update_position`] reports a change it takes a new
//! [`ResidentSet`] and diffs it against the previous one to learn which groups
//! to create and which to drop. Identity is `(layer index, address)`.

use std::collections::BTreeSet;

use crate::address::ChunkAddress;
use crate::starfield::StarfieldSystem;

/// Identifies a chunk across all layers of a starfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerChunk {
    pub layer: usize,
    pub address: ChunkAddress,
}

/// The chunks resident in a starfield at one moment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResidentSet {
    chunks: BTreeSet<LayerChunk>,
}

/// Changes between two [`ResidentSet`]s, each list in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResidentDiff {
    /// Newly resident; the renderer should build these.
    pub added: Vec<LayerChunk>,
    /// No longer resident; the renderer should drop these.
    pub removed: Vec<LayerChunk>,
}

impl ResidentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl ResidentSet {
    /// Snapshot every layer of `system`.
    pub fn capture(system: &StarfieldSystem) -> Self {
        let chunks = system
            .layers()
            .iter()
            .enumerate()
            .flat_map(|(layer, cache)| {
                cache
                    .addresses()
                    .map(move |address| LayerChunk { layer, address })
            })
            .collect();
        Self { chunks }
    }

    pub fn contains(&self, chunk: LayerChunk) -> bool {
        self.chunks.contains(&chunk)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LayerChunk> + '_ {
        self.chunks.iter().copied()
    }

    /// What changed going from `self` to `current`.
    pub fn diff(&self, current: &ResidentSet) -> ResidentDiff {
        ResidentDiff {
            added: current.chunks.difference(&self.chunks).copied().collect(),
            removed: self.chunks.difference(&current.chunks).copied().collect(),
        }
    }
}

impl FromIterator<LayerChunk> for ResidentSet {
    fn from_iter<I: IntoIterator<Item = LayerChunk>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

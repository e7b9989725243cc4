//! Seeded random sources: a memoized per-axis stream indexed by coordinate, and a
//! plain sequential source for counted placement.
//!
//! Both are built from a seed string so that chunk seeds can be composed by
//! concatenation (`"{layer_seed}_{x}_{y}"`). The string is hashed with FxHash,
//! which has no per-process random state, and the hash seeds a `ChaCha8Rng`.

use std::hash::Hasher;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Hash a seed string into a `u64` suitable for `SeedableRng::seed_from_u64`.
pub fn hash_seed(seed: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(seed.as_bytes());
    // Length terminator so "ab" + "c" and "a" + "bc" style prefixes stay distinct.
    hasher.write_usize(seed.len());
    hasher.finish()
}

/// Build the deterministic RNG for a seed string.
pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed))
}

/// A lazily extended, append-only sequence of random values along one axis.
///
/// `value_at(i)` realizes every value `0..=i` in order before returning, so the
/// value at a given index does not depend on the order in which indices are
/// queried. Indices are `usize`, so a negative index cannot be expressed.
#[derive(Clone, Debug)]
pub struct CoordinateRandomStream {
    rng: ChaCha8Rng,
    values: Vec<f64>,
}

impl CoordinateRandomStream {
    /// Create an empty stream for `seed`.
    pub fn new(seed: &str) -> Self {
        Self {
            rng: seeded_rng(seed),
            values: Vec::new(),
        }
    }

    /// Value in `[0, 1)` at `index`, extending the sequence as needed.
    pub fn value_at(&mut self, index: usize) -> f64 {
        while self.values.len() <= index {
            self.values.push(self.rng.random::<f64>());
        }
        self.values[index]
    }

    /// Number of values realized so far.
    pub fn realized(&self) -> usize {
        self.values.len()
    }
}

/// A pair of independent streams, one per axis, used for 2D grid jitter.
#[derive(Clone, Debug)]
pub struct AxisStreams {
    pub x: CoordinateRandomStream,
    pub y: CoordinateRandomStream,
}

impl AxisStreams {
    /// Seeds the axes with `"{seed}_x"` and `"{seed}_y"`.
    pub fn new(seed: &str) -> Self {
        Self {
            x: CoordinateRandomStream::new(&format!("{seed}_x")),
            y: CoordinateRandomStream::new(&format!("{seed}_y")),
        }
    }

    /// Iterate over a `width × height` grid in row-major order (x fastest).
    pub fn cells(&mut self, width: usize, height: usize) -> GridCells<'_> {
        GridCells {
            streams: self,
            width,
            height,
            x: 0,
            y: 0,
        }
    }
}

/// One cell of an [`AxisStreams`] grid walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
    /// Value of the x stream at column `x`.
    pub vx: f64,
    /// Value of the y stream at row `y`.
    pub vy: f64,
}

/// Iterator returned by [`AxisStreams::cells`].
pub struct GridCells<'a> {
    streams: &'a mut AxisStreams,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
}

impl Iterator for GridCells<'_> {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.width == 0 || self.y >= self.height {
            return None;
        }
        let cell = GridCell {
            x: self.x,
            y: self.y,
            vx: self.streams.x.value_at(self.x),
            vy: self.streams.y.value_at(self.y),
        };
        self.x += 1;
        if self.x >= self.width {
            self.x = 0;
            self.y += 1;
        }
        Some(cell)
    }
}

/// Sequential random source shared by every tier of a counted-placement chunk.
#[derive(Clone, Debug)]
pub struct SequentialRandom {
    rng: ChaCha8Rng,
}

impl SequentialRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_value(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Draw and discard `count` values.
    pub fn skip(&mut self, count: u32) {
        for _ in 0..count {
            let _ = self.next_value();
        }
    }
}

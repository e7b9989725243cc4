//! SVG snapshot renderer.
//!
//! Mirrors what an interactive renderer does: it keeps one visual record per
//! resident chunk, reconciles that set against the starfield after every
//! reported change, and draws each layer offset by its parallax factor.
//!
//! A layer with parallax `p` is drawn as `center + (world - viewer) * p`, so
//! farther layers scroll slower and their stars appear smaller.

use std::collections::BTreeMap;
use std::io::{self, Write};

use glam::DVec2;
use parallax_starfield::{
    CelestialObject, ChunkAddress, LayerChunk, ObjectKind, ResidentDiff, ResidentSet,
    StarfieldSystem,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// World-space rectangle covered by one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ChunkBounds {
    min: DVec2,
    max: DVec2,
}

impl ChunkBounds {
    fn intersects(&self, min: DVec2, max: DVec2) -> bool {
        self.min.x <= max.x && self.max.x >= min.x && self.min.y <= max.y && self.max.y >= min.y
    }
}

pub struct SvgRenderer {
    view: DVec2,
    resident: ResidentSet,
    chunks: BTreeMap<LayerChunk, ChunkBounds>,
}

impl SvgRenderer {
    /// `view` is the visible area in screen units.
    pub fn new(view: DVec2) -> Self {
        Self {
            view,
            resident: ResidentSet::default(),
            chunks: BTreeMap::new(),
        }
    }

    /// Number of chunks with a visual record.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bring the visual records in line with the chunks resident in `system`.
    pub fn sync(&mut self, system: &StarfieldSystem) -> ResidentDiff {
        let current = ResidentSet::capture(system);
        let diff = self.resident.diff(&current);

        for chunk in &diff.removed {
            self.chunks.remove(chunk);
        }
        for &chunk in &diff.added {
            let Some(layer) = system.layer(chunk.layer) else {
                continue;
            };
            let min = chunk.address.world_origin(layer.tile_size());
            let bounds = ChunkBounds {
                min,
                max: min + DVec2::splat(layer.tile_size()),
            };
            self.chunks.insert(chunk, bounds);
        }

        if !diff.is_empty() {
            tracing::debug!(
                added = diff.added.len(),
                removed = diff.removed.len(),
                "reconciled rendered chunks"
            );
        }
        self.resident = current;
        diff
    }

    /// Write the current frame as an SVG document, farthest layer first.
    pub fn write_frame(
        &self,
        system: &StarfieldSystem,
        viewer: DVec2,
        out: &mut impl Write,
    ) -> io::Result<FrameStats> {
        let center = self.view * 0.5;
        let mut stats = FrameStats::default();

        writeln!(
            out,
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.view.x,
            h = self.view.y
        )?;
        writeln!(
            out,
            r##"<rect x="0" y="0" width="{}" height="{}" fill="#000000"/>"##,
            self.view.x, self.view.y
        )?;

        for (index, layer) in system.layers().iter().enumerate().rev() {
            let parallax = layer.config().parallax;
            if !parallax.is_finite() || parallax <= 0.0 {
                continue;
            }
            // World rectangle visible through this layer.
            let half = center / parallax;
            let (visible_min, visible_max) = (viewer - half, viewer + half);

            writeln!(
                out,
                r#"<g id="{}" transform="translate({} {}) scale({}) translate({} {})">"#,
                layer.name(),
                center.x,
                center.y,
                parallax,
                -viewer.x,
                -viewer.y
            )?;

            let range = LayerChunk {
                layer: index,
                address: ChunkAddress::new(i64::MIN, i64::MIN),
            }..=LayerChunk {
                layer: index,
                address: ChunkAddress::new(i64::MAX, i64::MAX),
            };
            for (chunk, bounds) in self.chunks.range(range) {
                if !bounds.intersects(visible_min, visible_max) {
                    continue;
                }
                let Some(content) = layer.get(chunk.address) else {
                    continue;
                };
                stats.chunks += 1;
                for object in content.objects() {
                    let world = bounds.min + DVec2::new(object.x, object.y);
                    if world.cmplt(visible_min).any() || world.cmpgt(visible_max).any() {
                        continue;
                    }
                    match object.kind {
                        ObjectKind::Star => {
                            write_star(out, world, object)?;
                            stats.objects += 1;
                        }
                        ObjectKind::TopHat | ObjectKind::OldLogo => stats.skipped += 1,
                    }
                }
            }

            writeln!(out, "</g>")?;
        }

        writeln!(out, "</svg>")?;

        if stats.skipped > 0 {
            tracing::warn!(
                skipped = stats.skipped,
                "objects of unsupported kinds were not drawn"
            );
        }
        Ok(stats)
    }
}

/// Counts from one [`SvgRenderer::write_frame`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub chunks: usize,
    pub objects: usize,
    pub skipped: usize,
}

fn write_star(out: &mut impl Write, world: DVec2, star: &CelestialObject) -> io::Result<()> {
    let half = star.size / 2.0;
    writeln!(
        out,
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#{:06x}"/>"##,
        world.x - half,
        world.y - half,
        star.size,
        star.size,
        star.color
    )
}

//! Tile storage: lazily-allocated square raster tiles addressed by
//! [`TileCoord`].
//!
//! A tile is created the first time anything needs it - a stroke endpoint
//! landing in it, or the viewport bringing it near the visible screen - and
//! is never destroyed for the rest of the session. Its surface is a
//! fixed-size `RgbaImage` behind an `Arc`: fresh tiles share one pristine
//! background-plus-grid prototype, and the pixel data is only copied when a
//! stroke first touches the tile (`Arc::make_mut`). History snapshots lean
//! on the same sharing.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use egui::pos2;
use image::{Rgba, RgbaImage};

use crate::world::{TileCoord, Viewport, WorldPoint};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Edge length of one square tile, in world pixels.
pub const TILE_SIZE: u32 = 2000;

/// Spacing of the reference grid stencilled onto fresh tiles. Deliberately
/// independent of the tile edge length.
pub const GRID_SPACING: u32 = 50;

/// Paper color of an untouched surface; also what the eraser paints.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Reference grid line color.
pub const GRID_LINE: Rgba<u8> = Rgba([240, 240, 240, 255]);

/// Monotonic revision source. Every surface mutation takes a fresh value,
/// so the renderer can tell which tile textures are stale - including
/// across history restores that replace whole tiles.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn bump_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// The shared pristine surface: background fill plus 1px reference grid
/// lines. Built once; every fresh tile clones the `Arc`.
fn blank_surface() -> Arc<RgbaImage> {
    static BLANK: OnceLock<Arc<RgbaImage>> = OnceLock::new();
    Arc::clone(BLANK.get_or_init(|| {
        let mut surface = RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, BACKGROUND);
        for line in (0..TILE_SIZE).step_by(GRID_SPACING as usize) {
            for along in 0..TILE_SIZE {
                surface.put_pixel(line, along, GRID_LINE);
                surface.put_pixel(along, line, GRID_LINE);
            }
        }
        Arc::new(surface)
    }))
}

// ============================================================================
// TILE
// ============================================================================

/// One square raster tile. The surface size is fixed for the tile's
/// lifetime; only the pixel contents change.
pub struct Tile {
    /// World-space position of the tile's top-left corner.
    pub origin: WorldPoint,
    surface: Arc<RgbaImage>,
    revision: u64,
}

impl Tile {
    fn new(coord: TileCoord) -> Self {
        Self {
            origin: coord.origin(),
            surface: blank_surface(),
            revision: bump_revision(),
        }
    }

    fn from_surface(coord: TileCoord, surface: Arc<RgbaImage>) -> Self {
        Self {
            origin: coord.origin(),
            surface,
            revision: bump_revision(),
        }
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Mutable pixel access. Bumps the revision, and copies the pixel data
    /// first if the surface is still shared with the blank prototype or a
    /// history snapshot.
    pub fn surface_mut(&mut self) -> &mut RgbaImage {
        self.revision = bump_revision();
        Arc::make_mut(&mut self.surface)
    }

    /// Changes whenever the pixel contents change; drives texture
    /// re-upload in the renderer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn share_surface(&self) -> Arc<RgbaImage> {
        Arc::clone(&self.surface)
    }

    /// Repaint to background + grid without reallocating.
    fn reset(&mut self) {
        self.surface = blank_surface();
        self.revision = bump_revision();
    }
}

// ============================================================================
// TILE STORE
// ============================================================================

/// All tiles allocated this session, keyed by tile coordinate.
///
/// Keys are unique and unordered. A tile exists for every coordinate a
/// stroke has touched or the viewport has required; tiles are never
/// evicted, so memory grows monotonically with area visited.
#[derive(Default)]
pub struct TileStore {
    tiles: HashMap<TileCoord, Tile>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the tile at `coord` if absent. Calling again for an
    /// existing coordinate is a no-op that leaves pixel contents untouched.
    /// Returns whether a tile was created.
    pub fn ensure(&mut self, coord: TileCoord) -> bool {
        match self.tiles.entry(coord) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Tile::new(coord));
                true
            }
        }
    }

    /// Allocate every tile covering the visible screen rectangle expanded
    /// by a one-tile margin on all sides, so tiles are fully populated
    /// before they scroll into view. Call whenever the viewport or the
    /// screen size changes. Returns the number of tiles created.
    pub fn load_around(&mut self, viewport: &Viewport, screen_w: f32, screen_h: f32) -> usize {
        let top_left = TileCoord::containing(viewport.screen_to_world(pos2(0.0, 0.0)));
        let bottom_right = TileCoord::containing(viewport.screen_to_world(pos2(screen_w, screen_h)));
        let mut created = 0;
        for ty in (top_left.y - 1)..=(bottom_right.y + 1) {
            for tx in (top_left.x - 1)..=(bottom_right.x + 1) {
                if self.ensure(TileCoord::new(tx, ty)) {
                    created += 1;
                }
            }
        }
        created
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Visit every allocated tile whose closed square bounds intersect the
    /// world-space rectangle `[min, max]`, in row-major coordinate order.
    /// Tiles outside the rectangle are never looked at.
    pub fn for_each_intersecting(
        &mut self,
        min: WorldPoint,
        max: WorldPoint,
        mut f: impl FnMut(TileCoord, &mut Tile),
    ) {
        let size = TILE_SIZE as f32;
        // The closed tile [k*S, (k+1)*S] meets [min, max] exactly when
        // ceil(min/S) - 1 <= k <= floor(max/S).
        let x0 = (min.x / size).ceil() as i32 - 1;
        let x1 = (max.x / size).floor() as i32;
        let y0 = (min.y / size).ceil() as i32 - 1;
        let y1 = (max.y / size).floor() as i32;
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                let coord = TileCoord::new(tx, ty);
                if let Some(tile) = self.tiles.get_mut(&coord) {
                    f(coord, tile);
                }
            }
        }
    }

    /// Repaint every allocated tile to background + grid. Allocates and
    /// deallocates nothing.
    pub fn clear_all(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.reset();
        }
    }

    /// Renderer view: every allocated tile with its world origin, surface,
    /// and revision, in no particular order (tiles never overlap).
    pub fn tiles(&self) -> impl Iterator<Item = (TileCoord, &Tile)> + '_ {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }

    /// Shared handles to every surface, for history snapshots.
    pub(crate) fn share_surfaces(&self) -> HashMap<TileCoord, Arc<RgbaImage>> {
        self.tiles
            .iter()
            .map(|(coord, tile)| (*coord, tile.share_surface()))
            .collect()
    }

    /// Replace the whole tile set with the given surfaces. Tiles absent
    /// from `surfaces` disappear; the caller is expected to preload around
    /// the viewport afterwards.
    pub(crate) fn restore_surfaces(&mut self, surfaces: &HashMap<TileCoord, Arc<RgbaImage>>) {
        self.tiles = surfaces
            .iter()
            .map(|(coord, surface)| (*coord, Tile::from_surface(*coord, Arc::clone(surface))))
            .collect();
    }
}

//! Coordinate spaces: screen, world, and tile.
//!
//! Pointer input arrives in screen coordinates; subtracting the viewport
//! translation yields world coordinates; floor-division by the tile edge
//! length yields the tile that owns the point. Only the translation ever
//! changes - tile identity is a pure function of world position, and the
//! viewport never scales.

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;

use egui::{Pos2, Vec2, pos2};

use crate::tiles::TILE_SIZE;

/// A point on the unbounded drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Identifies one square tile of the surface grid.
///
/// Tile `(0, 0)` spans world `[0, TILE_SIZE]` on both axes; negative
/// coordinates address tiles left of and above the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile owning a world point. Floors toward negative infinity, so
    /// world `-1.0` maps to tile `-1`, not `0`.
    pub fn containing(p: WorldPoint) -> Self {
        let size = TILE_SIZE as f32;
        Self {
            x: (p.x / size).floor() as i32,
            y: (p.y / size).floor() as i32,
        }
    }

    /// World-space position of this tile's top-left corner.
    pub fn origin(self) -> WorldPoint {
        let size = TILE_SIZE as f32;
        WorldPoint::new(self.x as f32 * size, self.y as f32 * size)
    }

    /// Whether the tile's square bounds contain the point. Both edges are
    /// inclusive: a point exactly on a shared edge belongs to every
    /// adjacent tile.
    pub fn bounds_contain(self, p: WorldPoint) -> bool {
        let o = self.origin();
        let size = TILE_SIZE as f32;
        p.x >= o.x && p.x <= o.x + size && p.y >= o.y && p.y <= o.y + size
    }
}

/// The screen-to-world translation. Pan gestures and wheel scrolling move
/// the offset; nothing ever zooms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub offset: Vec2,
}

impl Viewport {
    /// Inverse mapping used to bring pointer coordinates onto the surface.
    pub fn screen_to_world(&self, screen: Pos2) -> WorldPoint {
        WorldPoint::new(screen.x - self.offset.x, screen.y - self.offset.y)
    }

    pub fn world_to_screen(&self, world: WorldPoint) -> Pos2 {
        pos2(world.x + self.offset.x, world.y + self.offset.y)
    }

    /// One-to-one pan: the translation follows the cursor exactly, with no
    /// easing or inertia. `anchor` is `cursor - offset` captured at pan
    /// start.
    pub fn pan_to(&mut self, cursor: Pos2, anchor: Pos2) {
        self.offset = cursor - anchor;
    }

    /// Wheel / trackpad scroll: the surface moves opposite the scroll
    /// direction.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.offset -= delta;
    }
}

//! Tools and stroke routing: dispatching a stroke segment to every tile it
//! touches.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use image::Rgba;

use crate::raster;
use crate::tiles::{BACKGROUND, TileStore};
use crate::world::{TileCoord, WorldPoint};

/// Drawing tool. A closed set: there is no "unknown tool" state to handle
/// anywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
}

impl Tool {
    /// Stroke width in world pixels. The eraser is deliberately much wider
    /// than the pencil.
    pub fn stroke_width(self) -> f32 {
        match self {
            Tool::Pencil => 2.0,
            Tool::Eraser => 20.0,
        }
    }

    /// The color actually painted: the eraser restores the paper color no
    /// matter what is selected.
    pub fn paint_color(self, selected: Rgba<u8>) -> Rgba<u8> {
        match self {
            Tool::Pencil => selected,
            Tool::Eraser => BACKGROUND,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
        }
    }
}

/// Dispatch one stroke segment to every tile it touches.
///
/// Both endpoint tiles are allocated first: a fast stroke can jump tiles
/// between input samples, and the far tile must exist even if the line only
/// clips it. A tile receives the segment when its closed square bounds
/// contain either endpoint; the segment is translated into that tile's
/// local space and painted with round caps, clipping at the tile edge.
///
/// Containment is tested on the endpoints, not the full line: a tile
/// crossed only mid-segment (neither endpoint inside it) is skipped and
/// not allocated, so a very fast stroke can leave a gap at a tile
/// boundary. That matches the interactive sampling rate this is built for,
/// where consecutive samples land at most a tile apart.
pub fn route_segment(
    store: &mut TileStore,
    prev: WorldPoint,
    curr: WorldPoint,
    tool: Tool,
    color: Rgba<u8>,
) {
    store.ensure(TileCoord::containing(prev));
    store.ensure(TileCoord::containing(curr));

    let width = tool.stroke_width();
    let paint = tool.paint_color(color);
    let min = WorldPoint::new(prev.x.min(curr.x), prev.y.min(curr.y));
    let max = WorldPoint::new(prev.x.max(curr.x), prev.y.max(curr.y));

    store.for_each_intersecting(min, max, |coord, tile| {
        if coord.bounds_contain(prev) || coord.bounds_contain(curr) {
            let o = tile.origin;
            raster::paint_segment(
                tile.surface_mut(),
                (prev.x - o.x, prev.y - o.y),
                (curr.x - o.x, curr.y - o.y),
                width,
                paint,
            );
        }
    });
}

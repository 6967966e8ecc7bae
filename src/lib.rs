//! Inkfield - an infinite, pannable freehand drawing surface.
//!
//! The drawing area is unbounded. It is stored as lazily-allocated square
//! raster tiles keyed by integer tile coordinates, so memory grows with the
//! area the user actually visits rather than with the coordinate range.
//! Strokes are routed to every tile they touch, and a linear history of
//! whole-surface snapshots backs undo/redo.
//!
//! Module map:
//! - [`world`]: coordinate spaces (screen, world, tile) and the viewport
//!   translation.
//! - [`tiles`]: the tile store - lazy allocation, preloading around the
//!   viewport, clearing.
//! - [`raster`]: the pixel-level segment painter.
//! - [`stroke`]: tools and routing of stroke segments to tiles.
//! - [`history`]: snapshot-based undo/redo over the whole tile set.
//! - [`input`]: normalized input events and the draw/pan gesture state
//!   machine.
//! - [`app`] and [`components`]: the egui shell around the above.

pub mod app;
pub mod cli;
pub mod components;
pub mod history;
pub mod input;
pub mod logger;
pub mod raster;
pub mod stroke;
pub mod tiles;
pub mod world;

use egui::vec2;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn ensure_creates_exactly_once() {
    let mut store = TileStore::new();
    assert!(store.ensure(TileCoord::new(2, -1)));
    assert!(!store.ensure(TileCoord::new(2, -1)));
    assert_eq!(store.len(), 1);
}

#[test]
fn ensure_again_keeps_pixel_content() {
    let mut store = TileStore::new();
    let coord = TileCoord::new(0, 0);
    store.ensure(coord);
    store
        .get_mut(coord)
        .unwrap()
        .surface_mut()
        .put_pixel(10, 10, Rgba([1, 2, 3, 255]));
    store.ensure(coord);
    assert_eq!(
        *store.get(coord).unwrap().surface().get_pixel(10, 10),
        Rgba([1, 2, 3, 255])
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn fresh_tiles_carry_background_and_grid() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(0, 0));
    let surface = store.get(TileCoord::new(0, 0)).unwrap().surface();
    assert_eq!(*surface.get_pixel(25, 33), BACKGROUND);
    assert_eq!(*surface.get_pixel(GRID_SPACING, 33), GRID_LINE);
    assert_eq!(*surface.get_pixel(33, 3 * GRID_SPACING), GRID_LINE);
    assert_eq!(*surface.get_pixel(0, 0), GRID_LINE);
}

#[test]
fn tiles_know_their_world_origin() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(-2, 3));
    let origin = store.get(TileCoord::new(-2, 3)).unwrap().origin;
    assert_eq!(origin.x, -2.0 * TILE_SIZE as f32);
    assert_eq!(origin.y, 3.0 * TILE_SIZE as f32);
}

#[test]
fn load_around_covers_screen_plus_one_tile_margin() {
    let mut store = TileStore::new();
    let viewport = Viewport::default();
    // An 800x600 screen at the origin sees only tile (0,0); the margin
    // brings in the eight neighbors.
    assert_eq!(store.load_around(&viewport, 800.0, 600.0), 9);
    for ty in -1..=1 {
        for tx in -1..=1 {
            assert!(store.contains(TileCoord::new(tx, ty)), "({tx},{ty})");
        }
    }
    // Unchanged viewport: nothing new.
    assert_eq!(store.load_around(&viewport, 800.0, 600.0), 0);
}

#[test]
fn load_around_follows_the_viewport_into_negative_space() {
    let mut store = TileStore::new();
    let viewport = Viewport {
        offset: vec2(TILE_SIZE as f32 * 2.0, 0.0),
    };
    store.load_around(&viewport, 800.0, 600.0);
    assert!(store.contains(TileCoord::new(-3, -1)));
    assert!(store.contains(TileCoord::new(-1, 1)));
    assert!(!store.contains(TileCoord::new(0, 0)));
}

#[test]
fn clear_repaints_without_deallocating() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(0, 0));
    store.ensure(TileCoord::new(4, 4));
    store
        .get_mut(TileCoord::new(0, 0))
        .unwrap()
        .surface_mut()
        .put_pixel(5, 5, Rgba([9, 9, 9, 255]));
    store.clear_all();
    assert_eq!(store.len(), 2);
    let surface = store.get(TileCoord::new(0, 0)).unwrap().surface();
    assert_eq!(*surface.get_pixel(5, 5), BACKGROUND);
    assert_eq!(*surface.get_pixel(GRID_SPACING, 5), GRID_LINE);
}

#[test]
fn mutation_and_clear_bump_the_revision() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(0, 0));
    let r0 = store.get(TileCoord::new(0, 0)).unwrap().revision();
    store.get_mut(TileCoord::new(0, 0)).unwrap().surface_mut();
    let r1 = store.get(TileCoord::new(0, 0)).unwrap().revision();
    assert!(r1 > r0);
    store.clear_all();
    let r2 = store.get(TileCoord::new(0, 0)).unwrap().revision();
    assert!(r2 > r1);
}

#[test]
fn intersecting_visits_only_overlapping_tiles() {
    let mut store = TileStore::new();
    for tx in 0..3 {
        store.ensure(TileCoord::new(tx, 0));
    }
    let mut visited = Vec::new();
    store.for_each_intersecting(
        WorldPoint::new(100.0, 100.0),
        WorldPoint::new(2100.0, 100.0),
        |coord, _| visited.push(coord),
    );
    assert_eq!(visited, vec![TileCoord::new(0, 0), TileCoord::new(1, 0)]);
}

#[test]
fn intersecting_includes_tiles_touching_the_rect_edge() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(0, 0));
    store.ensure(TileCoord::new(1, 0));
    let mut visited = Vec::new();
    let seam = WorldPoint::new(TILE_SIZE as f32, 10.0);
    store.for_each_intersecting(seam, seam, |coord, _| visited.push(coord));
    // A degenerate rect on the seam touches both closed tile bounds.
    assert_eq!(visited, vec![TileCoord::new(0, 0), TileCoord::new(1, 0)]);
}

#[test]
fn intersecting_skips_unallocated_coordinates() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(1, 0));
    let mut visited = Vec::new();
    store.for_each_intersecting(
        WorldPoint::new(-100.0, 0.0),
        WorldPoint::new(4100.0, 0.0),
        |coord, _| visited.push(coord),
    );
    assert_eq!(visited, vec![TileCoord::new(1, 0)]);
}

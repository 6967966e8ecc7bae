use std::collections::HashMap;

use pretty_assertions::assert_eq;

use super::*;

const INK: Rgba<u8> = Rgba([200, 30, 30, 255]);

fn world(x: f32, y: f32) -> WorldPoint {
    WorldPoint::new(x, y)
}

fn revisions(store: &TileStore) -> HashMap<TileCoord, u64> {
    store.tiles().map(|(c, t)| (c, t.revision())).collect()
}

#[test]
fn segment_inside_one_tile_touches_only_that_tile() {
    let mut store = TileStore::new();
    for tx in -1..=1 {
        for ty in -1..=1 {
            store.ensure(TileCoord::new(tx, ty));
        }
    }
    let before = revisions(&store);
    route_segment(
        &mut store,
        world(300.0, 300.0),
        world(700.0, 700.0),
        Tool::Pencil,
        INK,
    );
    assert_eq!(
        *store
            .get(TileCoord::new(0, 0))
            .unwrap()
            .surface()
            .get_pixel(500, 500),
        INK
    );
    for (coord, revision) in revisions(&store) {
        if coord == TileCoord::new(0, 0) {
            assert!(revision > before[&coord]);
        } else {
            assert_eq!(revision, before[&coord], "tile {coord:?} was touched");
        }
    }
}

#[test]
fn endpoint_tiles_are_created_on_demand() {
    let mut store = TileStore::new();
    route_segment(
        &mut store,
        world(100.0, 100.0),
        world(2100.0, 100.0),
        Tool::Pencil,
        INK,
    );
    assert_eq!(store.len(), 2);
    assert!(store.contains(TileCoord::new(0, 0)));
    assert!(store.contains(TileCoord::new(1, 0)));
}

#[test]
fn segment_spanning_two_tiles_paints_both_sides_of_the_seam() {
    let mut store = TileStore::new();
    route_segment(
        &mut store,
        world(100.0, 100.0),
        world(2100.0, 100.0),
        Tool::Pencil,
        INK,
    );

    // Left tile: the full run from local 100 up to the tile edge.
    let left = store.get(TileCoord::new(0, 0)).unwrap().surface();
    assert_eq!(*left.get_pixel(100, 100), INK);
    assert_eq!(*left.get_pixel(1500, 100), INK);
    assert_eq!(*left.get_pixel(1999, 100), INK);
    assert_ne!(*left.get_pixel(100, 300), INK);

    // Right tile: the same segment lands at local x -1900..100, so ink
    // stops right after local 100 (plus the cap radius).
    let right = store.get(TileCoord::new(1, 0)).unwrap().surface();
    assert_eq!(*right.get_pixel(0, 100), INK);
    assert_eq!(*right.get_pixel(50, 100), INK);
    assert_eq!(*right.get_pixel(99, 100), INK);
    assert_ne!(*right.get_pixel(150, 100), INK);
}

#[test]
fn distant_jump_creates_only_the_endpoint_tiles() {
    let mut store = TileStore::new();
    // The middle tile is crossed but owns neither endpoint: it is neither
    // created nor painted.
    route_segment(
        &mut store,
        world(500.0, 500.0),
        world(4500.0, 500.0),
        Tool::Pencil,
        INK,
    );
    assert!(store.contains(TileCoord::new(0, 0)));
    assert!(store.contains(TileCoord::new(2, 0)));
    assert!(!store.contains(TileCoord::new(1, 0)));
}

#[test]
fn preexisting_mid_tile_is_still_skipped() {
    let mut store = TileStore::new();
    store.ensure(TileCoord::new(1, 0));
    let before = revisions(&store);
    route_segment(
        &mut store,
        world(500.0, 500.0),
        world(4500.0, 500.0),
        Tool::Pencil,
        INK,
    );
    assert_eq!(
        store.get(TileCoord::new(1, 0)).unwrap().revision(),
        before[&TileCoord::new(1, 0)]
    );
}

#[test]
fn endpoint_on_the_seam_paints_both_neighbors() {
    let mut store = TileStore::new();
    route_segment(
        &mut store,
        world(1900.0, 500.0),
        world(2000.0, 500.0),
        Tool::Pencil,
        INK,
    );
    // x = 2000 belongs to tile (1,0), which gets allocated and receives
    // the segment clipped to its very first column.
    assert!(store.contains(TileCoord::new(1, 0)));
    let right = store.get(TileCoord::new(1, 0)).unwrap().surface();
    assert_eq!(*right.get_pixel(0, 500), INK);
    assert_ne!(*right.get_pixel(5, 500), INK);
}

#[test]
fn eraser_paints_background_with_a_wide_stroke() {
    let mut store = TileStore::new();
    route_segment(
        &mut store,
        world(400.0, 403.0),
        world(600.0, 403.0),
        Tool::Pencil,
        INK,
    );
    route_segment(
        &mut store,
        world(400.0, 403.0),
        world(600.0, 403.0),
        Tool::Eraser,
        INK,
    );
    let surface = store.get(TileCoord::new(0, 0)).unwrap().surface();
    assert_eq!(*surface.get_pixel(500, 403), BACKGROUND);
    // The eraser is wide enough to blank the grid line two pixels up; the
    // selected color is irrelevant to it.
    assert_eq!(*surface.get_pixel(500, 400), BACKGROUND);
}

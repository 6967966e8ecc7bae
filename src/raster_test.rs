use super::*;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([10, 20, 30, 255]);

fn blank(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, PAPER)
}

#[test]
fn paints_along_the_whole_segment() {
    let mut surface = blank(100, 100);
    paint_segment(&mut surface, (10.0, 50.0), (90.0, 50.0), 2.0, INK);
    for x in [10_u32, 50, 89] {
        assert_eq!(*surface.get_pixel(x, 50), INK, "x={x}");
    }
    // Nothing far off the line.
    assert_eq!(*surface.get_pixel(50, 60), PAPER);
    assert_eq!(*surface.get_pixel(50, 40), PAPER);
}

#[test]
fn zero_length_segment_paints_a_dot() {
    let mut surface = blank(40, 40);
    paint_segment(&mut surface, (20.0, 20.0), (20.0, 20.0), 8.0, INK);
    assert_eq!(*surface.get_pixel(20, 20), INK);
    assert_eq!(*surface.get_pixel(20, 17), INK);
    assert_eq!(*surface.get_pixel(20, 27), PAPER);
}

#[test]
fn caps_are_round_and_extend_past_the_endpoints() {
    let mut surface = blank(100, 100);
    paint_segment(&mut surface, (50.0, 50.0), (60.0, 50.0), 10.0, INK);
    // Cap reaches ~radius to the left of the start point...
    assert_eq!(*surface.get_pixel(46, 50), INK);
    // ...but the square corner of the cap's bounding box stays empty.
    assert_eq!(*surface.get_pixel(45, 45), PAPER);
}

#[test]
fn zero_width_paints_nothing() {
    let mut surface = blank(30, 30);
    paint_segment(&mut surface, (5.0, 5.0), (25.0, 25.0), 0.0, INK);
    assert!(surface.pixels().all(|px| *px == PAPER));
}

#[test]
fn out_of_bounds_coordinates_clip_cleanly() {
    let mut surface = blank(50, 50);
    // Crosses the whole surface with both endpoints outside it.
    paint_segment(&mut surface, (-200.0, 25.0), (300.0, 25.0), 4.0, INK);
    assert_eq!(*surface.get_pixel(0, 25), INK);
    assert_eq!(*surface.get_pixel(49, 25), INK);
    // Entirely outside: no panic, no pixels.
    paint_segment(&mut surface, (-500.0, -500.0), (-400.0, -400.0), 6.0, INK);
    assert_eq!(*surface.get_pixel(0, 0), PAPER);
}

//! Vector glyphs for the icons above the active line.
//!
//! Glyphs are open paths meant to be stroked. `extent` is half the width of
//! the glyph's drawing area.

use kurbo::{Affine, Arc, BezPath, Point, Rect, Shape, Vec2};
use linesmith_core::IconKind;
use std::f64::consts::{FRAC_PI_2, PI};

const TOLERANCE: f64 = 0.1;

/// Glyph for an icon. The lock icon shows a closed or open padlock.
pub fn glyph(icon: IconKind, locked: bool, center: Point, extent: f64) -> BezPath {
    match icon {
        IconKind::Move => move_glyph(center, extent),
        IconKind::Lock => lock_glyph(center, extent, locked),
        IconKind::Rotate => rotate_glyph(center, extent),
    }
}

/// Four-way arrow.
fn move_glyph(center: Point, extent: f64) -> BezPath {
    let head = extent * 0.35;
    let mut arm = BezPath::new();
    arm.move_to(center);
    arm.line_to(center + Vec2::new(extent, 0.0));
    arm.move_to(center + Vec2::new(extent - head, -head));
    arm.line_to(center + Vec2::new(extent, 0.0));
    arm.line_to(center + Vec2::new(extent - head, head));

    let mut path = BezPath::new();
    for quarter in 0..4_u8 {
        let rotation = Affine::rotate_about(f64::from(quarter) * FRAC_PI_2, center);
        path.extend((rotation * arm.clone()).elements().iter().copied());
    }
    path
}

/// Padlock. When unlocked the shackle is lifted and open on the right.
fn lock_glyph(center: Point, extent: f64, locked: bool) -> BezPath {
    let body_top = center.y - 0.1 * extent;
    let body = Rect::new(
        center.x - 0.6 * extent,
        body_top,
        center.x + 0.6 * extent,
        center.y + 0.8 * extent,
    );
    let mut path = body.to_path(TOLERANCE);

    let radius = 0.4 * extent;
    let lift = if locked { 0.0 } else { 0.3 * extent };
    let shackle_center = Point::new(center.x, body_top - lift);
    // From the left leg over the top to the right leg.
    let shackle = Arc::new(shackle_center, (radius, radius), PI, PI, 0.0);
    path.extend(shackle.path_elements(TOLERANCE));
    if !locked {
        path.move_to(Point::new(center.x - radius, shackle_center.y));
        path.line_to(Point::new(center.x - radius, body_top));
    }
    path
}

/// Clockwise circular arrow.
fn rotate_glyph(center: Point, extent: f64) -> BezPath {
    let radius = 0.7 * extent;
    let head = 0.3 * extent;
    let arc = Arc::new(center, (radius, radius), -FRAC_PI_2, 1.5 * PI, 0.0);
    let mut path = arc.to_path(TOLERANCE);

    // The arc ends on the left, heading up.
    let tip = Point::new(center.x - radius, center.y);
    path.move_to(tip + Vec2::new(-head, head));
    path.line_to(tip);
    path.line_to(tip + Vec2::new(head, head));
    path
}

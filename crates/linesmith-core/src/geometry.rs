//! Pure geometry used by hit testing, manipulation and rendering.

use kurbo::{Affine, BezPath, ParamCurveNearest, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Divisor applied to neighbour chords when deriving spline control points.
pub const SPLINE_TENSION_DIVISOR: f64 = 6.0;

/// Accuracy used for nearest-point queries on curve segments.
const NEAREST_ACCURACY: f64 = 1e-3;

/// Build a smooth interpolating curve through `points`.
///
/// Catmull-Rom spline converted to cubic beziers: each consecutive pair
/// `p1 -> p2` gets control points derived from its neighbours, with the
/// neighbours clamped to the ends of the sequence. With only two points the
/// control points lie on the chord, so the curve is a straight segment.
pub fn spline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }

    path.move_to(points[0]);
    let last = points.len() - 1;
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let cp1 = p1 + (p2 - p0) / SPLINE_TENSION_DIVISOR;
        let cp2 = p2 - (p3 - p1) / SPLINE_TENSION_DIVISOR;
        path.curve_to(cp1, cp2, p2);
    }
    path
}

/// Anchor for the floating control icons of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconAnchor {
    /// Smallest Y over all points (top edge of the bounding box).
    pub min_y: f64,
    /// Horizontal midpoint of the bounding box.
    pub mid_x: f64,
}

/// Compute the icon anchor over a point set. Returns `None` for no points.
pub fn icon_anchor(points: &[Point]) -> Option<IconAnchor> {
    let first = points.first()?;
    let (min_x, max_x, min_y) = points.iter().fold(
        (first.x, first.x, first.y),
        |(mn_x, mx_x, mn_y), p| (mn_x.min(p.x), mx_x.max(p.x), mn_y.min(p.y)),
    );
    Some(IconAnchor {
        min_y,
        mid_x: (min_x + max_x) / 2.0,
    })
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + t * seg;
    point.distance(proj)
}

/// Check whether `point` falls inside `path` stroked at `width`.
///
/// Caps and joins are treated as round: the point hits when it lies within
/// `width / 2` of the nearest point on any segment.
pub fn stroke_hit_test(path: &BezPath, point: Point, width: f64) -> bool {
    let half = width / 2.0;
    let limit = half * half;
    path.segments()
        .any(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq <= limit)
}

/// Angle of `point` as seen from `center`, in radians.
pub fn angle_from(center: Point, point: Point) -> f64 {
    (point - center).atan2()
}

/// Rotate `point` by `angle` radians about `center`.
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    Affine::rotate_about(angle, center) * point
}

/// Drawable area of the canvas with an inset margin kept free on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
    pub inset: f64,
}

impl CanvasBounds {
    pub fn new(size: Size, inset: f64) -> Self {
        Self {
            width: size.width,
            height: size.height,
            inset,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.inset
    }

    pub fn max_x(&self) -> f64 {
        self.width - self.inset
    }

    pub fn min_y(&self) -> f64 {
        self.inset
    }

    pub fn max_y(&self) -> f64 {
        self.height - self.inset
    }

    /// Clamp a point into the interior. Never panics: on a canvas narrower
    /// than twice the inset the lower bound wins.
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.min(self.max_x()).max(self.min_x()),
            point.y.min(self.max_y()).max(self.min_y()),
        )
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y() && y <= self.max_y()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.contains_x(point.x) && self.contains_y(point.y)
    }

    /// Gate a translation per axis: an axis component survives only when
    /// every point stays inside the bounds after moving along that axis.
    pub fn gate_translation(&self, points: &[Point], delta: Vec2) -> Vec2 {
        let dx = if points.iter().all(|p| self.contains_x(p.x + delta.x)) {
            delta.x
        } else {
            0.0
        };
        let dy = if points.iter().all(|p| self.contains_y(p.y + delta.y)) {
            delta.y
        } else {
            0.0
        };
        Vec2::new(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_spline_needs_two_points() {
        assert!(spline_path(&[]).elements().is_empty());
        assert!(spline_path(&[Point::new(1.0, 1.0)]).elements().is_empty());
    }

    #[test]
    fn test_two_point_spline_is_straight() {
        let a = Point::new(400.0, 300.0);
        let b = Point::new(700.0, 420.0);
        let path = spline_path(&[a, b]);
        let els = path.elements();
        assert_eq!(els.len(), 2);
        assert_eq!(els[0], PathEl::MoveTo(a));
        let PathEl::CurveTo(c1, c2, end) = els[1] else {
            panic!("expected a cubic");
        };
        assert_point_eq(end, b);
        // Control points sit on the chord, a sixth of the way in from each end.
        assert!(point_to_segment_dist(c1, a, b) < EPS);
        assert!(point_to_segment_dist(c2, a, b) < EPS);
        assert_point_eq(c1, a + (b - a) / 6.0);
        assert_point_eq(c2, b - (b - a) / 6.0);
    }

    #[test]
    fn test_spline_passes_through_every_point() {
        let pts = [
            Point::new(200.0, 300.0),
            Point::new(350.0, 300.0),
            Point::new(350.0, 450.0),
            Point::new(500.0, 450.0),
        ];
        let path = spline_path(&pts);
        let ends: Vec<Point> = path
            .elements()
            .iter()
            .filter_map(|el| el.end_point())
            .collect();
        assert_eq!(ends.len(), pts.len());
        for (got, want) in ends.iter().zip(pts.iter()) {
            assert_point_eq(*got, *want);
        }
    }

    #[test]
    fn test_spline_interior_control_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(60.0, 60.0),
        ];
        let path = spline_path(&pts);
        let els = path.elements();
        assert_eq!(els.len(), 3);

        // Segment 0: p0 clamped to p1 = (0,0), p2 = (60,0), p3 = (60,60).
        let PathEl::CurveTo(c1, c2, _) = els[1] else {
            panic!("expected a cubic");
        };
        assert_point_eq(c1, Point::new(10.0, 0.0));
        assert_point_eq(c2, Point::new(50.0, -10.0));

        // Segment 1: p0 = (0,0), p1 = (60,0), p2 = (60,60), p3 clamped to p2.
        let PathEl::CurveTo(c1, c2, _) = els[2] else {
            panic!("expected a cubic");
        };
        assert_point_eq(c1, Point::new(70.0, 10.0));
        assert_point_eq(c2, Point::new(60.0, 50.0));
    }

    #[test]
    fn test_icon_anchor() {
        let pts = [
            Point::new(200.0, 250.0),
            Point::new(500.0, 250.0),
            Point::new(350.0, 200.0),
        ];
        let anchor = icon_anchor(&pts).unwrap();
        assert!((anchor.min_y - 200.0).abs() < EPS);
        assert!((anchor.mid_x - 350.0).abs() < EPS);
        assert!(icon_anchor(&[]).is_none());
    }

    #[test]
    fn test_segment_distance_on_segment_is_zero() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!(point_to_segment_dist(Point::new(5.0, 5.0), a, b) < EPS);
        assert!(point_to_segment_dist(a, a, b) < EPS);
        assert!(point_to_segment_dist(b, a, b) < EPS);
    }

    #[test]
    fn test_segment_distance_degenerate_segment() {
        let a = Point::new(3.0, 4.0);
        let d = point_to_segment_dist(Point::new(0.0, 0.0), a, a);
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_clamps_projection() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        // Beyond b: distance to b, not to the infinite line.
        let d = point_to_segment_dist(Point::new(13.0, 4.0), a, b);
        assert!((d - 5.0).abs() < EPS);
        let d = point_to_segment_dist(Point::new(5.0, -7.0), a, b);
        assert!((d - 7.0).abs() < EPS);
    }

    #[test]
    fn test_stroke_hit_test() {
        let path = spline_path(&[Point::new(0.0, 100.0), Point::new(200.0, 100.0)]);
        assert!(stroke_hit_test(&path, Point::new(100.0, 100.0), 20.0));
        assert!(stroke_hit_test(&path, Point::new(100.0, 109.0), 20.0));
        assert!(!stroke_hit_test(&path, Point::new(100.0, 111.0), 20.0));
        assert!(!stroke_hit_test(&path, Point::new(250.0, 100.0), 20.0));
    }

    #[test]
    fn test_stroke_hit_test_follows_curve() {
        let pts = [
            Point::new(200.0, 250.0),
            Point::new(350.0, 200.0),
            Point::new(500.0, 250.0),
        ];
        let path = spline_path(&pts);
        // The curve passes through its elbow.
        assert!(stroke_hit_test(&path, Point::new(350.0, 205.0), 20.0));
        // The chord between the endpoints is well below the curve here.
        assert!(!stroke_hit_test(&path, Point::new(350.0, 250.0), 20.0));
    }

    #[test]
    fn test_rotate_round_trip() {
        let center = Point::new(450.0, 300.0);
        let p = Point::new(700.0, 320.0);
        let theta = 0.73;
        let rotated = rotate_point(p, center, theta);
        assert!((rotated.distance(center) - p.distance(center)).abs() < 1e-9);
        assert_point_eq(rotate_point(rotated, center, -theta), p);
    }

    #[test]
    fn test_angle_from() {
        let c = Point::new(10.0, 10.0);
        assert!(angle_from(c, Point::new(20.0, 10.0)).abs() < EPS);
        let a = angle_from(c, Point::new(10.0, 20.0));
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_clamp_stays_inside() {
        let bounds = CanvasBounds::new(Size::new(800.0, 600.0), 5.0);
        for &(x, y) in &[
            (-100.0, -100.0),
            (0.0, 0.0),
            (400.0, 300.0),
            (799.0, 1.0),
            (1e9, -1e9),
        ] {
            let p = bounds.clamp(Point::new(x, y));
            assert!(p.x >= 5.0 && p.x <= 795.0);
            assert!(p.y >= 5.0 && p.y <= 595.0);
        }
        assert_eq!(
            bounds.clamp(Point::new(400.0, 300.0)),
            Point::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_clamp_tiny_canvas_does_not_panic() {
        let bounds = CanvasBounds::new(Size::new(4.0, 4.0), 5.0);
        assert_eq!(bounds.clamp(Point::new(100.0, -3.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_gate_translation_per_axis() {
        let bounds = CanvasBounds::new(Size::new(100.0, 100.0), 5.0);
        let pts = [Point::new(10.0, 50.0), Point::new(90.0, 60.0)];
        // X would push the right point past 95; Y is fine.
        let d = bounds.gate_translation(&pts, Vec2::new(10.0, 10.0));
        assert_eq!(d, Vec2::new(0.0, 10.0));
        let d = bounds.gate_translation(&pts, Vec2::new(-4.0, 40.0));
        assert_eq!(d, Vec2::new(-4.0, 0.0));
    }
}

//! Line shape.

use super::{LineId, SerializableColor};
use crate::geometry::{self, CanvasBounds, IconAnchor};
use kurbo::{Affine, BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template used when adding a new line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Two endpoints, no elbows.
    #[default]
    Straight,
    /// Right-angle step with two elbows.
    Step,
    /// Single elbow pulling the curve upward.
    Curved,
}

impl LineKind {
    /// Start point, elbows and end point of the template.
    pub fn template(self) -> (Point, Vec<Point>, Point) {
        match self {
            LineKind::Straight => (Point::new(400.0, 300.0), Vec::new(), Point::new(700.0, 300.0)),
            LineKind::Step => (
                Point::new(200.0, 300.0),
                vec![Point::new(350.0, 300.0), Point::new(350.0, 450.0)],
                Point::new(500.0, 450.0),
            ),
            LineKind::Curved => (
                Point::new(200.0, 250.0),
                vec![Point::new(350.0, 200.0)],
                Point::new(500.0, 250.0),
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineKind::Straight => "straight",
            LineKind::Step => "step",
            LineKind::Curved => "curved",
        }
    }
}

/// Index-based address of a point within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRef {
    Start,
    End,
    /// Index into the elbow sequence.
    Elbow(usize),
}

/// A multi-segment line drawn as a spline through its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: LineId,
    pub start: Point,
    pub end: Point,
    /// Interior points, ordered from the start side to the end side.
    #[serde(default)]
    pub elbows: Vec<Point>,
    pub color: SerializableColor,
    /// Stroke width, always at least 1.
    pub width: u32,
    #[serde(default)]
    pub locked: bool,
}

impl Line {
    /// Create a new straight line.
    pub fn new(start: Point, end: Point, color: SerializableColor, width: u32) -> Self {
        Self {
            id: Uuid::now_v7(),
            start,
            end,
            elbows: Vec::new(),
            color,
            width: width.max(1),
            locked: false,
        }
    }

    /// Create a line from one of the templates.
    pub fn from_kind(kind: LineKind, color: SerializableColor, width: u32) -> Self {
        let (start, elbows, end) = kind.template();
        Self {
            elbows,
            ..Self::new(start, end, color, width)
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    /// All points in path order: start, elbows, end.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts = Vec::with_capacity(self.elbows.len() + 2);
        pts.push(self.start);
        pts.extend(&self.elbows);
        pts.push(self.end);
        pts
    }

    /// Point references in handle priority order: start, end, then elbows.
    pub fn point_refs(&self) -> impl Iterator<Item = PointRef> + '_ {
        [PointRef::Start, PointRef::End]
            .into_iter()
            .chain((0..self.elbows.len()).map(PointRef::Elbow))
    }

    pub fn point(&self, at: PointRef) -> Option<Point> {
        match at {
            PointRef::Start => Some(self.start),
            PointRef::End => Some(self.end),
            PointRef::Elbow(i) => self.elbows.get(i).copied(),
        }
    }

    pub fn point_mut(&mut self, at: PointRef) -> Option<&mut Point> {
        match at {
            PointRef::Start => Some(&mut self.start),
            PointRef::End => Some(&mut self.end),
            PointRef::Elbow(i) => self.elbows.get_mut(i),
        }
    }

    fn points_mut(&mut self) -> impl Iterator<Item = &mut Point> {
        [&mut self.start, &mut self.end]
            .into_iter()
            .chain(self.elbows.iter_mut())
    }

    /// Midpoint between start and end (the rotation center).
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.max(1);
    }

    /// Spline path through all points.
    pub fn to_path(&self) -> BezPath {
        geometry::spline_path(&self.all_points())
    }

    pub fn icon_anchor(&self) -> IconAnchor {
        // A line always has a start point, so the anchor always exists.
        geometry::icon_anchor(&self.all_points()).unwrap_or(IconAnchor {
            min_y: self.start.y,
            mid_x: self.start.x,
        })
    }

    /// Check whether `point` lies on the stroke inflated to `hit_width`.
    pub fn hit_test(&self, point: Point, hit_width: f64) -> bool {
        geometry::stroke_hit_test(&self.to_path(), point, hit_width)
    }

    /// Find the segment (index into `all_points` windows) closest to
    /// `point`, provided it is strictly closer than `threshold`.
    pub fn nearest_segment(&self, point: Point, threshold: f64) -> Option<usize> {
        let pts = self.all_points();
        let mut best = None;
        let mut min_dist = threshold;
        for (i, w) in pts.windows(2).enumerate() {
            let d = geometry::point_to_segment_dist(point, w[0], w[1]);
            if d < min_dist {
                min_dist = d;
                best = Some(i);
            }
        }
        best
    }

    /// Insert an elbow so that it sits between the endpoints of `segment`.
    pub fn insert_elbow(&mut self, segment: usize, point: Point) {
        let at = segment.min(self.elbows.len());
        self.elbows.insert(at, point);
    }

    /// Remove an elbow, returning it if the index was valid.
    pub fn remove_elbow(&mut self, index: usize) -> Option<Point> {
        (index < self.elbows.len()).then(|| self.elbows.remove(index))
    }

    /// Apply a transform to every point.
    pub fn transform(&mut self, affine: Affine) {
        for p in self.points_mut() {
            *p = affine * *p;
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Rotate every point about `center`, clamping each result into `bounds`.
    pub fn rotate_within(&mut self, center: Point, angle: f64, bounds: &CanvasBounds) {
        for p in self.points_mut() {
            *p = bounds.clamp(geometry::rotate_point(*p, center, angle));
        }
    }
}

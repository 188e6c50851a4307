//! Controls of the active line and the drag descriptor.

use crate::config::EditorConfig;
use crate::shapes::{Line, LineId, PointRef};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// The floating icons drawn above the active line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKind {
    Move,
    Lock,
    Rotate,
}

impl IconKind {
    /// Icons in left-to-right order.
    pub const ALL: [IconKind; 3] = [IconKind::Move, IconKind::Lock, IconKind::Rotate];

    /// Horizontal slot relative to the anchor, in units of icon spacing.
    fn slot(self) -> f64 {
        match self {
            IconKind::Move => -1.0,
            IconKind::Lock => 0.0,
            IconKind::Rotate => 1.0,
        }
    }
}

/// Type of control on the active line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Draggable start, end or elbow point.
    Point(PointRef),
    /// Delete glyph next to an elbow (index into the elbows).
    DeleteElbow(usize),
    Icon(IconKind),
}

/// A control with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        point.distance(self.position) < radius
    }
}

/// Center of an icon above `line`.
pub fn icon_position(line: &Line, icon: IconKind, config: &EditorConfig) -> Point {
    let anchor = line.icon_anchor();
    Point::new(
        anchor.mid_x + icon.slot() * config.icon_spacing,
        anchor.min_y - config.icon_offset_y,
    )
}

/// Center of the delete glyph of an elbow.
pub fn delete_glyph_position(elbow: Point, config: &EditorConfig) -> Point {
    let (dx, dy) = config.delete_offset;
    elbow + Vec2::new(dx, dy)
}

/// All controls of a line, in hit-test priority order.
///
/// The lock icon comes first because it works even on locked lines; then
/// elbow delete glyphs, points (start, end, elbows), and the move and
/// rotate icons.
pub fn get_handles(line: &Line, config: &EditorConfig) -> Vec<Handle> {
    let mut handles = vec![Handle::new(
        icon_position(line, IconKind::Lock, config),
        HandleKind::Icon(IconKind::Lock),
    )];
    for (i, &elbow) in line.elbows.iter().enumerate() {
        handles.push(Handle::new(
            delete_glyph_position(elbow, config),
            HandleKind::DeleteElbow(i),
        ));
    }
    for at in line.point_refs() {
        if let Some(p) = line.point(at) {
            handles.push(Handle::new(p, HandleKind::Point(at)));
        }
    }
    for icon in [IconKind::Move, IconKind::Rotate] {
        handles.push(Handle::new(
            icon_position(line, icon, config),
            HandleKind::Icon(icon),
        ));
    }
    handles
}

/// Hit radius used when pressing a control.
fn press_radius(kind: HandleKind, config: &EditorConfig) -> f64 {
    match kind {
        HandleKind::Point(_) => config.handle_hit_radius,
        HandleKind::DeleteElbow(_) => config.delete_hit_radius,
        HandleKind::Icon(_) => config.icon_hit_radius,
    }
}

/// Find which control (if any) a press at `point` lands on.
///
/// Locked lines only expose their lock icon.
pub fn hit_test_handles(line: &Line, point: Point, config: &EditorConfig) -> Option<HandleKind> {
    get_handles(line, config)
        .into_iter()
        .filter(|h| !line.locked || h.kind == HandleKind::Icon(IconKind::Lock))
        .find(|h| h.hit_test(point, press_radius(h.kind, config)))
        .map(|h| h.kind)
}

/// Cursor shape suggested for the current pointer position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a draggable point.
    Grab,
    /// While dragging.
    Grabbing,
    /// Over something clickable.
    Pointer,
}

impl CursorHint {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
            CursorHint::Pointer => "pointer",
        }
    }
}

/// An in-progress drag. Exists only between a press and the next release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Dragging a single point of a line.
    Point { line: LineId, point: PointRef },
    /// Translating a whole line; `last` is the pointer at the previous move.
    Line { line: LineId, last: Point },
    /// Rotating a line about `center`; `angle` is the pointer angle at the
    /// previous move.
    Rotate {
        line: LineId,
        center: Point,
        angle: f64,
    },
}

impl DragState {
    pub fn line(&self) -> LineId {
        match *self {
            DragState::Point { line, .. }
            | DragState::Line { line, .. }
            | DragState::Rotate { line, .. } => line,
        }
    }
}

//! Editor session: the line store plus all interaction state, and the
//! dispatcher that turns pointer events and commands into mutations.

use crate::config::EditorConfig;
use crate::document::LineStore;
use crate::export;
use crate::geometry::{self, CanvasBounds};
use crate::input::PointerEvent;
use crate::menu::{MenuId, MenuState, ToolbarState};
use crate::selection::{
    CursorHint, DragState, HandleKind, IconKind, delete_glyph_position, hit_test_handles,
};
use crate::shapes::{Line, LineId, LineKind, SerializableColor};
use kurbo::{Point, Size};

/// A single editing session over one drawing.
///
/// All mutations mark the session dirty; the host polls [`take_redraw`]
/// and redraws the whole canvas when it returns `true`.
///
/// [`take_redraw`]: EditorSession::take_redraw
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    store: LineStore,
    bounds: CanvasBounds,
    /// The single line whose controls are shown.
    active: Option<LineId>,
    /// Line under the pointer while idle.
    hovered: Option<LineId>,
    drag: Option<DragState>,
    menus: MenuState,
    cursor: CursorHint,
    needs_redraw: bool,
}

impl EditorSession {
    /// Create an empty session for a canvas of the given size.
    pub fn new(config: EditorConfig, viewport: Size) -> Self {
        let bounds = CanvasBounds::new(viewport, config.canvas_inset);
        Self {
            config,
            store: LineStore::new(),
            bounds,
            active: None,
            hovered: None,
            drag: None,
            menus: MenuState::new(),
            cursor: CursorHint::Default,
            needs_redraw: true,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &LineStore {
        &self.store
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    pub fn viewport_size(&self) -> Size {
        Size::new(self.bounds.width, self.bounds.height)
    }

    pub fn active_id(&self) -> Option<LineId> {
        self.active
    }

    pub fn active_line(&self) -> Option<&Line> {
        self.store.get(self.active?)
    }

    fn active_line_mut(&mut self) -> Option<&mut Line> {
        self.store.get_mut(self.active?)
    }

    pub fn hovered_id(&self) -> Option<LineId> {
        self.hovered
    }

    pub fn is_active(&self, id: LineId) -> bool {
        self.active == Some(id)
    }

    pub fn is_hovered(&self, id: LineId) -> bool {
        self.hovered == Some(id)
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn menus(&self) -> &MenuState {
        &self.menus
    }

    /// Toolbar contents, or `None` when it is hidden (no active line).
    pub fn toolbar(&self) -> Option<ToolbarState> {
        self.active_line().map(|line| ToolbarState {
            swatch: line.color,
            width: line.width,
            locked: line.locked,
            open_menu: self.menus.open(),
        })
    }

    /// Mark the canvas as needing a full redraw.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Return whether a redraw is pending and clear the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Resize the canvas. The surface loses its contents on resize, so a
    /// redraw is always requested.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = CanvasBounds::new(Size::new(width, height), self.config.canvas_inset);
        log::debug!("Canvas resized to {width}x{height}");
        self.request_redraw();
    }

    // --- Commands ---------------------------------------------------------

    /// Make `id` the active line, or clear the selection with `None`.
    /// Unknown ids clear the selection.
    pub fn set_active(&mut self, id: Option<LineId>) {
        let id = id.filter(|id| self.store.get(*id).is_some());
        if self.active != id {
            match id {
                Some(id) => log::info!("Selected line {id}"),
                None => log::info!("Cleared selection"),
            }
        }
        self.active = id;
        self.request_redraw();
    }

    /// Add a line from a template on top of the stack and select it.
    pub fn add_line(&mut self, kind: LineKind) -> LineId {
        let line = Line::from_kind(kind, self.config.default_color, self.config.default_width);
        let id = self.store.add_line(line);
        log::info!("Added {} line {id}", kind.name());
        self.set_active(Some(id));
        id
    }

    /// Update color and/or width of the active line. Returns `false` when
    /// no line is active. A width of zero is ignored.
    pub fn update_active_line(
        &mut self,
        color: Option<SerializableColor>,
        width: Option<u32>,
    ) -> bool {
        let Some(line) = self.active_line_mut() else {
            return false;
        };
        if let Some(color) = color {
            line.color = color;
        }
        if let Some(width) = width.filter(|w| *w > 0) {
            line.set_width(width);
        }
        log::debug!(
            "Updated line {}: color={} width={}",
            line.id(),
            line.color,
            line.width
        );
        self.request_redraw();
        true
    }

    /// Pick a width from the width dropdown and close it.
    pub fn choose_width(&mut self, width: u32) -> bool {
        let updated = self.update_active_line(None, Some(width));
        self.menus.close();
        updated
    }

    /// Pick a color from the palette and close it.
    pub fn choose_color(&mut self, color: SerializableColor) -> bool {
        let updated = self.update_active_line(Some(color), None);
        self.menus.close();
        updated
    }

    /// Flip the lock of the active line. Returns the new lock state.
    pub fn toggle_lock(&mut self) -> Option<bool> {
        let line = self.active_line_mut()?;
        line.locked = !line.locked;
        let locked = line.locked;
        log::debug!("Line {} {}", line.id(), if locked { "locked" } else { "unlocked" });
        self.request_redraw();
        Some(locked)
    }

    /// Delete the active line and clear the selection.
    pub fn delete_active_line(&mut self) -> Option<Line> {
        let id = self.active?;
        let removed = self.store.remove_line(id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.drag.is_some_and(|d| d.line() == id) {
            self.drag = None;
        }
        if removed.is_some() {
            log::info!("Deleted line {id}");
        }
        self.set_active(None);
        removed
    }

    pub fn toggle_menu(&mut self, menu: MenuId) {
        self.menus.toggle(menu);
        self.request_redraw();
    }

    /// Export the drawing as an SVG data URI.
    pub fn export_data_uri(&self) -> String {
        export::svg_data_uri(&self.store)
    }

    // --- Pointer input ----------------------------------------------------

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::DoubleClick { position } => {
                self.double_click(position);
            }
        }
    }

    /// Press: controls of the active line first, then line selection.
    pub fn pointer_down(&mut self, position: Point) {
        let control = self.active_line().and_then(|line| {
            hit_test_handles(line, position, &self.config)
                .map(|kind| (line.id(), line.midpoint(), kind))
        });

        if let Some((id, midpoint, kind)) = control {
            match kind {
                HandleKind::Icon(IconKind::Lock) => {
                    self.toggle_lock();
                }
                HandleKind::DeleteElbow(index) => {
                    if let Some(line) = self.store.get_mut(id) {
                        line.remove_elbow(index);
                        log::debug!("Removed elbow {index} of line {id}");
                    }
                }
                HandleKind::Point(point) => {
                    self.drag = Some(DragState::Point { line: id, point });
                }
                HandleKind::Icon(IconKind::Move) => {
                    self.drag = Some(DragState::Line {
                        line: id,
                        last: position,
                    });
                }
                HandleKind::Icon(IconKind::Rotate) => {
                    self.drag = Some(DragState::Rotate {
                        line: id,
                        center: midpoint,
                        angle: geometry::angle_from(midpoint, position),
                    });
                }
            }
            if self.drag.is_some() {
                self.cursor = CursorHint::Grabbing;
            }
            self.request_redraw();
            return;
        }

        let hit = self.store.line_at(position, self.config.hit_stroke_width);
        self.set_active(hit);
    }

    /// Move: advance the current drag, or update hover while idle.
    pub fn pointer_move(&mut self, position: Point) {
        let bounds = self.bounds;
        match self.drag {
            Some(DragState::Point { line, point }) => {
                if let Some(p) = self.store.get_mut(line).and_then(|l| l.point_mut(point)) {
                    *p = bounds.clamp(position);
                }
            }
            Some(DragState::Line { line, last }) => {
                if let Some(l) = self.store.get_mut(line) {
                    let delta = bounds.gate_translation(&l.all_points(), position - last);
                    l.translate(delta);
                }
                self.drag = Some(DragState::Line {
                    line,
                    last: position,
                });
            }
            Some(DragState::Rotate {
                line,
                center,
                angle,
            }) => {
                let new_angle = geometry::angle_from(center, position);
                if let Some(l) = self.store.get_mut(line) {
                    l.rotate_within(center, new_angle - angle, &bounds);
                }
                self.drag = Some(DragState::Rotate {
                    line,
                    center,
                    angle: new_angle,
                });
            }
            None => {
                self.hovered = self.store.line_at(position, self.config.hit_stroke_width);
            }
        }
        self.cursor = self.cursor_hint(position);
        self.request_redraw();
    }

    /// Release: end any drag.
    pub fn pointer_up(&mut self, position: Point) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Finished drag of line {}", drag.line());
        }
        self.cursor = self.cursor_hint(position);
    }

    /// Double-click: insert an elbow on the active line's nearest segment.
    /// Returns `true` if an elbow was inserted.
    pub fn double_click(&mut self, position: Point) -> bool {
        let hit_width = self.config.hit_stroke_width;
        let threshold = self.config.insert_threshold;
        let Some(line) = self.active_line_mut() else {
            return false;
        };
        if line.locked || !line.hit_test(position, hit_width) {
            return false;
        }
        let Some(segment) = line.nearest_segment(position, threshold) else {
            return false;
        };
        line.insert_elbow(segment, position);
        log::debug!("Inserted elbow at segment {segment} of line {}", line.id());
        self.request_redraw();
        true
    }

    /// Cursor for the pointer at `position`. Presentational only.
    fn cursor_hint(&self, position: Point) -> CursorHint {
        if self.drag.is_some() {
            return CursorHint::Grabbing;
        }
        let mut cursor = CursorHint::Default;
        if let Some(line) = self.active_line().filter(|l| !l.locked) {
            let config = &self.config;
            if line
                .all_points()
                .iter()
                .any(|p| p.distance(position) < config.hover_grab_radius)
            {
                cursor = CursorHint::Grab;
            }
            if line.elbows.iter().any(|&e| {
                delete_glyph_position(e, config).distance(position) < config.delete_hit_radius
            }) {
                cursor = CursorHint::Pointer;
            }
        }
        if cursor == CursorHint::Default && self.hovered.is_some() {
            cursor = CursorHint::Pointer;
        }
        cursor
    }
}

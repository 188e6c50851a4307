//! Line store: the ordered collection of lines being edited.

use crate::shapes::{Line, LineId};
use kurbo::Point;

/// All lines of a drawing, kept back to front.
///
/// Stack order is insertion order: the last line is drawn on top and wins
/// hit tests.
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line on top of the stack.
    pub fn add_line(&mut self, line: Line) -> LineId {
        let id = line.id();
        self.lines.push(line);
        id
    }

    /// Remove a line from the store.
    pub fn remove_line(&mut self, id: LineId) -> Option<Line> {
        let pos = self.position(id)?;
        Some(self.lines.remove(pos))
    }

    fn position(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id() == id)
    }

    /// Get a line by ID.
    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Get a mutable reference to a line by ID.
    pub fn get_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id() == id)
    }

    /// Lines in stack order (back to front).
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Find the topmost line whose stroke, inflated to `hit_width`, covers
    /// `point`.
    pub fn line_at(&self, point: Point, hit_width: f64) -> Option<LineId> {
        self.lines
            .iter()
            .rev()
            .find(|l| l.hit_test(point, hit_width))
            .map(Line::id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

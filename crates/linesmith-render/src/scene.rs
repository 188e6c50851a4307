//! Display list recorded by the renderer.

use kurbo::{Affine, BezPath, Cap, Join, Shape, Size, Stroke};
use linesmith_core::SerializableColor;
use peniko::{Color, Fill};
use std::fmt::Write;

/// Tolerance used when flattening shapes to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// A single drawing command.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        fill: Fill,
        transform: Affine,
        color: Color,
        path: BezPath,
    },
    Stroke {
        stroke: Stroke,
        transform: Affine,
        color: Color,
        path: BezPath,
    },
}

impl DrawCommand {
    pub fn path(&self) -> &BezPath {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => path,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Fill { color, .. } | DrawCommand::Stroke { color, .. } => *color,
        }
    }

    /// Stroke width, or `None` for fills.
    pub fn stroke_width(&self) -> Option<f64> {
        match self {
            DrawCommand::Stroke { stroke, .. } => Some(stroke.width),
            DrawCommand::Fill { .. } => None,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, DrawCommand::Fill { .. })
    }
}

/// An ordered list of fill and stroke commands, back to front.
///
/// Mirrors the `fill`/`stroke` surface of a GPU scene so a hardware
/// backend can replay it directly.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Fill a shape.
    pub fn fill(&mut self, fill: Fill, transform: Affine, color: Color, shape: &impl Shape) {
        self.commands.push(DrawCommand::Fill {
            fill,
            transform,
            color,
            path: shape.to_path(PATH_TOLERANCE),
        });
    }

    /// Stroke a shape.
    pub fn stroke(
        &mut self,
        stroke: &Stroke,
        transform: Affine,
        color: Color,
        shape: &impl Shape,
    ) {
        self.commands.push(DrawCommand::Stroke {
            stroke: stroke.clone(),
            transform,
            color,
            path: shape.to_path(PATH_TOLERANCE),
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands drawn in `color`.
    pub fn commands_with_color(
        &self,
        color: SerializableColor,
    ) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |cmd| SerializableColor::from(cmd.color()) == color)
    }

    /// Serialize the frame as a standalone SVG document of the given size.
    pub fn to_svg(&self, size: Size) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            size.width, size.height
        );
        for cmd in &self.commands {
            let _ = match cmd {
                DrawCommand::Fill {
                    fill,
                    transform,
                    color,
                    path,
                } => write!(
                    svg,
                    r#"<path d="{}" fill="{}" fill-rule="{}"{} />"#,
                    path.to_svg(),
                    SerializableColor::from(*color),
                    fill_rule(*fill),
                    transform_attr(*transform),
                ),
                DrawCommand::Stroke {
                    stroke,
                    transform,
                    color,
                    path,
                } => write!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="{}" stroke-linejoin="{}"{} />"#,
                    path.to_svg(),
                    SerializableColor::from(*color),
                    stroke.width,
                    cap_name(stroke.start_cap),
                    join_name(stroke.join),
                    transform_attr(*transform),
                ),
            };
        }
        svg.push_str("</svg>");
        svg
    }
}

fn fill_rule(fill: Fill) -> &'static str {
    match fill {
        Fill::NonZero => "nonzero",
        Fill::EvenOdd => "evenodd",
    }
}

fn cap_name(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Square => "square",
        Cap::Round => "round",
    }
}

fn join_name(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

fn transform_attr(transform: Affine) -> String {
    if transform == Affine::IDENTITY {
        return String::new();
    }
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!(r#" transform="matrix({a} {b} {c} {d} {e} {f})""#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Point, Rect};

    #[test]
    fn test_record_and_reset() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            Color::WHITE,
            &Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        scene.stroke(
            &Stroke::new(2.0),
            Affine::IDENTITY,
            Color::BLACK,
            &Circle::new(Point::new(5.0, 5.0), 3.0),
        );
        assert_eq!(scene.len(), 2);
        assert!(scene.commands()[0].is_fill());
        assert_eq!(scene.commands()[1].stroke_width(), Some(2.0));
        assert_eq!(scene.commands_with_color(SerializableColor::black()).count(), 1);

        scene.reset();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_to_svg() {
        let mut scene = Scene::new();
        scene.stroke(
            &Stroke::new(6.0).with_caps(Cap::Round).with_join(Join::Round),
            Affine::translate((1.0, 2.0)),
            Color::from_rgba8(0x3b, 0x82, 0xf6, 0xff),
            &kurbo::Line::new((0.0, 0.0), (10.0, 0.0)),
        );
        let svg = scene.to_svg(Size::new(100.0, 50.0));
        assert!(
            svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">"#)
        );
        assert!(svg.contains(
            r##"stroke="#3b82f6" stroke-width="6" stroke-linecap="round" stroke-linejoin="round""##
        ));
        assert!(svg.contains(r#"transform="matrix(1 0 0 1 1 2)""#));
        assert!(svg.ends_with("</svg>"));
    }
}

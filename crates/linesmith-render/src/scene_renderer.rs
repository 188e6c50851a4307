//! Display-list renderer implementation.

use crate::icons;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::Scene;
use kurbo::{Affine, BezPath, Cap, Circle, Join, Point, Rect, Size, Stroke, Vec2};
use linesmith_core::selection::{delete_glyph_position, icon_position};
use linesmith_core::{EditorConfig, IconKind, Line};
use peniko::{Color, Fill};
use std::path::Path;

/// Border width of handles and icon boxes.
const OUTLINE_WIDTH: f64 = 1.5;

/// Renderer that records every frame into a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneRenderer {
    /// The scene being built.
    scene: Scene,
    /// Viewport of the last built frame.
    viewport: Size,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the last built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene, leaving an empty one.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Write the last built frame as an SVG file.
    pub fn write_frame(&self, path: &Path) -> RenderResult<()> {
        if self.scene.is_empty() {
            return Err(RendererError::RenderFailed(
                "no frame has been built".to_string(),
            ));
        }
        std::fs::write(path, self.scene.to_svg(self.viewport))?;
        log::info!("Wrote frame to {}", path.display());
        Ok(())
    }

    fn line_stroke(width: f64) -> Stroke {
        Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
    }

    /// Render one line, with its highlight underneath if requested.
    fn render_line(&mut self, line: &Line, highlight: Option<(Color, f64)>) {
        let path = line.to_path();
        let width = f64::from(line.width);
        if let Some((color, extra)) = highlight {
            self.scene.stroke(
                &Self::line_stroke(width + extra),
                Affine::IDENTITY,
                color,
                &path,
            );
        }
        self.scene.stroke(
            &Self::line_stroke(width),
            Affine::IDENTITY,
            line.color.into(),
            &path,
        );
    }

    /// Render the icons, point handles and elbow delete glyphs of the
    /// active line.
    fn render_controls(&mut self, line: &Line, config: &EditorConfig) {
        for icon in IconKind::ALL {
            let center = icon_position(line, icon, config);
            self.render_icon(icon, line.locked, center, config.icon_size);
        }

        for p in [line.start, line.end] {
            self.render_handle(p, config.handle_radius);
        }
        let delete_color: Color = config.delete_color.into();
        for &elbow in &line.elbows {
            self.render_handle(elbow, config.handle_radius);
            self.render_delete_glyph(
                delete_glyph_position(elbow, config),
                config.delete_radius,
                delete_color,
            );
        }
    }

    /// White box with a black border and the icon glyph inside.
    fn render_icon(&mut self, icon: IconKind, locked: bool, center: Point, size: f64) {
        let rect = Rect::from_center_size(center, (size, size));
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, Color::WHITE, &rect);
        self.scene.stroke(
            &Stroke::new(OUTLINE_WIDTH),
            Affine::IDENTITY,
            Color::BLACK,
            &rect,
        );
        let glyph = icons::glyph(icon, locked, center, size * 0.3);
        self.scene.stroke(
            &Stroke::new(OUTLINE_WIDTH).with_caps(Cap::Round),
            Affine::IDENTITY,
            Color::BLACK,
            &glyph,
        );
    }

    /// Circle handle: white fill, black border.
    fn render_handle(&mut self, pos: Point, radius: f64) {
        let circle = Circle::new(pos, radius);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, Color::WHITE, &circle);
        self.scene.stroke(
            &Stroke::new(OUTLINE_WIDTH),
            Affine::IDENTITY,
            Color::BLACK,
            &circle,
        );
    }

    /// Filled circle with a white cross.
    fn render_delete_glyph(&mut self, center: Point, radius: f64, color: Color) {
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            color,
            &Circle::new(center, radius),
        );
        let arm = radius * 0.4;
        let mut cross = BezPath::new();
        cross.move_to(center + Vec2::new(-arm, -arm));
        cross.line_to(center + Vec2::new(arm, arm));
        cross.move_to(center + Vec2::new(arm, -arm));
        cross.line_to(center + Vec2::new(-arm, arm));
        self.scene.stroke(
            &Stroke::new(OUTLINE_WIDTH).with_caps(Cap::Round),
            Affine::IDENTITY,
            Color::WHITE,
            &cross,
        );
    }
}

impl Renderer for SceneRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.viewport = ctx.viewport_size;

        let background = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);
        let background_color = self.background_color(ctx);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, background_color, &background);

        let session = ctx.session;
        let config = session.config();
        let highlight: (Color, f64) = (config.accent_color.into(), config.highlight_extra_width);

        // Back to front; controls of the active line are drawn right after it.
        for line in session.store().lines() {
            let id = line.id();
            let highlighted = session.is_active(id) || session.is_hovered(id);
            self.render_line(line, highlighted.then_some(highlight));
            if session.is_active(id) {
                self.render_controls(line, config);
            }
        }
        log::trace!("Built scene with {} commands", self.scene.len());
    }
}

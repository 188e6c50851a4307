//! Linesmith Render Library
//!
//! Renderer abstraction for Linesmith. The default implementation records
//! every frame into a backend-agnostic [`Scene`] display list.

pub mod icons;
mod renderer;
mod scene;
mod scene_renderer;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DrawCommand, Scene};
pub use scene_renderer::SceneRenderer;

mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, RectPrimitive, RectStroke, TextPrimitive};

use crate::error::ChartResult;

/// Drawing surface contract implemented by rendering backends.
///
/// Backends receive a fully materialized `RenderFrame` and repaint the whole
/// surface from it, so chart logic never touches backend APIs directly.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one full repaint.
///
/// Backends clear the whole surface with `clear_color`, then paint `rects`
/// in order, then `texts`. Nothing from a previous frame survives.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub clear_color: Color,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, clear_color: Color) -> Self {
        Self {
            viewport,
            clear_color,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.clear_color.validate()?;
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }
}

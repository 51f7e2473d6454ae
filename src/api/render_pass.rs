use tracing::trace;

use crate::core::{BarGeometry, day_boundary_labels, project_bars};
use crate::error::ChartResult;
use crate::render::{RectPrimitive, RenderFrame, Renderer, TextPrimitive};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::ChartView;

impl<R: Renderer> ChartView<R> {
    /// Repaints the whole surface: clear, border, bars, date labels.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        trace!(
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            scale = self.transform.scale,
            "render chart frame"
        );
        self.renderer.render(&frame)
    }

    /// Pixel geometry of every bar under the current transform.
    ///
    /// Empty when the view has no usable price range.
    #[must_use]
    pub fn project_bars(&self) -> Vec<BarGeometry> {
        match self.price_range {
            Some(price_range) => project_bars(
                &self.bars,
                price_range,
                self.transform,
                self.viewport,
                self.config.style.body_width_ratio,
            ),
            None => Vec::new(),
        }
    }

    /// Materializes the draw commands `render` would send to the backend.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let style = self.config.style;
        let width = self.viewport.width_px();
        let height = self.viewport.height_px();

        let mut frame = RenderFrame::new(self.viewport, style.background_color).with_rect(
            RectPrimitive::stroked(
                0.0,
                0.0,
                width,
                height,
                style.border_width_px,
                style.border_color,
            ),
        );

        let geometry = self.project_bars();
        for bar in &geometry {
            let rect = RectPrimitive::filled(
                bar.x + (bar.slot_width - bar.body_width) / 2.0,
                bar.y,
                bar.body_width,
                bar.height,
                if bar.is_up {
                    style.up_color
                } else {
                    style.down_color
                },
            )
            .normalized();
            if rect.validate().is_err() {
                trace!(index = bar.index, "skipping bar with non-finite geometry");
                continue;
            }
            frame.rects.push(rect);
        }

        if geometry.is_empty() {
            return frame;
        }

        let label_y = height - style.label_bottom_inset_px;
        for (index, text) in day_boundary_labels(&self.bars, self.config.label_time_zone) {
            let center_x = geometry[index].center_x();
            if !center_x.is_finite() {
                continue;
            }
            frame.texts.push(TextPrimitive::centered(
                text,
                center_x,
                label_y,
                style.label_font_size_px,
                style.label_color,
            ));
        }

        frame
    }
}

#[cfg(feature = "cairo-backend")]
impl<R: Renderer + CairoContextRenderer> ChartView<R> {
    /// Paints the current frame onto a caller-owned Cairo context.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

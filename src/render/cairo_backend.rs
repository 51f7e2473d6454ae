use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_filled: usize,
    pub rects_stroked: usize,
    pub texts_drawn: usize,
}

/// Renderers able to paint a frame onto a Cairo context they do not own,
/// such as the one handed to a GTK draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Offscreen Cairo renderer; text goes through Pango.
///
/// `Renderer::render` repaints an owned offscreen image surface; hosts blit it
/// with `surface()`. `CairoContextRenderer` paints straight onto a caller's
/// context instead.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        // Full clear: the frame owns every pixel of the surface.
        context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        context.set_operator(cairo::Operator::Source);
        apply_color(context, frame.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            draw_rect(context, *rect, &mut stats)?;
        }

        for text in &frame.texts {
            draw_text(context, text);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)?;
        self.surface.flush();
        Ok(())
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: RectPrimitive, stats: &mut CairoRenderStats) -> ChartResult<()> {
    if let Some(fill) = rect.fill {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        apply_color(context, fill);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_filled += 1;
    }
    if let Some(stroke) = rect.stroke {
        // Half-pixel inset keeps odd-width outlines crisp and inside the rect.
        let inset = stroke.width / 2.0;
        context.rectangle(
            rect.x + inset,
            rect.y + inset,
            (rect.width - stroke.width).max(0.0),
            (rect.height - stroke.width).max(0.0),
        );
        apply_color(context, stroke.color);
        context.set_line_width(stroke.width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
        stats.rects_stroked += 1;
    }
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _) = layout.pixel_size();
    let x = text.x - f64::from(text_width) / 2.0;
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}

use tracing::{debug, warn};

use crate::core::{Bar, PriceRange, SurfacePoint, Viewport, ViewportTransform};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{GestureState, InteractionMode};
use crate::render::Renderer;

use super::ChartViewConfig;

/// One interactive OHLC chart bound to one drawing surface.
///
/// The view owns its bars, the cached price range, the viewport transform and
/// the drag state. Rendering and gesture handling live in sibling modules;
/// every handler that changes the transform repaints immediately.
pub struct ChartView<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) bars: Vec<Bar>,
    pub(super) price_range: Option<PriceRange>,
    pub(super) transform: ViewportTransform,
    pub(super) gesture: GestureState,
    pub(super) surface_origin: SurfacePoint,
    pub(super) config: ChartViewConfig,
}

impl<R: Renderer> ChartView<R> {
    /// Binds `bars` to a surface of size `viewport` drawn by `renderer`.
    ///
    /// The price range is computed once here. An empty `bars` is accepted: the
    /// view then paints only its background and border. The transform starts
    /// unpanned at the configured minimum scale.
    pub fn new(
        renderer: R,
        viewport: Viewport,
        bars: Vec<Bar>,
        config: ChartViewConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;

        let price_range = PriceRange::from_bars(&bars);
        match price_range {
            None => warn!(
                bar_count = bars.len(),
                "chart has no usable prices; rendering frame only"
            ),
            Some(range) if range.is_degenerate() => debug!(
                min_price = range.min_price,
                max_price = range.max_price,
                "flat price range; bars drawn at mid-height"
            ),
            Some(range) => debug!(
                bar_count = bars.len(),
                min_price = range.min_price,
                max_price = range.max_price,
                "chart view created"
            ),
        }

        Ok(Self {
            renderer,
            viewport,
            bars,
            price_range,
            transform: ViewportTransform::at_scale(
                config.wheel_zoom.min_scale,
                config.wheel_zoom.scale_limits(),
            ),
            gesture: GestureState::default(),
            surface_origin: SurfacePoint::default(),
            config,
        })
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[must_use]
    pub fn config(&self) -> ChartViewConfig {
        self.config
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.gesture.mode()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Client-area position of the surface's top-left corner.
    #[must_use]
    pub fn surface_origin(&self) -> SurfacePoint {
        self.surface_origin
    }

    /// Sets where the surface sits in the host's client area; pointer
    /// coordinates passed to handlers are made surface-local with it.
    pub fn set_surface_origin(&mut self, origin: SurfacePoint) -> ChartResult<()> {
        if !origin.is_finite() {
            return Err(ChartError::InvalidData(
                "surface origin must be finite".to_owned(),
            ));
        }
        self.surface_origin = origin;
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{PriceRange, SurfacePoint, Viewport, ViewportTransform};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::ChartView;

/// Serializable view state used by regression tests and debugging tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewSnapshot {
    pub viewport: Viewport,
    pub bar_count: usize,
    pub price_range: Option<PriceRange>,
    pub transform: ViewportTransform,
    pub interaction_mode: InteractionMode,
    pub surface_origin: SurfacePoint,
}

impl ChartViewSnapshot {
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}

impl<R: Renderer> ChartView<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartViewSnapshot {
        ChartViewSnapshot {
            viewport: self.viewport,
            bar_count: self.bars.len(),
            price_range: self.price_range,
            transform: self.transform,
            interaction_mode: self.gesture.mode(),
            surface_origin: self.surface_origin,
        }
    }
}

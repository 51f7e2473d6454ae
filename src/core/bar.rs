use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::core::{PriceRange, Viewport, ViewportTransform};
use crate::error::ChartResult;

/// One OHLC price sample plus traded volume.
///
/// `low <= open, close <= high` is expected but not enforced; malformed bars
/// are still drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Interval start in unix seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Converts strongly-typed temporal/decimal input into a bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            volume,
        ))
    }

    /// Returns `true` only when close is strictly above open.
    ///
    /// An unchanged bar (`close == open`) counts as down.
    #[must_use]
    pub fn is_up(self) -> bool {
        self.close > self.open
    }
}

/// Pixel geometry of one bar body after the viewport transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    /// Left edge of the bar's slot.
    pub x: f64,
    /// Top edge, derived from the close price.
    pub y: f64,
    pub slot_width: f64,
    pub body_width: f64,
    /// High-low span in pixels.
    pub height: f64,
    pub is_up: bool,
}

impl BarGeometry {
    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.slot_width / 2.0
    }
}

/// Projects bars into pixel geometry under `transform`.
///
/// Horizontal: slot `i` starts at `i * W / n * scale` plus the effective
/// x offset. Vertical: the close price is mapped into `[0, H * scale]` with the
/// highest price at the top, then shifted by the effective y offset. The body
/// height is the high-low span through the same linear scale.
///
/// A degenerate `price_range` places every bar at mid-height with zero height.
/// `body_width_ratio` is the fraction of the slot covered by the body.
#[must_use]
pub fn project_bars(
    bars: &[Bar],
    price_range: PriceRange,
    transform: ViewportTransform,
    viewport: Viewport,
    body_width_ratio: f64,
) -> Vec<BarGeometry> {
    if bars.is_empty() {
        return Vec::new();
    }

    let layout = ProjectionLayout::new(bars.len(), price_range, transform, viewport);
    let body_ratio = body_width_ratio.clamp(0.0, 1.0);

    #[cfg(feature = "parallel-projection")]
    {
        bars.par_iter()
            .enumerate()
            .map(|(index, bar)| layout.project(index, *bar, body_ratio))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        bars.iter()
            .enumerate()
            .map(|(index, bar)| layout.project(index, *bar, body_ratio))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct ProjectionLayout {
    slot_width: f64,
    scaled_height: f64,
    effective_x: f64,
    effective_y: f64,
    price_range: PriceRange,
}

impl ProjectionLayout {
    fn new(
        bar_count: usize,
        price_range: PriceRange,
        transform: ViewportTransform,
        viewport: Viewport,
    ) -> Self {
        let width = viewport.width_px();
        let height = viewport.height_px();
        Self {
            slot_width: width / bar_count as f64 * transform.scale,
            scaled_height: height * transform.scale,
            effective_x: transform.effective_offset_x(width),
            effective_y: transform.effective_offset_y(height),
            price_range,
        }
    }

    fn project(self, index: usize, bar: Bar, body_ratio: f64) -> BarGeometry {
        let close_y = if self.price_range.is_degenerate() {
            self.scaled_height / 2.0
        } else {
            self.scaled_height - self.price_range.normalize(bar.close) * self.scaled_height
        };
        let height = self.price_range.normalize_span(bar.high - bar.low) * self.scaled_height;

        BarGeometry {
            index,
            x: index as f64 * self.slot_width + self.effective_x,
            y: close_y + self.effective_y,
            slot_width: self.slot_width,
            body_width: self.slot_width * body_ratio,
            height,
            is_up: bar.is_up(),
        }
    }
}

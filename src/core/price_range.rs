use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Bar;

/// Vertical price domain of one chart: lowest `low` and highest `high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_price: f64,
    pub max_price: f64,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min_price: f64, max_price: f64) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// Scans `bars` once for the domain.
    ///
    /// Non-finite lows/highs are skipped. Returns `None` for an empty slice or
    /// when no finite value remains.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let min_price = bars
            .iter()
            .map(|bar| bar.low)
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .min()?;
        let max_price = bars
            .iter()
            .map(|bar| bar.high)
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .max()?;
        Some(Self::new(min_price.0, max_price.0))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max_price - self.min_price
    }

    /// `true` when the span cannot be used as a divisor.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let span = self.span();
        !span.is_finite() || span <= 0.0
    }

    /// Maps `price` linearly into `[0, 1]` for prices inside the range.
    ///
    /// Degenerate ranges map every price to the midpoint `0.5`.
    #[must_use]
    pub fn normalize(self, price: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        (price - self.min_price) / self.span()
    }

    /// Fraction of the range covered by `span`; zero for degenerate ranges.
    #[must_use]
    pub fn normalize_span(self, span: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        span / self.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(low: f64, high: f64) -> Bar {
        Bar::new(0, low, high, low, high, 0)
    }

    #[test]
    fn empty_slice_has_no_range() {
        assert_eq!(PriceRange::from_bars(&[]), None);
    }

    #[test]
    fn range_covers_lowest_low_and_highest_high() {
        let range = PriceRange::from_bars(&[bar(9.0, 12.0), bar(8.0, 11.0), bar(8.5, 10.0)])
            .expect("range");
        assert_eq!(range, PriceRange::new(8.0, 12.0));
        assert_eq!(range.span(), 4.0);
        assert!(!range.is_degenerate());
    }

    #[test]
    fn flat_range_normalizes_to_midpoint() {
        let range = PriceRange::new(5.0, 5.0);
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(5.0), 0.5);
        assert_eq!(range.normalize_span(0.0), 0.0);
    }

    #[test]
    fn non_finite_extremes_are_ignored() {
        let range =
            PriceRange::from_bars(&[bar(f64::NAN, f64::INFINITY), bar(2.0, 3.0)]).expect("range");
        assert_eq!(range, PriceRange::new(2.0, 3.0));
    }
}

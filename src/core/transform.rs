use serde::{Deserialize, Serialize};

use crate::core::SurfacePoint;
use crate::error::{ChartError, ChartResult};

/// Lowest zoom factor: the chart never shrinks below the surface extent.
pub const MIN_SCALE: f64 = 1.0;

/// Default zoom ceiling.
pub const DEFAULT_MAX_SCALE: f64 = 10_000.0;

/// Inclusive bounds for `ViewportTransform::scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: DEFAULT_MAX_SCALE,
        }
    }
}

impl ScaleLimits {
    /// Clamps `scale` into the limits. The floor is never below [`MIN_SCALE`]
    /// and the ceiling never below the floor.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        let floor = self.min.max(MIN_SCALE);
        scale.clamp(floor, self.max.max(floor))
    }
}

/// Combined zoom factor and pan offset applied to every bar.
///
/// Logical chart coordinates span `[0, W * scale] x [0, H * scale]`. They are
/// centered on the surface and then shifted by the pan offset, so a pixel
/// coordinate is `logical + effective_offset` on each axis with
/// `effective_offset = offset - (extent * scale - extent) / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            scale: MIN_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Unpanned transform at `scale`, clamped into `limits`.
    #[must_use]
    pub fn at_scale(scale: f64, limits: ScaleLimits) -> Self {
        Self {
            scale: limits.clamp(scale),
            ..Self::identity()
        }
    }

    /// Drops any pan and returns to the lowest scale `limits` allow.
    pub fn reset(&mut self, limits: ScaleLimits) {
        *self = Self::at_scale(MIN_SCALE, limits);
    }

    #[must_use]
    pub fn effective_offset_x(self, width: f64) -> f64 {
        effective_offset(self.offset_x, width, self.scale)
    }

    #[must_use]
    pub fn effective_offset_y(self, height: f64) -> f64 {
        effective_offset(self.offset_y, height, self.scale)
    }

    /// Inverse of the projection at the current scale.
    ///
    /// Returns unit-scale surface coordinates, i.e. the location the pixel
    /// would show at `scale == 1` with no pan.
    #[must_use]
    pub fn pixel_to_unit(self, pixel: SurfacePoint, width: f64, height: f64) -> SurfacePoint {
        SurfacePoint::new(
            (pixel.x - self.effective_offset_x(width)) / self.scale,
            (pixel.y - self.effective_offset_y(height)) / self.scale,
        )
    }

    /// Multiplies the scale by `factor` (clamped into `limits`) keeping the
    /// surface-local `anchor` visually stationary.
    ///
    /// Returns the applied scale ratio (`new_scale / old_scale`). On error the
    /// transform is left unchanged.
    pub fn zoom_around(
        &mut self,
        factor: f64,
        anchor: SurfacePoint,
        width: f64,
        height: f64,
        limits: ScaleLimits,
    ) -> ChartResult<f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let old_scale = self.scale;
        let new_scale = limits.clamp(old_scale * factor);
        let ratio = new_scale / old_scale;

        let new_effective_x = anchor.x - (anchor.x - self.effective_offset_x(width)) * ratio;
        let new_effective_y = anchor.y - (anchor.y - self.effective_offset_y(height)) * ratio;

        let zoomed = Self {
            scale: new_scale,
            offset_x: new_effective_x + centering(width, new_scale),
            offset_y: new_effective_y + centering(height, new_scale),
        };
        if !zoomed.is_finite() || !ratio.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom produced a non-finite transform".to_owned(),
            ));
        }
        *self = zoomed;
        Ok(ratio)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.scale.is_finite() && self.offset_x.is_finite() && self.offset_y.is_finite()
    }

    /// Shifts the pan offset by a pixel delta, independent of zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

fn centering(extent: f64, scale: f64) -> f64 {
    (extent * scale - extent) / 2.0
}

fn effective_offset(offset: f64, extent: f64, scale: f64) -> f64 {
    offset - centering(extent, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_has_no_effective_offset() {
        let transform = ViewportTransform::identity();
        assert_eq!(transform.effective_offset_x(300.0), 0.0);
        assert_eq!(transform.effective_offset_y(100.0), 0.0);
    }

    #[test]
    fn scaled_content_is_centered_without_pan() {
        let transform = ViewportTransform {
            scale: 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        // Logical center of a 2x surface lands on the pixel center.
        assert_abs_diff_eq!(300.0 + transform.effective_offset_x(300.0), 150.0);
        assert_abs_diff_eq!(100.0 + transform.effective_offset_y(100.0), 50.0);
    }

    #[test]
    fn zoom_clamps_to_floor() {
        let mut transform = ViewportTransform::identity();
        let ratio = transform
            .zoom_around(0.5, SurfacePoint::new(10.0, 10.0), 300.0, 100.0, ScaleLimits::default())
            .expect("zoom");
        assert_eq!(ratio, 1.0);
        assert_eq!(transform, ViewportTransform::identity());
    }

    #[test]
    fn zoom_rejects_non_positive_factor() {
        let mut transform = ViewportTransform::identity();
        assert!(
            transform
                .zoom_around(0.0, SurfacePoint::default(), 300.0, 100.0, ScaleLimits::default())
                .is_err()
        );
        assert_eq!(transform, ViewportTransform::identity());
    }

    #[test]
    fn reset_restores_identity() {
        let mut transform = ViewportTransform {
            scale: 3.0,
            offset_x: 12.0,
            offset_y: -4.0,
        };
        transform.reset(ScaleLimits::default());
        assert_eq!(transform, ViewportTransform::identity());

        transform.reset(ScaleLimits { min: 2.5, max: 8.0 });
        assert_eq!(transform.scale, 2.5);
        assert_eq!(transform.offset_x, 0.0);
    }

    #[test]
    fn zoom_stops_at_ceiling() {
        let limits = ScaleLimits { min: 1.0, max: 4.0 };
        let mut transform = ViewportTransform::identity();
        for _ in 0..10 {
            transform
                .zoom_around(2.0, SurfacePoint::new(120.0, 30.0), 300.0, 100.0, limits)
                .expect("zoom");
        }
        assert_eq!(transform.scale, 4.0);

        let before = transform;
        let ratio = transform
            .zoom_around(2.0, SurfacePoint::new(120.0, 30.0), 300.0, 100.0, limits)
            .expect("zoom at ceiling");
        assert_eq!(ratio, 1.0);
        assert_abs_diff_eq!(transform.offset_x, before.offset_x, epsilon = 1e-9);
    }

    #[test]
    fn overflowing_zoom_leaves_transform_unchanged() {
        let limits = ScaleLimits {
            min: 1.0,
            max: f64::MAX,
        };
        let mut transform = ViewportTransform {
            scale: f64::MAX / 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let before = transform;
        assert!(
            transform
                .zoom_around(4.0, SurfacePoint::new(10.0, 10.0), 300.0, 100.0, limits)
                .is_err()
        );
        assert_eq!(transform, before);
    }
}

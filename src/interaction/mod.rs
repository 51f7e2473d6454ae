use serde::{Deserialize, Serialize};

use crate::core::transform::{DEFAULT_MAX_SCALE, MIN_SCALE};
use crate::core::{ScaleLimits, SurfacePoint};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
}

/// Scale multipliers applied once per wheel event, regardless of delta size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomBehavior {
    /// Multiplier for a positive delta (wheel scrolled down / away).
    pub positive_delta_factor: f64,
    /// Multiplier for a negative delta (wheel scrolled up / toward).
    pub negative_delta_factor: f64,
    /// Scale floor, at least `1.0`. Views start here.
    pub min_scale: f64,
    /// Scale ceiling; wheel zoom stops here.
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
}

fn default_max_scale() -> f64 {
    DEFAULT_MAX_SCALE
}

impl Default for WheelZoomBehavior {
    fn default() -> Self {
        Self {
            positive_delta_factor: 1.1,
            negative_delta_factor: 0.9,
            min_scale: MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl WheelZoomBehavior {
    pub fn validate(self) -> ChartResult<()> {
        for (name, factor) in [
            ("positive_delta_factor", self.positive_delta_factor),
            ("negative_delta_factor", self.negative_delta_factor),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "wheel zoom `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.min_scale.is_finite() || self.min_scale < MIN_SCALE {
            return Err(ChartError::InvalidData(
                "wheel zoom min scale must be finite and >= 1".to_owned(),
            ));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ChartError::InvalidData(
                "wheel zoom max scale must be finite and >= min scale".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn scale_limits(self) -> ScaleLimits {
        ScaleLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    /// Scale multiplier for a signed wheel delta; `None` for a zero delta.
    #[must_use]
    pub fn factor_for_delta(self, delta: f64) -> Option<f64> {
        if delta > 0.0 {
            Some(self.positive_delta_factor)
        } else if delta < 0.0 {
            Some(self.negative_delta_factor)
        } else {
            None
        }
    }
}

/// Transient drag bookkeeping; meaningless outside an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    mode: InteractionMode,
    drag_anchor: SurfacePoint,
}

impl GestureState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    #[must_use]
    pub fn drag_anchor(self) -> SurfacePoint {
        self.drag_anchor
    }

    /// Idle -> Dragging. Pressing again while dragging re-anchors.
    pub fn on_pointer_down(&mut self, position: SurfacePoint) {
        self.mode = InteractionMode::Dragging;
        self.drag_anchor = position;
    }

    /// Returns the pixel delta since the previous anchor and moves the anchor
    /// to `position`. `None` while idle.
    pub fn on_pointer_move(&mut self, position: SurfacePoint) -> Option<(f64, f64)> {
        if !self.is_dragging() {
            return None;
        }
        let delta = (
            position.x - self.drag_anchor.x,
            position.y - self.drag_anchor.y,
        );
        self.drag_anchor = position;
        Some(delta)
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn on_pointer_leave(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_while_idle_is_ignored() {
        let mut gesture = GestureState::default();
        assert_eq!(gesture.on_pointer_move(SurfacePoint::new(5.0, 5.0)), None);
        assert_eq!(gesture.mode(), InteractionMode::Idle);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut gesture = GestureState::default();
        gesture.on_pointer_down(SurfacePoint::new(10.0, 10.0));
        assert_eq!(
            gesture.on_pointer_move(SurfacePoint::new(15.0, 8.0)),
            Some((5.0, -2.0))
        );
        assert_eq!(
            gesture.on_pointer_move(SurfacePoint::new(20.0, 8.0)),
            Some((5.0, 0.0))
        );
        assert_eq!(gesture.drag_anchor(), SurfacePoint::new(20.0, 8.0));
    }

    #[test]
    fn zero_wheel_delta_has_no_factor() {
        let behavior = WheelZoomBehavior::default();
        assert_eq!(behavior.factor_for_delta(0.0), None);
        assert_eq!(behavior.factor_for_delta(3.0), Some(1.1));
        assert_eq!(behavior.factor_for_delta(-120.0), Some(0.9));
    }

    #[test]
    fn invalid_wheel_behavior_is_rejected() {
        let behavior = WheelZoomBehavior {
            min_scale: 0.5,
            ..WheelZoomBehavior::default()
        };
        assert!(behavior.validate().is_err());

        let behavior = WheelZoomBehavior {
            min_scale: 4.0,
            max_scale: 2.0,
            ..WheelZoomBehavior::default()
        };
        assert!(behavior.validate().is_err());

        let behavior = WheelZoomBehavior {
            max_scale: f64::INFINITY,
            ..WheelZoomBehavior::default()
        };
        assert!(behavior.validate().is_err());
    }
}

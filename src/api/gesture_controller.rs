use tracing::{debug, trace};

use crate::core::SurfacePoint;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartView;

impl<R: Renderer> ChartView<R> {
    /// Wheel zoom anchored at the pointer.
    ///
    /// One fixed factor is applied per event: `positive_delta_factor` for a
    /// positive delta, `negative_delta_factor` for a negative one. The scale is
    /// clamped to the configured floor and ceiling and the point under the
    /// pointer stays put.
    /// A zero delta changes nothing and does not repaint.
    ///
    /// Returns the applied scale ratio.
    pub fn on_wheel(&mut self, client_x: f64, client_y: f64, delta_y: f64) -> ChartResult<f64> {
        if !delta_y.is_finite() {
            return Err(ChartError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        let anchor = self.to_surface_local(client_x, client_y)?;
        let behavior = self.config.wheel_zoom;
        let Some(factor) = behavior.factor_for_delta(delta_y) else {
            return Ok(1.0);
        };

        let ratio = self.transform.zoom_around(
            factor,
            anchor,
            self.viewport.width_px(),
            self.viewport.height_px(),
            behavior.scale_limits(),
        )?;
        trace!(
            delta_y,
            ratio,
            scale = self.transform.scale,
            offset_x = self.transform.offset_x,
            offset_y = self.transform.offset_y,
            "wheel zoom"
        );
        self.render()?;
        Ok(ratio)
    }

    /// Starts (or re-anchors) a pan drag.
    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64) -> ChartResult<()> {
        let position = self.to_surface_local(client_x, client_y)?;
        self.gesture.on_pointer_down(position);
        trace!(x = position.x, y = position.y, "drag start");
        Ok(())
    }

    /// Pans 1:1 by the movement since the last pointer event while dragging.
    ///
    /// Idle moves are ignored and do not repaint.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> ChartResult<()> {
        let position = self.to_surface_local(client_x, client_y)?;
        let Some((dx, dy)) = self.gesture.on_pointer_move(position) else {
            return Ok(());
        };
        self.transform.pan_by(dx, dy);
        trace!(
            dx,
            dy,
            offset_x = self.transform.offset_x,
            offset_y = self.transform.offset_y,
            "drag pan"
        );
        self.render()
    }

    pub fn on_pointer_up(&mut self) {
        self.gesture.on_pointer_up();
    }

    /// Leaving the surface always ends a drag.
    pub fn on_pointer_leave(&mut self) {
        self.gesture.on_pointer_leave();
    }

    /// Returns to the configured minimum scale without pan, ends any drag and
    /// repaints.
    pub fn reset_view(&mut self) -> ChartResult<()> {
        self.transform.reset(self.config.wheel_zoom.scale_limits());
        self.gesture.on_pointer_leave();
        debug!("view transform reset");
        self.render()
    }

    fn to_surface_local(&self, client_x: f64, client_y: f64) -> ChartResult<SurfacePoint> {
        let point = SurfacePoint::new(
            client_x - self.surface_origin.x,
            client_y - self.surface_origin.y,
        );
        if !point.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        Ok(point)
    }
}

use serde::{Deserialize, Serialize};

use crate::core::LabelTimeZone;
use crate::error::{ChartError, ChartResult};
use crate::interaction::WheelZoomBehavior;
use crate::render::Color;

/// Visual style of one chart view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub background_color: Color,
    pub border_color: Color,
    pub border_width_px: f64,
    /// Fill for bars closing strictly above their open.
    pub up_color: Color,
    /// Fill for every other bar, including unchanged ones.
    pub down_color: Color,
    pub label_color: Color,
    pub label_font_size_px: f64,
    /// Distance between the label baseline and the bottom surface edge.
    pub label_bottom_inset_px: f64,
    /// Fraction of each bar slot covered by the bar body, in `(0, 1]`.
    pub body_width_ratio: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(1.0, 1.0, 1.0),
            border_color: Color::rgb(0.0, 0.0, 0.0),
            border_width_px: 1.0,
            up_color: Color::rgb(0.0, 0.5, 0.0),
            down_color: Color::rgb(1.0, 0.0, 0.0),
            label_color: Color::rgb(0.0, 0.0, 0.0),
            label_font_size_px: 10.0,
            label_bottom_inset_px: 5.0,
            body_width_ratio: 1.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.border_color,
            self.up_color,
            self.down_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        if !self.border_width_px.is_finite() || self.border_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "border width must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_font_size_px.is_finite() || self.label_font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_bottom_inset_px.is_finite() || self.label_bottom_inset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "label bottom inset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.body_width_ratio.is_finite()
            || self.body_width_ratio <= 0.0
            || self.body_width_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "body width ratio must be in (0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Construction-time configuration of a `ChartView`.
///
/// Serializable so hosts can keep chart setup in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartViewConfig {
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub wheel_zoom: WheelZoomBehavior,
    #[serde(default)]
    pub label_time_zone: LabelTimeZone,
}

impl ChartViewConfig {
    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom(mut self, behavior: WheelZoomBehavior) -> Self {
        self.wheel_zoom = behavior;
        self
    }

    #[must_use]
    pub fn with_label_time_zone(mut self, time_zone: LabelTimeZone) -> Self {
        self.label_time_zone = time_zone;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        self.style.validate()?;
        self.wheel_zoom.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

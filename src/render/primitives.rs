use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Outline drawn around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStroke {
    pub width: f64,
    pub color: Color,
}

/// Draw command for one axis-aligned rectangle in pixel space.
///
/// A rectangle may be filled, stroked, or both; fill is painted first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<RectStroke>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(color),
            stroke: None,
        }
    }

    #[must_use]
    pub const fn stroked(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_width: f64,
        color: Color,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some(RectStroke {
                width: stroke_width,
                color,
            }),
        }
    }

    /// Rewrites negative extents so `width` and `height` are non-negative while
    /// covering the same pixels.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.width < 0.0 {
            self.x += self.width;
            self.width = -self.width;
        }
        if self.height < 0.0 {
            self.y += self.height;
            self.height = -self.height;
        }
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if self.fill.is_none() && self.stroke.is_none() {
            return Err(ChartError::InvalidData(
                "rect must be filled or stroked".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            if !stroke.width.is_finite() || stroke.width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "rect stroke width must be finite and > 0".to_owned(),
                ));
            }
            stroke.color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one label in pixel space, horizontally centered on `x`;
/// `y` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl TextPrimitive {
    #[must_use]
    pub fn centered(text: impl Into<String>, x: f64, y: f64, font_size_px: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

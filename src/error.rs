use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The host could not provide a drawing surface for a chart.
    #[error("drawing surface unavailable for chart `{id}`: {reason}")]
    SurfaceUnavailable { id: String, reason: String },

    #[error("render backend failure: {0}")]
    Backend(String),
}

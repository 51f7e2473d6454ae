//! ohlc-view: interactive OHLC bar charts with wheel zoom and drag pan.
//!
//! `core` holds the pure data model and projection math, `interaction` the
//! gesture state machine, `render` the backend-agnostic draw contract and
//! `api` the `ChartView` facade plus host mounting glue.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartView, ChartViewConfig};
pub use error::{ChartError, ChartResult};

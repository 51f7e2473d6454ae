//! Chart view facade consumed by host applications.

mod chart_view;
mod chart_view_config;
mod gesture_controller;
mod host;
mod render_pass;
mod snapshot;

pub use chart_view::ChartView;
pub use chart_view_config::{ChartStyle, ChartViewConfig};
pub use host::{ChartContainer, Dataset, HeadlessContainer, chart_id, mount_charts};
pub use snapshot::ChartViewSnapshot;

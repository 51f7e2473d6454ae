pub mod bar;
pub mod date_label;
pub mod price_range;
pub mod primitives;
pub mod transform;
pub mod types;

pub use bar::{Bar, BarGeometry, project_bars};
pub use date_label::{LabelTimeZone, day_boundary_labels, format_bar_date};
pub use price_range::PriceRange;
pub use transform::{ScaleLimits, ViewportTransform};
pub use types::{SurfacePoint, Viewport};

pub mod car;
pub mod dataset;
pub mod metric;
pub mod metrics;
pub mod normalization;
pub mod scale;
pub mod types;

pub use car::{
    Car, CarKey, RawCarRow, SEATS_NOT_AVAILABLE, UNKNOWN_BRAND, normalize_row, parse_numeric,
};
pub use dataset::{Dataset, DatasetLoadStats, extent_of};
pub use metric::{MetricDirection, MetricFormat, MetricKey, MetricSpec, fmt_k, fmt_price};
pub use metrics::{DerivedMetrics, derive_metrics};
pub use normalization::{
    BaselineMode, DEGENERATE_RANGE_VALUE, DISPLAY_FLOOR, ReferenceSet, normalize_value,
};
pub use scale::LinearScale;
pub use types::{Point, Viewport};

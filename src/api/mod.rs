//! Public dashboard surface: configuration, selection state, the three view
//! adapters and the [`Dashboard`] coordinator that ties them together.

mod config;
mod dashboard;
mod gauge_view;
mod invalidation;
mod ribbon_view;
mod scatter_view;
mod selection;
mod snapshot;

pub use config::{DEFAULT_MAX_DISPLAY_COUNT, DashboardConfig};
pub use dashboard::Dashboard;
pub use gauge_view::{GAUGE_SWEEP, GaugeView, NeedleTarget, display_value_to_angle, needle_color};
pub use invalidation::{ViewTopic, ViewUpdate};
pub use ribbon_view::RibbonView;
pub use scatter_view::{
    NO_DATA_MESSAGE, PlacedPoint, PointStyle, ScatterLayout, ScatterView, sample_scatter_points,
};
pub use selection::{
    ChosenKeys, MAX_CHOSEN, SeatFilter, SelectionState, initial_chosen, pick_random_keys,
    resolve_chosen, seat_filter_options,
};
pub use snapshot::{DashboardSnapshot, NeedleSnapshot, RibbonMarkerSnapshot};

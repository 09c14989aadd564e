use serde::{Deserialize, Serialize};

use crate::core::{BaselineMode, CarKey, DatasetLoadStats, MetricKey, Viewport};

use super::SeatFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonMarkerSnapshot {
    pub key: CarKey,
    pub phase_offset: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedleSnapshot {
    pub car: CarKey,
    pub metric: MetricKey,
    pub display_value: f64,
    pub target_angle: f64,
    pub rendered_angle: f64,
}

/// Serializable deterministic dashboard state used by regression tests and
/// the snapshot tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub now_ms: f64,
    pub dataset_size: usize,
    pub load_stats: DatasetLoadStats,
    pub chosen: Vec<CarKey>,
    pub baseline_mode: BaselineMode,
    pub seat_filter: SeatFilter,
    pub x_axis: MetricKey,
    pub y_axis: MetricKey,
    pub max_display_count: usize,
    pub scatter_viewport: Viewport,
    pub scatter_points: usize,
    pub ribbon_frames: u64,
    pub ribbon: Vec<RibbonMarkerSnapshot>,
    pub needles: Vec<NeedleSnapshot>,
}

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationConfig, NeedleConfig};
use crate::core::{BaselineMode, CarKey, MetricKey, Viewport};
use crate::error::{DashError, DashResult};

/// Default cap on scatter points when the config leaves it open.
pub const DEFAULT_MAX_DISPLAY_COUNT: usize = 100;

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can keep a dashboard setup in a JSON file instead of
/// wiring every default in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_ribbon_viewport")]
    pub ribbon_viewport: Viewport,
    #[serde(default = "default_gauge_viewport")]
    pub gauge_viewport: Viewport,
    #[serde(default = "default_scatter_viewport")]
    pub scatter_viewport: Viewport,
    /// Cars compared at startup; unknown keys are ignored.
    #[serde(default)]
    pub default_selection: Vec<CarKey>,
    #[serde(default)]
    pub baseline_mode: BaselineMode,
    #[serde(default = "default_x_axis")]
    pub x_axis: MetricKey,
    #[serde(default = "default_y_axis")]
    pub y_axis: MetricKey,
    /// `None` resolves to `min(100, dataset size)`.
    #[serde(default)]
    pub max_display_count: Option<usize>,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub needles: NeedleConfig,
    /// Seed for the random-pick action; entropy-seeded when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ribbon_viewport: default_ribbon_viewport(),
            gauge_viewport: default_gauge_viewport(),
            scatter_viewport: default_scatter_viewport(),
            default_selection: Vec::new(),
            baseline_mode: BaselineMode::default(),
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            max_display_count: None,
            animation: AnimationConfig::default(),
            needles: NeedleConfig::default(),
            random_seed: None,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_default_selection(mut self, keys: Vec<CarKey>) -> Self {
        self.default_selection = keys;
        self
    }

    #[must_use]
    pub fn with_baseline_mode(mut self, mode: BaselineMode) -> Self {
        self.baseline_mode = mode;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: MetricKey, y_axis: MetricKey) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_max_display_count(mut self, count: usize) -> Self {
        self.max_display_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_scatter_viewport(mut self, viewport: Viewport) -> Self {
        self.scatter_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_needles(mut self, needles: NeedleConfig) -> Self {
        self.needles = needles;
        self
    }

    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Scatter cap for a dataset of `dataset_len` cars.
    #[must_use]
    pub fn resolved_max_display_count(&self, dataset_len: usize) -> usize {
        self.max_display_count
            .unwrap_or_else(|| DEFAULT_MAX_DISPLAY_COUNT.min(dataset_len))
    }

    /// Checks viewports and animation tuning.
    ///
    /// The scatter viewport may be zero-sized: a hidden container just skips
    /// drawing until it is resized.
    pub fn validate(&self) -> DashResult<()> {
        for viewport in [self.ribbon_viewport, self.gauge_viewport] {
            if !viewport.is_valid() {
                return Err(DashError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }

        let animation = self.animation;
        for (name, value) in [
            ("frame_cap_ms", animation.frame_cap_ms),
            ("time_unit_ms", animation.time_unit_ms),
            ("speed_exponent", animation.speed_exponent),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DashError::InvalidData(format!(
                    "animation `{name}` must be finite and > 0"
                )));
            }
        }
        if !animation.min_speed.is_finite()
            || !animation.max_speed.is_finite()
            || animation.min_speed < 0.0
            || animation.max_speed < animation.min_speed
        {
            return Err(DashError::InvalidData(
                "animation speeds must satisfy 0 <= min_speed <= max_speed".to_owned(),
            ));
        }
        if !animation.lane_spacing_fraction.is_finite() || animation.lane_spacing_fraction < 0.0 {
            return Err(DashError::InvalidData(
                "animation `lane_spacing_fraction` must be finite and >= 0".to_owned(),
            ));
        }

        if !self.needles.duration_ms.is_finite() || self.needles.duration_ms < 0.0 {
            return Err(DashError::InvalidData(
                "needle duration must be finite and >= 0".to_owned(),
            ));
        }
        if !self.needles.rest_angle.is_finite() {
            return Err(DashError::InvalidData(
                "needle rest angle must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> DashResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashError::InvalidData(format!("failed to serialize dashboard config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            DashError::InvalidData(format!("failed to parse dashboard config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_ribbon_viewport() -> Viewport {
    Viewport::new(1120, 660)
}

fn default_gauge_viewport() -> Viewport {
    Viewport::new(660, 320)
}

fn default_scatter_viewport() -> Viewport {
    Viewport::new(1200, 500)
}

fn default_x_axis() -> MetricKey {
    MetricKey::Horsepower
}

fn default_y_axis() -> MetricKey {
    MetricKey::Price
}

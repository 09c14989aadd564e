//! Display-value normalization for gauges.
//!
//! Every function here is pure. Views call [`normalize_value`] on each render
//! pass instead of caching results across selection or baseline changes.

use serde::{Deserialize, Serialize};

use crate::core::{Car, Dataset, MetricDirection, MetricKey, extent_of};

/// Smallest display value for a present metric, so a needle never collapses.
pub const DISPLAY_FLOOR: f64 = 0.03;

/// Display value for a flat dataset range where nothing can be told apart.
pub const DEGENERATE_RANGE_VALUE: f64 = 0.5;

/// Baseline a metric value is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMode {
    /// Relative to the best value among the currently compared cars.
    #[default]
    RelativeToSelection,
    /// Linear position inside the whole dataset's observed range.
    RelativeToGlobal,
}

/// Data a value is normalized against.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSet<'a> {
    pub selection: &'a [&'a Car],
    pub dataset: &'a Dataset,
}

impl<'a> ReferenceSet<'a> {
    #[must_use]
    pub fn new(selection: &'a [&'a Car], dataset: &'a Dataset) -> Self {
        Self { selection, dataset }
    }
}

/// Best value among `selection`: the maximum, or the minimum for
/// lower-is-better metrics. `None` when no car has the metric.
#[must_use]
pub fn selection_best(metric: MetricKey, selection: &[&Car]) -> Option<f64> {
    let (min, max) = extent_of(selection.iter().copied(), metric)?;
    Some(match metric.direction() {
        MetricDirection::HigherIsBetter => max,
        MetricDirection::LowerIsBetter => min,
    })
}

/// Ratio against the selection's best value, before the display floor.
#[must_use]
pub fn relative_to_selection(metric: MetricKey, value: Option<f64>, best: Option<f64>) -> f64 {
    let (Some(value), Some(best)) = (value, best) else {
        return 0.0;
    };
    if best <= 0.0 {
        return 0.0;
    }
    let ratio = match metric.direction() {
        MetricDirection::HigherIsBetter => value / best,
        MetricDirection::LowerIsBetter => best / value,
    };
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// Position inside the dataset range `extent`, before the display floor.
///
/// Lower-is-better metrics are flipped so the smallest value maps to `1`.
#[must_use]
pub fn relative_to_global(metric: MetricKey, value: Option<f64>, extent: Option<(f64, f64)>) -> f64 {
    let (Some(value), Some((min, max))) = (value, extent) else {
        return 0.0;
    };
    let span = max - min;
    if span == 0.0 {
        return DEGENERATE_RANGE_VALUE;
    }
    let position = (value - min) / span;
    match metric.direction() {
        MetricDirection::HigherIsBetter => position,
        MetricDirection::LowerIsBetter => 1.0 - position,
    }
}

/// Normalized value before the display floor is applied.
#[must_use]
pub fn normalize_unfloored(
    metric: MetricKey,
    value: Option<f64>,
    reference: ReferenceSet<'_>,
    mode: BaselineMode,
) -> f64 {
    match mode {
        BaselineMode::RelativeToSelection => {
            relative_to_selection(metric, value, selection_best(metric, reference.selection))
        }
        BaselineMode::RelativeToGlobal => {
            relative_to_global(metric, value, reference.dataset.extent(metric))
        }
    }
}

/// Display value in `[DISPLAY_FLOOR, 1]` for a present value, `0` otherwise.
#[must_use]
pub fn normalize_value(
    metric: MetricKey,
    value: Option<f64>,
    reference: ReferenceSet<'_>,
    mode: BaselineMode,
) -> f64 {
    if value.is_none() {
        return 0.0;
    }
    apply_display_floor(normalize_unfloored(metric, value, reference, mode))
}

#[must_use]
pub fn apply_display_floor(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(DISPLAY_FLOOR, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_ratio_is_inverted() {
        let ratio = relative_to_selection(MetricKey::Acceleration, Some(4.0), Some(2.0));
        assert_eq!(ratio, 0.5);
    }

    #[test]
    fn non_positive_best_yields_zero() {
        assert_eq!(relative_to_selection(MetricKey::Horsepower, Some(10.0), Some(0.0)), 0.0);
    }

    #[test]
    fn flat_range_yields_half() {
        let value = relative_to_global(MetricKey::Price, Some(7.0), Some((7.0, 7.0)));
        assert_eq!(value, DEGENERATE_RANGE_VALUE);
    }

    #[test]
    fn floor_keeps_needles_visible() {
        assert_eq!(apply_display_floor(0.0), DISPLAY_FLOOR);
        assert_eq!(apply_display_floor(f64::NAN), 0.0);
        assert_eq!(apply_display_floor(0.4), 0.4);
    }
}

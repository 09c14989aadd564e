use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Car;
use crate::error::DashError;

/// Closed set of car metrics the views can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "hp")]
    Horsepower,
    #[serde(rename = "tops")]
    TopSpeed,
    #[serde(rename = "accel")]
    Acceleration,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "capacity")]
    Capacity,
    #[serde(rename = "torque")]
    Torque,
    #[serde(rename = "hpPerDollar")]
    HpPerDollar,
    #[serde(rename = "speedPerDollar")]
    SpeedPerDollar,
    #[serde(rename = "performanceScore")]
    PerformanceScore,
}

/// Whether larger raw values are better for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// How tick labels and card text render a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFormat {
    Plain,
    OneDecimal,
    Currency,
    PerThousandDollars,
    Rounded,
}

/// Per-metric descriptor. The whole table lives in [`MetricKey::spec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub axis_label: &'static str,
    pub direction: MetricDirection,
    pub format: MetricFormat,
}

impl MetricKey {
    pub const ALL: [MetricKey; 9] = [
        MetricKey::Horsepower,
        MetricKey::TopSpeed,
        MetricKey::Acceleration,
        MetricKey::Price,
        MetricKey::Capacity,
        MetricKey::Torque,
        MetricKey::HpPerDollar,
        MetricKey::SpeedPerDollar,
        MetricKey::PerformanceScore,
    ];

    /// Options offered by the scatter axis selectors, in display order.
    pub const AXIS_OPTIONS: [MetricKey; 8] = [
        MetricKey::Horsepower,
        MetricKey::TopSpeed,
        MetricKey::Acceleration,
        MetricKey::Price,
        MetricKey::Capacity,
        MetricKey::HpPerDollar,
        MetricKey::SpeedPerDollar,
        MetricKey::PerformanceScore,
    ];

    /// Metrics drawn as concentric needles on every gauge card, inner first.
    pub const GAUGE_METRICS: [MetricKey; 4] = [
        MetricKey::Horsepower,
        MetricKey::TopSpeed,
        MetricKey::Acceleration,
        MetricKey::Price,
    ];

    #[must_use]
    pub const fn spec(self) -> MetricSpec {
        use MetricDirection::{HigherIsBetter, LowerIsBetter};
        match self {
            Self::Horsepower => MetricSpec {
                id: "hp",
                label: "Horsepower",
                axis_label: "Horsepower (HP)",
                direction: HigherIsBetter,
                format: MetricFormat::Plain,
            },
            Self::TopSpeed => MetricSpec {
                id: "tops",
                label: "Top Speed",
                axis_label: "Top Speed (km/h)",
                direction: HigherIsBetter,
                format: MetricFormat::Plain,
            },
            Self::Acceleration => MetricSpec {
                id: "accel",
                label: "0-100 Time",
                axis_label: "0-100 km/h Time (s)",
                direction: LowerIsBetter,
                format: MetricFormat::OneDecimal,
            },
            Self::Price => MetricSpec {
                id: "price",
                label: "Price",
                axis_label: "Price ($)",
                direction: HigherIsBetter,
                format: MetricFormat::Currency,
            },
            Self::Capacity => MetricSpec {
                id: "capacity",
                label: "Capacity",
                axis_label: "Engine/Battery Capacity",
                direction: HigherIsBetter,
                format: MetricFormat::Plain,
            },
            Self::Torque => MetricSpec {
                id: "torque",
                label: "Torque",
                axis_label: "Torque (Nm)",
                direction: HigherIsBetter,
                format: MetricFormat::Plain,
            },
            Self::HpPerDollar => MetricSpec {
                id: "hpPerDollar",
                label: "HP per $1000",
                axis_label: "HP per $1000",
                direction: HigherIsBetter,
                format: MetricFormat::PerThousandDollars,
            },
            Self::SpeedPerDollar => MetricSpec {
                id: "speedPerDollar",
                label: "Speed per $1000",
                axis_label: "Speed per $1000",
                direction: HigherIsBetter,
                format: MetricFormat::PerThousandDollars,
            },
            Self::PerformanceScore => MetricSpec {
                id: "performanceScore",
                label: "Performance Score",
                axis_label: "Performance Score",
                direction: HigherIsBetter,
                format: MetricFormat::Rounded,
            },
        }
    }

    #[must_use]
    pub const fn direction(self) -> MetricDirection {
        self.spec().direction
    }

    /// Reads this metric from `car`. Derived metrics are always present.
    #[must_use]
    pub fn value(self, car: &Car) -> Option<f64> {
        match self {
            Self::Horsepower => car.hp,
            Self::TopSpeed => car.tops,
            Self::Acceleration => car.accel,
            Self::Price => car.price,
            Self::Capacity => car.capacity,
            Self::Torque => car.torque,
            Self::HpPerDollar => Some(car.hp_per_dollar),
            Self::SpeedPerDollar => Some(car.speed_per_dollar),
            Self::PerformanceScore => Some(car.performance_score),
        }
    }

    /// Formats a value the way axis ticks display it.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        if !value.is_finite() {
            return MISSING.to_owned();
        }
        match self.spec().format {
            MetricFormat::Plain => fmt_plain(value),
            MetricFormat::OneDecimal => format!("{value:.1}"),
            MetricFormat::Currency => fmt_price(Some(value)),
            MetricFormat::PerThousandDollars => format!("{:.2}", value * 1000.0),
            MetricFormat::Rounded => format!("{value:.0}"),
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().id)
    }
}

impl FromStr for MetricKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.spec().id == s)
            .ok_or_else(|| DashError::InvalidData(format!("unknown metric key `{s}`")))
    }
}

/// Placeholder rendered for missing values.
pub const MISSING: &str = "—";

/// Compact magnitude: `1234.0` → `"1.2k"`, `950.4` → `"950"`.
#[must_use]
pub fn fmt_k(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => {
            if value >= 1e3 {
                format!("{:.1}k", value / 1e3)
            } else {
                format!("{:.0}", value.round())
            }
        }
        _ => MISSING.to_owned(),
    }
}

#[must_use]
pub fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("${}", fmt_k(Some(value))),
        _ => MISSING.to_owned(),
    }
}

/// Integral values without a trailing `.0`, everything else as-is.
#[must_use]
pub fn fmt_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

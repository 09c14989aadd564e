use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_BRAND: &str = "UNKNOWN";
pub const SEATS_NOT_AVAILABLE: &str = "N/A";

/// Free-text range such as `"550 - 600"` or `"$12,000-$15,000"`.
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?\s*\d[\d,]*(?:\.\d+)?\s*-\s*\$?\s*\d").expect("range pattern is valid")
});

/// Unique identity of a car inside a dataset, formed from brand and model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarKey(String);

impl CarKey {
    #[must_use]
    pub fn new(brand: &str, model: &str) -> Self {
        Self(format!("{brand}__{model}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CarKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CarKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for CarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dataset row as read from the source table, before any coercion.
///
/// Every column is optional; absent cells and absent columns look the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCarRow {
    #[serde(rename = "Company Names", default)]
    pub company: Option<String>,
    #[serde(rename = "Cars Names", default)]
    pub model: Option<String>,
    #[serde(rename = "HorsePower", default)]
    pub horse_power: Option<String>,
    #[serde(rename = "Total Speed", default)]
    pub top_speed: Option<String>,
    #[serde(rename = "Performance(0 - 100 )KM/H", default)]
    pub acceleration: Option<String>,
    #[serde(rename = "Cars Prices", default)]
    pub price: Option<String>,
    #[serde(rename = "Seats", default)]
    pub seats: Option<String>,
    #[serde(rename = "CC/Battery Capacity", default)]
    pub capacity: Option<String>,
    #[serde(rename = "Torque", default)]
    pub torque: Option<String>,
}

/// Canonical car entity.
///
/// Numeric fields use `None` for missing or unparseable input; `Some` always
/// holds a finite value. Derived fields are filled by
/// [`derive_metrics`](crate::core::derive_metrics) and are always finite and
/// non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub brand: String,
    pub model: String,
    pub hp: Option<f64>,
    pub tops: Option<f64>,
    pub accel: Option<f64>,
    pub price: Option<f64>,
    pub capacity: Option<f64>,
    pub torque: Option<f64>,
    pub seats: String,
    pub hp_per_dollar: f64,
    pub speed_per_dollar: f64,
    pub performance_score: f64,
}

impl Car {
    /// Creates a car with no numeric data. Brand and model are canonicalized
    /// the same way [`normalize_row`] does it.
    #[must_use]
    pub fn new(brand: &str, model: &str, seats: &str) -> Self {
        Self {
            brand: canonical_brand(Some(brand)),
            model: model.trim().to_owned(),
            hp: None,
            tops: None,
            accel: None,
            price: None,
            capacity: None,
            torque: None,
            seats: canonical_seats(Some(seats)),
            hp_per_dollar: 0.0,
            speed_per_dollar: 0.0,
            performance_score: 0.0,
        }
    }

    #[must_use]
    pub fn with_hp(mut self, hp: f64) -> Self {
        self.hp = finite(hp);
        self
    }

    #[must_use]
    pub fn with_top_speed(mut self, tops: f64) -> Self {
        self.tops = finite(tops);
        self
    }

    #[must_use]
    pub fn with_accel(mut self, accel: f64) -> Self {
        self.accel = finite(accel);
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = finite(price);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = finite(capacity);
        self
    }

    #[must_use]
    pub fn with_torque(mut self, torque: f64) -> Self {
        self.torque = finite(torque);
        self
    }

    #[must_use]
    pub fn key(&self) -> CarKey {
        CarKey::new(&self.brand, &self.model)
    }

    /// Human-facing name used by selectors, e.g. `"FERRARI SF90"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Whether the row survives the loader's usable-row filter.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.model.is_empty()
            && self.hp.is_some()
            && self.capacity.is_some()
            && !self.seats.is_empty()
            && self.seats != SEATS_NOT_AVAILABLE
    }
}

/// Converts one raw row into a [`Car`]. Never fails: malformed cells degrade
/// to `None` or the string sentinels.
#[must_use]
pub fn normalize_row(row: &RawCarRow) -> Car {
    Car {
        brand: canonical_brand(row.company.as_deref()),
        model: row.model.as_deref().map(str::trim).unwrap_or_default().to_owned(),
        hp: parse_numeric(row.horse_power.as_deref()),
        tops: parse_numeric(row.top_speed.as_deref()),
        accel: parse_numeric(row.acceleration.as_deref()),
        price: parse_numeric(row.price.as_deref()),
        capacity: parse_numeric(row.capacity.as_deref()),
        torque: parse_numeric(row.torque.as_deref()),
        seats: canonical_seats(row.seats.as_deref()),
        hp_per_dollar: 0.0,
        speed_per_dollar: 0.0,
        performance_score: 0.0,
    }
}

/// Coerces a free-text numeric cell.
///
/// Ranges (`"A - B"`) resolve to their upper bound. Everything else keeps only
/// digits and dots before parsing, so units and thousands separators vanish.
#[must_use]
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }

    if RANGE_PATTERN.is_match(text) {
        let upper = text.split('-').nth(1)?;
        return parse_cleaned(upper);
    }
    parse_cleaned(text)
}

fn parse_cleaned(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().and_then(finite)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn canonical_brand(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(brand) if !brand.is_empty() => brand.to_uppercase(),
        _ => UNKNOWN_BRAND.to_owned(),
    }
}

fn canonical_seats(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(seats) if !seats.is_empty() => seats.to_owned(),
        _ => SEATS_NOT_AVAILABLE.to_owned(),
    }
}

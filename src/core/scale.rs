use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Continuous linear mapping from a data domain onto an output range.
///
/// A zero-width domain is accepted and maps every input to the middle of the
/// range, which keeps single-car datasets drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> DashResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(DashError::InvalidData(format!(
                    "scale {name} must be finite"
                )));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Builds a scale from an optional observed extent, falling back to
    /// `[0, 1]` when nothing was observed.
    pub fn from_extent(extent: Option<(f64, f64)>, range: (f64, f64)) -> DashResult<Self> {
        Self::new(extent.unwrap_or((0.0, 1.0)), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Like [`map`](Self::map), but never leaves the output range.
    #[must_use]
    pub fn map_clamped(self, value: f64) -> f64 {
        let (low, high) = ordered(self.range_start, self.range_end);
        self.map(value).clamp(low, high)
    }

    /// Extends the domain outward to round tick boundaries for roughly
    /// `count` ticks.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = ordered(self.domain_start, self.domain_end);
        let mut previous_step = None;
        for _ in 0..10 {
            let Some(step) = tick_step(start, stop, count) else {
                break;
            };
            if previous_step == Some(step) {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            previous_step = Some(step);
        }

        if self.domain_start <= self.domain_end {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }
        self
    }

    /// Round tick values inside the domain, ascending.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain_start, self.domain_end);
        let Some(step) = tick_step(start, stop, count) else {
            return if start == stop { vec![start] } else { Vec::new() };
        };
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        if step < 1.0 {
            // Dividing by the inverse step avoids `0.30000000000000004` labels.
            let inverse = (1.0 / step).round();
            (first..=last).map(|i| i as f64 / inverse).collect()
        } else {
            (first..=last).map(|i| i as f64 * step).collect()
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Step from the 1-2-5 family closest to `(stop - start) / count`.
fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !(stop > start) {
        return None;
    }
    let raw = (stop - start) / count as f64;
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let step = factor * magnitude;
    (step.is_finite() && step > 0.0).then_some(step)
}

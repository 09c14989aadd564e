use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CarKey, Dataset, MetricKey};

/// Tuning for the ribbon track animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Upper bound for one frame's time delta, so a backgrounded host does not
    /// teleport markers when it resumes.
    pub frame_cap_ms: f64,
    /// Time span over which a marker travels `velocity` path units.
    pub time_unit_ms: f64,
    pub speed_exponent: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Fraction of the path separating consecutive newcomers' start offsets.
    pub lane_spacing_fraction: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_cap_ms: 32.0,
            time_unit_ms: 16.0,
            speed_exponent: 2.0,
            min_speed: 0.5,
            max_speed: 6.0,
            lane_spacing_fraction: 0.1,
        }
    }
}

/// Power-law hp → velocity mapping over `[0, max_hp]`.
///
/// Convex for exponents above 1, so high-hp cars pull away disproportionately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedMapping {
    pub exponent: f64,
    pub max_hp: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl SpeedMapping {
    #[must_use]
    pub fn for_dataset(dataset: &Dataset, config: AnimationConfig) -> Self {
        let max_hp = dataset
            .extent(MetricKey::Horsepower)
            .map_or(0.0, |(_, max)| max);
        Self {
            exponent: config.speed_exponent,
            max_hp,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
        }
    }

    /// Missing horsepower moves at the minimum speed.
    #[must_use]
    pub fn velocity(self, hp: Option<f64>) -> f64 {
        let hp = hp.unwrap_or(0.0).max(0.0);
        if self.max_hp <= 0.0 {
            return self.min_speed;
        }
        let t = (hp / self.max_hp).powf(self.exponent);
        let velocity = self.min_speed + t * (self.max_speed - self.min_speed);
        if velocity.is_finite() {
            velocity
        } else {
            self.min_speed
        }
    }
}

/// Per-car animation state: distance travelled along the closed path and
/// constant velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonState {
    pub key: CarKey,
    pub phase_offset: f64,
    pub velocity: f64,
}

/// Long-lived per-frame driver for the ribbon track markers.
///
/// The scheduler never owns a clock: hosts feed timestamps through
/// [`tick`](Self::tick) or raw deltas through [`advance`](Self::advance).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationScheduler {
    config: AnimationConfig,
    speed: SpeedMapping,
    path_length: f64,
    states: IndexMap<CarKey, RibbonState>,
    last_time_ms: Option<f64>,
    frames: u64,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(config: AnimationConfig, speed: SpeedMapping, path_length: f64) -> Self {
        Self {
            config,
            speed,
            path_length,
            states: IndexMap::new(),
            last_time_ms: None,
            frames: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    #[must_use]
    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Active states in selection order.
    pub fn states(&self) -> impl Iterator<Item = &RibbonState> {
        self.states.values()
    }

    #[must_use]
    pub fn state(&self, key: &CarKey) -> Option<&RibbonState> {
        self.states.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Reconciles the active set with `chosen`.
    ///
    /// Cars that stay keep their phase; newcomers start at
    /// `index * lane_spacing * path_length`; leavers are discarded.
    pub fn sync_members(&mut self, chosen: &[CarKey], dataset: &Dataset) {
        let unchanged = self.states.len() == chosen.len()
            && self.states.keys().zip(chosen).all(|(a, b)| a == b);
        if unchanged {
            return;
        }

        let mut previous = std::mem::take(&mut self.states);
        for (index, key) in chosen.iter().enumerate() {
            let Some(car) = dataset.get(key) else {
                continue;
            };
            let state = previous.swap_remove(key).unwrap_or_else(|| RibbonState {
                key: key.clone(),
                phase_offset: self.wrap(
                    index as f64 * self.config.lane_spacing_fraction * self.path_length,
                ),
                velocity: self.speed.velocity(car.hp),
            });
            self.states.insert(key.clone(), state);
        }
        trace!(
            active = self.states.len(),
            dropped = previous.len(),
            "ribbon membership synced"
        );
    }

    /// Advances every active marker by `dt_ms`, clamped to
    /// `[0, frame_cap_ms]`. Returns the delta actually applied.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        let dt = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, self.config.frame_cap_ms)
        } else {
            0.0
        };
        let time_unit = self.config.time_unit_ms;
        let path_length = self.path_length;
        for state in self.states.values_mut() {
            let travelled = state.phase_offset + state.velocity * dt / time_unit;
            state.phase_offset = wrap_distance(travelled, path_length);
        }
        self.frames += 1;
        dt
    }

    /// Runs one frame at host time `now_ms` against the current selection.
    ///
    /// The first frame only records the timestamp.
    pub fn tick(&mut self, now_ms: f64, chosen: &[CarKey], dataset: &Dataset) -> f64 {
        self.sync_members(chosen, dataset);
        let dt = match self.last_time_ms {
            Some(last) => now_ms - last,
            None => 0.0,
        };
        if now_ms.is_finite() {
            self.last_time_ms = Some(now_ms);
        }
        self.advance(dt)
    }

    fn wrap(&self, distance: f64) -> f64 {
        wrap_distance(distance, self.path_length)
    }
}

fn wrap_distance(distance: f64, path_length: f64) -> f64 {
    if !distance.is_finite() || path_length <= 0.0 {
        return 0.0;
    }
    let wrapped = distance.rem_euclid(path_length);
    if wrapped >= path_length { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_convex_in_hp() {
        let mapping = SpeedMapping {
            exponent: 2.0,
            max_hp: 1000.0,
            min_speed: 0.5,
            max_speed: 6.0,
        };
        let low = mapping.velocity(Some(250.0)) - mapping.velocity(Some(0.0));
        let high = mapping.velocity(Some(1000.0)) - mapping.velocity(Some(750.0));
        assert!(high > low);
        assert_eq!(mapping.velocity(Some(1000.0)), 6.0);
        assert_eq!(mapping.velocity(None), 0.5);
    }

    #[test]
    fn wrap_handles_exact_multiples() {
        assert_eq!(wrap_distance(200.0, 100.0), 0.0);
        assert_eq!(wrap_distance(-25.0, 100.0), 75.0);
    }
}

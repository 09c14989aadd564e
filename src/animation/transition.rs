use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CarKey, MetricKey};

/// Tuning for gauge needle sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleConfig {
    pub duration_ms: f64,
    /// Angle a needle starts from the first time it is drawn.
    pub rest_angle: f64,
}

impl Default for NeedleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750.0,
            rest_angle: -2.1,
        }
    }
}

/// Cubic ease-out on `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_out(t: f64) -> f64 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

/// One in-flight (or settled) sweep between two angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedleTransition {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl NeedleTransition {
    #[must_use]
    pub fn progress(self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn angle_at(self, now_ms: f64) -> f64 {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = ease_cubic_out(progress);
        self.from + (self.to - self.from) * eased
    }

    #[must_use]
    pub fn is_finished(self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Identity of one needle: a car's card and the metric ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeedleKey {
    pub car: CarKey,
    pub metric: MetricKey,
}

impl NeedleKey {
    #[must_use]
    pub fn new(car: CarKey, metric: MetricKey) -> Self {
        Self { car, metric }
    }
}

/// Last-rendered needle angles, kept apart from the selection itself.
///
/// Retargeting always restarts from the currently rendered angle, so a new
/// request mid-sweep never snaps back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeedleTransitions {
    config: NeedleConfig,
    needles: IndexMap<NeedleKey, NeedleTransition>,
}

impl NeedleTransitions {
    #[must_use]
    pub fn new(config: NeedleConfig) -> Self {
        Self {
            config,
            needles: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> NeedleConfig {
        self.config
    }

    /// Angle rendered for `key` at `now_ms`; the rest angle when unknown.
    #[must_use]
    pub fn angle(&self, key: &NeedleKey, now_ms: f64) -> f64 {
        self.needles
            .get(key)
            .map_or(self.config.rest_angle, |transition| transition.angle_at(now_ms))
    }

    #[must_use]
    pub fn transition(&self, key: &NeedleKey) -> Option<NeedleTransition> {
        self.needles.get(key).copied()
    }

    /// Starts a sweep from the current angle to `target` at `now_ms`.
    pub fn retarget(&mut self, key: NeedleKey, target: f64, now_ms: f64) {
        let from = self.angle(&key, now_ms);
        self.needles.insert(
            key,
            NeedleTransition {
                from,
                to: target,
                start_ms: now_ms,
                duration_ms: self.config.duration_ms,
            },
        );
    }

    /// Moves every sweep's start by `delta_ms`, keeping its progress
    /// relative to the shifted clock.
    pub fn shift_clock(&mut self, delta_ms: f64) {
        for transition in self.needles.values_mut() {
            transition.start_ms += delta_ms;
        }
    }

    /// Forgets needles of cars no longer on screen; they restart from rest
    /// if they come back.
    pub fn retain_cars(&mut self, cars: &[CarKey]) {
        self.needles.retain(|key, _| cars.contains(&key.car));
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.needles
            .values()
            .any(|transition| !transition.is_finished(now_ms))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.needles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_hits_endpoints() {
        assert_eq!(ease_cubic_out(0.0), 0.0);
        assert_eq!(ease_cubic_out(1.0), 1.0);
        assert!(ease_cubic_out(0.5) > 0.5);
    }

    #[test]
    fn transition_settles_after_duration() {
        let transition = NeedleTransition {
            from: -2.1,
            to: 1.0,
            start_ms: 100.0,
            duration_ms: 750.0,
        };
        assert_eq!(transition.angle_at(100.0), -2.1);
        assert_eq!(transition.angle_at(850.0), 1.0);
        assert!(transition.is_finished(2_000.0));
    }
}

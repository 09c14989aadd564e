use crate::core::Car;

/// Value-for-money and composite performance figures for one car.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub hp_per_dollar: f64,
    pub speed_per_dollar: f64,
    pub performance_score: f64,
}

impl DerivedMetrics {
    /// Computes derived figures from the raw fields of `car`.
    ///
    /// Any missing input, or a non-positive price/acceleration, yields `0.0`.
    #[must_use]
    pub fn compute(car: &Car) -> Self {
        Self {
            hp_per_dollar: per_dollar(car.hp, car.price),
            speed_per_dollar: per_dollar(car.tops, car.price),
            performance_score: performance_score(car.hp, car.tops, car.accel),
        }
    }

    fn apply_to(self, car: &mut Car) {
        car.hp_per_dollar = self.hp_per_dollar;
        car.speed_per_dollar = self.speed_per_dollar;
        car.performance_score = self.performance_score;
    }
}

/// Attaches derived metrics to every car, preserving order.
///
/// Derived fields are overwritten, so running this twice is a no-op.
#[must_use]
pub fn derive_metrics(mut cars: Vec<Car>) -> Vec<Car> {
    for car in &mut cars {
        DerivedMetrics::compute(car).apply_to(car);
    }
    cars
}

fn per_dollar(value: Option<f64>, price: Option<f64>) -> f64 {
    match (value, price) {
        (Some(value), Some(price)) if price > 0.0 => non_negative(value / price),
        _ => 0.0,
    }
}

fn performance_score(hp: Option<f64>, tops: Option<f64>, accel: Option<f64>) -> f64 {
    match (hp, tops, accel) {
        (Some(hp), Some(tops), Some(accel)) if accel > 0.0 => non_negative(hp * tops / accel),
        _ => 0.0,
    }
}

// Parsed numerics are never negative, but builder-made cars can be.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

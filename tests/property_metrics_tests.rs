use carviz::core::{Car, derive_metrics};
use proptest::prelude::*;

fn optional(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
    prop::option::of(range)
}

proptest! {
    #[test]
    fn derived_metrics_are_finite_and_non_negative(
        hp in optional(0.0..3_000.0),
        tops in optional(0.0..600.0),
        accel in optional(0.0..30.0),
        price in optional(0.0..5_000_000.0),
    ) {
        let mut car = Car::new("Prop", "X", "2");
        car.hp = hp;
        car.tops = tops;
        car.accel = accel;
        car.price = price;

        let derived = derive_metrics(vec![car]).remove(0);
        for value in [derived.hp_per_dollar, derived.speed_per_dollar, derived.performance_score] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
        if hp.is_none() || price.is_none_or(|p| p <= 0.0) {
            prop_assert_eq!(derived.hp_per_dollar, 0.0);
        }
        if accel.is_none_or(|a| a <= 0.0) {
            prop_assert_eq!(derived.performance_score, 0.0);
        }
    }

    #[test]
    fn derivation_is_idempotent(
        hps in prop::collection::vec(1.0f64..3_000.0, 0..8),
    ) {
        let cars: Vec<Car> = hps
            .iter()
            .enumerate()
            .map(|(i, hp)| {
                Car::new("Prop", &format!("M{i}"), "2")
                    .with_hp(*hp)
                    .with_top_speed(hp / 4.0)
                    .with_accel(3.0)
                    .with_price(hp * 100.0)
            })
            .collect();
        let once = derive_metrics(cars);
        let twice = derive_metrics(once.clone());
        prop_assert_eq!(once, twice);
    }
}

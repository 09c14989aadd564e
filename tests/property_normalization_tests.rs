use carviz::core::{
    BaselineMode, Car, DISPLAY_FLOOR, Dataset, MetricKey, ReferenceSet, normalize_value,
};
use proptest::prelude::*;

fn dataset_from(values: &[(f64, f64)]) -> Dataset {
    Dataset::from_cars(
        values
            .iter()
            .enumerate()
            .map(|(i, (hp, accel))| {
                Car::new("Prop", &format!("M{i}"), "4")
                    .with_hp(*hp)
                    .with_accel(*accel)
                    .with_capacity(1000.0)
            })
            .collect(),
    )
    .expect("dataset")
}

proptest! {
    #[test]
    fn display_values_stay_in_floor_range(
        values in prop::collection::vec((1.0f64..2_000.0, 1.5f64..20.0), 1..12),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..=3),
        global in any::<bool>(),
    ) {
        let dataset = dataset_from(&values);
        let cars: Vec<&Car> = dataset.cars().collect();
        let selection: Vec<&Car> = picks.iter().map(|index| *index.get(&cars)).collect();
        let reference = ReferenceSet::new(&selection, &dataset);
        let mode = if global {
            BaselineMode::RelativeToGlobal
        } else {
            BaselineMode::RelativeToSelection
        };

        for car in &selection {
            for metric in [MetricKey::Horsepower, MetricKey::Acceleration, MetricKey::PerformanceScore] {
                let value = normalize_value(metric, metric.value(car), reference, mode);
                prop_assert!(value.is_finite());
                prop_assert!((DISPLAY_FLOOR..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn selection_best_always_scores_one(
        values in prop::collection::vec((1.0f64..2_000.0, 1.5f64..20.0), 1..12),
    ) {
        let dataset = dataset_from(&values);
        let selection: Vec<&Car> = dataset.cars().take(3).collect();
        let reference = ReferenceSet::new(&selection, &dataset);

        for metric in [MetricKey::Horsepower, MetricKey::Acceleration] {
            let best = selection
                .iter()
                .map(|car| normalize_value(metric, metric.value(car), reference, BaselineMode::RelativeToSelection))
                .fold(0.0f64, f64::max);
            prop_assert!((best - 1.0).abs() <= 1e-12);
        }
    }

    #[test]
    fn global_order_follows_metric_direction(
        a in 1.0f64..2_000.0,
        b in 1.0f64..2_000.0,
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let dataset = dataset_from(&[(a, a / 100.0 + 1.0), (b, b / 100.0 + 1.0)]);
        let selection: Vec<&Car> = dataset.cars().collect();
        let reference = ReferenceSet::new(&selection, &dataset);

        let hp_a = normalize_value(MetricKey::Horsepower, Some(a), reference, BaselineMode::RelativeToGlobal);
        let hp_b = normalize_value(MetricKey::Horsepower, Some(b), reference, BaselineMode::RelativeToGlobal);
        let accel_a = normalize_value(MetricKey::Acceleration, Some(a / 100.0 + 1.0), reference, BaselineMode::RelativeToGlobal);
        let accel_b = normalize_value(MetricKey::Acceleration, Some(b / 100.0 + 1.0), reference, BaselineMode::RelativeToGlobal);

        prop_assert_eq!(a > b, hp_a > hp_b);
        prop_assert_eq!(a > b, accel_a < accel_b);
    }
}

use approx::assert_relative_eq;
use carviz::core::normalization::{normalize_unfloored, selection_best};
use carviz::core::{
    BaselineMode, Car, DISPLAY_FLOOR, Dataset, MetricKey, ReferenceSet, normalize_value,
};

fn car(model: &str, hp: f64, accel: f64) -> Car {
    Car::new("Test", model, "2")
        .with_hp(hp)
        .with_accel(accel)
        .with_capacity(2000.0)
}

fn dataset() -> Dataset {
    Dataset::from_cars(vec![
        car("A", 500.0, 3.0),
        car("B", 300.0, 4.0),
        car("C", 100.0, 9.0),
        car("D", 50.0, 12.0),
    ])
    .expect("dataset")
}

fn pick<'a>(dataset: &'a Dataset, models: &[&str]) -> Vec<&'a Car> {
    models
        .iter()
        .map(|model| {
            dataset
                .cars()
                .find(|car| car.model == *model)
                .expect("car in dataset")
        })
        .collect()
}

#[test]
fn selection_baseline_scores_best_car_as_one() {
    let dataset = dataset();
    let selection = pick(&dataset, &["A", "B"]);
    let reference = ReferenceSet::new(&selection, &dataset);

    let a = normalize_value(
        MetricKey::Horsepower,
        Some(500.0),
        reference,
        BaselineMode::RelativeToSelection,
    );
    let b = normalize_value(
        MetricKey::Horsepower,
        Some(300.0),
        reference,
        BaselineMode::RelativeToSelection,
    );
    assert_relative_eq!(a, 1.0);
    assert_relative_eq!(b, 0.6);
}

#[test]
fn acceleration_is_lower_is_better_in_both_modes() {
    let dataset = dataset();
    let selection = pick(&dataset, &["A", "B"]);
    let reference = ReferenceSet::new(&selection, &dataset);

    assert_eq!(
        selection_best(MetricKey::Acceleration, &selection),
        Some(3.0)
    );
    let relative = normalize_value(
        MetricKey::Acceleration,
        Some(4.0),
        reference,
        BaselineMode::RelativeToSelection,
    );
    assert_relative_eq!(relative, 0.75);

    let fastest = normalize_value(
        MetricKey::Acceleration,
        Some(3.0),
        reference,
        BaselineMode::RelativeToGlobal,
    );
    assert_relative_eq!(fastest, 1.0);
}

#[test]
fn global_baseline_ranks_against_whole_dataset() {
    let dataset = dataset();
    let selection = pick(&dataset, &["A", "B"]);
    let reference = ReferenceSet::new(&selection, &dataset);

    let a = normalize_value(
        MetricKey::Horsepower,
        Some(500.0),
        reference,
        BaselineMode::RelativeToGlobal,
    );
    let b = normalize_value(
        MetricKey::Horsepower,
        Some(300.0),
        reference,
        BaselineMode::RelativeToGlobal,
    );
    assert!(a > b);
    assert_relative_eq!(a, 1.0);
    assert_relative_eq!(b, 250.0 / 450.0);
}

#[test]
fn present_values_never_drop_below_floor() {
    let dataset = dataset();
    let selection = pick(&dataset, &["A", "D"]);
    let reference = ReferenceSet::new(&selection, &dataset);

    let weakest = normalize_value(
        MetricKey::Horsepower,
        Some(50.0),
        reference,
        BaselineMode::RelativeToGlobal,
    );
    assert_eq!(
        normalize_unfloored(
            MetricKey::Horsepower,
            Some(50.0),
            reference,
            BaselineMode::RelativeToGlobal
        ),
        0.0
    );
    assert_eq!(weakest, DISPLAY_FLOOR);
}

#[test]
fn missing_values_normalize_to_zero() {
    let dataset = dataset();
    let selection = pick(&dataset, &["A"]);
    let reference = ReferenceSet::new(&selection, &dataset);

    for mode in [BaselineMode::RelativeToSelection, BaselineMode::RelativeToGlobal] {
        assert_eq!(normalize_value(MetricKey::Price, None, reference, mode), 0.0);
    }
}

#[test]
fn flat_dataset_range_maps_to_half() {
    let dataset = Dataset::from_cars(vec![car("A", 200.0, 5.0), car("B", 200.0, 5.0)])
        .expect("dataset");
    let selection = pick(&dataset, &["A"]);
    let reference = ReferenceSet::new(&selection, &dataset);
    let value = normalize_value(
        MetricKey::Horsepower,
        Some(200.0),
        reference,
        BaselineMode::RelativeToGlobal,
    );
    assert_eq!(value, 0.5);
}

use carviz::core::{RawCarRow, normalize_row, parse_numeric};
use proptest::prelude::*;

proptest! {
    #[test]
    fn arbitrary_text_never_yields_non_finite_numbers(raw in ".*") {
        if let Some(value) = parse_numeric(Some(&raw)) {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
    }

    #[test]
    fn integers_survive_units_and_thousands_separators(
        value in 0u64..10_000_000,
        unit in prop::sample::select(vec!["", " hp", " km/h", " cc", " Nm"]),
    ) {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let text = format!("{grouped}{unit}");
        prop_assert_eq!(parse_numeric(Some(&text)), Some(value as f64));
    }

    #[test]
    fn ranges_resolve_to_the_upper_bound(
        low in 0u32..100_000,
        high in 0u32..100_000,
        dollars in any::<bool>(),
    ) {
        let prefix = if dollars { "$" } else { "" };
        let text = format!("{prefix}{low} - {prefix}{high}");
        prop_assert_eq!(parse_numeric(Some(&text)), Some(f64::from(high)));
    }

    #[test]
    fn brands_are_always_canonical(
        company in prop::option::of("[ a-zA-Z]{0,12}"),
        model in "[a-zA-Z0-9 ]{0,12}",
    ) {
        let car = normalize_row(&RawCarRow {
            company,
            model: Some(model.clone()),
            ..RawCarRow::default()
        });
        prop_assert!(!car.brand.is_empty());
        prop_assert_eq!(car.brand.trim(), car.brand.as_str());
        prop_assert_eq!(car.brand.to_uppercase(), car.brand.clone());
        prop_assert_eq!(car.model.as_str(), model.trim());
    }
}

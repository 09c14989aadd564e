use carviz::DashError;
use carviz::core::{CarKey, Dataset, MetricKey};

const HEADER: &str = "Company Names,Cars Names,Engines,CC/Battery Capacity,HorsePower,Total Speed,Performance(0 - 100 )KM/H,Cars Prices,Fuel Types,Seats,Torque\n";

fn load(body: &str) -> Result<Dataset, DashError> {
    let text = format!("{HEADER}{body}");
    Dataset::load_csv_reader(text.as_bytes())
}

#[test]
fn loads_free_text_numerics_and_ranges() {
    let dataset = load(concat!(
        "Ferrari,SF90 STRADALE,V8,\"3990 cc\",963 hp,340 km/h,2.5 sec,\"$1,100,000\",plug in hyrbrid,2,800 Nm\n",
        "Toyota,Corolla,I4,1798 cc,139 - 169 hp,180 km/h,10.5 sec,\"$21,000 - $25,500\",petrol,5,200 Nm\n",
    ))
    .expect("dataset loads");

    assert_eq!(dataset.len(), 2);
    let corolla = dataset
        .get(&CarKey::from("TOYOTA__Corolla"))
        .expect("corolla present");
    assert_eq!(corolla.hp, Some(169.0));
    assert_eq!(corolla.price, Some(25_500.0));
    assert!(corolla.performance_score > 0.0);

    let labels = dataset.labels();
    assert_eq!(labels, vec!["FERRARI SF90 STRADALE", "TOYOTA Corolla"]);
    assert_eq!(
        dataset.key_for_label("TOYOTA Corolla"),
        Some(&CarKey::from("TOYOTA__Corolla"))
    );
}

#[test]
fn unusable_rows_are_discarded_and_counted() {
    let dataset = load(concat!(
        "Audi,R8,V10,5204 cc,562 hp,330 km/h,3.2 sec,\"$142,000\",petrol,2,560 Nm\n",
        "Audi,,V10,5204 cc,562 hp,330 km/h,3.2 sec,\"$142,000\",petrol,2,560 Nm\n",
        "Audi,RS3,I5,,401 hp,290 km/h,3.8 sec,\"$60,000\",petrol,5,500 Nm\n",
        "Audi,A4,I4,1984 cc,201 hp,250 km/h,6.3 sec,\"$40,000\",petrol,,370 Nm\n",
    ))
    .expect("dataset loads");

    assert_eq!(dataset.len(), 1);
    let stats = dataset.stats();
    assert_eq!(stats.rows_read, 4);
    assert_eq!(stats.rows_discarded, 3);
    assert_eq!(stats.duplicate_keys, 0);
}

#[test]
fn fully_invalid_dataset_is_fatal() {
    let result = load("Audi,,V10,,,,,,petrol,,\n");
    assert!(matches!(result, Err(DashError::NoUsableData { rows_read: 1 })));

    let empty = load("");
    assert!(matches!(empty, Err(DashError::NoUsableData { rows_read: 0 })));
}

#[test]
fn duplicate_keys_keep_first_slot_with_last_values() {
    let dataset = load(concat!(
        "BMW,M3,I6,2993 cc,473 hp,290 km/h,4.1 sec,\"$75,000\",petrol,5,550 Nm\n",
        "Kia,EV6,EV,77 kWh,320 hp,185 km/h,5.1 sec,\"$52,000\",electric,5,605 Nm\n",
        "bmw ,M3,I6,2993 cc,503 hp,290 km/h,3.9 sec,\"$82,000\",petrol,5,550 Nm\n",
    ))
    .expect("dataset loads");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.stats().duplicate_keys, 1);
    let (first_key, first) = dataset.get_index(0).expect("first slot");
    assert_eq!(first_key, &CarKey::from("BMW__M3"));
    assert_eq!(first.hp, Some(503.0));
}

#[test]
fn headers_are_matched_after_trimming() {
    let text = concat!(
        "\u{feff} Company Names , Cars Names ,HorsePower , CC/Battery Capacity,Seats\n",
        "Mazda,MX-5,181 hp,1998 cc,2\n",
    );
    let dataset = Dataset::load_csv_reader(text.as_bytes()).expect("dataset loads");
    let car = dataset.cars().next().expect("one car");
    assert_eq!(car.brand, "MAZDA");
    assert_eq!(car.hp, Some(181.0));
    assert_eq!(car.tops, None);
}

#[test]
fn invalid_utf8_cells_are_decoded_lossily() {
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend_from_slice(b"Citro\xebn,C3,I3,1199 cc,110 hp,190 km/h,9.8 sec,\"$18,000\",petrol,5,205 Nm\n");
    let dataset = Dataset::load_csv_reader(bytes.as_slice()).expect("dataset loads");
    let car = dataset.cars().next().expect("one car");
    assert!(car.brand.starts_with("CITRO"));
    assert_eq!(car.model, "C3");
}

#[test]
fn extents_and_seat_values_cover_dataset() {
    let dataset = load(concat!(
        "BMW,M3,I6,2993 cc,473 hp,290 km/h,4.1 sec,\"$75,000\",petrol,5,550 Nm\n",
        "Porsche,911,F6,2981 cc,379 hp,293 km/h,4.0 sec,\"$110,000\",petrol,4,450 Nm\n",
        "Mazda,MX-5,I4,1998 cc,181 hp,219 km/h,5.7 sec,\"$30,000\",petrol,2,205 Nm\n",
    ))
    .expect("dataset loads");

    assert_eq!(dataset.extent(MetricKey::Horsepower), Some((181.0, 473.0)));
    assert_eq!(dataset.seat_values(), vec!["2", "4", "5"]);
    assert_eq!(dataset.brands(), vec!["BMW", "MAZDA", "PORSCHE"]);
}

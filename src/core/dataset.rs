use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Car, CarKey, MetricKey, RawCarRow, derive_metrics, normalize_row};
use crate::error::{DashError, DashResult};

/// Counters collected while building a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetLoadStats {
    pub rows_read: usize,
    pub rows_discarded: usize,
    pub duplicate_keys: usize,
}

/// Immutable, keyed collection of normalized cars with derived metrics.
///
/// Insertion order is the source row order. A dataset is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    cars: IndexMap<CarKey, Car>,
    stats: DatasetLoadStats,
}

impl Dataset {
    /// Loads a dataset from a CSV file on disk.
    pub fn load_csv_path(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading car dataset");
        let file = File::open(path)?;
        Self::load_csv_reader(file)
    }

    /// Loads a dataset from CSV text with a header row.
    ///
    /// Columns are matched by trimmed header name; cells that are not valid
    /// UTF-8 are decoded lossily instead of failing the batch.
    pub fn load_csv_reader<R: Read>(reader: R) -> DashResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let columns = ColumnIndex::from_headers(csv_reader.byte_headers()?);

        let mut rows = Vec::new();
        for record in csv_reader.byte_records() {
            rows.push(columns.raw_row(&record?));
        }
        Self::from_raw_rows(rows)
    }

    /// Normalizes raw rows, drops unusable ones and derives metrics.
    pub fn from_raw_rows(rows: impl IntoIterator<Item = RawCarRow>) -> DashResult<Self> {
        let mut rows_read = 0usize;
        let usable: Vec<Car> = rows
            .into_iter()
            .inspect(|_| rows_read += 1)
            .map(|row| normalize_row(&row))
            .filter(Car::is_usable)
            .collect();
        let rows_discarded = rows_read - usable.len();
        if rows_discarded > 0 {
            debug!(rows_read, rows_discarded, "discarded unusable rows");
        }

        let mut dataset = Self::build(usable, rows_read)?;
        dataset.stats.rows_discarded = rows_discarded;
        Ok(dataset)
    }

    /// Builds a dataset from already-validated cars.
    ///
    /// The usable-row filter is not applied; derived metrics are recomputed.
    pub fn from_cars(cars: Vec<Car>) -> DashResult<Self> {
        let rows_read = cars.len();
        Self::build(cars, rows_read)
    }

    fn build(cars: Vec<Car>, rows_read: usize) -> DashResult<Self> {
        let cars = derive_metrics(cars);
        let incoming = cars.len();

        let mut keyed = IndexMap::with_capacity(incoming);
        for car in cars {
            // Later rows replace earlier ones but keep the first slot.
            keyed.insert(car.key(), car);
        }

        let duplicate_keys = incoming - keyed.len();
        if duplicate_keys > 0 {
            warn!(
                duplicate_keys,
                "duplicate brand/model keys collapsed, last row wins"
            );
        }
        if keyed.is_empty() {
            return Err(DashError::NoUsableData { rows_read });
        }

        debug!(cars = keyed.len(), rows_read, "car dataset ready");
        Ok(Self {
            cars: keyed,
            stats: DatasetLoadStats {
                rows_read,
                rows_discarded: 0,
                duplicate_keys,
            },
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> DatasetLoadStats {
        self.stats
    }

    #[must_use]
    pub fn get(&self, key: &CarKey) -> Option<&Car> {
        self.cars.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &CarKey) -> bool {
        self.cars.contains_key(key)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&CarKey, &Car)> {
        self.cars.get_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CarKey, &Car)> {
        self.cars.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CarKey> {
        self.cars.keys()
    }

    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    /// Selector labels (`"BRAND model"`) in source order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.cars.values().map(Car::label).collect()
    }

    #[must_use]
    pub fn key_for_label(&self, label: &str) -> Option<&CarKey> {
        self.cars
            .iter()
            .find(|(_, car)| car.label() == label)
            .map(|(key, _)| key)
    }

    /// Observed `[min, max]` of `metric` over cars where it is present.
    #[must_use]
    pub fn extent(&self, metric: MetricKey) -> Option<(f64, f64)> {
        extent_of(self.cars.values(), metric)
    }

    /// Distinct seat values in lexicographic order.
    #[must_use]
    pub fn seat_values(&self) -> Vec<String> {
        self.cars
            .values()
            .map(|car| car.seats.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct brands in lexicographic order; drives palette assignment.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        self.cars
            .values()
            .map(|car| car.brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// `[min, max]` of `metric` over `cars`, ignoring missing values.
pub fn extent_of<'a>(
    cars: impl IntoIterator<Item = &'a Car>,
    metric: MetricKey,
) -> Option<(f64, f64)> {
    cars.into_iter()
        .filter_map(|car| metric.value(car))
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

struct ColumnIndex {
    company: Option<usize>,
    model: Option<usize>,
    horse_power: Option<usize>,
    top_speed: Option<usize>,
    acceleration: Option<usize>,
    price: Option<usize>,
    seats: Option<usize>,
    capacity: Option<usize>,
    torque: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::ByteRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .map(|raw| {
                String::from_utf8_lossy(raw)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_owned()
            })
            .collect();
        let find = |wanted: &str| names.iter().position(|name| name == wanted);

        let columns = Self {
            company: find("Company Names"),
            model: find("Cars Names"),
            horse_power: find("HorsePower"),
            top_speed: find("Total Speed"),
            acceleration: find("Performance(0 - 100 )KM/H"),
            price: find("Cars Prices"),
            seats: find("Seats"),
            capacity: find("CC/Battery Capacity"),
            torque: find("Torque"),
        };
        if columns.model.is_none() || columns.horse_power.is_none() {
            warn!(
                headers = ?names,
                "dataset is missing required columns, every row will be discarded"
            );
        }
        columns
    }

    fn raw_row(&self, record: &csv::ByteRecord) -> RawCarRow {
        let cell = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .map(|raw| String::from_utf8_lossy(raw).into_owned())
        };
        RawCarRow {
            company: cell(self.company),
            model: cell(self.model),
            horse_power: cell(self.horse_power),
            top_speed: cell(self.top_speed),
            acceleration: cell(self.acceleration),
            price: cell(self.price),
            seats: cell(self.seats),
            capacity: cell(self.capacity),
            torque: cell(self.torque),
        }
    }
}

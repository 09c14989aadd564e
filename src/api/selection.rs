use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::{BaselineMode, Car, CarKey, Dataset, MetricKey};
use crate::error::{DashError, DashResult};

/// Maximum number of cars compared side by side.
pub const MAX_CHOSEN: usize = 3;

pub type ChosenKeys = SmallVec<[CarKey; MAX_CHOSEN]>;

/// Seat-count filter applied to scatter styling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatFilter {
    #[default]
    All,
    Seats(String),
}

impl SeatFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// Parses a selector value; `"All"` means no filter.
    #[must_use]
    pub fn from_option(value: &str) -> Self {
        let value = value.trim();
        if value == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Seats(value.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, seats: &str) -> bool {
        match self {
            Self::All => true,
            Self::Seats(wanted) => wanted == seats,
        }
    }
}

impl fmt::Display for SeatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Seats(seats) => f.write_str(seats),
        }
    }
}

/// Selector options: `All` followed by every distinct seat value, sorted.
#[must_use]
pub fn seat_filter_options(dataset: &Dataset) -> Vec<SeatFilter> {
    std::iter::once(SeatFilter::All)
        .chain(dataset.seat_values().into_iter().map(SeatFilter::Seats))
        .collect()
}

/// The one mutable piece of dashboard state.
///
/// Views only ever see `&SelectionState`; mutation goes through
/// [`Dashboard`](super::Dashboard) so every change triggers its redraws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    chosen: ChosenKeys,
    baseline_mode: BaselineMode,
    seat_filter: SeatFilter,
    x_axis: MetricKey,
    y_axis: MetricKey,
    max_display_count: usize,
}

impl SelectionState {
    #[must_use]
    pub fn new(
        chosen: ChosenKeys,
        baseline_mode: BaselineMode,
        x_axis: MetricKey,
        y_axis: MetricKey,
        max_display_count: usize,
    ) -> Self {
        Self {
            chosen,
            baseline_mode,
            seat_filter: SeatFilter::All,
            x_axis,
            y_axis,
            max_display_count,
        }
    }

    #[must_use]
    pub fn chosen(&self) -> &[CarKey] {
        &self.chosen
    }

    #[must_use]
    pub fn baseline_mode(&self) -> BaselineMode {
        self.baseline_mode
    }

    #[must_use]
    pub fn seat_filter(&self) -> &SeatFilter {
        &self.seat_filter
    }

    #[must_use]
    pub fn x_axis(&self) -> MetricKey {
        self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> MetricKey {
        self.y_axis
    }

    #[must_use]
    pub fn max_display_count(&self) -> usize {
        self.max_display_count
    }

    /// Resolves chosen keys to cars, in selection order.
    #[must_use]
    pub fn chosen_cars<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Car> {
        self.chosen.iter().filter_map(|key| dataset.get(key)).collect()
    }

    pub(crate) fn replace_chosen(&mut self, chosen: ChosenKeys) {
        self.chosen = chosen;
    }

    pub(crate) fn set_baseline_mode(&mut self, mode: BaselineMode) {
        self.baseline_mode = mode;
    }

    pub(crate) fn set_seat_filter(&mut self, filter: SeatFilter) {
        self.seat_filter = filter;
    }

    pub(crate) fn set_axes(&mut self, x_axis: MetricKey, y_axis: MetricKey) {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
    }

    pub(crate) fn set_max_display_count(&mut self, count: usize) {
        self.max_display_count = count;
    }
}

/// Validates a requested comparison set against `dataset`.
///
/// More than [`MAX_CHOSEN`] keys is rejected. Unknown keys are skipped and
/// repeated keys keep their first position, so the result may hold fewer cars
/// than requested.
pub fn resolve_chosen(keys: &[CarKey], dataset: &Dataset) -> DashResult<ChosenKeys> {
    if keys.len() > MAX_CHOSEN {
        return Err(DashError::InvalidSelection(format!(
            "at most {MAX_CHOSEN} cars can be compared, got {}",
            keys.len()
        )));
    }

    let mut chosen = ChosenKeys::new();
    for key in keys {
        if !dataset.contains(key) {
            warn!(key = %key, "ignoring unknown car in selection");
            continue;
        }
        if !chosen.contains(key) {
            chosen.push(key.clone());
        }
    }
    Ok(chosen)
}

/// Startup selection: configured defaults when any of them resolve,
/// otherwise the first [`MAX_CHOSEN`] cars of the dataset.
#[must_use]
pub fn initial_chosen(defaults: &[CarKey], dataset: &Dataset) -> ChosenKeys {
    let mut named = ChosenKeys::new();
    for key in defaults.iter().filter(|key| dataset.contains(key)) {
        if named.len() == MAX_CHOSEN {
            break;
        }
        if !named.contains(key) {
            named.push(key.clone());
        }
    }
    if !named.is_empty() {
        return named;
    }
    dataset.keys().take(MAX_CHOSEN).cloned().collect()
}

/// Draws up to [`MAX_CHOSEN`] distinct cars uniformly without replacement.
///
/// Smaller datasets yield every car, in random order.
pub fn pick_random_keys<G: Rng + ?Sized>(dataset: &Dataset, rng: &mut G) -> ChosenKeys {
    let keys: Vec<&CarKey> = dataset.keys().collect();
    keys.choose_multiple(rng, MAX_CHOSEN)
        .map(|key| (*key).clone())
        .collect()
}

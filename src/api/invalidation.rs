use serde::{Deserialize, Serialize};

use crate::render::Surface;

/// Redraw classes a dashboard mutation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewTopic {
    /// Ribbon lanes and markers.
    Ribbon,
    /// Gauge cards and needle targets.
    Gauges,
    /// Scatter point opacity and size only; layout is reused.
    ScatterStyle,
    /// Scatter sampling, scales, axes and points.
    ScatterLayout,
}

impl ViewTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Ribbon => 1 << 0,
            Self::Gauges => 1 << 1,
            Self::ScatterStyle => 1 << 2,
            Self::ScatterLayout => 1 << 3,
        }
    }

    #[must_use]
    pub const fn surface(self) -> Surface {
        match self {
            Self::Ribbon => Surface::Ribbon,
            Self::Gauges => Surface::Gauges,
            Self::ScatterStyle | Self::ScatterLayout => Surface::Scatter,
        }
    }
}

/// Bitmask of [`ViewTopic`]s redrawn by one dashboard call.
///
/// Every mutator returns one of these, which makes the update contract of
/// each control observable to hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewUpdate {
    bits: u8,
}

impl ViewUpdate {
    const ORDER: [ViewTopic; 4] = [
        ViewTopic::Ribbon,
        ViewTopic::Gauges,
        ViewTopic::ScatterLayout,
        ViewTopic::ScatterStyle,
    ];

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_topic(topic: ViewTopic) -> Self {
        Self { bits: topic.bit() }
    }

    /// The pair redrawn whenever the comparison set changes.
    #[must_use]
    pub const fn comparison() -> Self {
        Self::from_topic(ViewTopic::Ribbon).with_topic(ViewTopic::Gauges)
    }

    #[must_use]
    pub const fn with_topic(self, topic: ViewTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, topic: ViewTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Topics in the order the dashboard draws them.
    #[must_use]
    pub fn topics(self) -> Vec<ViewTopic> {
        Self::ORDER
            .into_iter()
            .filter(|topic| self.contains(*topic))
            .collect()
    }
}

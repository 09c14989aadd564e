use crate::animation::{NeedleKey, NeedleTransitions};
use crate::core::metric::fmt_plain;
use crate::core::{
    BaselineMode, Car, Dataset, MetricKey, ReferenceSet, Viewport, fmt_price,
    normalize_value,
};
use crate::error::DashResult;
use crate::render::{ArcPrimitive, Color, RenderFrame, Surface, TextHAlign, TextPrimitive};

/// Half-sweep of every gauge ring, in radians either side of twelve o'clock.
pub const GAUGE_SWEEP: f64 = 2.1;

const CARD_WIDTH: f64 = 220.0;
const GAUGE_CENTER_X: f64 = 110.0;
const GAUGE_CENTER_Y: f64 = 100.0;
const RING_INNER_RADIUS: f64 = 40.0;
const RING_SPACING: f64 = 14.0;
const RING_THICKNESS: f64 = 10.0;
const TEXT_TOP: f64 = 200.0;
const TEXT_LINE_HEIGHT: f64 = 18.0;
const RING_BACKGROUND: Color = Color::from_rgb8(0xe9, 0xec, 0xef);
const TEXT_COLOR: Color = Color::from_rgb8(0x1d, 0x1d, 0x1f);
const NOT_AVAILABLE: &str = "N/A";

/// Needle color per gauge ring.
#[must_use]
pub fn needle_color(metric: MetricKey) -> Color {
    match metric {
        MetricKey::Horsepower => Color::from_rgb8(0xe6, 0x39, 0x46),
        MetricKey::Acceleration => Color::from_rgb8(0x45, 0x7b, 0x9d),
        MetricKey::TopSpeed => Color::from_rgb8(0xfc, 0xa3, 0x11),
        _ => Color::from_rgb8(0x6c, 0x75, 0x7d),
    }
}

/// Maps a display value in `[0, 1]` onto the gauge sweep `[-2.1, 2.1]`.
#[must_use]
pub fn display_value_to_angle(display_value: f64) -> f64 {
    let value = if display_value.is_finite() {
        display_value
    } else {
        0.0
    };
    GAUGE_SWEEP * (-1.0 + 2.0 * value)
}

/// One needle's target for the current selection and baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct NeedleTarget {
    pub key: NeedleKey,
    pub display_value: f64,
    pub angle: f64,
}

/// Gauge panel adapter: one card of concentric rings per compared car.
#[derive(Debug, Clone)]
pub struct GaugeView {
    viewport: Viewport,
}

impl GaugeView {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Recomputes every needle target from scratch.
    #[must_use]
    pub fn targets(cars: &[&Car], dataset: &Dataset, mode: BaselineMode) -> Vec<NeedleTarget> {
        let reference = ReferenceSet::new(cars, dataset);
        let mut targets = Vec::with_capacity(cars.len() * MetricKey::GAUGE_METRICS.len());
        for car in cars {
            for metric in MetricKey::GAUGE_METRICS {
                let display_value = normalize_value(metric, metric.value(car), reference, mode);
                targets.push(NeedleTarget {
                    key: NeedleKey::new(car.key(), metric),
                    display_value,
                    angle: display_value_to_angle(display_value),
                });
            }
        }
        targets
    }

    /// Builds the panel with needles at their interpolated angles at `now_ms`.
    pub fn build_frame(
        &self,
        cars: &[&Car],
        needles: &NeedleTransitions,
        now_ms: f64,
    ) -> DashResult<RenderFrame> {
        let mut frame = RenderFrame::new(Surface::Gauges, self.viewport);
        for (index, car) in cars.iter().enumerate() {
            let left = index as f64 * CARD_WIDTH;
            let cx = left + GAUGE_CENTER_X;
            let cy = GAUGE_CENTER_Y;

            for (ring, metric) in MetricKey::GAUGE_METRICS.into_iter().enumerate() {
                let inner = RING_INNER_RADIUS + ring as f64 * RING_SPACING;
                let outer = inner + RING_THICKNESS;
                let angle = needles.angle(&NeedleKey::new(car.key(), metric), now_ms);
                frame = frame
                    .with_arc(ArcPrimitive::new(
                        cx,
                        cy,
                        inner,
                        outer,
                        -GAUGE_SWEEP,
                        GAUGE_SWEEP,
                        RING_BACKGROUND,
                    ))
                    .with_arc(ArcPrimitive::new(
                        cx,
                        cy,
                        inner,
                        outer,
                        -GAUGE_SWEEP,
                        angle,
                        needle_color(metric),
                    ));
            }

            for (line, text) in card_lines(car).into_iter().enumerate() {
                let font_size = if line == 0 { 14.0 } else { 12.0 };
                frame = frame.with_text(TextPrimitive::new(
                    text,
                    left + 10.0,
                    TEXT_TOP + line as f64 * TEXT_LINE_HEIGHT,
                    font_size,
                    TEXT_COLOR,
                    TextHAlign::Left,
                ));
            }
        }
        Ok(frame)
    }
}

fn card_lines(car: &Car) -> [String; 5] {
    let or_na = |value: Option<f64>| value.map_or_else(|| NOT_AVAILABLE.to_owned(), fmt_plain);
    [
        car.label(),
        format!("Horsepower: {} HP", or_na(car.hp)),
        format!("Top Speed: {} km/h", or_na(car.tops)),
        format!("0-100 km/h: {}s", or_na(car.accel)),
        format!("Price: {}", fmt_price(car.price)),
    ]
}

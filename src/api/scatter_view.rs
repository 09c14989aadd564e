use std::cmp::Reverse;
use std::f64::consts::FRAC_PI_2;

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::{Car, CarKey, Dataset, LinearScale, MetricKey, Viewport, extent_of};
use crate::error::DashResult;
use crate::render::{
    BrandPalette, CirclePrimitive, Color, LinePrimitive, RenderFrame, Surface, TextHAlign,
    TextPrimitive,
};

use super::{SeatFilter, SelectionState};

const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 80.0;
const TICK_COUNT: usize = 8;
const NICE_COUNT: usize = 10;
const TICK_LENGTH: f64 = 6.0;
const AXIS_COLOR: Color = Color::from_rgb8(0x88, 0x88, 0x88);
const LABEL_COLOR: Color = Color::from_rgb8(0xcc, 0xcc, 0xcc);
const POINT_OUTLINE: Color = Color::rgb(1.0, 1.0, 1.0);

pub const NO_DATA_MESSAGE: &str = "No valid data to display";

/// Radius and opacity of a point under the current seat filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub radius: f64,
    pub opacity: f64,
}

impl PointStyle {
    pub const MATCHING: Self = Self {
        radius: 6.0,
        opacity: 0.7,
    };
    pub const DIMMED: Self = Self {
        radius: 4.0,
        opacity: 0.05,
    };

    /// Non-matching points are dimmed and shrunk, never removed.
    #[must_use]
    pub fn for_seats(filter: &SeatFilter, seats: &str) -> Self {
        if filter.matches(seats) {
            Self::MATCHING
        } else {
            Self::DIMMED
        }
    }
}

/// Cars with both axis metrics present, reduced to at most `max_count`.
///
/// Over the cap, the highest `performance_score` cars win; ties keep source
/// order.
#[must_use]
pub fn sample_scatter_points<'a>(
    dataset: &'a Dataset,
    x_axis: MetricKey,
    y_axis: MetricKey,
    max_count: usize,
) -> Vec<&'a Car> {
    let mut valid: Vec<&Car> = dataset
        .cars()
        .filter(|car| x_axis.value(car).is_some() && y_axis.value(car).is_some())
        .collect();

    if valid.len() > max_count {
        valid.sort_by_key(|car| Reverse(OrderedFloat(car.performance_score)));
        valid.truncate(max_count);
        debug!(
            kept = max_count,
            total = dataset.len(),
            "sampled scatter points by performance score"
        );
    }
    valid
}

/// One laid-out scatter point; style is applied separately.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPoint {
    pub key: CarKey,
    pub seats: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// Everything of a scatter frame that does not depend on the seat filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayout {
    pub viewport: Viewport,
    pub x_scale: Option<LinearScale>,
    pub y_scale: Option<LinearScale>,
    pub points: Vec<PlacedPoint>,
    lines: Vec<LinePrimitive>,
    texts: Vec<TextPrimitive>,
}

/// Scatter plot adapter.
///
/// A full relayout samples points and rebuilds scales and axes; a restyle
/// only reapplies [`PointStyle`] to the cached layout.
#[derive(Debug, Clone)]
pub struct ScatterView {
    viewport: Viewport,
    palette: BrandPalette,
    layout: Option<ScatterLayout>,
}

impl ScatterView {
    #[must_use]
    pub fn new(viewport: Viewport, dataset: &Dataset) -> Self {
        Self {
            viewport,
            palette: BrandPalette::new(dataset.brands()),
            layout: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn layout(&self) -> Option<&ScatterLayout> {
        self.layout.as_ref()
    }

    /// Records a container size change. Returns `false` when nothing should be
    /// redrawn: the size is unchanged or the container has zero area.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        if !viewport.is_valid() {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "scatter container has zero area, skipping redraw"
            );
            self.layout = None;
            return false;
        }
        true
    }

    /// Samples, scales and places every point. Returns `false` when the
    /// surface is too small to draw on.
    pub fn relayout(&mut self, dataset: &Dataset, selection: &SelectionState) -> DashResult<bool> {
        let plot_width = f64::from(self.viewport.width) - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = f64::from(self.viewport.height) - MARGIN_TOP - MARGIN_BOTTOM;
        if !self.viewport.is_valid() || plot_width <= 0.0 || plot_height <= 0.0 {
            trace!(
                width = self.viewport.width,
                height = self.viewport.height,
                "scatter plot area is empty"
            );
            self.layout = None;
            return Ok(false);
        }

        let x_axis = selection.x_axis();
        let y_axis = selection.y_axis();
        let cars = sample_scatter_points(dataset, x_axis, y_axis, selection.max_display_count());

        let mut layout = ScatterLayout {
            viewport: self.viewport,
            x_scale: None,
            y_scale: None,
            points: Vec::with_capacity(cars.len()),
            lines: Vec::new(),
            texts: Vec::new(),
        };

        if cars.is_empty() {
            layout.texts.push(TextPrimitive::new(
                NO_DATA_MESSAGE,
                MARGIN_LEFT + plot_width / 2.0,
                MARGIN_TOP + plot_height / 2.0,
                14.0,
                LABEL_COLOR,
                TextHAlign::Center,
            ));
            self.layout = Some(layout);
            return Ok(true);
        }

        let x_scale = padded_scale(&cars, x_axis, (MARGIN_LEFT, MARGIN_LEFT + plot_width))?;
        let y_scale = padded_scale(&cars, y_axis, (MARGIN_TOP + plot_height, MARGIN_TOP))?;

        for car in &cars {
            let (Some(x), Some(y)) = (x_axis.value(car), y_axis.value(car)) else {
                continue;
            };
            layout.points.push(PlacedPoint {
                key: car.key(),
                seats: car.seats.clone(),
                x: x_scale.map(x),
                y: y_scale.map(y),
                color: self.palette.color_for(&car.brand),
            });
        }

        push_x_axis(&mut layout, x_scale, x_axis, MARGIN_TOP + plot_height, plot_width);
        push_y_axis(&mut layout, y_scale, y_axis, plot_height);
        layout.texts.push(TextPrimitive::new(
            format!("Showing {} of {} cars", layout.points.len(), dataset.len()),
            MARGIN_LEFT + plot_width - 10.0,
            MARGIN_TOP + 20.0,
            12.0,
            LABEL_COLOR,
            TextHAlign::Right,
        ));

        layout.x_scale = Some(x_scale);
        layout.y_scale = Some(y_scale);
        self.layout = Some(layout);
        Ok(true)
    }

    /// Frame for the cached layout styled by `filter`; `None` before the
    /// first successful layout.
    #[must_use]
    pub fn build_frame(&self, filter: &SeatFilter) -> Option<RenderFrame> {
        let layout = self.layout.as_ref()?;
        let mut frame = RenderFrame::new(Surface::Scatter, layout.viewport);
        frame.lines = layout.lines.clone();
        frame.texts = layout.texts.clone();
        frame.circles = layout
            .points
            .iter()
            .map(|point| {
                let style = PointStyle::for_seats(filter, &point.seats);
                CirclePrimitive::new(
                    point.x,
                    point.y,
                    style.radius,
                    point.color.with_alpha(style.opacity),
                )
                .with_stroke(POINT_OUTLINE.with_alpha(style.opacity), 1.0)
            })
            .collect();
        Some(frame)
    }
}

/// Linear scale over `[min * 0.9, max * 1.1]` rounded out to nice ticks.
fn padded_scale(cars: &[&Car], metric: MetricKey, range: (f64, f64)) -> DashResult<LinearScale> {
    let (min, max) = extent_of(cars.iter().copied(), metric).unwrap_or((0.0, 1.0));
    Ok(LinearScale::new((min * 0.9, max * 1.1), range)?.nice(NICE_COUNT))
}

fn push_x_axis(
    layout: &mut ScatterLayout,
    scale: LinearScale,
    metric: MetricKey,
    baseline_y: f64,
    plot_width: f64,
) {
    layout.lines.push(LinePrimitive::new(
        MARGIN_LEFT,
        baseline_y,
        MARGIN_LEFT + plot_width,
        baseline_y,
        1.0,
        AXIS_COLOR,
    ));
    for tick in scale.ticks(TICK_COUNT) {
        let x = scale.map(tick);
        layout.lines.push(LinePrimitive::new(
            x,
            baseline_y,
            x,
            baseline_y + TICK_LENGTH,
            1.0,
            AXIS_COLOR,
        ));
        layout.texts.push(TextPrimitive::new(
            metric.format_value(tick),
            x,
            baseline_y + TICK_LENGTH + 12.0,
            10.0,
            LABEL_COLOR,
            TextHAlign::Center,
        ));
    }
    layout.texts.push(TextPrimitive::new(
        metric.spec().axis_label,
        MARGIN_LEFT + plot_width / 2.0,
        baseline_y + 45.0,
        12.0,
        LABEL_COLOR,
        TextHAlign::Center,
    ));
}

fn push_y_axis(layout: &mut ScatterLayout, scale: LinearScale, metric: MetricKey, plot_height: f64) {
    layout.lines.push(LinePrimitive::new(
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        MARGIN_TOP + plot_height,
        1.0,
        AXIS_COLOR,
    ));
    for tick in scale.ticks(TICK_COUNT) {
        let y = scale.map(tick);
        layout.lines.push(LinePrimitive::new(
            MARGIN_LEFT - TICK_LENGTH,
            y,
            MARGIN_LEFT,
            y,
            1.0,
            AXIS_COLOR,
        ));
        layout.texts.push(TextPrimitive::new(
            metric.format_value(tick),
            MARGIN_LEFT - TICK_LENGTH - 3.0,
            y,
            10.0,
            LABEL_COLOR,
            TextHAlign::Right,
        ));
    }
    layout.texts.push(
        TextPrimitive::new(
            metric.spec().axis_label,
            MARGIN_LEFT - 55.0,
            MARGIN_TOP + plot_height / 2.0,
            12.0,
            LABEL_COLOR,
            TextHAlign::Center,
        )
        .with_rotation(-FRAC_PI_2),
    );
}

use crate::animation::{AnimationScheduler, TrackPath};
use crate::core::{Dataset, LinearScale, MetricKey, Point, Viewport};
use crate::core::metric::{MISSING, fmt_plain};
use crate::error::DashResult;
use crate::render::{
    BrandPalette, CirclePrimitive, Color, DashPattern, PathPrimitive, RenderFrame, Surface,
    TextHAlign, TextPrimitive,
};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_TOP: f64 = 40.0;
const TRACK_OUTLINE: Color = Color::from_rgb8(0xe0, 0xe0, 0xe0);
const TRACK_SURFACE: Color = Color::from_rgb8(0xf0, 0xf0, 0xf0);
const MARKER_OUTLINE: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const LABEL_COLOR: Color = Color::from_rgb8(0x1d, 0x1d, 0x1f);
/// Dash length that moves in lockstep with the marker.
const REFERENCE_DASH: f64 = 36.0;

/// Ribbon track adapter: one dashed lane and one marker per compared car.
///
/// Style scales are fixed at construction since the dataset never changes.
#[derive(Debug, Clone)]
pub struct RibbonView {
    viewport: Viewport,
    track: TrackPath,
    stroke_width: LinearScale,
    glow: LinearScale,
    dash: LinearScale,
    palette: BrandPalette,
}

impl RibbonView {
    pub fn new(viewport: Viewport, dataset: &Dataset, track: TrackPath) -> DashResult<Self> {
        Ok(Self {
            viewport,
            track,
            stroke_width: LinearScale::from_extent(
                dataset.extent(MetricKey::Horsepower),
                (6.0, 22.0),
            )?,
            glow: LinearScale::from_extent(dataset.extent(MetricKey::TopSpeed), (0.35, 0.95))?,
            dash: LinearScale::from_extent(dataset.extent(MetricKey::Acceleration), (36.0, 8.0))?,
            palette: BrandPalette::new(dataset.brands()),
        })
    }

    #[must_use]
    pub fn track(&self) -> &TrackPath {
        &self.track
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Marker position for a phase offset, in surface pixels.
    #[must_use]
    pub fn marker_position(&self, phase_offset: f64) -> Point {
        self.track
            .point_at_length(phase_offset)
            .translated(MARGIN_LEFT, MARGIN_TOP)
    }

    /// Builds the frame for the scheduler's current phases.
    pub fn build_frame(
        &self,
        scheduler: &AnimationScheduler,
        dataset: &Dataset,
    ) -> DashResult<RenderFrame> {
        let outline = self.track_outline();
        let mut frame = RenderFrame::new(Surface::Ribbon, self.viewport)
            .with_path(PathPrimitive::new(outline.clone(), true, 30.0, TRACK_OUTLINE))
            .with_path(
                PathPrimitive::new(outline.clone(), true, 18.0, TRACK_SURFACE)
                    .with_dash(DashPattern::new(10.0, 18.0)),
            );

        for state in scheduler.states() {
            let Some(car) = dataset.get(&state.key) else {
                continue;
            };
            let brand_color = self.palette.color_for(&car.brand);

            let dash_length = self.dash.map_clamped(car.accel.unwrap_or(0.0));
            let lane = PathPrimitive::new(
                outline.clone(),
                true,
                self.stroke_width.map_clamped(car.hp.unwrap_or(0.0)),
                brand_color.with_alpha(self.glow.map_clamped(car.tops.unwrap_or(0.0))),
            )
            .with_dash(
                DashPattern::new(dash_length, dash_length)
                    .with_offset(-state.phase_offset * (dash_length / REFERENCE_DASH)),
            );
            frame = frame.with_path(lane);

            let position = self.marker_position(state.phase_offset);
            frame = frame
                .with_circle(
                    CirclePrimitive::new(position.x, position.y, 7.0, brand_color)
                        .with_stroke(MARKER_OUTLINE, 2.0),
                )
                .with_text(TextPrimitive::new(
                    format!("{} hp", car.hp.map_or_else(|| MISSING.to_owned(), fmt_plain)),
                    position.x,
                    position.y - 12.0,
                    11.0,
                    LABEL_COLOR,
                    TextHAlign::Center,
                ));
        }

        Ok(frame)
    }

    fn track_outline(&self) -> Vec<Point> {
        self.track
            .points()
            .iter()
            .map(|point| point.translated(MARGIN_LEFT, MARGIN_TOP))
            .collect()
    }
}

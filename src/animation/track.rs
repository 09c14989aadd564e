use crate::core::Point;
use crate::error::{DashError, DashResult};

/// Control points of one cubic Bézier segment; the start point is the end of
/// the previous segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicSegment {
    #[must_use]
    pub const fn new(control1: Point, control2: Point, end: Point) -> Self {
        Self {
            control1,
            control2,
            end,
        }
    }

    fn point_at(self, start: Point, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

/// Closed track with arc-length parameterization.
///
/// The curve is flattened into a polyline once; distance lookups then binary
/// search the cumulative segment lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPath {
    points: Vec<Point>,
    cumulative: Vec<f64>,
    total_length: f64,
}

impl TrackPath {
    pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 64;

    /// Builds a closed loop from `start` through `segments`, closing with a
    /// straight line back to `start`.
    pub fn from_cubic_loop(
        start: Point,
        segments: &[CubicSegment],
        samples_per_segment: usize,
    ) -> DashResult<Self> {
        if segments.is_empty() {
            return Err(DashError::InvalidData(
                "track needs at least one curve segment".to_owned(),
            ));
        }
        let track = Self::flatten(start, segments, samples_per_segment);
        if !track.total_length.is_finite() || track.total_length <= 0.0 {
            return Err(DashError::InvalidData(
                "track length must be finite and > 0".to_owned(),
            ));
        }
        Ok(track)
    }

    /// The kidney-shaped race loop drawn by the ribbon view, in a
    /// 1040x600 plot area.
    #[must_use]
    pub fn race_track() -> Self {
        Self::flatten(
            Point::new(300.0, 550.0),
            &[
                CubicSegment::new(
                    Point::new(100.0, 550.0),
                    Point::new(50.0, 350.0),
                    Point::new(200.0, 250.0),
                ),
                CubicSegment::new(
                    Point::new(350.0, 150.0),
                    Point::new(650.0, 150.0),
                    Point::new(800.0, 250.0),
                ),
                CubicSegment::new(
                    Point::new(950.0, 350.0),
                    Point::new(900.0, 550.0),
                    Point::new(700.0, 550.0),
                ),
            ],
            Self::DEFAULT_SAMPLES_PER_SEGMENT,
        )
    }

    fn flatten(start: Point, segments: &[CubicSegment], samples_per_segment: usize) -> Self {
        let samples = samples_per_segment.max(1);
        let mut points = Vec::with_capacity(segments.len() * samples + 2);
        points.push(start);

        let mut segment_start = start;
        for segment in segments {
            for step in 1..=samples {
                let t = step as f64 / samples as f64;
                points.push(segment.point_at(segment_start, t));
            }
            segment_start = segment.end;
        }
        points.push(start);

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in points.windows(2) {
            total += pair[0].distance_to(pair[1]);
            cumulative.push(total);
        }

        Self {
            points,
            cumulative,
            total_length: total,
        }
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Flattened outline; the last point repeats the first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Folds any distance into `[0, total_length)`.
    #[must_use]
    pub fn wrap(&self, distance: f64) -> f64 {
        if !distance.is_finite() || self.total_length <= 0.0 {
            return 0.0;
        }
        let wrapped = distance.rem_euclid(self.total_length);
        // rem_euclid can round up to the modulus itself for tiny negatives.
        if wrapped >= self.total_length { 0.0 } else { wrapped }
    }

    /// Point reached after travelling `distance` along the loop.
    #[must_use]
    pub fn point_at_length(&self, distance: f64) -> Point {
        let distance = self.wrap(distance);
        let upper = self
            .cumulative
            .partition_point(|length| *length <= distance)
            .clamp(1, self.points.len() - 1);
        let lower = upper - 1;

        let segment_length = self.cumulative[upper] - self.cumulative[lower];
        if segment_length <= 0.0 {
            return self.points[lower];
        }
        let t = (distance - self.cumulative[lower]) / segment_length;
        self.points[lower].lerp(self.points[upper], t)
    }
}

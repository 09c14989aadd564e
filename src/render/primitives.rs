use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{DashError, DashResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels, e.g. `Color::from_rgb8(0xe6, 0x39, 0x46)`.
    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> DashResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DashError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn require_finite(values: &[f64], what: &str) -> DashResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(DashError::InvalidData(format!("{what} must be finite")))
    }
}

fn require_positive(value: f64, what: &str) -> DashResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DashError::InvalidData(format!("{what} must be finite and > 0")))
    }
}

/// Draw command for one straight segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> DashResult<()> {
        require_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        require_positive(self.stroke_width, "line stroke width")?;
        self.color.validate()
    }
}

/// Filled circle with an optional outline; scatter points and ribbon markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill,
            stroke: None,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Color, stroke_width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(self) -> DashResult<()> {
        require_finite(&[self.cx, self.cy], "circle center")?;
        require_positive(self.radius, "circle radius")?;
        self.fill.validate()?;
        if let Some(stroke) = self.stroke {
            require_positive(self.stroke_width, "circle stroke width")?;
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Annular sector around `(cx, cy)`.
///
/// Angles are radians measured clockwise from twelve o'clock, so `0` points
/// straight up and `±2.1` sits just below the horizontal on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Color,
}

impl ArcPrimitive {
    #[must_use]
    pub const fn new(
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
    ) -> Self {
        Self {
            cx,
            cy,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill,
        }
    }

    pub fn validate(self) -> DashResult<()> {
        require_finite(
            &[self.cx, self.cy, self.start_angle, self.end_angle],
            "arc center and angles",
        )?;
        if !self.inner_radius.is_finite()
            || self.inner_radius < 0.0
            || !self.outer_radius.is_finite()
            || self.outer_radius <= self.inner_radius
        {
            return Err(DashError::InvalidData(
                "arc radii must be finite with 0 <= inner < outer".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Stroke dash pattern; `offset` shifts the pattern along the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
    pub offset: f64,
}

impl DashPattern {
    #[must_use]
    pub const fn new(on: f64, off: f64) -> Self {
        Self {
            on,
            off,
            offset: 0.0,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    fn validate(self) -> DashResult<()> {
        require_positive(self.on, "dash length")?;
        require_positive(self.off, "dash gap")?;
        require_finite(&[self.offset], "dash offset")
    }
}

/// Stroked polyline, optionally closed back to its first point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub points: Vec<Point>,
    pub closed: bool,
    pub stroke_width: f64,
    pub color: Color,
    pub dash: Option<DashPattern>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(points: Vec<Point>, closed: bool, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            closed,
            stroke_width,
            color,
            dash: None,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.points.len() < 2 {
            return Err(DashError::InvalidData(
                "path needs at least two points".to_owned(),
            ));
        }
        for point in &self.points {
            require_finite(&[point.x, point.y], "path coordinates")?;
        }
        require_positive(self.stroke_width, "path stroke width")?;
        if let Some(dash) = self.dash {
            dash.validate()?;
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Clockwise rotation around `(x, y)` in radians.
    pub rotation: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.text.is_empty() {
            return Err(DashError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        require_finite(&[self.x, self.y, self.rotation], "text placement")?;
        require_positive(self.font_size_px, "font size")?;
        self.color.validate()
    }
}

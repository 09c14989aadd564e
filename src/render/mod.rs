mod frame;
mod null_renderer;
mod palette;
mod primitives;

pub use frame::{RenderFrame, Surface};
pub use null_renderer::NullRenderer;
pub use palette::{BrandPalette, CATEGORY10};
pub use primitives::{
    ArcPrimitive, CirclePrimitive, Color, DashPattern, LinePrimitive, PathPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::DashResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from dashboard state and animation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()>;
}

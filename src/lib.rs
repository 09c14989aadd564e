//! carviz: headless core of a car specification dashboard.
//!
//! Raw CSV rows are normalized into [`core::Car`]s with derived value metrics,
//! then drive three views from one selection: an animated ribbon track, a
//! gauge comparison panel and a scatter plot. Views emit declarative
//! [`render::RenderFrame`]s; drawing is left to a [`render::Renderer`].

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use error::{DashError, DashResult};

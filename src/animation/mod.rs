//! Time-driven state: ribbon markers circling the track and gauge needle
//! sweeps. Nothing in here reads a clock; hosts inject timestamps.

pub mod scheduler;
pub mod track;
pub mod transition;

pub use scheduler::{AnimationConfig, AnimationScheduler, RibbonState, SpeedMapping};
pub use track::{CubicSegment, TrackPath};
pub use transition::{
    NeedleConfig, NeedleKey, NeedleTransition, NeedleTransitions, ease_cubic_out,
};

//! Spatial heatmap rendering.
//!
//! [`overlay`] holds the pure composition stages; [`renderer`] wraps them
//! with artifact lifecycle (purge, random naming); [`colormap`] provides
//! the fixed color lookup table.

pub mod colormap;
pub mod overlay;
pub mod renderer;

pub use colormap::turbo_lut;
pub use overlay::{
    accumulate_field, render_overlay, RenderConfig, ValueRange, CHANNEL_RANGE, SIGNAL_RANGE,
};
pub use renderer::{HeatmapArtifact, HeatmapRenderer};

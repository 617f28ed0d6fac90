//! # wifi-surveyor-heatmap
//!
//! Spatial sample storage and heatmap rendering for the wifi-surveyor
//! system.
//!
//! - **Store**: [`JsonSampleStore`] persists per-map, per-category sample
//!   series as JSON documents; [`MemorySampleStore`] backs tests.
//! - **Renderer**: [`HeatmapRenderer`] turns one series' samples plus a
//!   floor-plan image into a color-graded overlay: additive disks, a
//!   wide Gaussian blur, the Turbo color table, and a 60/40 alpha blend.
//! - **Maps**: [`MapLibrary`] resolves map names to base images and
//!   deletes maps together with their datasets.
//!
//! The write path (store) and the read path (renderer) are independent;
//! they meet only at the [`wifi_surveyor_core::SampleStore`] abstraction
//! and the [`Sample`](wifi_surveyor_core::Sample) shape.

#![forbid(unsafe_code)]

pub mod maps;
pub mod render;
pub mod store;

// Re-export key types at the crate root for convenience.
pub use maps::{MapEntry, MapLibrary, MAP_EXTENSIONS};
pub use render::{
    accumulate_field, render_overlay, turbo_lut, HeatmapArtifact, HeatmapRenderer, RenderConfig,
    ValueRange, CHANNEL_RANGE, SIGNAL_RANGE,
};
pub use store::{JsonSampleStore, MemorySampleStore};

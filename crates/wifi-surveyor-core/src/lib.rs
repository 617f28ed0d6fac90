//! # wifi-surveyor-core
//!
//! Shared kernel for the wifi-surveyor site-survey system.
//!
//! This crate provides the foundational building blocks used by the scan
//! and heatmap crates:
//!
//! - **Domain types**: [`Band`], [`BssidId`], [`NetworkObservation`],
//!   [`Sample`], [`Category`], and the [`signal_key`]/[`channel_key`]
//!   builders that name sample series.
//!
//! - **Error types**: the [`error`] module's hierarchy, with
//!   [`SurveyError`] wrapping the per-subsystem [`ScanError`],
//!   [`StoreError`], and [`RenderError`].
//!
//! - **Traits**: [`SampleStore`], the persistence abstraction that lets
//!   tests and embedders swap the file-backed store for an in-memory one.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root.
pub use error::{RenderError, ScanError, StoreError, SurveyError, SurveyResult};
pub use traits::SampleStore;
pub use types::{
    channel_key, signal_key, Band, BssidId, Category, ChannelTally, Dataset, NetworkObservation,
    Sample,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

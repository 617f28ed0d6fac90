//! Core trait definitions for the wifi-surveyor system.
//!
//! # Traits
//!
//! - [`SampleStore`]: Persist and retrieve geotagged sample series per map
//!
//! # Design Philosophy
//!
//! The store is abstract so that the renderer and the scan pipeline never
//! see a filesystem: a test or an embedding application can swap in an
//! in-memory backing without touching either. Implementations decide the
//! serialization; the contract is on the logical shapes only.

use crate::error::StoreError;
use crate::types::{Category, ChannelTally, Dataset, NetworkObservation, Sample};

/// Persistent, per-map storage of geotagged sample series.
///
/// Each map owns two independent datasets (see [`Category`]): signal series
/// keyed by `"{ssid} [{band}]"` and congestion series keyed by
/// `"Channel_{n}"`. Samples are append-only within a series; the only bulk
/// mutation is [`reset`](Self::reset), which clears both datasets at once.
///
/// Implementations must treat unreadable or corrupt existing data as an
/// empty dataset rather than an error: losing unreadable prior data is
/// preferred over blocking the user mid-survey.
pub trait SampleStore: Send + Sync {
    /// Append one sample per reduced network observation at `(x, y)`.
    ///
    /// Keys are built with [`crate::types::signal_key`]; the sample value
    /// is the observation's `signal_dbm`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the updated dataset cannot be written
    /// back.
    fn append_signal(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        networks: &[NetworkObservation],
    ) -> Result<(), StoreError>;

    /// Append one sample per tallied channel at `(x, y)`.
    ///
    /// Keys are built with [`crate::types::channel_key`]; the sample value
    /// is the access-point count for that channel.
    ///
    /// # Errors
    ///
    /// Returns an error only when the updated dataset cannot be written
    /// back.
    fn append_channels(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        channels: &ChannelTally,
    ) -> Result<(), StoreError>;

    /// Clear both the signal and the channel dataset for a map.
    ///
    /// Used before a fresh scanning session and when the map is deleted.
    ///
    /// # Errors
    ///
    /// Returns an error when existing data could not be removed.
    fn reset(&self, map_name: &str) -> Result<(), StoreError>;

    /// All sample keys for one map and category, in stable order.
    ///
    /// Returns an empty list when the map has no data.
    fn keys(&self, map_name: &str, category: Category) -> Vec<String>;

    /// The ordered sample list for one key, empty if the key is absent.
    fn series(&self, map_name: &str, category: Category, key: &str) -> Vec<Sample>;

    /// The whole dataset for one map and category.
    ///
    /// This is the shape an embedding layer serializes for export.
    fn dataset(&self, map_name: &str, category: Category) -> Dataset;
}

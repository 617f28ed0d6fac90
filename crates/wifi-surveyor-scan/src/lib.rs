//! # wifi-surveyor-scan
//!
//! Scan acquisition and normalization for the wifi-surveyor system.
//!
//! This crate turns one OS-specific scan command invocation into uniform
//! network records:
//!
//! - **Config**: [`ScanConfig`] -- platform tag and wireless interface,
//!   resolved once at startup and passed in explicitly.
//! - **Port**: [`ScanSource`] -- trait abstracting the platform scan
//!   backend, so tests replay captured fixture text.
//! - **Adapters**: [`IwScanner`] (Unix, bounded retry) and
//!   [`NetshScanner`] (Windows, fixed settle delay).
//! - **Parsers**: [`parse_iw_scan_output`] and [`parse_netsh_output`],
//!   pure and failure-free; malformed blocks are dropped, never raised.
//! - **Pipeline**: [`ScanPipeline`] -- adapter -> parser ->
//!   { [`reduce_best_networks`], channel counter } per scan cycle.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod config;
pub mod pipeline;
pub mod port;

// Re-export key types at the crate root for convenience.
pub use adapter::{
    count_channels_iw, count_channels_netsh, parse_iw_scan_output, parse_netsh_output, IwScanner,
    NetshScanner, HIDDEN_SSID,
};
pub use config::{discover_interface, Platform, ScanConfig};
pub use pipeline::{reduce_best_networks, ScanPipeline};
pub use port::ScanSource;

//! Explicit scan configuration.
//!
//! The platform tag and the wireless interface are detected once at startup
//! and carried in a [`ScanConfig`] value that is passed into the pipeline
//! factory. Nothing here is ambient process state, so tests can construct
//! any configuration and substitute fake adapters freely.

use std::process::Command;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Runtime platform tag selecting the scan backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: `netsh` reads the OS scan cache.
    Windows,
    /// Linux: `iw` triggers and dumps a scan on a wireless interface.
    Linux,
    /// Anything else: scanning degrades to empty results.
    Unsupported,
}

impl Platform {
    /// Detect the platform the process is running on.
    #[must_use]
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            _ => Self::Unsupported,
        }
    }
}

// ---------------------------------------------------------------------------
// ScanConfig
// ---------------------------------------------------------------------------

/// Number of attempts the Unix adapter makes before giving up on a cycle.
pub const SCAN_RETRIES: u32 = 3;

/// Fixed backoff between failed scan attempts.
pub const SCAN_BACKOFF: Duration = Duration::from_secs(3);

/// Fixed delay for the OS scan cache to refresh before reading it.
pub const SCAN_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Everything the scan pipeline needs to know, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// The platform backend to use.
    pub platform: Platform,
    /// Wireless interface name for the Unix backend. `None` disables
    /// scanning entirely (no wireless hardware found).
    pub interface: Option<String>,
    /// Retry budget for the Unix scan command.
    pub retries: u32,
    /// Backoff between retries.
    pub backoff: Duration,
    /// Settle delay before reading the Windows scan cache.
    pub settle_delay: Duration,
}

impl ScanConfig {
    /// Build a configuration for a platform with the default timing knobs.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            interface: None,
            retries: SCAN_RETRIES,
            backoff: SCAN_BACKOFF,
            settle_delay: SCAN_SETTLE_DELAY,
        }
    }

    /// Detect the platform and, on Linux, discover the wireless interface.
    ///
    /// The first wireless interface listed by the kernel is used; when none
    /// exists, `interface` stays `None` and scanning is disabled.
    #[must_use]
    pub fn detect() -> Self {
        let platform = Platform::detect();
        let interface = match platform {
            Platform::Linux => discover_interface(),
            _ => None,
        };
        if platform == Platform::Linux && interface.is_none() {
            tracing::warn!("no wireless interface found; scanning disabled");
        }
        Self {
            interface,
            ..Self::new(platform)
        }
    }

    /// Override the wireless interface.
    #[must_use]
    pub fn with_interface(mut self, iface: impl Into<String>) -> Self {
        self.interface = Some(iface.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Interface discovery
// ---------------------------------------------------------------------------

/// Query the kernel's device table via `iw dev` and return the first
/// wireless interface name, if any.
#[must_use]
pub fn discover_interface() -> Option<String> {
    let output = Command::new("iw").arg("dev").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_interface_listing(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `iw dev` output and pick the first `Interface <name>` entry.
#[must_use]
pub fn parse_interface_listing(output: &str) -> Option<String> {
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Interface") {
            return trimmed.split_whitespace().nth(1).map(str::to_owned);
        }
    }
    None
}

// ===========================================================================
// Tests
// ===========================================================================

//! Core value objects shared by the scan and heatmap bounded contexts.
//!
//! These types form the shared kernel of the survey domain: what a scan
//! observes ([`NetworkObservation`], [`ChannelTally`]) and what the spatial
//! store persists ([`Sample`], keyed by the strings built with
//! [`signal_key`] and [`channel_key`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

// ---------------------------------------------------------------------------
// Band -- Value Object
// ---------------------------------------------------------------------------

/// The WiFi frequency band on which an access point operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 2.4 GHz (2400-2485 MHz)
    Band2_4GHz,
    /// 5 GHz (5150-5825 MHz)
    Band5GHz,
    /// 6 GHz (5925-7125 MHz, Wi-Fi 6E / 7)
    Band6GHz,
    /// Frequency outside any recognised band.
    Unknown,
}

impl Band {
    /// Classify a center frequency in MHz into its band.
    ///
    /// Deterministic range lookup with no failure mode; frequencies outside
    /// the three recognised bands classify as [`Band::Unknown`].
    #[must_use]
    pub fn from_frequency_mhz(freq_mhz: u32) -> Self {
        match freq_mhz {
            2400..=2485 => Self::Band2_4GHz,
            5150..=5825 => Self::Band5GHz,
            5925..=7125 => Self::Band6GHz,
            _ => Self::Unknown,
        }
    }

    /// Parse a band from a localized `netsh` label such as `"5 GHz"`.
    ///
    /// Accepts the French spelling (`"2,4 GHz"` with a decimal comma) and
    /// tolerates the non-breaking spaces `netsh` emits in some locales.
    /// Unrecognised labels map to [`Band::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let v: String = label
            .chars()
            .map(|c| {
                if c == '\u{a0}' || c == '\u{202f}' {
                    ' '
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();
        if v.contains("2.4") || v.contains("2,4") {
            Self::Band2_4GHz
        } else if v.contains('5') && !v.contains('6') {
            Self::Band5GHz
        } else if v.contains('6') {
            Self::Band6GHz
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Band2_4GHz => write!(f, "2.4GHz"),
            Self::Band5GHz => write!(f, "5GHz"),
            Self::Band6GHz => write!(f, "6GHz"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// BssidId -- Value Object
// ---------------------------------------------------------------------------

/// A unique BSSID identifier wrapping a 6-byte IEEE 802.11 MAC address.
///
/// Identifies one physical radio broadcasting a network. Two `BssidId`
/// values are equal when their MAC bytes match.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BssidId(pub [u8; 6]);

impl BssidId {
    /// Parse a `BssidId` from a colon-separated hex string such as
    /// `"aa:bb:cc:dd:ee:ff"`.
    pub fn parse(s: &str) -> Result<Self, ScanError> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(ScanError::MacParseFailed {
                input: s.to_owned(),
            });
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| ScanError::MacParseFailed {
                input: s.to_owned(),
            })?;
        }
        Ok(Self(bytes))
    }

    /// Return the raw 6-byte MAC address.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Debug for BssidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BssidId({self})")
    }
}

impl fmt::Display for BssidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// ---------------------------------------------------------------------------
// NetworkObservation -- Value Object
// ---------------------------------------------------------------------------

/// A single normalized observation of a network from one scan.
///
/// Produced per scan cycle by the platform parsers and consumed by the
/// best-observation reducer; never persisted directly.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkObservation {
    /// The SSID (network name). Hidden networks carry a placeholder.
    pub ssid: String,
    /// The MAC address of the observed access point.
    pub bssid: BssidId,
    /// Received signal strength in dBm (closer to 0 is stronger).
    pub signal_dbm: f64,
    /// The frequency band.
    pub band: Band,
}

/// Per-scan tally of how many access points were observed on each channel.
pub type ChannelTally = BTreeMap<u16, u32>;

// ---------------------------------------------------------------------------
// Sample -- spatial measurement
// ---------------------------------------------------------------------------

/// One geotagged scalar measurement within a series.
///
/// Coordinates are pixel coordinates in the floor-plan image's coordinate
/// space. Samples are immutable once written and append-only within a
/// series; `value` is a signal strength in dBm for signal series and an
/// access-point count for channel series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal pixel coordinate on the floor plan.
    pub x: i32,
    /// Vertical pixel coordinate on the floor plan.
    pub y: i32,
    /// The measured scalar at this position.
    pub value: f64,
}

/// An ordered mapping from sample key to that series' measurements.
///
/// This is the persisted shape of one map's data for one category.
pub type Dataset = BTreeMap<String, Vec<Sample>>;

// ---------------------------------------------------------------------------
// Category -- the two dataset families
// ---------------------------------------------------------------------------

/// The two independent dataset families owned by each map.
///
/// Signal and channel series have different value semantics and are
/// rendered with different normalization ranges, so they are stored and
/// reset as separate datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Signal-strength series keyed by `"{ssid} [{band}]"`.
    Signal,
    /// Congestion series keyed by `"Channel_{n}"`.
    Channel,
}

impl Category {
    /// All categories, in storage order.
    pub const ALL: [Category; 2] = [Category::Signal, Category::Channel];

    /// The per-category subdirectory name under the store root.
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Signal => "signal",
            Self::Channel => "channel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ---------------------------------------------------------------------------
// Sample keys
// ---------------------------------------------------------------------------

/// Build the sample key for a signal series: `"{ssid} [{band}]"`.
///
/// Two access points with identical SSID and band collapse into the same
/// key; the visualization is per logical network, not per radio.
#[must_use]
pub fn signal_key(ssid: &str, band: Band) -> String {
    format!("{ssid} [{band}]")
}

/// Build the sample key for a congestion series: `"Channel_{n}"`.
#[must_use]
pub fn channel_key(channel: u16) -> String {
    format!("Channel_{channel}")
}

// ===========================================================================
// Tests
// ===========================================================================

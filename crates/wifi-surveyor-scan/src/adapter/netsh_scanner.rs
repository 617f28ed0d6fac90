//! Adapter that acquires scans on Windows by reading the OS scan cache via
//! `netsh wlan show networks mode=bssid`.
//!
//! # Design notes
//!
//! The WLAN driver refreshes its network cache asynchronously; `netsh` only
//! reads whatever the cache currently holds. The adapter therefore waits a
//! fixed settle delay (empirically enough for a refresh to land) before
//! invoking `netsh`. A native `WlanScan`/`WlanGetNetworkBssList` FFI
//! trigger would remove the delay, but `netsh` is kept because its listing
//! carries the channel field the congestion counter needs.
//!
//! A failing `netsh` surfaces as *empty output*, not an error: the cycle
//! simply yields no samples and the survey session continues.
//!
//! The `netsh` listing is locale-dependent. The parser recognises both the
//! English and French field spellings (`Band`/`Bande`, `Channel`/`Canal`)
//! and the non-breaking spaces some locales emit inside values.

use std::process::Command;
use std::time::Duration;

use wifi_surveyor_core::error::ScanError;
use wifi_surveyor_core::types::{Band, BssidId, ChannelTally, NetworkObservation};

use crate::port::ScanSource;

// ---------------------------------------------------------------------------
// NetshScanner
// ---------------------------------------------------------------------------

/// Synchronous scan source that shells out to
/// `netsh wlan show networks mode=bssid`.
pub struct NetshScanner {
    /// Delay for the OS scan cache to refresh before reading it.
    settle_delay: Duration,
}

impl NetshScanner {
    /// Create a scanner with the given cache settle delay.
    #[must_use]
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }
}

impl ScanSource for NetshScanner {
    fn raw_scan(&self) -> Result<String, ScanError> {
        std::thread::sleep(self.settle_delay);

        let output = Command::new("netsh")
            .args(["wlan", "show", "networks", "mode=bssid"])
            .output()
            .map_err(|e| ScanError::Process {
                message: format!("failed to run netsh: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                status = %output.status,
                stderr = %stderr.trim(),
                "netsh failed; treating cycle as empty"
            );
            return Ok(String::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ---------------------------------------------------------------------------
// Format B parser
// ---------------------------------------------------------------------------

/// Parse the text output of `netsh wlan show networks mode=bssid` into
/// normalized observations.
///
/// The listing is line-oriented: an `SSID <n> : <name>` header introduces a
/// network, followed by one or more `BSSID <n> : <mac>` sub-blocks each
/// carrying `Signal : <pct>%` and a `Band`/`Bande : <label>` line. The
/// signal percentage converts to dBm via `pct / 2 - 100`.
///
/// An observation is emitted at each band line, provided ssid, bssid and
/// signal have all been captured since the last emission. The per-BSSID
/// fields then reset while the SSID persists, so a single SSID header may
/// precede several BSSID blocks. Lines that match nothing are skipped, so
/// localized headers never cause an error.
#[must_use]
pub fn parse_netsh_output(output: &str) -> Vec<NetworkObservation> {
    let mut results = Vec::new();

    let mut ssid: Option<String> = None;
    let mut bssid: Option<BssidId> = None;
    let mut rssi: Option<f64> = None;

    for line in output.lines() {
        let trimmed = line.trim();

        if let Some(name) = try_parse_ssid_line(trimmed) {
            ssid = Some(name);
            continue;
        }

        if let Some(mac) = try_parse_bssid_line(trimmed) {
            bssid = Some(mac);
            continue;
        }

        if let Some(pct) = try_parse_signal_line(trimmed) {
            rssi = Some(pct / 2.0 - 100.0);
            continue;
        }

        if let Some(label) = try_parse_band_line(trimmed) {
            if let (Some(name), Some(mac), Some(signal_dbm)) = (ssid.as_ref(), bssid, rssi) {
                results.push(NetworkObservation {
                    ssid: name.clone(),
                    bssid: mac,
                    signal_dbm,
                    band: Band::from_label(&label),
                });
                bssid = None;
                rssi = None;
            }
        }
    }

    results
}

// ---------------------------------------------------------------------------
// Individual line parsers
// ---------------------------------------------------------------------------

/// Parse an SSID header line (`"SSID <n> : <name>"`).
///
/// Returns `None` for hidden networks with an empty name, matching the
/// emission rule: such headers leave the previous SSID in effect.
fn try_parse_ssid_line(line: &str) -> Option<String> {
    let value = numbered_field_value(line, "SSID")?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Parse a BSSID header line and extract the MAC address.
///
/// Returns `None` if the line is not a BSSID header or the MAC is
/// malformed.
fn try_parse_bssid_line(line: &str) -> Option<BssidId> {
    let value = numbered_field_value(line, "BSSID")?;
    BssidId::parse(value).ok()
}

/// Parse a Signal line and return the percentage value.
///
/// Accepts `"Signal : 84%"`; a missing `%` sign is tolerated.
fn try_parse_signal_line(line: &str) -> Option<f64> {
    let value = field_value(line, &["Signal"])?;
    value.trim_end_matches('%').trim().parse().ok()
}

/// Parse a band line (`"Band : 5 GHz"` / `"Bande : 2,4 GHz"`) and return
/// the raw label.
fn try_parse_band_line(line: &str) -> Option<String> {
    let value = field_value(line, &["Bande", "Band"])?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Match `<key> <n> : <value>` where `<n>` is a decimal index, returning
/// the value with surrounding whitespace trimmed.
///
/// The index requirement keeps `"SSID"` from matching `"BSSID"` lines and
/// plain `"SSID name"` prose.
fn numbered_field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?;
    let rest = rest.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}

/// Match `<key> : <value>` for the first key that fits, returning the
/// trimmed value.
fn field_value<'a>(line: &'a str, keys: &[&str]) -> Option<&'a str> {
    for key in keys {
        if let Some(rest) = line.strip_prefix(key) {
            let rest = rest.trim_start();
            if let Some(rest) = rest.strip_prefix(':') {
                return Some(rest.trim());
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Channel counter
// ---------------------------------------------------------------------------

/// Tally how many access points report each channel in `netsh` output.
///
/// Recognises both the English `Channel` and the French `Canal` field
/// labels. Independent of [`parse_netsh_output`] even though both walk the
/// same text.
#[must_use]
pub fn count_channels_netsh(output: &str) -> ChannelTally {
    let mut tally = ChannelTally::new();

    for line in output.lines() {
        let trimmed = line.trim();
        let Some(value) = field_value(trimmed, &["Channel", "Canal"]) else {
            continue;
        };
        if let Ok(channel) = value.parse::<u16>() {
            *tally.entry(channel).or_insert(0) += 1;
        }
    }

    tally
}

// ===========================================================================
// Tests
// ===========================================================================

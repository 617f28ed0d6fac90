//! Adapter that acquires scans on Unix by invoking `iw dev <iface> scan`.
//!
//! This is the Unix counterpart to [`NetshScanner`](super::NetshScanner) on
//! Windows.
//!
//! # Design
//!
//! The adapter shells out to `iw dev <interface> scan` and hands the raw
//! text to [`parse_iw_scan_output`]. Scan triggering needs `CAP_NET_ADMIN`,
//! and drivers occasionally reject a trigger while a previous scan is still
//! settling, so the command is retried a bounded number of times with a
//! fixed backoff before the cycle is declared failed.
//!
//! The parser and the channel counter are pure functions over the text
//! blob; they never touch the filesystem or the network and never raise on
//! malformed input.

use std::process::Command;
use std::time::Duration;

use wifi_surveyor_core::error::ScanError;
use wifi_surveyor_core::types::{Band, BssidId, ChannelTally, NetworkObservation};

use crate::port::ScanSource;

/// Placeholder SSID recorded for networks that broadcast an empty name.
pub const HIDDEN_SSID: &str = "<Unknown>";

// ---------------------------------------------------------------------------
// IwScanner
// ---------------------------------------------------------------------------

/// Synchronous scan source that shells out to `iw dev <interface> scan`.
///
/// Each call to [`raw_scan`](ScanSource::raw_scan) spawns a subprocess and
/// captures stdout. A non-zero exit status is retried up to the configured
/// budget with a fixed backoff in between; only after the budget is spent
/// does the cycle fail.
pub struct IwScanner {
    /// Wireless interface name (e.g. `"wlan0"`, `"wlp2s0"`).
    interface: String,
    /// Attempts before giving up on a cycle.
    retries: u32,
    /// Fixed delay between attempts.
    backoff: Duration,
    /// Program to invoke. Overridable so tests can exercise the retry
    /// loop without a live `iw`.
    program: String,
}

impl IwScanner {
    /// Create a scanner for a specific wireless interface with the given
    /// retry budget and backoff.
    pub fn new(iface: impl Into<String>, retries: u32, backoff: Duration) -> Self {
        Self {
            interface: iface.into(),
            retries: retries.max(1),
            backoff,
            program: "iw".to_owned(),
        }
    }

    /// Substitute the program to run instead of `iw`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl ScanSource for IwScanner {
    fn raw_scan(&self) -> Result<String, ScanError> {
        let mut last_reason = String::new();

        for attempt in 1..=self.retries {
            let output = Command::new(&self.program)
                .args(["dev", &self.interface, "scan"])
                .output()
                .map_err(|e| ScanError::Process {
                    message: format!("failed to run `{} dev {} scan`: {e}", self.program, self.interface),
                })?;

            if output.status.success() {
                return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            last_reason = format!("{} exited with {}: {}", self.program, output.status, stderr.trim());
            tracing::warn!(
                attempt,
                retries = self.retries,
                reason = %last_reason,
                "scan command failed"
            );

            if attempt < self.retries {
                std::thread::sleep(self.backoff);
            }
        }

        Err(ScanError::ScanFailed {
            attempts: self.retries,
            reason: last_reason,
        })
    }
}

// ---------------------------------------------------------------------------
// Format A parser
// ---------------------------------------------------------------------------

/// Intermediate accumulator for fields within a single BSS block.
#[derive(Default)]
struct BssBlock {
    bssid: Option<BssidId>,
    ssid: Option<String>,
    signal_dbm: Option<f64>,
    freq_mhz: Option<u32>,
}

impl BssBlock {
    /// Flush this block into a [`NetworkObservation`].
    ///
    /// Returns `None` unless all four fields were seen before the next
    /// `BSS ` marker; partial blocks are dropped, not reported.
    fn flush(self) -> Option<NetworkObservation> {
        let bssid = self.bssid?;
        let ssid = self.ssid?;
        let signal_dbm = self.signal_dbm?;
        let freq = self.freq_mhz?;

        Some(NetworkObservation {
            ssid,
            bssid,
            signal_dbm,
            band: Band::from_frequency_mhz(freq),
        })
    }
}

/// Parse the text output of `iw dev <iface> scan`.
///
/// The output consists of BSS blocks, each starting with:
/// ```text
/// BSS aa:bb:cc:dd:ee:ff(on wlan0)
/// ```
/// followed by indented key-value lines, of which `SSID:`, `signal:` and
/// `freq:` are consumed. An empty SSID falls back to [`HIDDEN_SSID`].
/// Blocks missing any field are silently dropped; the function never fails.
#[must_use]
pub fn parse_iw_scan_output(output: &str) -> Vec<NetworkObservation> {
    let mut results = Vec::new();
    let mut current: Option<BssBlock> = None;

    for line in output.lines() {
        let trimmed = line.trim();

        // New BSS block, e.g. "BSS aa:bb:cc:dd:ee:ff(on wlan0)" or
        // "BSS aa:bb:cc:dd:ee:ff -- associated".
        if trimmed.starts_with("BSS ") {
            if let Some(block) = current.take() {
                if let Some(obs) = block.flush() {
                    results.push(obs);
                }
            }

            let rest = &trimmed[4..];
            let mac_end = rest
                .find(|c: char| !c.is_ascii_hexdigit() && c != ':')
                .unwrap_or(rest.len());
            current = Some(BssBlock {
                bssid: BssidId::parse(&rest[..mac_end]).ok(),
                ..Default::default()
            });
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if let Some(rest) = trimmed.strip_prefix("SSID:") {
            let name = rest.trim();
            block.ssid = Some(if name.is_empty() {
                HIDDEN_SSID.to_owned()
            } else {
                name.to_owned()
            });
        } else if let Some(rest) = trimmed.strip_prefix("signal:") {
            // "signal: -52.00 dBm"
            block.signal_dbm = parse_signal_dbm(rest);
        } else if let Some(rest) = trimmed.strip_prefix("freq:") {
            // "freq: 5180" (older iw) or "freq: 5180.0" (5.19+)
            block.freq_mhz = parse_leading_digits(rest);
        }
    }

    if let Some(block) = current.take() {
        if let Some(obs) = block.flush() {
            results.push(obs);
        }
    }

    results
}

/// Parse a sign-aware signal string like `"-52.00 dBm"` into dBm.
fn parse_signal_dbm(s: &str) -> Option<f64> {
    s.split_whitespace().next()?.parse().ok()
}

/// Parse the first contiguous digit run of a string as an integer.
fn parse_leading_digits(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Channel counter
// ---------------------------------------------------------------------------

/// Tally how many access points report each channel in `iw` scan output.
///
/// Counts at most one `DS Parameter set: channel <n>` marker per BSS
/// block. Shares no state with [`parse_iw_scan_output`] even though both
/// walk the same text.
#[must_use]
pub fn count_channels_iw(output: &str) -> ChannelTally {
    let mut tally = ChannelTally::new();

    for block in output.split("BSS ").skip(1) {
        let Some(idx) = block.find("DS Parameter set:") else {
            continue;
        };
        let rest = block[idx + "DS Parameter set:".len()..].trim_start();
        let Some(rest) = rest.strip_prefix("channel") else {
            continue;
        };
        if let Some(channel) = parse_leading_digits(rest).and_then(|c| u16::try_from(c).ok()) {
            *tally.entry(channel).or_insert(0) += 1;
        }
    }

    tally
}

// ===========================================================================
// Tests
// ===========================================================================

//! The primary port (driving side) for raw scan acquisition.

use wifi_surveyor_core::error::ScanError;

/// Port that abstracts the platform scan backend.
///
/// An implementation performs one blocking scan cycle against the OS and
/// returns the command's raw text output, which the format parsers then
/// turn into structured observations. Implementations may block for
/// several seconds (settle delays, retry backoff).
///
/// Implementations include:
/// - [`crate::adapter::IwScanner`] -- `iw dev <iface> scan` (Unix).
/// - [`crate::adapter::NetshScanner`] -- `netsh wlan show networks mode=bssid` (Windows).
///
/// Tests substitute a fake that returns captured fixture text.
pub trait ScanSource: Send + Sync {
    /// Trigger a scan and return the raw command output.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ScanFailed`] when the underlying command kept
    /// failing after the adapter's retry budget, and
    /// [`ScanError::Process`] when it could not be spawned at all. The
    /// caller treats either as "no data available for this cycle".
    fn raw_scan(&self) -> Result<String, ScanError>;
}

//! Adapter implementations for the [`ScanSource`](crate::port::ScanSource) port.
//!
//! Each adapter targets one platform scanning mechanism:
//! - [`IwScanner`]: runs `iw dev <iface> scan` with bounded retry (Unix).
//! - [`NetshScanner`]: waits for the driver cache to settle, then reads
//!   `netsh wlan show networks mode=bssid` (Windows).
//!
//! The format parsers and channel counters live next to their adapters but
//! are pure functions over text, compiled and tested on every platform.

pub mod iw_scanner;
pub mod netsh_scanner;

pub use iw_scanner::{count_channels_iw, parse_iw_scan_output, IwScanner, HIDDEN_SSID};
pub use netsh_scanner::{count_channels_netsh, parse_netsh_output, NetshScanner};

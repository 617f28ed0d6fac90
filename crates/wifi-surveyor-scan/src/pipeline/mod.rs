//! The scan acquisition pipeline (Domain Service).
//!
//! [`ScanPipeline`] connects the platform adapter, the format parsers, the
//! best-observation reducer, and the channel counter into a single
//! `run()` per scan cycle:
//!
//! ```text
//! adapter -> raw text -> { parser -> reducer, channel counter }
//! ```
//!
//! The two outputs are independent: the reduced network list feeds signal
//! series, the channel tally feeds congestion series.

pub mod reducer;

pub use reducer::reduce_best_networks;

use wifi_surveyor_core::error::ScanError;
use wifi_surveyor_core::types::{ChannelTally, NetworkObservation};

use crate::adapter::{
    count_channels_iw, count_channels_netsh, parse_iw_scan_output, parse_netsh_output, IwScanner,
    NetshScanner,
};
use crate::config::{Platform, ScanConfig};
use crate::port::ScanSource;

// ---------------------------------------------------------------------------
// ScanPipeline
// ---------------------------------------------------------------------------

/// One configured scan pipeline: a platform adapter plus the matching
/// parser pair.
///
/// Built once from a [`ScanConfig`] and reused for every cycle of a
/// survey session. On unsupported platforms, or on Linux without a
/// wireless interface, the pipeline is *disabled*: every cycle yields
/// empty results so the rest of the system degrades gracefully to
/// "no data".
pub struct ScanPipeline {
    platform: Platform,
    source: Option<Box<dyn ScanSource>>,
}

impl ScanPipeline {
    /// Build the pipeline for a configuration, selecting the adapter by
    /// the platform tag.
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        let source: Option<Box<dyn ScanSource>> = match config.platform {
            Platform::Windows => Some(Box::new(NetshScanner::new(config.settle_delay))),
            Platform::Linux => config.interface.as_ref().map(|iface| {
                Box::new(IwScanner::new(iface.clone(), config.retries, config.backoff))
                    as Box<dyn ScanSource>
            }),
            Platform::Unsupported => None,
        };

        Self {
            platform: config.platform,
            source,
        }
    }

    /// Build a pipeline around an arbitrary scan source.
    ///
    /// The platform tag selects which text format the source's output is
    /// parsed with; tests use this to replay captured fixtures.
    #[must_use]
    pub fn with_source(platform: Platform, source: Box<dyn ScanSource>) -> Self {
        Self {
            platform,
            source: Some(source),
        }
    }

    /// Whether this pipeline can produce data at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Run one blocking scan cycle.
    ///
    /// Returns the reduced network list (one entry per SSID+band, the
    /// strongest radio of each) and the per-channel access-point tally.
    /// A disabled pipeline returns empty results.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's failure after its retry budget is spent;
    /// the error covers this cycle only and the pipeline stays usable.
    pub fn run(&self) -> Result<(Vec<NetworkObservation>, ChannelTally), ScanError> {
        let Some(source) = self.source.as_ref() else {
            tracing::debug!(platform = ?self.platform, "scanning disabled; returning empty results");
            return Ok((Vec::new(), ChannelTally::new()));
        };

        let raw = source.raw_scan()?;

        let (networks, channels) = match self.platform {
            Platform::Windows => (parse_netsh_output(&raw), count_channels_netsh(&raw)),
            // Fixture-driven pipelines may carry any tag; non-Windows text
            // is treated as the Unix format.
            Platform::Linux | Platform::Unsupported => {
                (parse_iw_scan_output(&raw), count_channels_iw(&raw))
            }
        };

        let reduced = reduce_best_networks(networks);
        tracing::debug!(
            network_count = reduced.len(),
            channel_count = channels.len(),
            "scan cycle complete"
        );

        Ok((reduced, channels))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Fake adapter replaying a captured fixture.
    struct FixtureSource(&'static str);

    impl ScanSource for FixtureSource {
        fn raw_scan(&self) -> Result<String, ScanError> {
            Ok(self.0.to_owned())
        }
    }

    /// Fake adapter that always fails.
    struct FailingSource;

    impl ScanSource for FailingSource {
        fn raw_scan(&self) -> Result<String, ScanError> {
            Err(ScanError::ScanFailed {
                attempts: 3,
                reason: "driver busy".into(),
            })
        }
    }

    const IW_FIXTURE: &str = "\
BSS aa:aa:aa:aa:aa:01(on wlan0)
\tfreq: 2437
\tsignal: -70.00 dBm
\tSSID: Mesh
\tDS Parameter set: channel 6
BSS aa:aa:aa:aa:aa:02(on wlan0)
\tfreq: 2437
\tsignal: -40.00 dBm
\tSSID: Mesh
\tDS Parameter set: channel 6
BSS bb:bb:bb:bb:bb:01(on wlan0)
\tfreq: 5180
\tsignal: -55.00 dBm
\tSSID: Lab
\tDS Parameter set: channel 36
";

    const NETSH_FIXTURE: &str = "\
SSID 1 : Mesh
    BSSID 1                 : aa:aa:aa:aa:aa:01
         Signal             : 60%
         Band               : 2.4 GHz
         Channel            : 6
    BSSID 2                 : aa:aa:aa:aa:aa:02
         Signal             : 90%
         Band               : 2.4 GHz
         Channel            : 6
";

    #[test]
    fn unix_cycle_reduces_and_tallies() {
        let pipeline = ScanPipeline::with_source(Platform::Linux, Box::new(FixtureSource(IW_FIXTURE)));
        let (networks, channels) = pipeline.run().unwrap();

        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].ssid, "Mesh");
        assert!((networks[0].signal_dbm - (-40.0)).abs() < f64::EPSILON);
        assert_eq!(networks[1].ssid, "Lab");

        assert_eq!(channels.get(&6), Some(&2));
        assert_eq!(channels.get(&36), Some(&1));
    }

    #[test]
    fn windows_cycle_reduces_and_tallies() {
        let pipeline =
            ScanPipeline::with_source(Platform::Windows, Box::new(FixtureSource(NETSH_FIXTURE)));
        let (networks, channels) = pipeline.run().unwrap();

        assert_eq!(networks.len(), 1);
        // 90% -> -55 dBm beats 60% -> -70 dBm.
        assert!((networks[0].signal_dbm - (-55.0)).abs() < f64::EPSILON);
        assert_eq!(channels.get(&6), Some(&2));
    }

    #[test]
    fn unsupported_platform_is_disabled_and_empty() {
        let pipeline = ScanPipeline::from_config(&ScanConfig::new(Platform::Unsupported));
        assert!(!pipeline.is_enabled());
        let (networks, channels) = pipeline.run().unwrap();
        assert!(networks.is_empty());
        assert!(channels.is_empty());
    }

    #[test]
    fn linux_without_interface_is_disabled() {
        let pipeline = ScanPipeline::from_config(&ScanConfig::new(Platform::Linux));
        assert!(!pipeline.is_enabled());
    }

    #[test]
    fn linux_with_interface_is_enabled() {
        let config = ScanConfig::new(Platform::Linux).with_interface("wlan0");
        assert!(ScanPipeline::from_config(&config).is_enabled());
    }

    #[test]
    fn adapter_failure_propagates_for_the_cycle() {
        let pipeline = ScanPipeline::with_source(Platform::Linux, Box::new(FailingSource));
        assert!(matches!(
            pipeline.run(),
            Err(ScanError::ScanFailed { attempts: 3, .. })
        ));
    }
}

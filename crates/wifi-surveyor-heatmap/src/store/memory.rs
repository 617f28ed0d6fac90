//! In-memory sample store for tests and embedders.

use std::collections::HashMap;

use parking_lot::Mutex;

use wifi_surveyor_core::error::StoreError;
use wifi_surveyor_core::traits::SampleStore;
use wifi_surveyor_core::types::{
    channel_key, signal_key, Category, ChannelTally, Dataset, NetworkObservation, Sample,
};

/// [`SampleStore`] implementation holding all datasets in memory.
///
/// Behaviorally identical to the file-backed store minus persistence;
/// useful wherever a test needs store semantics without a filesystem.
#[derive(Default)]
pub struct MemorySampleStore {
    datasets: Mutex<HashMap<(String, Category), Dataset>>,
}

impl MemorySampleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleStore for MemorySampleStore {
    fn append_signal(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        networks: &[NetworkObservation],
    ) -> Result<(), StoreError> {
        let mut datasets = self.datasets.lock();
        let dataset = datasets
            .entry((map_name.to_owned(), Category::Signal))
            .or_default();
        for net in networks {
            dataset
                .entry(signal_key(&net.ssid, net.band))
                .or_default()
                .push(Sample {
                    x,
                    y,
                    value: net.signal_dbm,
                });
        }
        Ok(())
    }

    fn append_channels(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        channels: &ChannelTally,
    ) -> Result<(), StoreError> {
        let mut datasets = self.datasets.lock();
        let dataset = datasets
            .entry((map_name.to_owned(), Category::Channel))
            .or_default();
        for (&channel, &count) in channels {
            dataset.entry(channel_key(channel)).or_default().push(Sample {
                x,
                y,
                value: f64::from(count),
            });
        }
        Ok(())
    }

    fn reset(&self, map_name: &str) -> Result<(), StoreError> {
        let mut datasets = self.datasets.lock();
        for category in Category::ALL {
            datasets.remove(&(map_name.to_owned(), category));
        }
        Ok(())
    }

    fn keys(&self, map_name: &str, category: Category) -> Vec<String> {
        self.datasets
            .lock()
            .get(&(map_name.to_owned(), category))
            .map(|d| d.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn series(&self, map_name: &str, category: Category, key: &str) -> Vec<Sample> {
        self.datasets
            .lock()
            .get(&(map_name.to_owned(), category))
            .and_then(|d| d.get(key).cloned())
            .unwrap_or_default()
    }

    fn dataset(&self, map_name: &str, category: Category) -> Dataset {
        self.datasets
            .lock()
            .get(&(map_name.to_owned(), category))
            .cloned()
            .unwrap_or_default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

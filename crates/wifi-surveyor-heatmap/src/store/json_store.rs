//! File-backed sample store: one JSON document per map per category.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/signal/<map_name>.json    {"Home [5GHz]": [{"x":10,"y":20,"value":-48.0}, ...], ...}
//! <root>/channel/<map_name>.json   {"Channel_6": [{"x":10,"y":20,"value":4.0}, ...], ...}
//! ```
//!
//! Appends are whole-document read-modify-write cycles guarded by a mutex,
//! so one store instance never interleaves two appends to the same map.
//! Unreadable or corrupt documents load as empty: losing unreadable prior
//! data is preferred over blocking the surveyor mid-session.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use wifi_surveyor_core::error::StoreError;
use wifi_surveyor_core::traits::SampleStore;
use wifi_surveyor_core::types::{
    channel_key, signal_key, Category, ChannelTally, Dataset, NetworkObservation, Sample,
};

/// [`SampleStore`] implementation persisting JSON documents under a root
/// directory.
pub struct JsonSampleStore {
    root: PathBuf,
    /// Serializes the read-modify-write append cycle per store instance.
    write_lock: Mutex<()>,
}

impl JsonSampleStore {
    /// Create a store rooted at `root`. Directories are created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The dataset file for one map and category.
    fn dataset_path(&self, map_name: &str, category: Category) -> PathBuf {
        self.root
            .join(category.dir_name())
            .join(format!("{map_name}.json"))
    }

    /// Load a dataset, treating a missing, unreadable, or corrupt file as
    /// empty.
    fn load(&self, map_name: &str, category: Category) -> Dataset {
        let path = self.dataset_path(map_name, category);
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Dataset::new();
        };
        match serde_json::from_str(&text) {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "corrupt dataset; starting fresh"
                );
                Dataset::new()
            }
        }
    }

    /// Persist a whole dataset, creating the category directory if needed.
    fn save(&self, map_name: &str, category: Category, dataset: &Dataset) -> Result<(), StoreError> {
        let path = self.dataset_path(map_name, category);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json =
            serde_json::to_string_pretty(dataset).map_err(|e| StoreError::Serialize {
                map_name: map_name.to_owned(),
                message: e.to_string(),
            })?;
        std::fs::write(&path, json).map_err(|source| StoreError::Write { path, source })
    }

    /// Remove one dataset file, tolerating its absence.
    fn remove(&self, map_name: &str, category: Category) -> Result<(), StoreError> {
        let path = self.dataset_path(map_name, category);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }
}

impl SampleStore for JsonSampleStore {
    fn append_signal(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        networks: &[NetworkObservation],
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut dataset = self.load(map_name, Category::Signal);
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
        self.save(map_name, Category::Signal, &dataset)?;
        tracing::debug!(map_name, x, y, sample_count = networks.len(), "appended signal samples");
        Ok(())
    }

    fn append_channels(
        &self,
        map_name: &str,
        x: i32,
        y: i32,
        channels: &ChannelTally,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut dataset = self.load(map_name, Category::Channel);
        for (&channel, &count) in channels {
            dataset.entry(channel_key(channel)).or_default().push(Sample {
                x,
                y,
                value: f64::from(count),
            });
        }
        self.save(map_name, Category::Channel, &dataset)?;
        tracing::debug!(map_name, x, y, sample_count = channels.len(), "appended channel samples");
        Ok(())
    }

    fn reset(&self, map_name: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        for category in Category::ALL {
            self.remove(map_name, category)?;
        }
        tracing::debug!(map_name, "datasets reset");
        Ok(())
    }

    fn keys(&self, map_name: &str, category: Category) -> Vec<String> {
        self.load(map_name, category).into_keys().collect()
    }

    fn series(&self, map_name: &str, category: Category, key: &str) -> Vec<Sample> {
        self.load(map_name, category)
            .remove(key)
            .unwrap_or_default()
    }

    fn dataset(&self, map_name: &str, category: Category) -> Dataset {
        self.load(map_name, category)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

//! Floor-plan library: name-to-image resolution and map deletion.
//!
//! Maps live as raster files in a single directory; the map name is the
//! file stem. Upload and PDF conversion are handled by the hosting layer;
//! this module only resolves, lists, and deletes what is already there.

use std::path::{Path, PathBuf};

use wifi_surveyor_core::error::StoreError;
use wifi_surveyor_core::traits::SampleStore;

/// Raster extensions a floor plan may carry, in resolution priority order.
pub const MAP_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// One available floor plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// The map name (file stem).
    pub name: String,
    /// Full path of the base image.
    pub path: PathBuf,
}

/// Resolves map names against a directory of floor-plan images.
pub struct MapLibrary {
    maps_dir: PathBuf,
}

impl MapLibrary {
    /// Create a library over `maps_dir`.
    pub fn new(maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            maps_dir: maps_dir.into(),
        }
    }

    /// Resolve a map name to its base image, trying extensions in
    /// [`MAP_EXTENSIONS`] order.
    #[must_use]
    pub fn find(&self, map_name: &str) -> Option<PathBuf> {
        MAP_EXTENSIONS
            .iter()
            .map(|ext| self.maps_dir.join(format!("{map_name}.{ext}")))
            .find(|path| path.exists())
    }

    /// List all floor plans, sorted by name.
    ///
    /// A map stored under several extensions appears once, at its
    /// highest-priority path. An unreadable directory lists as empty.
    #[must_use]
    pub fn list(&self) -> Vec<MapEntry> {
        let mut names: Vec<String> = Vec::new();
        let Ok(entries) = std::fs::read_dir(&self.maps_dir) else {
            return Vec::new();
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_map = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| MAP_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if !is_map {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !names.iter().any(|n| n == stem) {
                    names.push(stem.to_owned());
                }
            }
        }

        names.sort();
        names
            .into_iter()
            .filter_map(|name| {
                self.find(&name).map(|path| MapEntry { name, path })
            })
            .collect()
    }

    /// Delete a floor plan and everything recorded against it.
    ///
    /// Removes the image under every extension it exists with, then
    /// clears both of the map's datasets through the store. Deleting a
    /// map that does not exist is not an error.
    pub fn delete(&self, map_name: &str, store: &dyn SampleStore) -> Result<(), StoreError> {
        for ext in MAP_EXTENSIONS {
            let path = self.maps_dir.join(format!("{map_name}.{ext}"));
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Remove { path, source }),
            }
        }
        store.reset(map_name)
    }

    /// The directory this library resolves against.
    #[must_use]
    pub fn maps_dir(&self) -> &Path {
        &self.maps_dir
    }
}

// ===========================================================================
// Tests
// ===========================================================================

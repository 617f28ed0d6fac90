//! Artifact lifecycle around the pure overlay composition.
//!
//! The renderer owns a scratch output directory and guarantees only the
//! newest artifact exists at any time: previous overlays are purged before
//! each render, and the new one is written under a collision-free random
//! name.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use wifi_surveyor_core::error::RenderError;
use wifi_surveyor_core::types::Sample;

use super::overlay::{render_overlay, RenderConfig, ValueRange};

// ---------------------------------------------------------------------------
// HeatmapArtifact
// ---------------------------------------------------------------------------

/// A finished render: the overlay file plus the samples it was drawn from.
///
/// The echoed sample list lets a caller render hover tooltips without
/// re-reading storage.
#[derive(Debug, Clone)]
pub struct HeatmapArtifact {
    /// Path of the generated overlay image.
    pub path: PathBuf,
    /// The samples the overlay was drawn from, in series order.
    pub samples: Vec<Sample>,
}

// ---------------------------------------------------------------------------
// HeatmapRenderer
// ---------------------------------------------------------------------------

/// Renders one series' samples over a floor-plan image into the scratch
/// output directory.
pub struct HeatmapRenderer {
    out_dir: PathBuf,
    config: RenderConfig,
}

impl HeatmapRenderer {
    /// Create a renderer writing artifacts into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            config: RenderConfig::default(),
        }
    }

    /// Override the rendering parameters.
    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Render one series over the base image and write the overlay.
    ///
    /// Any previously generated artifact is purged first (single-artifact
    /// retention). The pixel content is deterministic for identical
    /// inputs; only the artifact filename is random.
    ///
    /// # Errors
    ///
    /// Fails when the base image is missing or undecodable, when the
    /// scratch directory cannot be prepared, or when the overlay cannot
    /// be written. No retries happen here; transience lives in the scan
    /// adapters, not the renderer.
    pub fn render(
        &self,
        samples: &[Sample],
        base_image: &Path,
        range: ValueRange,
    ) -> Result<HeatmapArtifact, RenderError> {
        self.purge_artifacts()?;

        let base = image::open(base_image)
            .map_err(|e| RenderError::BaseImage {
                path: base_image.to_path_buf(),
                message: e.to_string(),
            })?
            .to_rgb8();

        let overlay = render_overlay(samples, &base, range, &self.config);

        let path = self.out_dir.join(format!("{}.jpg", Uuid::new_v4()));
        overlay.save(&path).map_err(|e| RenderError::WriteArtifact {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            artifact = %path.display(),
            sample_count = samples.len(),
            "overlay rendered"
        );

        Ok(HeatmapArtifact {
            path,
            samples: samples.to_vec(),
        })
    }

    /// Empty the scratch directory, creating it if absent.
    fn purge_artifacts(&self) -> Result<(), RenderError> {
        let map_err = |source| RenderError::OutputDir {
            path: self.out_dir.clone(),
            source,
        };

        std::fs::create_dir_all(&self.out_dir).map_err(map_err)?;
        for entry in std::fs::read_dir(&self.out_dir).map_err(map_err)? {
            let entry = entry.map_err(map_err)?;
            if entry.file_type().map_err(map_err)?.is_file() {
                std::fs::remove_file(entry.path()).map_err(map_err)?;
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

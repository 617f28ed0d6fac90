//! Error types for the wifi-surveyor system.
//!
//! This module provides the shared error hierarchy using [`thiserror`] for
//! automatic `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`SurveyError`]: Top-level error type that encompasses all subsystem errors
//! - [`ScanError`]: Errors from the OS scan adapters and output parsers
//! - [`StoreError`]: Errors from spatial sample persistence
//! - [`RenderError`]: Errors from heatmap rendering
//!
//! # Taxonomy
//!
//! Only a handful of conditions are errors at all. Malformed scanner text is
//! parsed defensively and never raised; a corrupted persisted dataset loads
//! as empty; an unsupported platform yields empty scan results. What remains
//! here is the genuinely fatal: a scan command that keeps failing after its
//! retry budget, a dataset that cannot be written back, and a base image
//! that cannot be read or an overlay that cannot be encoded.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized `Result` type for survey operations.
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Top-level error type for the wifi-surveyor system.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SurveyError {
    /// Scan acquisition error
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Spatial sample store error
    #[error("sample store error: {0}")]
    Store(#[from] StoreError),

    /// Heatmap rendering error
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Errors from the OS scan adapters and output parsers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// Failed to parse a MAC address string (expected `aa:bb:cc:dd:ee:ff`).
    #[error("failed to parse MAC address from '{input}': expected aa:bb:cc:dd:ee:ff")]
    MacParseFailed {
        /// The input string that could not be parsed.
        input: String,
    },

    /// Failed to spawn the scan subprocess at all.
    #[error("scan process error: {message}")]
    Process {
        /// Description of the spawn failure.
        message: String,
    },

    /// The scan command kept failing after exhausting its retry budget.
    ///
    /// Fatal for the current scan cycle only; the caller treats it as
    /// "no data available" and the session continues.
    #[error("WiFi scan failed after {attempts} attempts: {reason}")]
    ScanFailed {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Human-readable description of the last failure.
        reason: String,
    },
}

/// Errors from spatial sample persistence.
///
/// Read-side failures are intentionally absent: an unreadable or corrupt
/// dataset is treated as empty on load, never surfaced.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Failed to write a dataset file or create its parent directory.
    #[error("failed to write dataset '{}': {}", path.display(), source)]
    Write {
        /// The dataset file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize a dataset to JSON.
    #[error("failed to serialize dataset '{map_name}': {message}")]
    Serialize {
        /// The map whose dataset failed to serialize.
        map_name: String,
        /// Description of the serialization failure.
        message: String,
    },

    /// Failed to remove a dataset or map file during reset or deletion.
    #[error("failed to remove '{}': {}", path.display(), source)]
    Remove {
        /// The file that could not be removed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors from heatmap rendering.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RenderError {
    /// The base floor-plan image is missing or undecodable.
    ///
    /// Fatal for the single render request; there is nothing to overlay.
    #[error("failed to read base image '{}': {}", path.display(), message)]
    BaseImage {
        /// Path of the image that could not be read.
        path: PathBuf,
        /// Description of the decode failure.
        message: String,
    },

    /// Failed to write the generated overlay artifact.
    #[error("failed to write overlay '{}': {}", path.display(), message)]
    WriteArtifact {
        /// Path of the artifact that could not be written.
        path: PathBuf,
        /// Description of the encode or I/O failure.
        message: String,
    },

    /// Failed to purge or prepare the scratch output directory.
    #[error("failed to prepare output directory '{}': {}", path.display(), source)]
    OutputDir {
        /// The scratch directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_display() {
        let err = ScanError::ScanFailed {
            attempts: 3,
            reason: "iw exited with status 240".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("status 240"));
    }

    #[test]
    fn error_conversion_into_top_level() {
        let err: SurveyError = ScanError::Process {
            message: "No such file or directory".into(),
        }
        .into();
        assert!(matches!(err, SurveyError::Scan(_)));
    }

    #[test]
    fn store_error_carries_path() {
        let err = StoreError::Write {
            path: PathBuf::from("/data/signal/office.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("office.json"));
    }

    #[test]
    fn render_error_display() {
        let err = RenderError::BaseImage {
            path: PathBuf::from("maps/office.png"),
            message: "unsupported image format".into(),
        };
        assert!(err.to_string().contains("maps/office.png"));
    }
}

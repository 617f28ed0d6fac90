//! wifi-surveyor CLI
//!
//! Command-line interface for walking a site survey without the web layer:
//! scan, record samples at floor-plan coordinates, and render heatmaps.
//!
//! # Usage
//!
//! ```bash
//! # One scan cycle: list visible networks and the channel tally
//! wifi-surveyor scan
//!
//! # Record a survey sample at a floor-plan pixel coordinate
//! wifi-surveyor sample --map office -x 120 -y 340
//!
//! # List recorded series and render one of them
//! wifi-surveyor keys --map office
//! wifi-surveyor render --map office --category signal --key "Lab [5GHz]"
//!
//! # Session and map management
//! wifi-surveyor reset --map office
//! wifi-surveyor maps
//! wifi-surveyor delete --map office
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use wifi_surveyor_core::types::Category;

pub mod commands;

/// wifi-surveyor command-line interface
#[derive(Parser, Debug)]
#[command(name = "wifi-surveyor")]
#[command(author, version, about = "Wi-Fi site survey and heatmap tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory for persisted sample datasets
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory holding floor-plan images (default: <data-dir>/maps)
    #[arg(long, global = true)]
    pub maps_dir: Option<PathBuf>,

    /// Scratch directory for generated overlays (default: <data-dir>/generated)
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Wireless interface to scan on, overriding discovery (Unix)
    #[arg(long, global = true)]
    pub interface: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The floor-plan directory, defaulted under the data root.
    #[must_use]
    pub fn maps_dir(&self) -> PathBuf {
        self.maps_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("maps"))
    }

    /// The overlay scratch directory, defaulted under the data root.
    #[must_use]
    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("generated"))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one scan cycle and print the visible networks and channel tally
    Scan,

    /// Scan and record a survey sample at a floor-plan coordinate
    Sample {
        /// Map the sample belongs to
        #[arg(long)]
        map: String,
        /// Horizontal pixel coordinate of the click
        #[arg(short)]
        x: i32,
        /// Vertical pixel coordinate of the click
        #[arg(short)]
        y: i32,
    },

    /// List the recorded sample keys for a map
    Keys {
        /// Map to inspect
        #[arg(long)]
        map: String,
        /// Restrict to one category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Clear both datasets for a map (start a fresh survey session)
    Reset {
        /// Map to reset
        #[arg(long)]
        map: String,
    },

    /// List available floor plans
    Maps,

    /// Delete a floor plan and its datasets
    Delete {
        /// Map to delete
        #[arg(long)]
        map: String,
    },

    /// Render one series as a heatmap overlay
    Render {
        /// Map whose floor plan to draw over
        #[arg(long)]
        map: String,
        /// Series category
        #[arg(long, value_enum)]
        category: CategoryArg,
        /// Series key, e.g. "Lab [5GHz]" or "Channel_6"
        #[arg(long)]
        key: String,
    },

    /// Display version information
    Version,
}

/// Category selector for the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    /// Signal-strength series
    Signal,
    /// Channel congestion series
    Channel,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Signal => Category::Signal,
            CategoryArg::Channel => Category::Channel,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sample_command() {
        let cli = Cli::parse_from([
            "wifi-surveyor",
            "sample",
            "--map",
            "office",
            "-x",
            "120",
            "-y",
            "340",
        ]);
        match cli.command {
            Commands::Sample { map, x, y } => {
                assert_eq!(map, "office");
                assert_eq!(x, 120);
                assert_eq!(y, 340);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_render_command_with_category() {
        let cli = Cli::parse_from([
            "wifi-surveyor",
            "render",
            "--map",
            "office",
            "--category",
            "channel",
            "--key",
            "Channel_6",
        ]);
        match cli.command {
            Commands::Render { category, key, .. } => {
                assert_eq!(category, CategoryArg::Channel);
                assert_eq!(key, "Channel_6");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_directories_hang_off_data_dir() {
        let cli = Cli::parse_from(["wifi-surveyor", "--data-dir", "/srv/survey", "maps"]);
        assert_eq!(cli.maps_dir(), PathBuf::from("/srv/survey/maps"));
        assert_eq!(cli.out_dir(), PathBuf::from("/srv/survey/generated"));
    }

    #[test]
    fn negative_coordinates_parse() {
        // Clicks slightly outside the plan are allowed; the renderer clips.
        let cli = Cli::parse_from([
            "wifi-surveyor",
            "sample",
            "--map",
            "office",
            "-x=-5",
            "-y=-5",
        ]);
        match cli.command {
            Commands::Sample { x, y, .. } => {
                assert_eq!(x, -5);
                assert_eq!(y, -5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

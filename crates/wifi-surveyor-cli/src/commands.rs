//! Command execution: wires the scan pipeline, the sample store, the map
//! library, and the renderer together per subcommand.

use anyhow::{bail, Context};

use wifi_surveyor_core::traits::SampleStore;
use wifi_surveyor_core::types::{Category, ChannelTally, NetworkObservation};
use wifi_surveyor_heatmap::{HeatmapRenderer, JsonSampleStore, MapLibrary, ValueRange};
use wifi_surveyor_scan::{ScanConfig, ScanPipeline};

use crate::{Cli, Commands};

/// Execute the parsed command line.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    let store = JsonSampleStore::new(&cli.data_dir);
    let library = MapLibrary::new(cli.maps_dir());

    match &cli.command {
        Commands::Scan => {
            let (networks, channels) = run_scan_cycle(cli)?;
            print_networks(&networks);
            print_channels(&channels);
        }

        Commands::Sample { map, x, y } => {
            let (networks, channels) = run_scan_cycle(cli)?;
            if networks.is_empty() && channels.is_empty() {
                println!("no networks visible; nothing recorded");
                return Ok(());
            }
            store.append_signal(map, *x, *y, &networks)?;
            store.append_channels(map, *x, *y, &channels)?;
            println!(
                "recorded {} network(s) and {} channel(s) at ({x}, {y}) on '{map}'",
                networks.len(),
                channels.len()
            );
        }

        Commands::Keys { map, category } => {
            let categories: Vec<Category> = match category {
                Some(arg) => vec![Category::from(*arg)],
                None => Category::ALL.to_vec(),
            };
            for category in categories {
                for key in store.keys(map, category) {
                    println!("{category}\t{key}");
                }
            }
        }

        Commands::Reset { map } => {
            store.reset(map)?;
            println!("cleared datasets for '{map}'");
        }

        Commands::Maps => {
            for entry in library.list() {
                println!("{}\t{}", entry.name, entry.path.display());
            }
        }

        Commands::Delete { map } => {
            library.delete(map, &store)?;
            println!("deleted '{map}'");
        }

        Commands::Render { map, category, key } => {
            let category = Category::from(*category);
            let base = library
                .find(map)
                .with_context(|| format!("no floor plan named '{map}' in {}", library.maps_dir().display()))?;

            let samples = store.series(map, category, key);
            let renderer = HeatmapRenderer::new(cli.out_dir());
            let artifact = renderer.render(&samples, &base, ValueRange::for_category(category))?;
            println!("{}", artifact.path.display());
        }

        Commands::Version => {
            println!("wifi-surveyor {}", env!("CARGO_PKG_VERSION"));
            println!("core {}", wifi_surveyor_core::VERSION);
        }
    }

    Ok(())
}

/// Build the pipeline from detected (or overridden) configuration and run
/// one cycle.
fn run_scan_cycle(cli: &Cli) -> anyhow::Result<(Vec<NetworkObservation>, ChannelTally)> {
    let mut config = ScanConfig::detect();
    if let Some(iface) = &cli.interface {
        config = config.with_interface(iface.clone());
    }

    let pipeline = ScanPipeline::from_config(&config);
    if !pipeline.is_enabled() {
        bail!("scanning is not available on this system (no supported backend or wireless interface)");
    }

    Ok(pipeline.run()?)
}

fn print_networks(networks: &[NetworkObservation]) {
    if networks.is_empty() {
        println!("no networks visible");
        return;
    }
    println!("{:<32} {:<20} {:>8}  band", "SSID", "BSSID", "dBm");
    for net in networks {
        println!(
            "{:<32} {:<20} {:>8.1}  {}",
            net.ssid, net.bssid, net.signal_dbm, net.band
        );
    }
}

fn print_channels(channels: &ChannelTally) {
    if channels.is_empty() {
        return;
    }
    println!("\nchannel congestion:");
    for (channel, count) in channels {
        println!("  channel {channel:>3}: {count} AP(s)");
    }
}

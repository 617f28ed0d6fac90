//! Best-observation reduction.
//!
//! A single SSID+band is typically broadcast by several physical radios
//! (mesh nodes, repeaters); the surveyor cares about the best one reachable
//! at the spot being sampled.

use std::collections::HashMap;

use wifi_surveyor_core::types::{Band, NetworkObservation};

/// Collapse duplicate observations of the same logical network.
///
/// For each `(ssid, band)` pair, only the observation with the numerically
/// highest `signal_dbm` (closest to 0, i.e. strongest) is retained, in
/// first-seen order. Reducing an already-reduced list returns it unchanged.
#[must_use]
pub fn reduce_best_networks(networks: Vec<NetworkObservation>) -> Vec<NetworkObservation> {
    let mut best: Vec<NetworkObservation> = Vec::new();
    let mut index: HashMap<(String, Band), usize> = HashMap::new();

    for net in networks {
        let key = (net.ssid.clone(), net.band);
        match index.get(&key) {
            Some(&i) => {
                if best[i].signal_dbm < net.signal_dbm {
                    best[i] = net;
                }
            }
            None => {
                index.insert(key, best.len());
                best.push(net);
            }
        }
    }

    best
}

// ===========================================================================
// Tests
// ===========================================================================

//! Run a discovery pass.

use std::path::PathBuf;

use hmdscan_common::config::DiscoveryConfig;
use hmdscan_discovery::{HmdDescriptor, HmdDiscovery, InMemoryRegistry};
use hmdscan_platform_core::{DisplaySnapshot, DisplaySource, SnapshotSource};
use serde::Serialize;

#[derive(Serialize)]
struct ScanReport {
    scanned_at: String,
    source: String,
    max_monitors: usize,
    hmds: Vec<HmdDescriptor>,
}

pub fn run(
    snapshot: Option<PathBuf>,
    json: bool,
    config: &DiscoveryConfig,
) -> anyhow::Result<()> {
    let (source, source_label): (Box<dyn DisplaySource>, String) = match snapshot {
        Some(path) => {
            let snapshot = DisplaySnapshot::load(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load snapshot: {e}"))?;
            (
                Box::new(SnapshotSource::new(snapshot)) as Box<dyn DisplaySource>,
                format!("snapshot:{}", path.display()),
            )
        }
        None => (hmdscan_platform_windows::system_source()?, "live".to_string()),
    };

    let discovery = HmdDiscovery::with_config(source, config);
    let mut registry = InMemoryRegistry::new();
    let hmds = discovery.discover_all(&mut registry);

    if json {
        let report = ScanReport {
            scanned_at: chrono::Utc::now().to_rfc3339(),
            source: source_label,
            max_monitors: discovery.max_monitors(),
            hmds,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if hmds.is_empty() {
        println!("No HMD displays found ({source_label}).");
        return Ok(());
    }

    println!("HMD displays found: {}", hmds.len());
    for d in &hmds {
        println!();
        println!("  {} [{}]", d.display_device_name, d.variant);
        println!("    Device ID: {}", d.device_id);
        println!("    Origin: ({}, {})", d.origin_x, d.origin_y);
        println!("    Resolution: {}x{}", d.width_px, d.height_px);
        println!(
            "    Screen: {:.5} m x {:.5} m",
            d.screen_width_m, d.screen_height_m
        );
        println!(
            "    Lens separation: {:.5} m, lens distance: {:.4} m",
            d.lens_separation_m, d.lens_distance_m
        );
    }

    Ok(())
}

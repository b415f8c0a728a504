//! Classify a single device id.

use hmdscan_discovery::{matching_rule, resolve_parameters};

pub fn run(device_id: &str) -> anyhow::Result<()> {
    let Some(rule) = matching_rule(device_id) else {
        println!("{device_id}: not an HMD");
        return Ok(());
    };

    let p = resolve_parameters(rule.variant);
    println!("{device_id}: {}", rule.variant);
    println!("  Matched pattern: {} (priority {})", rule.pattern, rule.priority);
    println!("  Resolution: {}x{}", p.width_px, p.height_px);
    println!(
        "  Screen: {:.5} m x {:.5} m",
        p.screen_width_m, p.screen_height_m
    );
    println!(
        "  Lens separation: {:.5} m, lens distance: {:.4} m",
        p.lens_separation_m, p.lens_distance_m
    );
    Ok(())
}

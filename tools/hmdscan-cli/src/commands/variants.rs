//! List known HMD variants.

use hmdscan_discovery::{resolve_parameters, HmdVariant, IDENTIFIER_RULES};

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:<24} {:<28} {:>10} {:>18} {:>9} {:>9}",
        "VARIANT", "PATTERNS", "RESOLUTION", "SCREEN (m)", "LENS SEP", "LENS DIST"
    );
    println!("{}", "-".repeat(103));

    for &variant in HmdVariant::all() {
        let patterns = IDENTIFIER_RULES
            .iter()
            .filter(|rule| rule.variant == variant)
            .map(|rule| rule.pattern)
            .collect::<Vec<_>>()
            .join(", ");
        let p = resolve_parameters(variant);
        println!(
            "{:<24} {:<28} {:>10} {:>18} {:>9.5} {:>9.4}",
            variant.name(),
            patterns,
            format!("{}x{}", p.width_px, p.height_px),
            format!("{:.5}x{:.5}", p.screen_width_m, p.screen_height_m),
            p.lens_separation_m,
            p.lens_distance_m
        );
    }
    Ok(())
}

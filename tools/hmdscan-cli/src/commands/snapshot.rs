//! Record the live display topology.

use std::path::PathBuf;

use hmdscan_platform_core::DisplaySnapshot;

pub fn run(output: Option<PathBuf>) -> anyhow::Result<()> {
    let source = hmdscan_platform_windows::system_source()?;
    let snapshot = DisplaySnapshot::capture(source.as_ref());
    let json = snapshot.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!(
                "Wrote {} adapter(s) and {} monitor(s) to {}",
                snapshot.adapters.len(),
                snapshot.monitors.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

//! Correlating monitor sub-records with physical monitor geometry.

use hmdscan_platform_core::MonitorRect;

/// Origin used when no monitor rectangle correlates.
pub const DEFAULT_ORIGIN: (i32, i32) = (0, 0);

/// First monitor whose device name is a prefix of `monitor_device_name`.
///
/// Sub-record names extend the monitor name, e.g. `\\.\DISPLAY2\Monitor0`
/// belongs to `\\.\DISPLAY2`. An empty monitor name prefixes every record.
pub fn find_monitor<'a>(
    monitor_device_name: &str,
    monitors: &'a [MonitorRect],
) -> Option<&'a MonitorRect> {
    monitors
        .iter()
        .find(|rect| monitor_device_name.starts_with(rect.device_name.as_str()))
}

/// Top-left corner of the correlated monitor, or [`DEFAULT_ORIGIN`].
pub fn correlate_origin(monitor_device_name: &str, monitors: &[MonitorRect]) -> (i32, i32) {
    match find_monitor(monitor_device_name, monitors) {
        Some(rect) => rect.origin(),
        None => {
            tracing::debug!(
                device = monitor_device_name,
                "No monitor geometry correlates, using default origin"
            );
            DEFAULT_ORIGIN
        }
    }
}

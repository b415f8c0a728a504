//! Windows display enumeration.
//!
//! On Windows this wraps `EnumDisplayDevicesW`, `EnumDisplayMonitors` and
//! `GetMonitorInfoW` behind [`DisplaySource`]. Other targets get a
//! compile-safe [`system_source`] that reports the platform as unsupported.

use hmdscan_common::error::HmdscanResult;
use hmdscan_platform_core::DisplaySource;

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::Win32DisplaySource;

/// Open the live display source of the current host.
#[cfg(windows)]
pub fn system_source() -> HmdscanResult<Box<dyn DisplaySource>> {
    tracing::debug!("Using Win32 display source");
    Ok(Box::new(Win32DisplaySource))
}

/// Open the live display source of the current host.
#[cfg(not(windows))]
pub fn system_source() -> HmdscanResult<Box<dyn DisplaySource>> {
    Err(hmdscan_common::error::HmdscanError::unsupported(format!(
        "live display enumeration is only available on Windows (this host is {}); use a snapshot",
        std::env::consts::OS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn non_windows_hosts_report_unsupported() {
        use hmdscan_common::error::HmdscanError;

        let err = system_source().err().unwrap();
        assert!(matches!(err, HmdscanError::Unsupported { .. }));
    }

    #[cfg(windows)]
    #[test]
    fn windows_host_source_is_available() {
        assert!(system_source().is_ok());
    }
}

//! Win32 GDI display device enumeration.

use std::mem::size_of;
use std::ops::ControlFlow;

use hmdscan_platform_core::{DisplayRecord, DisplaySource, DisplayStateFlags, MonitorRect};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{BOOL, FALSE, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayDevicesW, EnumDisplayMonitors, GetMonitorInfoW, DISPLAY_DEVICEW, HDC, HMONITOR,
    MONITORINFO, MONITORINFOEXW,
};

type RectVisitor<'a> = &'a mut dyn FnMut(MonitorRect) -> ControlFlow<()>;

/// Live display source backed by GDI.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32DisplaySource;

impl DisplaySource for Win32DisplaySource {
    fn adapter(&self, index: u32) -> Option<DisplayRecord> {
        enum_display_device(None, index)
    }

    fn monitor(&self, adapter_name: &str, index: u32) -> Option<DisplayRecord> {
        enum_display_device(Some(adapter_name), index)
    }

    fn visit_monitor_rects(&self, visit: &mut dyn FnMut(MonitorRect) -> ControlFlow<()>) {
        let mut visitor: RectVisitor<'_> = visit;
        let data = LPARAM(&mut visitor as *mut RectVisitor<'_> as isize);
        // Returns FALSE when the visitor breaks early, which is not a failure.
        let _ = unsafe { EnumDisplayMonitors(HDC::default(), None, Some(monitor_enum_proc), data) };
    }
}

fn enum_display_device(parent: Option<&str>, index: u32) -> Option<DisplayRecord> {
    let parent_wide = parent.map(to_wide);
    let parent_ptr = parent_wide
        .as_ref()
        .map_or(PCWSTR::null(), |w| PCWSTR(w.as_ptr()));

    let mut device = DISPLAY_DEVICEW {
        cb: size_of::<DISPLAY_DEVICEW>() as u32,
        ..Default::default()
    };
    let found = unsafe { EnumDisplayDevicesW(parent_ptr, index, &mut device, 0) };
    if !found.as_bool() {
        return None;
    }

    Some(DisplayRecord {
        device_name: from_wide(&device.DeviceName),
        device_id: from_wide(&device.DeviceID),
        device_string: from_wide(&device.DeviceString),
        state_flags: DisplayStateFlags::from_bits_retain(device.StateFlags.0),
    })
}

unsafe extern "system" fn monitor_enum_proc(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let visitor = &mut *(data.0 as *mut RectVisitor<'_>);

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = size_of::<MONITORINFOEXW>() as u32;
    if !GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO).as_bool() {
        tracing::debug!("GetMonitorInfoW failed, skipping monitor");
        return TRUE;
    }

    let bounds = info.monitorInfo.rcMonitor;
    let rect = MonitorRect {
        device_name: from_wide(&info.szDevice),
        left: bounds.left,
        top: bounds.top,
        right: bounds.right,
        bottom: bounds.bottom,
    };

    match visitor(rect) {
        ControlFlow::Continue(()) => TRUE,
        ControlFlow::Break(()) => FALSE,
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_strings_stop_at_nul() {
        let mut buf = [0u16; 32];
        for (slot, unit) in buf.iter_mut().zip(r"\\.\DISPLAY1".encode_utf16()) {
            *slot = unit;
        }
        assert_eq!(from_wide(&buf), r"\\.\DISPLAY1");
        assert_eq!(to_wide("A"), vec![0x41, 0]);
    }
}

//! hmdscan platform core contracts.
//!
//! This crate contains the raw display records and the display source
//! contract used by discovery without coupling to a concrete OS backend.

use std::fmt;
use std::ops::ControlFlow;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub mod snapshot;

pub use snapshot::{AdapterSnapshot, DisplaySnapshot, SnapshotSource};

bitflags! {
    /// State flags reported for display adapters and monitors.
    ///
    /// Bit values match the Win32 `DISPLAY_DEVICE_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DisplayStateFlags: u32 {
        const ACTIVE = 0x0000_0001;
        const PRIMARY_DEVICE = 0x0000_0004;
        const MIRRORING_DRIVER = 0x0000_0008;
        const VGA_COMPATIBLE = 0x0000_0010;
        const REMOVABLE = 0x0000_0020;
        const MODESPRUNED = 0x0800_0000;
    }
}

impl fmt::Display for DisplayStateFlags {
    /// Space separated flag labels, e.g. `Active Primary`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABELS: [(DisplayStateFlags, &str); 6] = [
            (DisplayStateFlags::ACTIVE, "Active"),
            (DisplayStateFlags::MIRRORING_DRIVER, "Mirroring_Driver"),
            (DisplayStateFlags::MODESPRUNED, "ModesPruned"),
            (DisplayStateFlags::PRIMARY_DEVICE, "Primary"),
            (DisplayStateFlags::REMOVABLE, "Removable"),
            (DisplayStateFlags::VGA_COMPATIBLE, "VGA_Compatible"),
        ];

        let mut first = true;
        for (flag, label) in LABELS {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(label)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// One display adapter or monitor entry as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// OS device name, e.g. `\\.\DISPLAY1` or `\\.\DISPLAY1\Monitor0`.
    pub device_name: String,
    /// Hardware identifier, e.g. `MONITOR\OVR0003\{...}`.
    pub device_id: String,
    /// Human readable description.
    #[serde(default)]
    pub device_string: String,
    #[serde(default)]
    pub state_flags: DisplayStateFlags,
}

impl DisplayRecord {
    pub fn new(device_name: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            device_id: device_id.into(),
            device_string: String::new(),
            state_flags: DisplayStateFlags::empty(),
        }
    }

    pub fn with_description(mut self, device_string: impl Into<String>) -> Self {
        self.device_string = device_string.into();
        self
    }

    pub fn with_flags(mut self, state_flags: DisplayStateFlags) -> Self {
        self.state_flags = state_flags;
        self
    }
}

/// Bounding rectangle of a physical monitor in virtual desktop pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRect {
    /// Monitor device name, e.g. `\\.\DISPLAY1`.
    pub device_name: String,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorRect {
    /// Zero when `right` is left of `left`.
    pub fn width(&self) -> u32 {
        (i64::from(self.right) - i64::from(self.left)).max(0) as u32
    }

    /// Zero when `bottom` is above `top`.
    pub fn height(&self) -> u32 {
        (i64::from(self.bottom) - i64::from(self.top)).max(0) as u32
    }

    /// Top-left corner in virtual desktop pixels.
    pub fn origin(&self) -> (i32, i32) {
        (self.left, self.top)
    }
}

/// Host display enumeration primitive.
///
/// Implementations read live system state on every call. Indices are
/// zero-based and a source reports exhaustion by returning `None`.
pub trait DisplaySource {
    /// The `index`-th display adapter.
    fn adapter(&self, index: u32) -> Option<DisplayRecord>;

    /// The `index`-th monitor attached to the adapter named `adapter_name`.
    fn monitor(&self, adapter_name: &str, index: u32) -> Option<DisplayRecord>;

    /// Feed each monitor rectangle to `visit` until it breaks or the
    /// monitors run out.
    fn visit_monitor_rects(&self, visit: &mut dyn FnMut(MonitorRect) -> ControlFlow<()>);
}

impl<S: DisplaySource + ?Sized> DisplaySource for &S {
    fn adapter(&self, index: u32) -> Option<DisplayRecord> {
        (**self).adapter(index)
    }

    fn monitor(&self, adapter_name: &str, index: u32) -> Option<DisplayRecord> {
        (**self).monitor(adapter_name, index)
    }

    fn visit_monitor_rects(&self, visit: &mut dyn FnMut(MonitorRect) -> ControlFlow<()>) {
        (**self).visit_monitor_rects(visit)
    }
}

impl<S: DisplaySource + ?Sized> DisplaySource for Box<S> {
    fn adapter(&self, index: u32) -> Option<DisplayRecord> {
        (**self).adapter(index)
    }

    fn monitor(&self, adapter_name: &str, index: u32) -> Option<DisplayRecord> {
        (**self).monitor(adapter_name, index)
    }

    fn visit_monitor_rects(&self, visit: &mut dyn FnMut(MonitorRect) -> ControlFlow<()>) {
        (**self).visit_monitor_rects(visit)
    }
}

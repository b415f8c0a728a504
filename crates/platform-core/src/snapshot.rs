//! Recorded display topology that can be replayed as a [`DisplaySource`].
//!
//! Snapshots let discovery run against a captured machine layout on any
//! host, and back the fixture-driven tests.

use std::ops::ControlFlow;
use std::path::Path;

use hmdscan_common::error::{HmdscanError, HmdscanResult};
use serde::{Deserialize, Serialize};

use crate::{DisplayRecord, DisplaySource, MonitorRect};

/// A display adapter together with the monitors attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSnapshot {
    pub adapter: DisplayRecord,
    #[serde(default)]
    pub monitors: Vec<DisplayRecord>,
}

/// Full display topology of a host at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    #[serde(default)]
    pub adapters: Vec<AdapterSnapshot>,
    /// Monitor rectangles in host enumeration order.
    #[serde(default)]
    pub monitors: Vec<MonitorRect>,
}

impl DisplaySnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> HmdscanResult<Self> {
        serde_json::from_str(json).map_err(|e| HmdscanError::snapshot(e.to_string()))
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> HmdscanResult<Self> {
        if !path.exists() {
            return Err(HmdscanError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            adapters = snapshot.adapters.len(),
            monitors = snapshot.monitors.len(),
            "Loaded display snapshot"
        );
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> HmdscanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Capture the current state of `source` into a snapshot.
    pub fn capture<S: DisplaySource + ?Sized>(source: &S) -> Self {
        let mut adapters = Vec::new();
        let mut adapter_index = 0;
        while let Some(adapter) = source.adapter(adapter_index) {
            let mut monitors = Vec::new();
            let mut monitor_index = 0;
            while let Some(monitor) = source.monitor(&adapter.device_name, monitor_index) {
                monitors.push(monitor);
                monitor_index += 1;
            }
            adapters.push(AdapterSnapshot { adapter, monitors });
            adapter_index += 1;
        }

        let mut monitors = Vec::new();
        source.visit_monitor_rects(&mut |rect| {
            monitors.push(rect);
            ControlFlow::Continue(())
        });

        Self { adapters, monitors }
    }
}

/// [`DisplaySource`] backed by an in-memory [`DisplaySnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: DisplaySnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: DisplaySnapshot) -> Self {
        Self { snapshot }
    }

    /// A source with no adapters and no monitors.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }
}

impl From<DisplaySnapshot> for SnapshotSource {
    fn from(snapshot: DisplaySnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl DisplaySource for SnapshotSource {
    fn adapter(&self, index: u32) -> Option<DisplayRecord> {
        self.snapshot
            .adapters
            .get(index as usize)
            .map(|a| a.adapter.clone())
    }

    fn monitor(&self, adapter_name: &str, index: u32) -> Option<DisplayRecord> {
        self.snapshot
            .adapters
            .iter()
            .find(|a| a.adapter.device_name == adapter_name)
            .and_then(|a| a.monitors.get(index as usize))
            .cloned()
    }

    fn visit_monitor_rects(&self, visit: &mut dyn FnMut(MonitorRect) -> ControlFlow<()>) {
        for rect in &self.snapshot.monitors {
            if visit(rect.clone()).is_break() {
                break;
            }
        }
    }
}

//! Known-device registry contract and an in-memory implementation.
//!
//! Discovery only ever writes one thing through [`DeviceRegistry`]: the
//! `enumerated` flag of the placeholder HMD entry, when a pass finds no
//! physical HMD at all. Taking the registry as `&mut` keeps that write
//! exclusive; hosts sharing a registry across threads wrap it in a mutex
//! and hold the lock for the whole pass.

use serde::{Deserialize, Serialize};

use crate::discovery::HmdDescriptor;

/// Device id of an HMD entry synthesized without a physical display, for
/// example from a sensor's stored display info.
pub const PLACEHOLDER_DEVICE_ID: &str = "";

/// Kind of device an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Hmd,
    Sensor,
}

/// One device known to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub device_id: String,
    pub kind: DeviceKind,
    /// Set once the current pass has confirmed the device is present.
    pub enumerated: bool,
    /// Last descriptor seen for this device, if it was ever detected.
    pub descriptor: Option<HmdDescriptor>,
}

impl RegistryEntry {
    pub fn is_placeholder(&self) -> bool {
        self.device_id == PLACEHOLDER_DEVICE_ID
    }
}

/// Lookup handle into a device registry.
pub trait DeviceRegistry {
    /// Entry with the given id and kind. At most one such entry exists.
    fn find_device_mut(&mut self, device_id: &str, kind: DeviceKind)
        -> Option<&mut RegistryEntry>;
}

impl<R: DeviceRegistry + ?Sized> DeviceRegistry for &mut R {
    fn find_device_mut(
        &mut self,
        device_id: &str,
        kind: DeviceKind,
    ) -> Option<&mut RegistryEntry> {
        (**self).find_device_mut(device_id, kind)
    }
}

/// Mark the placeholder HMD entry as still present.
///
/// Returns whether such an entry existed.
pub fn reconcile_placeholder<R: DeviceRegistry + ?Sized>(registry: &mut R) -> bool {
    match registry.find_device_mut(PLACEHOLDER_DEVICE_ID, DeviceKind::Hmd) {
        Some(entry) => {
            entry.enumerated = true;
            tracing::debug!("No HMD display found, keeping placeholder HMD entry");
            true
        }
        None => false,
    }
}

/// What recording a detected HMD did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First time this device id was seen.
    Added,
    /// Known device, descriptor unchanged.
    Confirmed,
    /// Known device whose descriptor changed, e.g. after moving the display.
    Updated,
}

/// Registry held in memory, tracking presence across discovery passes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: Vec<RegistryEntry>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the placeholder entry for `kind` unless it already exists.
    pub fn insert_placeholder(&mut self, kind: DeviceKind) -> bool {
        if self.get(PLACEHOLDER_DEVICE_ID, kind).is_some() {
            return false;
        }
        self.entries.push(RegistryEntry {
            device_id: PLACEHOLDER_DEVICE_ID.to_string(),
            kind,
            enumerated: true,
            descriptor: None,
        });
        true
    }

    /// Clear the `enumerated` flag of every HMD entry ahead of a new pass.
    ///
    /// Other kinds are confirmed by their own enumerators, so an HMD pass
    /// leaves them as they are.
    pub fn begin_pass(&mut self) {
        for entry in self.entries.iter_mut().filter(|e| e.kind == DeviceKind::Hmd) {
            entry.enumerated = false;
        }
    }

    /// Record a detected HMD, adding it or confirming the existing entry.
    pub fn record(&mut self, descriptor: HmdDescriptor) -> RecordOutcome {
        if let Some(entry) = self.find_device_mut(&descriptor.device_id, DeviceKind::Hmd) {
            entry.enumerated = true;
            if entry.descriptor.as_ref() == Some(&descriptor) {
                return RecordOutcome::Confirmed;
            }
            entry.descriptor = Some(descriptor);
            return RecordOutcome::Updated;
        }

        tracing::debug!(device_id = %descriptor.device_id, "Adding HMD to registry");
        self.entries.push(RegistryEntry {
            device_id: descriptor.device_id.clone(),
            kind: DeviceKind::Hmd,
            enumerated: true,
            descriptor: Some(descriptor),
        });
        RecordOutcome::Added
    }

    pub fn get(&self, device_id: &str, kind: DeviceKind) -> Option<&RegistryEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.device_id == device_id)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entries not confirmed since the last [`begin_pass`](Self::begin_pass).
    pub fn removed(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().filter(|e| !e.enumerated)
    }

    /// Drop entries not confirmed by the last pass and return them.
    pub fn take_removed(&mut self) -> Vec<RegistryEntry> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.enumerated);
        self.entries = kept;
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DeviceRegistry for InMemoryRegistry {
    fn find_device_mut(
        &mut self,
        device_id: &str,
        kind: DeviceKind,
    ) -> Option<&mut RegistryEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.kind == kind && e.device_id == device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::HmdVariant;

    fn descriptor(id: &str, origin: (i32, i32)) -> HmdDescriptor {
        HmdDescriptor::new(id, r"\\.\DISPLAY2\Monitor0", HmdVariant::Dk2, origin)
    }

    #[test]
    fn record_adds_then_confirms_without_duplicates() {
        let mut registry = InMemoryRegistry::new();
        assert_eq!(registry.record(descriptor("OVR0003", (0, 0))), RecordOutcome::Added);

        registry.begin_pass();
        assert_eq!(registry.record(descriptor("OVR0003", (0, 0))), RecordOutcome::Confirmed);
        assert_eq!(registry.len(), 1);
        assert!(registry.entries()[0].enumerated);
    }

    #[test]
    fn moved_display_updates_descriptor() {
        let mut registry = InMemoryRegistry::new();
        registry.record(descriptor("OVR0003", (0, 0)));
        assert_eq!(
            registry.record(descriptor("OVR0003", (1920, 0))),
            RecordOutcome::Updated
        );
        let entry = registry.get("OVR0003", DeviceKind::Hmd).unwrap();
        assert_eq!(entry.descriptor.as_ref().unwrap().origin_x, 1920);
    }

    #[test]
    fn unconfirmed_entries_are_removed() {
        let mut registry = InMemoryRegistry::new();
        registry.record(descriptor("OVR0001", (0, 0)));
        registry.record(descriptor("OVR0003", (0, 0)));

        registry.begin_pass();
        registry.record(descriptor("OVR0003", (0, 0)));

        let removed: Vec<_> = registry.removed().map(|e| e.device_id.as_str()).collect();
        assert_eq!(removed, vec!["OVR0001"]);

        let taken = registry.take_removed();
        assert_eq!(taken.len(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.removed().next().is_none());
    }

    #[test]
    fn reconcile_marks_only_the_hmd_placeholder() {
        let mut registry = InMemoryRegistry::new();
        registry.insert_placeholder(DeviceKind::Sensor);
        assert!(!reconcile_placeholder(&mut registry));

        registry.insert_placeholder(DeviceKind::Hmd);
        registry.find_device_mut("", DeviceKind::Sensor).unwrap().enumerated = false;
        registry.begin_pass();
        assert!(reconcile_placeholder(&mut registry));

        assert!(registry.get("", DeviceKind::Hmd).unwrap().enumerated);
        assert!(!registry.get("", DeviceKind::Sensor).unwrap().enumerated);
    }

    #[test]
    fn begin_pass_leaves_other_kinds_alone() {
        let mut registry = InMemoryRegistry::new();
        registry.insert_placeholder(DeviceKind::Sensor);
        registry.record(descriptor("OVR0003", (0, 0)));

        registry.begin_pass();

        assert!(registry.get("", DeviceKind::Sensor).unwrap().enumerated);
        assert!(!registry.get("OVR0003", DeviceKind::Hmd).unwrap().enumerated);
        let removed: Vec<_> = registry.removed().map(|e| e.kind).collect();
        assert_eq!(removed, vec![DeviceKind::Hmd]);
    }

    #[test]
    fn placeholder_is_inserted_once() {
        let mut registry = InMemoryRegistry::new();
        assert!(registry.insert_placeholder(DeviceKind::Hmd));
        assert!(!registry.insert_placeholder(DeviceKind::Hmd));
        assert_eq!(registry.len(), 1);
        assert!(registry.entries()[0].is_placeholder());
    }
}

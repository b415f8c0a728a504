//! The discovery pass: adapters in, HMD descriptors out.

use std::collections::HashSet;

use hmdscan_common::config::{DiscoveryConfig, DEFAULT_MAX_MONITORS};
use hmdscan_platform_core::DisplaySource;
use serde::{Deserialize, Serialize};

use crate::correlate::correlate_origin;
use crate::enumerate::enumerate_displays;
use crate::identify::identify;
use crate::monitors::collect_monitor_rects;
use crate::params::{resolve_parameters, OpticalParameters};
use crate::registry::{reconcile_placeholder, DeviceRegistry, InMemoryRegistry, RecordOutcome};
use crate::variant::HmdVariant;

/// Resolved description of one discovered HMD, handed to the renderer.
///
/// Position comes from the correlated monitor; every other field comes
/// from the variant's optical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmdDescriptor {
    pub device_id: String,
    pub display_device_name: String,
    pub variant: HmdVariant,
    pub origin_x: i32,
    pub origin_y: i32,
    pub width_px: u32,
    pub height_px: u32,
    pub screen_width_m: f32,
    pub screen_height_m: f32,
    pub lens_separation_m: f32,
    pub lens_distance_m: f32,
}

impl HmdDescriptor {
    pub fn new(
        device_id: impl Into<String>,
        display_device_name: impl Into<String>,
        variant: HmdVariant,
        (origin_x, origin_y): (i32, i32),
    ) -> Self {
        let optics = resolve_parameters(variant);
        Self {
            device_id: device_id.into(),
            display_device_name: display_device_name.into(),
            variant,
            origin_x,
            origin_y,
            width_px: optics.width_px,
            height_px: optics.height_px,
            screen_width_m: optics.screen_width_m,
            screen_height_m: optics.screen_height_m,
            lens_separation_m: optics.lens_separation_m,
            lens_distance_m: optics.lens_distance_m,
        }
    }

    pub fn optics(&self) -> OpticalParameters {
        OpticalParameters {
            width_px: self.width_px,
            height_px: self.height_px,
            screen_width_m: self.screen_width_m,
            screen_height_m: self.screen_height_m,
            lens_separation_m: self.lens_separation_m,
            lens_distance_m: self.lens_distance_m,
        }
    }
}

/// Receives each descriptor as soon as its adapter is resolved.
pub trait DescriptorVisitor {
    fn visit(&mut self, descriptor: HmdDescriptor);
}

impl<F: FnMut(HmdDescriptor)> DescriptorVisitor for F {
    fn visit(&mut self, descriptor: HmdDescriptor) {
        self(descriptor)
    }
}

/// Registry changes made by [`HmdDiscovery::refresh`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub added: Vec<String>,
    pub confirmed: Vec<String>,
    pub updated: Vec<String>,
    /// Entries no longer present after this pass.
    pub removed: Vec<String>,
    /// Whether the placeholder HMD entry was kept alive.
    pub placeholder_kept: bool,
}

/// Discovers HMDs on one display source.
///
/// A pass runs synchronously to completion. Passes that share a registry
/// must not overlap.
#[derive(Debug, Clone)]
pub struct HmdDiscovery<S> {
    source: S,
    max_monitors: usize,
}

impl<S: DisplaySource> HmdDiscovery<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_monitors: DEFAULT_MAX_MONITORS,
        }
    }

    pub fn with_config(source: S, config: &DiscoveryConfig) -> Self {
        Self {
            source,
            max_monitors: config.max_monitors,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn max_monitors(&self) -> usize {
        self.max_monitors
    }

    /// Run one pass, handing each HMD to `visitor` in adapter order.
    ///
    /// Each adapter yields at most one descriptor, from its first monitor
    /// that identifies as an HMD. When no adapter yields one, the
    /// placeholder HMD entry in `registry` (if any) is marked enumerated so
    /// it is not reported as removed. Nothing else in `registry` is touched.
    pub fn discover<V, R>(&self, visitor: &mut V, registry: &mut R)
    where
        V: DescriptorVisitor + ?Sized,
        R: DeviceRegistry + ?Sized,
    {
        let monitors = collect_monitor_rects(&self.source, self.max_monitors);
        let mut found_hmd = false;

        for (adapter, adapter_monitors) in enumerate_displays(&self.source) {
            tracing::trace!(
                name = %adapter.device_name,
                id = %adapter.device_id,
                description = %adapter.device_string,
                flags = %adapter.state_flags,
                "Display adapter"
            );

            for monitor in adapter_monitors {
                tracing::trace!(
                    name = %monitor.device_name,
                    id = %monitor.device_id,
                    description = %monitor.device_string,
                    flags = %monitor.state_flags,
                    "Monitor"
                );

                let Some(variant) = identify(&monitor.device_id) else {
                    continue;
                };

                let origin = correlate_origin(&monitor.device_name, monitors.as_slice());
                let descriptor =
                    HmdDescriptor::new(monitor.device_id, monitor.device_name, variant, origin);

                tracing::info!(
                    device_id = %descriptor.device_id,
                    display = %descriptor.display_device_name,
                    %variant,
                    "HMD found"
                );

                visitor.visit(descriptor);
                found_hmd = true;
                break;
            }
        }

        if !found_hmd {
            reconcile_placeholder(registry);
        }
    }

    /// Run one pass and collect the descriptors instead of visiting them.
    pub fn discover_all<R>(&self, registry: &mut R) -> Vec<HmdDescriptor>
    where
        R: DeviceRegistry + ?Sized,
    {
        let mut found = Vec::new();
        self.discover(
            &mut |descriptor: HmdDescriptor| found.push(descriptor),
            registry,
        );
        found
    }

    /// Run one full registry cycle: clear presence, discover, record every
    /// HMD found, and report what changed.
    ///
    /// When several adapters report the same device id in one pass, the
    /// first adapter's descriptor is recorded and the rest are skipped.
    pub fn refresh(&self, registry: &mut InMemoryRegistry) -> PassReport {
        registry.begin_pass();
        let found = self.discover_all(registry);

        let mut report = PassReport::default();
        let mut recorded = HashSet::new();
        for descriptor in found {
            if !recorded.insert(descriptor.device_id.clone()) {
                tracing::debug!(
                    device_id = %descriptor.device_id,
                    display = %descriptor.display_device_name,
                    "Device already recorded this pass, skipping"
                );
                continue;
            }
            let device_id = descriptor.device_id.clone();
            match registry.record(descriptor) {
                RecordOutcome::Added => report.added.push(device_id),
                RecordOutcome::Confirmed => report.confirmed.push(device_id),
                RecordOutcome::Updated => report.updated.push(device_id),
            }
        }

        report.placeholder_kept = registry
            .entries()
            .iter()
            .any(|e| e.is_placeholder() && e.enumerated);
        report.removed = registry
            .removed()
            .map(|e| e.device_id.clone())
            .collect();

        if !report.removed.is_empty() {
            tracing::info!(removed = ?report.removed, "Devices no longer present");
        }
        report
    }
}

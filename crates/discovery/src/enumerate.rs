//! Lazy walk over display adapters and their monitor sub-records.

use std::iter::FusedIterator;

use hmdscan_platform_core::{DisplayRecord, DisplaySource};

/// Iterator over the adapters of a [`DisplaySource`].
///
/// Each item pairs an adapter with a lazy iterator over its monitors.
/// Records are read from the source as the iterators advance; walk again
/// with [`enumerate_displays`] to observe later changes.
#[derive(Debug)]
pub struct DisplayRecords<'a, S: ?Sized> {
    source: &'a S,
    next_index: u32,
    done: bool,
}

/// Iterator over the monitor sub-records of one adapter.
#[derive(Debug)]
pub struct MonitorRecords<'a, S: ?Sized> {
    source: &'a S,
    adapter_name: String,
    next_index: u32,
    done: bool,
}

/// Start enumerating the adapters of `source`.
pub fn enumerate_displays<S: DisplaySource + ?Sized>(source: &S) -> DisplayRecords<'_, S> {
    DisplayRecords {
        source,
        next_index: 0,
        done: false,
    }
}

impl<'a, S: DisplaySource + ?Sized> Iterator for DisplayRecords<'a, S> {
    type Item = (DisplayRecord, MonitorRecords<'a, S>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(adapter) = self.source.adapter(self.next_index) else {
            self.done = true;
            return None;
        };
        self.next_index += 1;

        let monitors = MonitorRecords {
            source: self.source,
            adapter_name: adapter.device_name.clone(),
            next_index: 0,
            done: false,
        };
        Some((adapter, monitors))
    }
}

impl<S: DisplaySource + ?Sized> FusedIterator for DisplayRecords<'_, S> {}

impl<'a, S: ?Sized> MonitorRecords<'a, S> {
    /// Name of the adapter these monitors hang off.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }
}

impl<S: DisplaySource + ?Sized> Iterator for MonitorRecords<'_, S> {
    type Item = DisplayRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.monitor(&self.adapter_name, self.next_index) {
            Some(monitor) => {
                self.next_index += 1;
                Some(monitor)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<S: DisplaySource + ?Sized> FusedIterator for MonitorRecords<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use hmdscan_platform_core::{AdapterSnapshot, DisplaySnapshot, SnapshotSource};

    fn source() -> SnapshotSource {
        let adapter = |n: u32, monitors: u32| AdapterSnapshot {
            adapter: DisplayRecord::new(format!(r"\\.\DISPLAY{n}"), r"PCI\VEN_1002"),
            monitors: (0..monitors)
                .map(|m| {
                    DisplayRecord::new(
                        format!(r"\\.\DISPLAY{n}\Monitor{m}"),
                        format!(r"MONITOR\GEN{n}{m}"),
                    )
                })
                .collect(),
        };
        SnapshotSource::new(DisplaySnapshot {
            adapters: vec![adapter(1, 2), adapter(2, 0), adapter(3, 1)],
            monitors: Vec::new(),
        })
    }

    #[test]
    fn yields_adapters_in_order_with_their_monitors() {
        let source = source();
        let walked: Vec<(String, Vec<String>)> = enumerate_displays(&source)
            .map(|(adapter, monitors)| (adapter.device_name, monitors.map(|m| m.device_id).collect()))
            .collect();

        let names: Vec<&str> = walked.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, [r"\\.\DISPLAY1", r"\\.\DISPLAY2", r"\\.\DISPLAY3"]);
        assert_eq!(walked[0].1, [r"MONITOR\GEN10", r"MONITOR\GEN11"]);
        assert!(walked[1].1.is_empty());
        assert_eq!(walked[2].1, [r"MONITOR\GEN30"]);
    }

    #[test]
    fn monitor_iterator_knows_its_adapter() {
        let source = source();
        let (_, monitors) = enumerate_displays(&source).next().unwrap();
        assert_eq!(monitors.adapter_name(), r"\\.\DISPLAY1");
    }

    #[test]
    fn exhausted_iterators_stay_exhausted() {
        let source = source();
        let mut adapters = enumerate_displays(&source);
        assert_eq!(adapters.by_ref().count(), 3);
        assert!(adapters.next().is_none());

        let (_, mut monitors) = enumerate_displays(&source).nth(2).unwrap();
        assert!(monitors.next().is_some());
        assert!(monitors.next().is_none());
        assert!(monitors.next().is_none());
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert_eq!(enumerate_displays(&SnapshotSource::empty()).count(), 0);
    }
}

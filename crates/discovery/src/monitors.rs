//! Bounded collection of physical monitor rectangles.

use std::ops::ControlFlow;

use hmdscan_common::config::DEFAULT_MAX_MONITORS;
use hmdscan_platform_core::{DisplaySource, MonitorRect};

/// Monitor rectangles gathered in one pass, never more than `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSet {
    rects: Vec<MonitorRect>,
    capacity: usize,
    truncated: bool,
}

impl MonitorSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rects: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Append `rect`, handing it back when the set is already full.
    pub fn try_push(&mut self, rect: MonitorRect) -> Result<(), MonitorRect> {
        if self.rects.len() >= self.capacity {
            self.truncated = true;
            return Err(rect);
        }
        self.rects.push(rect);
        Ok(())
    }

    pub fn as_slice(&self) -> &[MonitorRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether at least one monitor was dropped because the set was full.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for MonitorSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_MONITORS)
    }
}

/// Collect up to `max_monitors` monitor rectangles from `source`.
///
/// Enumeration stops at the first monitor past the bound; the overflow is
/// dropped, not reported as an error.
pub fn collect_monitor_rects<S: DisplaySource + ?Sized>(
    source: &S,
    max_monitors: usize,
) -> MonitorSet {
    let mut set = MonitorSet::with_capacity(max_monitors);
    source.visit_monitor_rects(&mut |rect| match set.try_push(rect) {
        Ok(()) => ControlFlow::Continue(()),
        Err(dropped) => {
            tracing::debug!(
                monitor = %dropped.device_name,
                max_monitors,
                "Monitor bound reached, ignoring remaining monitors"
            );
            ControlFlow::Break(())
        }
    });
    set
}

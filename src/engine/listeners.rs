// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Status listener registry - fan-out of engine state changes

use std::collections::HashMap;

use tracing::{info, warn};

use super::AlarmStatus;

/// Observer over engine state changes
///
/// All callbacks have empty default bodies so implementors subscribe only
/// to what they care about. Callbacks run synchronously on the engine's
/// call path; keep them cheap.
pub trait StatusListener {
    /// The alarm status was persisted with a new value
    fn on_alarm_status_changed(&self, _status: AlarmStatus) {}

    /// A sensor flipped its activation flag, or the roster changed
    fn on_sensor_state_changed(&self) {}

    /// The classifier delivered a verdict for a processed frame
    fn on_cat_detected(&self, _cat_detected: bool) {}
}

/// Opaque handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Handle-keyed listener set with broadcast
///
/// Registration hands back a [`ListenerHandle`]; removing a handle that was
/// already removed is a no-op, so callers never have to track liveness.
pub struct ListenerRegistry {
    next_handle: u64,
    listeners: HashMap<u64, Box<dyn StatusListener>>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            listeners: HashMap::new(),
        }
    }

    /// Register a listener and return its handle
    pub fn add(&mut self, listener: Box<dyn StatusListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.insert(handle.0, listener);
        handle
    }

    /// Drop a listener; returns false when the handle was already gone
    pub fn remove(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(&handle.0).is_some()
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Broadcast an alarm-status change
    pub fn notify_alarm_status(&self, status: AlarmStatus) {
        for listener in self.listeners.values() {
            listener.on_alarm_status_changed(status);
        }
    }

    /// Broadcast a sensor state change
    pub fn notify_sensor_state(&self) {
        for listener in self.listeners.values() {
            listener.on_sensor_state_changed();
        }
    }

    /// Broadcast a classifier verdict
    pub fn notify_cat_detected(&self, cat_detected: bool) {
        for listener in self.listeners.values() {
            listener.on_cat_detected(cat_detected);
        }
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener that reports transitions through the tracing log
pub struct LogListener;

impl StatusListener for LogListener {
    fn on_alarm_status_changed(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("ALARM: {}", status.description()),
            _ => info!("alarm status: {}", status.description()),
        }
    }

    fn on_cat_detected(&self, cat_detected: bool) {
        if cat_detected {
            info!("camera: cat detected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        alarms: Rc<RefCell<Vec<AlarmStatus>>>,
    }

    impl StatusListener for Recorder {
        fn on_alarm_status_changed(&self, status: AlarmStatus) {
            self.alarms.borrow_mut().push(status);
        }
    }

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let mut registry = ListenerRegistry::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        registry.add(Box::new(Recorder { alarms: first.clone() }));
        registry.add(Box::new(Recorder { alarms: second.clone() }));

        registry.notify_alarm_status(AlarmStatus::PendingAlarm);

        assert_eq!(*first.borrow(), vec![AlarmStatus::PendingAlarm]);
        assert_eq!(*second.borrow(), vec![AlarmStatus::PendingAlarm]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = ListenerRegistry::new();
        let handle = registry.add(Box::new(LogListener));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(handle));
        assert!(!registry.remove(handle));
        assert!(registry.is_empty());

        // Broadcasting into an empty registry is fine
        registry.notify_alarm_status(AlarmStatus::Alarm);
    }

    #[test]
    fn test_removed_listener_hears_nothing() {
        let mut registry = ListenerRegistry::new();
        let alarms = Rc::new(RefCell::new(Vec::new()));
        let handle = registry.add(Box::new(Recorder { alarms: alarms.clone() }));
        registry.remove(handle);

        registry.notify_alarm_status(AlarmStatus::Alarm);
        assert!(alarms.borrow().is_empty());
    }
}

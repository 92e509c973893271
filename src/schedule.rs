use ahash::AHashMap;
use slab::Slab;

use crate::*;

/// Returned by [`Window::tick_add`]. Equal for every registration of the same callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(CallbackId);

/// Callbacks that run once per frame, unconditionally. A set: each callback identity is stored once.
#[derive(Default)]
pub(crate) struct Ticks {
    callbacks: AHashMap<CallbackId, Callback>,
}

impl Ticks {
    pub fn add(&mut self, callback: &Callback) -> TickHandle {
        let id = callback.id();
        self.callbacks.entry(id).or_insert_with(|| callback.clone());
        return TickHandle(id);
    }

    pub fn remove(&mut self, handle: TickHandle) -> bool {
        return self.callbacks.remove(&handle.0).is_some();
    }

    pub fn len(&self) -> usize {
        return self.callbacks.len();
    }

    /// The callbacks to run this frame. Taken as a copy so they can register or remove ticks while running.
    pub fn snapshot(&self) -> Vec<Callback> {
        return self.callbacks.values().cloned().collect();
    }
}

/// Returned by [`Window::after`], to cancel the deferred callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AfterHandle(usize);

struct DeferredRecord {
    callback: Callback,
    interval: f64,
    last_fired: f64,
}

/// Callbacks that fire whenever at least `interval` seconds passed since they last fired.
///
/// Checked once per frame. If frames are slower than the interval, firings are skipped, not queued.
#[derive(Default)]
pub(crate) struct Deferred {
    records: Slab<DeferredRecord>,
}

impl Deferred {
    pub fn add(&mut self, callback: Callback, interval: f64, now: f64) -> AfterHandle {
        let key = self.records.insert(DeferredRecord { callback, interval, last_fired: now });
        return AfterHandle(key);
    }

    pub fn cancel(&mut self, handle: AfterHandle) -> bool {
        return self.records.try_remove(handle.0).is_some();
    }

    /// `false` once the handle was cancelled.
    pub fn contains(&self, handle: AfterHandle) -> bool {
        return self.records.contains(handle.0);
    }

    /// Marks every record that is due at `now` as fired, and returns their handles and callbacks.
    ///
    /// An earlier callback in the list can cancel a later one: check [`Deferred::contains`] before invoking.
    pub fn take_due(&mut self, now: f64) -> Vec<(AfterHandle, Callback)> {
        let mut due = Vec::new();
        for (key, record) in self.records.iter_mut() {
            if now - record.last_fired >= record.interval {
                record.last_fired = now;
                due.push((AfterHandle(key), record.callback.clone()));
            }
        }
        return due;
    }
}

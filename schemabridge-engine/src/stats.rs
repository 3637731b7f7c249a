//! Boundary accounting.
//!
//! Process-global counters for handle and array lifecycles. Leak tests and
//! exactly-once tests assert that creations and destructions balance after a
//! workload, which replaces external RSS sampling with a deterministic
//! in-process check.

use std::sync::atomic::{AtomicUsize, Ordering};

static HANDLES_CREATED: AtomicUsize = AtomicUsize::new(0);
static HANDLES_DESTROYED: AtomicUsize = AtomicUsize::new(0);
static ARRAYS_ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static ARRAYS_FREED: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn record_handle_created() {
    HANDLES_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_handle_destroyed() {
    HANDLES_DESTROYED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_array_allocated() {
    ARRAYS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_array_freed() {
    ARRAYS_FREED.fetch_add(1, Ordering::Relaxed);
}

/// Total handles successfully created since process start.
pub fn handles_created() -> usize {
    HANDLES_CREATED.load(Ordering::Relaxed)
}

/// Total handles destroyed since process start.
pub fn handles_destroyed() -> usize {
    HANDLES_DESTROYED.load(Ordering::Relaxed)
}

/// Handles currently alive (created minus destroyed).
pub fn live_handles() -> usize {
    handles_created().saturating_sub(handles_destroyed())
}

/// Total error arrays handed out since process start.
pub fn arrays_allocated() -> usize {
    ARRAYS_ALLOCATED.load(Ordering::Relaxed)
}

/// Total error arrays released since process start.
pub fn arrays_freed() -> usize {
    ARRAYS_FREED.load(Ordering::Relaxed)
}

/// Error arrays currently alive (allocated minus freed).
pub fn live_arrays() -> usize {
    arrays_allocated().saturating_sub(arrays_freed())
}

//! Process-wide shutdown coordination.
//! The Ctrl-C handler sets the flag; `remove` and `tree` check it between
//! paths/nodes so an interrupted cleanup stops before the next deletion
//! rather than in the middle of one.
//!
//! Relaxed atomics are sufficient for a one-way "stop" flag.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

//! System allocator shim for arena backing blocks.
//!
//! Arenas request their backing block here exactly once at construction
//! and return it exactly once at dispose. The shim wraps `std::alloc`
//! with validated layouts and keeps per-[`AllocKind`] outstanding-byte
//! counters so tests can assert that every block comes back.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

static TRANSIENT_OUTSTANDING: AtomicUsize = AtomicUsize::new(0);
static PERSISTENT_OUTSTANDING: AtomicUsize = AtomicUsize::new(0);

/// Lifetime policy for an arena's backing block.
///
/// Recorded on the arena at construction so dispose returns the block to
/// the right accounting bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocKind {
    /// Short-lived blocks cycled every frame or tick.
    Transient,
    /// Blocks that live for the duration of the process or scene.
    Persistent,
}

fn counter(kind: AllocKind) -> &'static AtomicUsize {
    match kind {
        AllocKind::Transient => &TRANSIENT_OUTSTANDING,
        AllocKind::Persistent => &PERSISTENT_OUTSTANDING,
    }
}

/// Request a `size`-byte block aligned to `align`.
///
/// Returns `None` for zero sizes, non-power-of-two alignments, layouts
/// the platform rejects, and allocation failure. Never panics.
pub fn aligned_alloc(size: usize, align: usize, kind: AllocKind) -> Option<NonNull<u8>> {
    if size == 0 || !align.is_power_of_two() {
        return None;
    }
    let layout = Layout::from_size_align(size, align).ok()?;
    // SAFETY: layout has nonzero size, checked above.
    let ptr = unsafe { alloc::alloc(layout) };
    let ptr = NonNull::new(ptr)?;
    counter(kind).fetch_add(size, Ordering::Relaxed);
    Some(ptr)
}

/// Return a block obtained from [`aligned_alloc`].
///
/// # Safety
///
/// `ptr` must have come from a successful `aligned_alloc(size, align, kind)`
/// call with these exact arguments, and must not have been freed already.
pub unsafe fn free(ptr: NonNull<u8>, size: usize, align: usize, kind: AllocKind) {
    // SAFETY: the caller contract guarantees this is the layout the block
    // was allocated with, so it is valid by construction.
    let layout = unsafe { Layout::from_size_align_unchecked(size, align) };
    // SAFETY: ptr was returned by alloc::alloc with this layout and is
    // freed exactly once, per the caller contract.
    unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    counter(kind).fetch_sub(size, Ordering::Relaxed);
}

/// Bytes currently allocated and not yet freed for the given kind.
pub fn outstanding_bytes(kind: AllocKind) -> usize {
    counter(kind).load(Ordering::Relaxed)
}

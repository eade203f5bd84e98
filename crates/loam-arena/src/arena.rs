//! The bump-pointer arena.
//!
//! An [`Arena`] owns one contiguous aligned block and hands out
//! sub-ranges by aligning and advancing a single offset. Nothing is ever
//! freed individually: [`Arena::reset`] rewinds the offset to zero and
//! [`Arena::dispose`] returns the whole block to the system allocator.
//!
//! # Borrow design
//!
//! Bump state lives in `Cell`s so [`Arena::allocate`] takes `&self` — a
//! short-lived shared borrow with no retention — letting many views and
//! sequences borrow one arena at once. `reset` and `dispose` take
//! `&mut self`, so the borrow checker statically rejects any use of a
//! view across a reset or dispose. The arena is `Send` but not `Sync`:
//! mutation of a single arena is single-threaded by construction.

use std::cell::Cell;
use std::ptr::NonNull;

use tracing::{debug, error, info, warn};

use loam_core::config;
use loam_core::{ArenaError, ArenaId};

use crate::align::{align_up, smart_align_for};
use crate::monitor::{self, AllocationRecord};
use crate::system::{self, AllocKind};
use crate::view::Plain;

/// Default backing-block alignment: one cache line.
pub const DEFAULT_ALIGNMENT: usize = 64;

/// A fixed-capacity bump allocator over one contiguous aligned block.
///
/// Created with a caller-assigned [`ArenaId`], a byte capacity, and an
/// [`AllocKind`] naming the lifetime policy of the backing block.
/// Allocation is constant-time: align the offset, check capacity, advance.
/// A rejected call (bad alignment, out of memory) leaves the arena
/// bitwise unchanged and usable.
pub struct Arena {
    id: ArenaId,
    base: NonNull<u8>,
    capacity: usize,
    alignment: usize,
    kind: AllocKind,
    /// Next free byte index. Monotone between resets.
    offset: Cell<usize>,
    /// Bytes skipped for alignment padding since creation or last reset.
    waste: Cell<usize>,
    /// Largest offset ever reached. Survives resets.
    high_water: Cell<usize>,
    live: bool,
}

// SAFETY: the arena exclusively owns its backing block; moving it to
// another thread moves the only handle to that block. `Cell` state keeps
// it !Sync, which is the intended single-threaded-mutation model.
unsafe impl Send for Arena {}

impl Arena {
    /// Create an arena with the default cache-line backing alignment.
    pub fn new(id: ArenaId, capacity: usize, kind: AllocKind) -> Result<Self, ArenaError> {
        Self::with_alignment(id, capacity, kind, DEFAULT_ALIGNMENT)
    }

    /// Create an arena whose backing block is aligned to `alignment`.
    ///
    /// `alignment` must be a power of two (`InvalidAlignment` otherwise).
    /// A zero `capacity` is accepted and produces an arena that can satisfy
    /// only zero-size allocations.
    pub fn with_alignment(
        id: ArenaId,
        capacity: usize,
        kind: AllocKind,
        alignment: usize,
    ) -> Result<Self, ArenaError> {
        if !alignment.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment {
                requested: alignment,
            });
        }

        let base = if capacity == 0 {
            // Zero-capacity arenas never dereference their base; an aligned
            // dangling pointer stands in for a real block.
            NonNull::new(alignment as *mut u8).expect("alignment is a nonzero power of two")
        } else {
            match system::aligned_alloc(capacity, alignment, kind) {
                Some(ptr) => ptr,
                None => {
                    if config::logging_enabled() {
                        error!(arena = %id, capacity, alignment, "backing block allocation failed");
                    }
                    return Err(ArenaError::OutOfMemory {
                        requested: capacity,
                    });
                }
            }
        };

        if config::logging_enabled() {
            info!(arena = %id, capacity, alignment, kind = ?kind, "arena created");
        }

        Ok(Self {
            id,
            base,
            capacity,
            alignment,
            kind,
            offset: Cell::new(0),
            waste: Cell::new(0),
            high_water: Cell::new(0),
            live: true,
        })
    }

    /// Allocate `size` bytes aligned to `align`, labelled `tag`.
    ///
    /// Returns `None` without mutating any state when `align` is not a
    /// power of two (logged as a warning — a bad caller does not poison
    /// the arena) or when the aligned request does not fit (logged as an
    /// error). A zero `size` succeeds at the current offset without
    /// advancing it, and still records, so tag-only markers stay visible
    /// in the monitor.
    ///
    /// Offsets are aligned on the absolute address, so requests stricter
    /// than the backing-block alignment still come back correctly aligned.
    pub fn allocate(&self, size: usize, align: usize, tag: &str) -> Option<NonNull<u8>> {
        if !self.live {
            if config::logging_enabled() {
                error!(arena = %self.id, tag, "allocate on disposed arena");
            }
            return None;
        }
        if !align.is_power_of_two() {
            if config::logging_enabled() {
                warn!(arena = %self.id, align, tag, "alignment is not a power of two; allocation refused");
            }
            return None;
        }

        let offset = self.offset.get();

        if size == 0 {
            if config::allocations_tracked() {
                monitor::record(AllocationRecord {
                    arena: self.id,
                    offset,
                    size: 0,
                    alignment: align,
                    padding: 0,
                    tag: tag.to_owned(),
                });
            }
            // SAFETY: offset <= capacity, so base + offset is within the
            // block or one past its end; a zero-size pointer is never read.
            return Some(unsafe { NonNull::new_unchecked(self.base.as_ptr().add(offset)) });
        }

        let base_addr = self.base.as_ptr() as usize;
        let fitted = base_addr
            .checked_add(offset)
            .and_then(|addr| align_up(addr, align))
            .map(|addr| addr - base_addr)
            .and_then(|aligned| aligned.checked_add(size).map(|end| (aligned, end)));
        let (aligned, end) = match fitted {
            Some(pair) if pair.1 <= self.capacity => pair,
            _ => {
                if config::logging_enabled() {
                    error!(
                        arena = %self.id,
                        size,
                        align,
                        tag,
                        offset,
                        capacity = self.capacity,
                        "out of memory"
                    );
                }
                return None;
            }
        };

        let padding = aligned - offset;
        self.offset.set(end);
        if end > self.high_water.get() {
            self.high_water.set(end);
        }
        if config::alignment_loss_tracked() {
            self.waste.set(self.waste.get() + padding);
        }
        if config::allocations_tracked() {
            monitor::record(AllocationRecord {
                arena: self.id,
                offset: aligned,
                size,
                alignment: align,
                padding,
                tag: tag.to_owned(),
            });
        }
        if config::logging_enabled() {
            debug!(arena = %self.id, offset = aligned, size, align, tag, "allocation");
        }

        // SAFETY: aligned + size <= capacity, so the range lies inside the
        // live backing block.
        Some(unsafe { NonNull::new_unchecked(self.base.as_ptr().add(aligned)) })
    }

    /// Allocate room for one `T` with smart alignment.
    ///
    /// The alignment is [`smart_align_for`]`(size_of::<T>())` — the
    /// natural size for small scalars, the cache-line default for large
    /// structs — raised to `align_of::<T>()` when the type demands more.
    pub fn smart_alloc<T: Plain>(&self, tag: &str) -> Option<NonNull<T>> {
        self.smart_alloc_n(1, tag)
    }

    /// Allocate room for `n` elements of `T` with smart alignment.
    ///
    /// `n == 0` and zero-sized `T` degrade to a zero-size allocation.
    pub fn smart_alloc_n<T: Plain>(&self, n: usize, tag: &str) -> Option<NonNull<T>> {
        let size = std::mem::size_of::<T>().checked_mul(n)?;
        let align = smart_align_for(std::mem::size_of::<T>()).max(std::mem::align_of::<T>());
        self.allocate(size, align, tag).map(NonNull::cast)
    }

    /// Rewind the arena to empty.
    ///
    /// Sets `offset` and `waste` to zero and drops this arena's monitor
    /// records. The backing bytes are left as-is — nothing is zeroed.
    /// Taking `&mut self` means every outstanding view or sequence rooted
    /// here must already be gone; the borrow checker enforces it.
    pub fn reset(&mut self) {
        self.offset.set(0);
        self.waste.set(0);
        monitor::clear(self.id);
        if config::logging_enabled() {
            info!(arena = %self.id, "arena reset");
        }
    }

    /// Return the backing block to the system allocator.
    ///
    /// Idempotent: the second and later calls are no-ops. Also invoked by
    /// `Drop`, so an arena going out of scope cleans up after itself.
    pub fn dispose(&mut self) {
        if !self.live {
            return;
        }
        if self.capacity > 0 {
            // SAFETY: base came from system::aligned_alloc with exactly
            // this size, alignment, and kind, and has not been freed —
            // `live` guards the only free path.
            unsafe { system::free(self.base, self.capacity, self.alignment, self.kind) };
        }
        self.live = false;
        monitor::clear(self.id);
        if config::logging_enabled() {
            info!(arena = %self.id, "arena disposed");
        }
    }

    /// This arena's caller-assigned identifier.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total byte capacity, fixed for the arena's lifetime.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Next free byte index.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Bytes still available (ignoring any padding a future request needs).
    pub fn remaining(&self) -> usize {
        self.capacity - self.offset.get()
    }

    /// Padding bytes accumulated since creation or the last reset.
    pub fn waste(&self) -> usize {
        self.waste.get()
    }

    /// Largest offset ever reached, across resets.
    pub fn high_water(&self) -> usize {
        self.high_water.get()
    }

    /// Whether the backing block is still held.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The backing block's lifetime policy.
    pub fn kind(&self) -> AllocKind {
        self.kind
    }

    /// The backing block's alignment.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Memory owned by this arena in bytes.
    pub fn memory_bytes(&self) -> usize {
        if self.live {
            self.capacity
        } else {
            0
        }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("offset", &self.offset.get())
            .field("waste", &self.waste.get())
            .field("high_water", &self.high_water.get())
            .field("kind", &self.kind)
            .field("live", &self.live)
            .finish()
    }
}

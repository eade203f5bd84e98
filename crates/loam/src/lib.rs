//! Loam: bump-pointer memory arenas with typed unmanaged views.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the loam sub-crates. For most users, adding `loam` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! // One up-front block backs the whole frame's scratch allocations.
//! let mut frame = Arena::new(ArenaId(0), 64 * 1024, AllocKind::Transient).unwrap();
//!
//! // A fixed-length height field, zero-initialised.
//! let mut heights = ArenaView::<f32>::new(&frame, 256, "heights").unwrap();
//! heights.fill(0.5);
//! assert_eq!(heights[255], 0.5);
//!
//! // A bounded open set for pathfinding.
//! let mut open = ArenaSeq::<u32>::new(&frame, 32, "open-set").unwrap();
//! open.push(7).unwrap();
//! open.push(9).unwrap();
//! assert_eq!(open.pop().unwrap(), 9);
//!
//! // End of frame: drop the views, rewind the arena, go again.
//! drop(heights);
//! drop(open);
//! frame.reset();
//! assert_eq!(frame.offset(), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `loam-arena` | `Arena`, typed views/sequences, the allocation monitor |
//! | [`types`] | `loam-core` | `ArenaId`, error types, runtime configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena storage, typed views, and the allocation monitor (`loam-arena`).
///
/// The [`arena::monitor`] module holds the process-wide allocation
/// registry; everything else here is also available in the [`prelude`].
pub use loam_arena as arena;

/// Core types and runtime configuration (`loam-core`).
///
/// Contains [`types::ArenaId`], the error enums, and
/// [`types::RuntimeConfig`] with its process-global toggles.
pub use loam_core as types;

/// Common imports for typical loam usage.
///
/// ```rust
/// use loam::prelude::*;
/// ```
///
/// This imports the arena, the typed containers, the allocation-kind and
/// id types, and the runtime configuration snapshot.
pub mod prelude {
    // Allocator and typed containers
    pub use loam_arena::{AllocKind, Arena, ArenaSeq, ArenaView, Plain};

    // Core types
    pub use loam_core::{ArenaId, RuntimeConfig};

    // Errors
    pub use loam_core::{ArenaError, SeqError, ViewError};
}

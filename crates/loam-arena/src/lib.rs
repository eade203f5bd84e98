//! Bump-pointer arena allocation with typed unmanaged views.
//!
//! An [`Arena`] owns one contiguous, aligned byte block and carves
//! allocations out of it by advancing a single offset. Individual
//! allocations are never freed; the arena is [`reset`](Arena::reset) or
//! [`disposed`](Arena::dispose) as a whole, giving deterministic per-cycle
//! memory behaviour for per-frame scratch buffers, simulation ticks, and
//! procedural-generation working sets.
//!
//! Typed access goes through [`ArenaView`] (fixed-length window) and
//! [`ArenaSeq`] (fixed-capacity sequence), both borrowing the arena for
//! their whole lifetime so the borrow checker rules out use-after-reset.
//! The [`monitor`] keeps a process-wide registry of allocation records for
//! diagnostics.
//!
//! This is the one crate in the loam workspace that contains `unsafe`
//! code; every `unsafe` block carries a `SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod align;
pub mod arena;
pub mod monitor;
pub mod seq;
pub mod system;
pub mod view;

// Re-export the public surface at crate root.
pub use arena::Arena;
pub use monitor::{AllocationRecord, ArenaSummary, MonitorReport};
pub use seq::ArenaSeq;
pub use system::AllocKind;
pub use view::{ArenaView, Plain};

//! Core types for the loam arena allocator.
//!
//! This is the leaf crate with zero internal loam dependencies. It defines
//! the fundamental types used throughout the loam workspace: the arena
//! identifier, error types, and the process-global runtime configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;

// Re-export core types at crate root for convenience.
pub use config::RuntimeConfig;
pub use error::{ArenaError, SeqError, ViewError};
pub use id::ArenaId;

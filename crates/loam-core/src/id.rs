//! Strongly-typed arena identifier.

use std::fmt;

/// Identifies an arena within a process.
///
/// IDs are caller-assigned and expected to be unique per process scope;
/// the allocation monitor keys its registry on them. Two arenas sharing
/// an ID will interleave their monitor records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(pub u32);

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ArenaId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

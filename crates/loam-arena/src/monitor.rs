//! Process-wide allocation registry.
//!
//! Every successful arena allocation (while `track_allocations` is on)
//! appends an [`AllocationRecord`] here; reset and dispose clear an
//! arena's rows in bulk. The registry is purely observational — nothing
//! in it can affect allocator state, and no operation here fails toward
//! the caller.
//!
//! Storage is a single mutex-guarded `IndexMap` keyed by [`ArenaId`]:
//! writes are rare (one lock per allocation), reads happen on debug
//! paths, and insertion order per arena is allocation order.

use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock};

use indexmap::IndexMap;

use loam_core::config;
use loam_core::ArenaId;

use crate::arena::Arena;

/// One row of the registry: a single successful allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationRecord {
    /// The arena the allocation came from.
    pub arena: ArenaId,
    /// Aligned byte offset within the arena.
    pub offset: usize,
    /// Requested size in bytes.
    pub size: usize,
    /// Requested alignment in bytes.
    pub alignment: usize,
    /// Bytes skipped to reach the aligned offset.
    pub padding: usize,
    /// Caller-supplied label.
    pub tag: String,
}

type Registry = IndexMap<ArenaId, Vec<AllocationRecord>>;

fn registry() -> MutexGuard<'static, Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| Mutex::new(IndexMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Append a record, if allocation tracking is enabled.
pub fn record(rec: AllocationRecord) {
    if !config::allocations_tracked() {
        return;
    }
    registry().entry(rec.arena).or_default().push(rec);
}

/// Drop all records for one arena.
///
/// Runs on reset and dispose regardless of the tracking toggle, so stale
/// rows never outlive the allocations they describe.
pub fn clear(arena: ArenaId) {
    registry().shift_remove(&arena);
}

/// Snapshot of one arena's records, in allocation order.
pub fn records(arena: ArenaId) -> Vec<AllocationRecord> {
    registry().get(&arena).cloned().unwrap_or_default()
}

/// Per-arena digest inside a [`MonitorReport`].
#[derive(Clone, Debug)]
pub struct ArenaSummary {
    /// The arena's identifier.
    pub arena: ArenaId,
    /// Total byte capacity.
    pub capacity: usize,
    /// Current bump offset.
    pub offset: usize,
    /// Padding bytes accumulated since the last reset.
    pub waste: usize,
    /// `waste / capacity`, or 0 for a zero-capacity arena.
    pub waste_ratio: f64,
    /// The arena's allocation records, in allocation order.
    pub records: Vec<AllocationRecord>,
}

/// Digest of all live arenas handed to [`summary`].
///
/// Implements `Display` for the debug and test paths that print it.
#[derive(Clone, Debug, Default)]
pub struct MonitorReport {
    /// One summary per live arena, in the order given.
    pub arenas: Vec<ArenaSummary>,
}

/// Summarise the given arenas: waste totals, waste ratios, and the
/// per-allocation listing. Arenas that are no longer live are skipped.
pub fn summary(live: &[&Arena]) -> MonitorReport {
    let arenas = live
        .iter()
        .filter(|a| a.is_live())
        .map(|a| ArenaSummary {
            arena: a.id(),
            capacity: a.capacity(),
            offset: a.offset(),
            waste: a.waste(),
            waste_ratio: if a.capacity() == 0 {
                0.0
            } else {
                a.waste() as f64 / a.capacity() as f64
            },
            records: records(a.id()),
        })
        .collect();
    MonitorReport { arenas }
}

impl fmt::Display for MonitorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arenas.is_empty() {
            return writeln!(f, "monitor: no live arenas");
        }
        for s in &self.arenas {
            writeln!(
                f,
                "arena {}: {}/{} bytes used, waste {} ({:.1}%), {} allocation(s)",
                s.arena,
                s.offset,
                s.capacity,
                s.waste,
                s.waste_ratio * 100.0,
                s.records.len(),
            )?;
            for (i, r) in s.records.iter().enumerate() {
                writeln!(
                    f,
                    "  [{i}] off={} size={} align={} pad={} tag={:?}",
                    r.offset, r.size, r.alignment, r.padding, r.tag,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::AllocKind;

    // Unit tests here use ids >= 9200.

    #[test]
    fn record_and_snapshot_in_allocation_order() {
        let id = ArenaId(9200);
        clear(id);
        for (i, tag) in ["a", "b", "c"].iter().enumerate() {
            record(AllocationRecord {
                arena: id,
                offset: i * 8,
                size: 8,
                alignment: 8,
                padding: 0,
                tag: (*tag).to_owned(),
            });
        }
        let rows = records(id);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tag, "a");
        assert_eq!(rows[2].tag, "c");
        assert_eq!(rows[2].offset, 16);
        clear(id);
    }

    #[test]
    fn clear_removes_only_that_arena() {
        let keep = ArenaId(9201);
        let drop_ = ArenaId(9202);
        clear(keep);
        clear(drop_);
        for id in [keep, drop_] {
            record(AllocationRecord {
                arena: id,
                offset: 0,
                size: 4,
                alignment: 4,
                padding: 0,
                tag: "row".to_owned(),
            });
        }
        clear(drop_);
        assert_eq!(records(drop_).len(), 0);
        assert_eq!(records(keep).len(), 1);
        clear(keep);
    }

    #[test]
    fn unknown_arena_has_no_records() {
        assert!(records(ArenaId(9203)).is_empty());
    }

    #[test]
    fn summary_reports_waste_ratio_and_rows() {
        let mut a = Arena::new(ArenaId(9204), 256, AllocKind::Transient).unwrap();
        a.allocate(8, 8, "pre").unwrap();
        a.allocate(8, 32, "main").unwrap();

        let report = summary(&[&a]);
        assert_eq!(report.arenas.len(), 1);
        let s = &report.arenas[0];
        assert_eq!(s.arena, ArenaId(9204));
        assert_eq!(s.waste, 24);
        assert!((s.waste_ratio - 24.0 / 256.0).abs() < 1e-12);
        assert_eq!(s.records.len(), 2);
        assert_eq!(s.records[1].padding, 24);

        let text = report.to_string();
        assert!(text.contains("9204"));
        assert!(text.contains("main"));
        a.dispose();
    }

    #[test]
    fn summary_skips_disposed_arenas() {
        let mut a = Arena::new(ArenaId(9205), 64, AllocKind::Transient).unwrap();
        a.dispose();
        let report = summary(&[&a]);
        assert!(report.arenas.is_empty());
    }

    #[test]
    fn display_of_empty_report_is_quiet() {
        let report = MonitorReport::default();
        assert_eq!(report.to_string(), "monitor: no live arenas\n");
    }
}

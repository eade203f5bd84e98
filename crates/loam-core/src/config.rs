//! Process-global runtime configuration.
//!
//! The toggles live in atomics and are re-read at the start of every
//! arena/monitor operation, never cached across calls, so flipping one
//! takes effect on the next operation. [`RuntimeConfig`] is the snapshot
//! type used to read or write all of them at once.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(true);
static TRACK_ALLOCATIONS: AtomicBool = AtomicBool::new(true);
static TRACK_ALIGNMENT_LOSS: AtomicBool = AtomicBool::new(true);

fn log_output_path_slot() -> &'static Mutex<Option<PathBuf>> {
    static SLOT: OnceLock<Mutex<Option<PathBuf>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

/// Whether the core emits log events at all.
pub fn logging_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::Relaxed)
}

/// Whether the allocation monitor appends records.
pub fn allocations_tracked() -> bool {
    TRACK_ALLOCATIONS.load(Ordering::Relaxed)
}

/// Whether arenas accumulate alignment-padding waste.
///
/// The aligned-offset arithmetic itself is unaffected; only the `waste`
/// counter stops moving.
pub fn alignment_loss_tracked() -> bool {
    TRACK_ALIGNMENT_LOSS.load(Ordering::Relaxed)
}

/// Snapshot of all runtime toggles.
///
/// `apply()` publishes a snapshot process-wide; `snapshot()` reads the
/// current values. Defaults enable everything and set no log path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Silences all log emission when false.
    pub enable_logging: bool,
    /// Monitor `record` becomes a no-op when false.
    pub track_allocations: bool,
    /// Arena `waste` stops accumulating when false.
    pub track_alignment_loss: bool,
    /// Advisory path for external log persistence. The core itself never
    /// writes files.
    pub log_output_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            track_allocations: true,
            track_alignment_loss: true,
            log_output_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Read the current process-global configuration.
    pub fn snapshot() -> Self {
        let path = log_output_path_slot()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        Self {
            enable_logging: logging_enabled(),
            track_allocations: allocations_tracked(),
            track_alignment_loss: alignment_loss_tracked(),
            log_output_path: path,
        }
    }

    /// Publish this snapshot process-wide.
    pub fn apply(&self) {
        ENABLE_LOGGING.store(self.enable_logging, Ordering::Relaxed);
        TRACK_ALLOCATIONS.store(self.track_allocations, Ordering::Relaxed);
        TRACK_ALIGNMENT_LOSS.store(self.track_alignment_loss, Ordering::Relaxed);
        *log_output_path_slot()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = self.log_output_path.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize tests that mutate the process-global toggles.
    static CONFIG_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_enable_everything() {
        let cfg = RuntimeConfig::default();
        assert!(cfg.enable_logging);
        assert!(cfg.track_allocations);
        assert!(cfg.track_alignment_loss);
        assert!(cfg.log_output_path.is_none());
    }

    #[test]
    fn apply_snapshot_round_trip() {
        let _guard = CONFIG_LOCK.lock().unwrap();
        let before = RuntimeConfig::snapshot();

        let cfg = RuntimeConfig {
            enable_logging: false,
            track_allocations: false,
            track_alignment_loss: false,
            log_output_path: Some(PathBuf::from("/tmp/loam.log")),
        };
        cfg.apply();
        assert_eq!(RuntimeConfig::snapshot(), cfg);
        assert!(!logging_enabled());
        assert!(!allocations_tracked());
        assert!(!alignment_loss_tracked());

        before.apply();
        assert_eq!(RuntimeConfig::snapshot(), before);
    }
}

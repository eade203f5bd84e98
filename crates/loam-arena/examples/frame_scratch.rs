//! Loam quickstart — per-frame scratch allocation from scratch.
//!
//! Demonstrates:
//!   1. Creating an arena sized for one frame's working set
//!   2. Smart-allocating a typed view and filling it (a value-noise field)
//!   3. Collecting interesting cells into a bounded sequence
//!   4. Handing the view to a read-only worker pool
//!   5. Resetting between frames and printing the monitor summary
//!
//! Run with:
//!   cargo run --example frame_scratch

use loam_arena::{monitor, AllocKind, Arena, ArenaSeq, ArenaView};
use loam_core::ArenaId;

const SIDE: usize = 64;
const CELLS: usize = SIDE * SIDE;
const FRAMES: u32 = 4;

/// Cheap deterministic hash noise in [0, 1).
fn noise(x: usize, y: usize, seed: u32) -> f32 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_654_435_761));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    (h ^ (h >> 16)) as f32 / u32::MAX as f32
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Loam frame scratch ===\n");

    // 1. One up-front block backs every allocation the frame makes.
    let mut frame = Arena::new(ArenaId(0), 256 * 1024, AllocKind::Transient)?;
    println!(
        "Arena {}: {} KiB, block alignment {}",
        frame.id(),
        frame.capacity() / 1024,
        frame.alignment(),
    );

    for tick in 0..FRAMES {
        // 2. The noise field for this frame, zero-initialised.
        let mut field = ArenaView::<f32>::new(&frame, CELLS, "noise-field")?;
        for y in 0..SIDE {
            for x in 0..SIDE {
                field.set(y * SIDE + x, noise(x, y, tick))?;
            }
        }

        // 3. Collect the hottest cells into a bounded working set.
        let mut hot = ArenaSeq::<u32>::new(&frame, 128, "hot-cells")?;
        for (i, &v) in field.iter().enumerate() {
            if v > 0.99 && !hot.is_full() {
                hot.push(i as u32)?;
            }
        }

        // 4. Read-only worker pool over disjoint chunks of the view.
        let mean: f64 = std::thread::scope(|scope| {
            let handles: Vec<_> = field
                .as_slice()
                .chunks(CELLS / 4)
                .map(|chunk| scope.spawn(move || chunk.iter().map(|&v| v as f64).sum::<f64>()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker panicked"))
                .sum::<f64>()
                / CELLS as f64
        });

        println!(
            "frame {tick}: mean={mean:.4}, hot_cells={}, arena offset={} waste={}",
            hot.count(),
            frame.offset(),
            frame.waste(),
        );

        if tick == FRAMES - 1 {
            // 5a. Keep the last frame's records visible for the summary.
            print!("\n{}", monitor::summary(&[&frame]));
        }

        // 5b. End of frame: containers go out of scope, the arena rewinds.
        drop(field);
        drop(hot);
        frame.reset();
    }

    println!("high water mark: {} bytes", frame.high_water());
    frame.dispose();
    println!("Done.");
    Ok(())
}

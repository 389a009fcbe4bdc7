//! Simple profiling counters for understanding hot paths.
//!
//! The id-to-index lookup dominates integration cost; the hint hit rate
//! tells you whether consecutive local edits are clustering the way the
//! hint optimization assumes. Counters are process-wide, relaxed, and carry
//! no correctness weight.

use std::sync::atomic::{AtomicU64, Ordering};

pub static HINT_HITS: AtomicU64 = AtomicU64::new(0);
pub static HINT_MISSES: AtomicU64 = AtomicU64::new(0);
pub static SCAN_STEPS: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn hint_hit() {
    HINT_HITS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn hint_miss() {
    HINT_MISSES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn scan_step() {
    SCAN_STEPS.fetch_add(1, Ordering::Relaxed);
}

pub fn reset() {
    HINT_HITS.store(0, Ordering::Relaxed);
    HINT_MISSES.store(0, Ordering::Relaxed);
    SCAN_STEPS.store(0, Ordering::Relaxed);
}

pub fn report() -> String {
    let hits = HINT_HITS.load(Ordering::Relaxed);
    let misses = HINT_MISSES.load(Ordering::Relaxed);
    let total = hits + misses;
    let hit_rate = if total > 0 { hits as f64 / total as f64 * 100.0 } else { 0.0 };

    let scans = SCAN_STEPS.load(Ordering::Relaxed);

    return format!(
        "Hint: {}/{} ({:.1}% hit), scan steps: {}",
        hits, total, hit_rate, scans
    );
}

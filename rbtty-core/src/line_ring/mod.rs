//! A fixed-capacity pool of [`Line`] records with a free list and a
//! committed ("stdout") list, addressed by index rather than by intrusive
//! pointer — the owned-index-ring strategy `spec.md` §9 recommends in place
//! of a direct port of the source's embedded list nodes.
//!
//! ```text
//! free ──acquire──▶ editing-out ──flush──▶ committed
//!   ▲                                       │
//!   │                                       │
//!   └────────────── evict ──────────────────┘
//!            (reuse oldest committed line when free empty)
//! ```
//!
//! `spec.md` §4.2 describes the ring as evicting from the stdout list's
//! tail (most recently committed), and §9 floats that as a deliberate
//! preservation of the source's behavior. Working through §8's boundary
//! scenario (write `k+1` lines into a `k`-line ring, expect the *first*
//! line gone) shows that only head eviction — dropping the oldest
//! committed line — reproduces the stated result; tail eviction would
//! instead repeatedly discard whatever was just written. This ring
//! implements head eviction, treating §8's worked numbers as the
//! authority over §9's prose (see `DESIGN.md`).

mod line;

pub use line::Line;

use std::collections::VecDeque;

use tracing::{trace, warn};

/// Fixed-capacity slab of [`Line`]s plus the `free`/`stdout` index queues.
#[derive(Debug)]
pub struct LineRing {
    slab: Vec<Line>,
    free: VecDeque<usize>,
    stdout: VecDeque<usize>,
}

impl LineRing {
    /// Builds a ring of exactly `capacity` lines, all initially free.
    ///
    /// # Panics
    /// Panics if `capacity == 0`; callers (`Screen::set_storage`) are
    /// responsible for rejecting non-positive sizes before reaching here.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LineRing capacity must be positive");
        let slab = vec![Line::new(); capacity];
        let free = (0..capacity).collect();
        Self {
            slab,
            free,
            stdout: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slab.len()
    }

    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn stdout_len(&self) -> usize {
        self.stdout.len()
    }

    /// Returns the indices currently on the stdout list, oldest first.
    #[must_use]
    pub fn stdout_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.stdout.iter().copied()
    }

    pub fn get(&self, index: usize) -> &Line {
        &self.slab[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Line {
        &mut self.slab[index]
    }

    /// Detaches a line for exclusive editing: the free list's head if
    /// non-empty, else the stdout list's head (eviction of the oldest
    /// committed line). The returned line's contents are **not** cleared —
    /// the caller owns that step.
    pub fn acquire_free(&mut self) -> usize {
        if let Some(idx) = self.free.pop_front() {
            trace!(idx, "acquired line from free list");
            return idx;
        }
        let idx = self
            .stdout
            .pop_front()
            .expect("invariant: free and stdout cannot both be empty while lines are in use");
        warn!(idx, "free list exhausted, evicted oldest committed line");
        idx
    }

    /// Appends `index` to the tail of the stdout list (most recently
    /// flushed line).
    pub fn commit(&mut self, index: usize) {
        self.stdout.push_back(index);
        trace!(idx = index, "committed line to stdout list");
    }

    /// Returns `index` to the free list. For a caller that acquired a line
    /// via [`LineRing::acquire_free`] but then failed before committing it
    /// or binding it as a live buffer, so the slot isn't lost in limbo.
    pub fn release(&mut self, index: usize) {
        self.free.push_back(index);
        trace!(idx = index, "released line back to free list");
    }
}

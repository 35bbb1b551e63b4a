//! Command tag generation.
//!
//! Tags correlate a sent command with its eventual completion line.

use std::sync::atomic::{AtomicU32, Ordering};

/// Sequential tag generator (`A0001`, `A0002`, ...).
///
/// The prefix is caller-chosen so that independent logical sessions sharing a
/// trace never collide on tags.
#[derive(Debug)]
pub struct TagGenerator {
    counter: AtomicU32,
    prefix: char,
}

impl TagGenerator {
    /// Creates a generator with the given prefix.
    #[must_use]
    pub const fn new(prefix: char) -> Self {
        Self {
            counter: AtomicU32::new(1),
            prefix,
        }
    }

    /// Generates the next tag.
    #[must_use]
    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{:04}", self.prefix, n)
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new('A')
    }
}

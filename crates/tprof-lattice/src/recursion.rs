//! Recursion guard for resolving local arrays.
//!
//! A local array can contain itself (`a << a`), directly or through other
//! arrays, so resolving it against its environment may come back to an id it
//! is still resolving. `RecursionGuard` keeps the ids of the current
//! resolution path as a stack:
//!
//! - a key already on the path is a [`RecursionResult::Cycle`]
//! - the path length is bounded by the profile's depth limit
//! - every `enter` attempt counts against the profile's iteration budget
//!
//! Only the current path is remembered. A key is popped again on
//! [`leave`](RecursionGuard::leave); remembering finished keys is up to the
//! caller.
//!
//! Resolution nests strictly, which the guard checks in debug builds: `leave`
//! must name the innermost entered key, and dropping a guard with keys still
//! on its path panics.

use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named limit presets, so the numbers live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Resolving local arrays into context-free array types.
    ///
    /// Depth is the nesting of arrays inside arrays along one path;
    /// iterations count every local array reached.
    ///
    /// depth = 256, iterations = 100,000
    StripLocalInfo,

    /// Explicit limits, mostly for tests.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::StripLocalInfo => 256,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::StripLocalInfo => 100_000,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// The key was pushed; the caller must `leave` it.
    Entered,
    /// The key is already on the current path.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Path stack with depth and work limits.
///
/// ```
/// use tprof_lattice::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
///
/// let mut guard = RecursionGuard::with_profile(RecursionProfile::StripLocalInfo);
/// assert_eq!(guard.enter(1u32), RecursionResult::Entered);
/// assert_eq!(guard.enter(1u32), RecursionResult::Cycle);
/// guard.leave(1u32);
/// ```
pub struct RecursionGuard<K: PartialEq + Copy + std::fmt::Debug> {
    path: SmallVec<[K; 8]>,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    exceeded: bool,
}

impl<K: PartialEq + Copy + std::fmt::Debug> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        RecursionGuard {
            path: SmallVec::new(),
            iterations: 0,
            max_depth,
            max_iterations,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Push `key` onto the path unless that would close a cycle or break a
    /// limit. Only [`RecursionResult::Entered`] pushes.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);
        if self.iterations > self.max_iterations {
            self.exceeded = true;
            return RecursionResult::IterationExceeded;
        }
        // Linear scan: the path never exceeds max_depth.
        if self.path.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.path.len() as u32 >= self.max_depth {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }
        self.path.push(key);
        RecursionResult::Entered
    }

    /// Pop `key`, which must be the innermost entered key.
    pub fn leave(&mut self, key: K) {
        let popped = self.path.pop();
        debug_assert_eq!(
            popped,
            Some(key),
            "RecursionGuard::leave() must name the innermost entered key"
        );
    }

    /// Keys currently being resolved, outermost first.
    #[inline]
    pub fn path(&self) -> &[K] {
        &self.path
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.path.len() as u32
    }

    /// Every `enter` attempt so far, including refused ones.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Sticky: stays set once either limit was hit.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

#[cfg(debug_assertions)]
impl<K: PartialEq + Copy + std::fmt::Debug> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.path.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries on its path: {:?}",
                self.path.len(),
                self.path.as_slice(),
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;

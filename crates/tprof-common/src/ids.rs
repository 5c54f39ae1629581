//! Opaque ids for the entities the lattice refers to but does not own.
//!
//! Classes belong to the registry, code units to the bytecode reader and
//! captured environments and local arrays to the analysis driver. The lattice
//! only stores these handles and compares them by value.

use crate::interner::Atom;
use serde::Serialize;
use std::fmt;

/// Identifies a class registered with the class registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

/// Identifies a unit of compiled code (method body, block or proc).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CodeId(pub u32);

/// Identifies a captured local environment (the frame a block closes over).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EnvId(pub u32);

/// Identifies an array slot inside a local environment.
///
/// Ids are allocated monotonically by the owning environment and are never
/// reused within that environment's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArrayId(pub u32);

impl ArrayId {
    /// The first id an empty environment hands out.
    pub const FIRST: ArrayId = ArrayId(0);

    /// The id allocated right after this one, or `None` once the id space
    /// is used up.
    #[inline]
    pub fn next(self) -> Option<ArrayId> {
        self.0.checked_add(1).map(ArrayId)
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A method or member name, interned.
pub type MemberId = Atom;

#[cfg(test)]
#[path = "../tests/ids_tests.rs"]
mod tests;

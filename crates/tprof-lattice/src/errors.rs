//! Recoverable lattice errors.
//!
//! Only genuinely unsupported inputs and environment bookkeeping mistakes that
//! a driver can report are errors. Contract misuse (formatting a local array,
//! dispatching on an array type, resolving a foreign id) panics instead; see
//! the `# Panics` sections of the affected functions.

use tprof_common::{ArrayId, ClassId};

/// Result alias used throughout the lattice.
pub type LatticeResult<T> = Result<T, LatticeError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// A host literal kind the lattice has no type for.
    #[error("unsupported literal: {kind}")]
    UnsupportedLiteral { kind: String },

    /// A class object other than the root class appeared as a literal.
    #[error("unsupported literal: class object {class:?} is not the root class")]
    UnsupportedClassLiteral { class: ClassId },

    /// An environment mutation named an array the environment never allocated.
    #[error("array {id} is not allocated in this environment")]
    UnknownArray { id: ArrayId },

    /// An array id below the environment's high-water mark was installed again.
    #[error("array id {id} was already issued (next free id is {next})")]
    ArrayIdReused { id: ArrayId, next: ArrayId },

    /// `id` is the last representable array id, so nothing could follow it.
    #[error("array id space exhausted at {id}")]
    ArrayIdsExhausted { id: ArrayId },
}

//! Type lattice for profiling dynamically typed bytecode.
//!
//! An abstract interpreter walking compiled code attaches a set of possible
//! runtime types to every value it tracks. This crate is that set algebra:
//!
//! - **`TypeValue`**: one abstract type (classes, instances, code, closures,
//!   literals, arrays)
//! - **`Union`**: a deduplicated join of type values
//! - **`ArrayShape`**: tuple/sequence tracking of array contents with a
//!   one-way widening from tuple to sequence
//! - **`LocalEnv`**: environment-owned array slots referenced by
//!   `TypeValue::LocalArray` handles
//! - **`strip_local_info`**: cycle-safe resolution of local arrays into
//!   context-free types
//! - **`LiteralPromoter`** and **`Signature`**: the entry and exit points of
//!   the driver
//!
//! Data flows one way. Constants are promoted into type values, joined into
//! unions, stored in environment slots, and finally stripped into the
//! context-free types that make up recorded signatures.
//!
//! The class registry and the driver are external. `ClassTable` and
//! `ArrayEnv` are reference implementations of the two collaborator traits.

pub mod array;
pub mod env;
pub mod errors;
pub mod format;
pub mod literal;
pub mod recursion;
pub mod registry;
pub mod signature;
pub mod strip;
pub mod types;
pub mod union;

pub use array::ArrayShape;
pub use env::{ArrayEnv, LocalEnv};
pub use errors::{LatticeError, LatticeResult};
pub use format::TypeFormatter;
pub use literal::{HostValue, LiteralPromoter};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use registry::{Builtins, ClassTable, Registry};
pub use signature::Signature;
pub use strip::LocalInfoStripper;
pub use types::{ClassType, LiteralValue, TypeValue};
pub use union::Union;

#[cfg(test)]
#[path = "../tests/integration_tests.rs"]
mod integration_tests;

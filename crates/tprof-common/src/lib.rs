//! Common types and utilities for the tprof type lattice.
//!
//! This crate provides foundational types shared by the lattice and its
//! drivers:
//! - Opaque ids handed out by the collaborators (`ClassId`, `CodeId`, `EnvId`, `ArrayId`)
//! - String interning for member and class names (`Atom`, `Interner`)
//! - Tracing subscriber setup for tests, benches and embedding drivers

// Ids assigned by the class registry, the bytecode reader and the local environment
pub mod ids;
pub use ids::{ArrayId, ClassId, CodeId, EnvId, MemberId};

// String interning for member and class names
pub mod interner;
pub use interner::{Atom, Interner};

// Opt-in tracing subscriber
pub mod tracing_config;

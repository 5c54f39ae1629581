//! Type values: the nodes of the lattice.
//!
//! A `TypeValue` describes one possible runtime type of a value. Values are
//! immutable once built; every operation that "changes" a type returns a new
//! one. Equality and hashing are structural, and terminate on every value:
//! a `LocalArray` only carries an id into an environment and is compared by
//! `(id, base)`, never by what the environment currently stores for it.
//!
//! The variants fall in three groups:
//!
//! - receivers: `Any`, `Class`, `Instance`
//! - code: `Code`, `Closure`, `TypedClosure`
//! - refinements of a base type: `Literal`, `LocalArray`, `Array`
//!
//! `LocalArray` is the only context-dependent variant. It must go through
//! [`TypeValue::strip_local_info`] before it can appear in a signature.

use crate::array::ArrayShape;
use crate::env::LocalEnv;
use crate::errors::{LatticeError, LatticeResult};
use crate::format::TypeFormatter;
use crate::registry::Registry;
use crate::strip::LocalInfoStripper;
use crate::union::Union;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tprof_common::{ArrayId, ClassId, CodeId, EnvId, MemberId};
use tracing::trace;

// ---------------------------------------------------------------------------
// ClassType
// ---------------------------------------------------------------------------

/// A class, identified by the id the registry assigned to it.
///
/// The name is carried for diagnostics only: equality and hashing look at
/// `idx` alone, so two handles to the same class compare equal even when
/// only one of them was built with a name.
#[derive(Clone, Debug, Serialize)]
pub struct ClassType {
    pub idx: ClassId,
    pub name: Option<Arc<str>>,
}

impl ClassType {
    pub fn new(idx: ClassId, name: Option<&str>) -> Self {
        ClassType {
            idx,
            name: name.map(Arc::from),
        }
    }

    pub fn anonymous(idx: ClassId) -> Self {
        ClassType { idx, name: None }
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

// ---------------------------------------------------------------------------
// LiteralValue
// ---------------------------------------------------------------------------

/// The constant carried by a literal type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralValue {
    Symbol(Arc<str>),
    Integer(i64),
    Boolean(bool),
    String(Arc<str>),
    /// Regular expression source, without delimiters.
    Regex(Arc<str>),
    /// Integer range; a missing bound is an open end.
    Range {
        begin: Option<i64>,
        end: Option<i64>,
        exclusive: bool,
    },
}

impl fmt::Display for LiteralValue {
    /// Inspect-style rendering, as the literal would be written in source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Symbol(name) => write!(f, ":{name}"),
            LiteralValue::Integer(v) => write!(f, "{v}"),
            LiteralValue::Boolean(v) => write!(f, "{v}"),
            LiteralValue::String(s) => write!(f, "{s:?}"),
            LiteralValue::Regex(src) => write!(f, "/{src}/"),
            LiteralValue::Range {
                begin,
                end,
                exclusive,
            } => {
                if let Some(begin) = begin {
                    write!(f, "{begin}")?;
                }
                f.write_str(if *exclusive { "..." } else { ".." })?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TypeValue
// ---------------------------------------------------------------------------

/// One abstract type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeValue {
    /// Top of the lattice: any value at all.
    Any,

    /// The class object itself (receiver of singleton methods).
    Class(ClassType),

    /// An instance of `class`, which is normally a `Class`.
    Instance { class: Box<TypeValue> },

    /// A unit of compiled code, e.g. the body of a block.
    Code(CodeId),

    /// A block or proc closing over `code` and the captured environment `env`.
    /// `underlying` is used for dispatch when the closure is a receiver.
    Closure {
        code: CodeId,
        env: EnvId,
        underlying: Box<TypeValue>,
    },

    /// A closure with a concrete call signature.
    TypedClosure {
        params: Vec<Union>,
        ret: Union,
        underlying: Box<TypeValue>,
    },

    /// A literal constant together with its generalization.
    Literal {
        value: LiteralValue,
        base: Box<TypeValue>,
    },

    /// Context-dependent array: the element types live in a `LocalEnv` slot.
    LocalArray { id: ArrayId, base: Box<TypeValue> },

    /// Context-free array with a resolved shape.
    Array {
        shape: Arc<ArrayShape>,
        base: Box<TypeValue>,
    },
}

impl TypeValue {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    pub fn class(class: ClassType) -> Self {
        TypeValue::Class(class)
    }

    pub fn instance(class: TypeValue) -> Self {
        TypeValue::Instance {
            class: Box::new(class),
        }
    }

    /// Instance of a registered class.
    pub fn instance_of(class: &ClassType) -> Self {
        Self::instance(TypeValue::Class(class.clone()))
    }

    pub fn code(code: CodeId) -> Self {
        TypeValue::Code(code)
    }

    pub fn closure(code: CodeId, env: EnvId, underlying: TypeValue) -> Self {
        TypeValue::Closure {
            code,
            env,
            underlying: Box::new(underlying),
        }
    }

    pub fn typed_closure(params: Vec<Union>, ret: Union, underlying: TypeValue) -> Self {
        TypeValue::TypedClosure {
            params,
            ret,
            underlying: Box::new(underlying),
        }
    }

    pub fn literal(value: LiteralValue, base: TypeValue) -> Self {
        TypeValue::Literal {
            value,
            base: Box::new(base),
        }
    }

    pub fn local_array(id: ArrayId, base: TypeValue) -> Self {
        TypeValue::LocalArray {
            id,
            base: Box::new(base),
        }
    }

    pub fn array(shape: ArrayShape, base: TypeValue) -> Self {
        TypeValue::Array {
            shape: Arc::new(shape),
            base: Box::new(base),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, TypeValue::Any)
    }

    /// The type this value dispatches through, if it wraps one.
    ///
    /// Literal and array types answer their base type, closures their
    /// underlying type. Other variants are their own receiver and answer `None`.
    pub fn base_type(&self) -> Option<&TypeValue> {
        match self {
            TypeValue::Literal { base, .. }
            | TypeValue::LocalArray { base, .. }
            | TypeValue::Array { base, .. } => Some(base),
            TypeValue::Closure { underlying, .. } | TypeValue::TypedClosure { underlying, .. } => {
                Some(underlying)
            }
            TypeValue::Any
            | TypeValue::Class(_)
            | TypeValue::Instance { .. }
            | TypeValue::Code(_) => None,
        }
    }

    /// Returns `true` when no `LocalArray` occurs anywhere inside this value,
    /// i.e. it means the same thing in every environment.
    pub fn is_context_free(&self) -> bool {
        match self {
            TypeValue::LocalArray { .. } => false,
            TypeValue::Any | TypeValue::Class(_) | TypeValue::Code(_) => true,
            TypeValue::Instance { class } => class.is_context_free(),
            TypeValue::Closure { underlying, .. } => underlying.is_context_free(),
            TypeValue::TypedClosure {
                params,
                ret,
                underlying,
            } => {
                params.iter().all(Union::is_context_free)
                    && ret.is_context_free()
                    && underlying.is_context_free()
            }
            TypeValue::Literal { base, .. } => base.is_context_free(),
            TypeValue::Array { shape, base } => shape.is_context_free() && base.is_context_free(),
        }
    }

    /// Coarse compatibility check: `Any` on either side is consistent with
    /// everything, otherwise the two values must be structurally equal.
    ///
    /// This is not a subtyping relation.
    pub fn consistent_with(&self, other: &TypeValue) -> bool {
        self.is_any() || other.is_any() || self == other
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Resolve `member` against this value's receiver identity.
    ///
    /// Classes resolve singleton methods, instances resolve instance methods
    /// of their class, and literal, local array and closure types delegate to
    /// their base type. `Any` and bare code have no receiver identity, which
    /// is an ordinary lookup miss.
    ///
    /// # Panics
    ///
    /// Panics on `Array`: a context-free array has no receiver identity of its
    /// own, callers must query its base type.
    pub fn get_method<R: Registry + ?Sized>(
        &self,
        member: MemberId,
        registry: &R,
    ) -> Option<R::Method> {
        match self {
            TypeValue::Class(class) => registry.get_singleton_method(class, member),
            TypeValue::Instance { class } => registry.get_method(class, member),
            TypeValue::Literal { base, .. } | TypeValue::LocalArray { base, .. } => {
                base.get_method(member, registry)
            }
            TypeValue::Closure { underlying, .. } | TypeValue::TypedClosure { underlying, .. } => {
                underlying.get_method(member, registry)
            }
            TypeValue::Any | TypeValue::Code(_) => None,
            TypeValue::Array { .. } => panic!(
                "get_method called on an array type; dispatch through its base type instead"
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Context elimination
    // -----------------------------------------------------------------------

    /// Eliminate environment dependence from this value.
    ///
    /// Literals generalize to their base type and local arrays are resolved
    /// against `env` into context-free array types. A local array that
    /// (through `env`) contains itself resolves its self-reference to `Any`.
    ///
    /// # Panics
    ///
    /// Panics if a local array id reached during resolution was not allocated
    /// by `env`.
    pub fn strip_local_info<E: LocalEnv + ?Sized>(&self, env: &E) -> TypeValue {
        LocalInfoStripper::new(env).strip_type(self)
    }

    /// Install the contents of every context-free array in this value into
    /// `env`, replacing each with a `LocalArray` handle.
    ///
    /// Nested arrays are allocated before the array containing them, and
    /// tuple positions left to right, so the ids a given value receives only
    /// depend on `next_id`. Returns the deployed value and the next unused id.
    pub fn deploy_type<E: LocalEnv + ?Sized>(
        &self,
        env: &mut E,
        next_id: ArrayId,
    ) -> LatticeResult<(TypeValue, ArrayId)> {
        match self {
            TypeValue::Array { shape, base } => {
                let (shape, id) = shape.deploy_type(env, next_id)?;
                trace!(id = %id, "deploying array into local environment");
                env.deploy_array(id, shape)?;
                let next = id.next().ok_or(LatticeError::ArrayIdsExhausted { id })?;
                Ok((TypeValue::local_array(id, (**base).clone()), next))
            }
            _ => Ok((self.clone(), next_id)),
        }
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Human readable name, with class names supplied by `registry`.
    ///
    /// # Panics
    ///
    /// Panics on a `LocalArray` anywhere inside the value: local arrays must
    /// be resolved with [`strip_local_info`](Self::strip_local_info) first.
    pub fn screen_name<R: Registry + ?Sized>(&self, registry: &R) -> String {
        TypeFormatter::new(registry).format_type(self)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;

//! Literal promotion: host constants into the lattice.
//!
//! Constants embedded in bytecode arrive as `HostValue`s. Scalars become
//! literal types over the instance type of their builtin class, nil becomes
//! the bare nil instance, and array literals become tuples with one singleton
//! union per element. The only class object with a type is the root class.

use crate::array::ArrayShape;
use crate::errors::{LatticeError, LatticeResult};
use crate::registry::Builtins;
use crate::types::{LiteralValue, TypeValue};
use crate::union::Union;
use std::sync::Arc;
use tprof_common::ClassId;
use tracing::debug;

/// A constant as the bytecode reader hands it over.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Symbol(String),
    Integer(i64),
    Boolean(bool),
    String(String),
    Regex(String),
    Nil,
    Range {
        begin: Option<i64>,
        end: Option<i64>,
        exclusive: bool,
    },
    Array(Vec<HostValue>),
    /// A class object, by registry id.
    Class(ClassId),
    Float(f64),
    Hash(Vec<(HostValue, HostValue)>),
}

impl HostValue {
    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Symbol(_) => "symbol",
            HostValue::Integer(_) => "integer",
            HostValue::Boolean(_) => "boolean",
            HostValue::String(_) => "string",
            HostValue::Regex(_) => "regex",
            HostValue::Nil => "nil",
            HostValue::Range { .. } => "range",
            HostValue::Array(_) => "array",
            HostValue::Class(_) => "class",
            HostValue::Float(_) => "float",
            HostValue::Hash(_) => "hash",
        }
    }
}

/// Maps host constants to type values using the builtin classes.
#[derive(Clone, Copy, Debug)]
pub struct LiteralPromoter<'a> {
    builtins: &'a Builtins,
}

impl<'a> LiteralPromoter<'a> {
    pub fn new(builtins: &'a Builtins) -> Self {
        LiteralPromoter { builtins }
    }

    /// Promote `value` into the lattice.
    ///
    /// Fails with `UnsupportedClassLiteral` for class objects other than the
    /// root class and with `UnsupportedLiteral` for kinds the lattice has no
    /// type for. An array fails with the first failing element.
    pub fn promote(&self, value: &HostValue) -> LatticeResult<TypeValue> {
        let b = self.builtins;
        let ty = match value {
            HostValue::Symbol(name) => {
                TypeValue::literal(LiteralValue::Symbol(Arc::from(name.as_str())), b.instance(&b.sym))
            }
            HostValue::Integer(v) => TypeValue::literal(LiteralValue::Integer(*v), b.instance(&b.int)),
            HostValue::Boolean(v) => {
                TypeValue::literal(LiteralValue::Boolean(*v), b.instance(&b.bool))
            }
            HostValue::String(s) => {
                TypeValue::literal(LiteralValue::String(Arc::from(s.as_str())), b.instance(&b.str))
            }
            HostValue::Regex(src) => TypeValue::literal(
                LiteralValue::Regex(Arc::from(src.as_str())),
                b.instance(&b.regexp),
            ),
            HostValue::Range {
                begin,
                end,
                exclusive,
            } => TypeValue::literal(
                LiteralValue::Range {
                    begin: *begin,
                    end: *end,
                    exclusive: *exclusive,
                },
                b.instance(&b.range),
            ),
            HostValue::Nil => b.nil(),
            HostValue::Array(elems) => {
                let elems = elems
                    .iter()
                    .map(|elem| self.promote(elem).map(Union::single))
                    .collect::<LatticeResult<Vec<_>>>()?;
                TypeValue::array(ArrayShape::Tuple(elems), b.array_instance())
            }
            HostValue::Class(class) if *class == b.obj.idx => b.instance(&b.obj),
            HostValue::Class(class) => {
                debug!(class = ?class, "rejecting non-root class literal");
                return Err(LatticeError::UnsupportedClassLiteral { class: *class });
            }
            HostValue::Float(_) | HostValue::Hash(_) => {
                debug!(kind = value.kind(), "rejecting unsupported literal");
                return Err(LatticeError::UnsupportedLiteral {
                    kind: value.kind().to_string(),
                });
            }
        };
        Ok(ty)
    }
}

#[cfg(test)]
#[path = "../tests/literal_tests.rs"]
mod tests;

//! Array shapes: the abstract domain for array contents.
//!
//! - `Tuple` keeps one union per position and has a fixed length.
//! - `Seq` keeps a single union for every element.
//!
//! A tuple stays precise as long as every write lands on a statically known,
//! in-range index. Any other write widens it into a sequence holding every
//! type the tuple held plus the written one. Widening is one-way: no
//! operation turns a sequence back into a tuple.
//!
//! Positions written in place overwrite the previous union instead of
//! merging with it; the shape tracks the most recent assignment. Sequences
//! always merge.

use crate::env::LocalEnv;
use crate::errors::LatticeResult;
use crate::format::TypeFormatter;
use crate::registry::{Builtins, Registry};
use crate::strip::LocalInfoStripper;
use crate::types::TypeValue;
use crate::union::Union;
use serde::Serialize;
use tprof_common::ArrayId;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ArrayShape {
    /// Imprecise: every element is one of `elem`.
    Seq(Union),
    /// Precise: element `i` is one of `elems[i]`.
    Tuple(Vec<Union>),
}

impl ArrayShape {
    pub fn seq(elem: Union) -> Self {
        ArrayShape::Seq(elem)
    }

    pub fn tuple(elems: impl IntoIterator<Item = Union>) -> Self {
        ArrayShape::Tuple(elems.into_iter().collect())
    }

    /// A sequence with no known element type (a fresh `[]`).
    pub fn empty_seq() -> Self {
        ArrayShape::Seq(Union::bot())
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, ArrayShape::Tuple(_))
    }

    /// Tuple length; `None` for a sequence, whose length is not tracked.
    pub fn tuple_len(&self) -> Option<usize> {
        match self {
            ArrayShape::Seq(_) => None,
            ArrayShape::Tuple(elems) => Some(elems.len()),
        }
    }

    /// Every type any element may have.
    pub fn elem_union(&self) -> Union {
        match self {
            ArrayShape::Seq(elem) => elem.clone(),
            ArrayShape::Tuple(elems) => elems.iter().flat_map(Union::iter).cloned().collect(),
        }
    }

    /// Types of the element at `idx`; `None` means the index is not
    /// statically known.
    ///
    /// An out-of-range tuple read yields the nil union: the element may be
    /// absent, which reads as nil. An unknown index on a tuple yields every
    /// position's types.
    pub fn read(&self, idx: Option<usize>, builtins: &Builtins) -> Union {
        match self {
            ArrayShape::Seq(elem) => elem.clone(),
            ArrayShape::Tuple(elems) => match idx {
                Some(i) => match elems.get(i) {
                    Some(elem) => elem.clone(),
                    None => builtins.nil_union(),
                },
                None => self.elem_union(),
            },
        }
    }

    /// The shape after storing `ty` at `idx`; `None` means the index is not
    /// statically known.
    ///
    /// A known in-range tuple index overwrites that position. An unknown or
    /// out-of-range index widens a tuple into a sequence. Sequences merge
    /// `ty` into their element union.
    pub fn write(&self, idx: Option<usize>, ty: TypeValue) -> ArrayShape {
        match self {
            ArrayShape::Seq(elem) => ArrayShape::Seq(elem.with(ty)),
            ArrayShape::Tuple(elems) => match idx {
                Some(i) if i < elems.len() => {
                    let mut elems = elems.clone();
                    elems[i] = Union::single(ty);
                    ArrayShape::Tuple(elems)
                }
                _ => {
                    debug!(
                        len = elems.len(),
                        index = ?idx,
                        "tuple write at imprecise index widens to sequence"
                    );
                    ArrayShape::Seq(self.elem_union().with(ty))
                }
            },
        }
    }

    /// Join of two shapes at a control-flow merge.
    ///
    /// Tuples of equal length join position-wise; any other pair joins into
    /// a sequence of every element type on both sides.
    pub fn union(&self, other: &ArrayShape) -> ArrayShape {
        match (self, other) {
            (ArrayShape::Tuple(left), ArrayShape::Tuple(right)) if left.len() == right.len() => {
                ArrayShape::Tuple(left.iter().zip(right).map(|(l, r)| l.union(r)).collect())
            }
            (ArrayShape::Seq(left), ArrayShape::Seq(right)) => ArrayShape::Seq(left.union(right)),
            _ => ArrayShape::Seq(self.elem_union().union(&other.elem_union())),
        }
    }

    pub fn is_context_free(&self) -> bool {
        match self {
            ArrayShape::Seq(elem) => elem.is_context_free(),
            ArrayShape::Tuple(elems) => elems.iter().all(Union::is_context_free),
        }
    }

    /// Eliminate environment dependence element-wise. Tuples keep their
    /// length.
    ///
    /// # Panics
    ///
    /// Panics if a local array id reached during resolution was not allocated
    /// by `env`.
    pub fn strip_local_info<E: LocalEnv + ?Sized>(&self, env: &E) -> ArrayShape {
        LocalInfoStripper::new(env).strip_shape(self)
    }

    /// Deploy every element type into `env` (see [`TypeValue::deploy_type`]),
    /// threading the id counter through tuple positions left to right.
    pub fn deploy_type<E: LocalEnv + ?Sized>(
        &self,
        env: &mut E,
        next_id: ArrayId,
    ) -> LatticeResult<(ArrayShape, ArrayId)> {
        match self {
            ArrayShape::Seq(elem) => {
                let (elem, next_id) = deploy_union(elem, env, next_id)?;
                Ok((ArrayShape::Seq(elem), next_id))
            }
            ArrayShape::Tuple(elems) => {
                let mut next_id = next_id;
                let mut deployed = Vec::with_capacity(elems.len());
                for elem in elems {
                    let (elem, id) = deploy_union(elem, env, next_id)?;
                    deployed.push(elem);
                    next_id = id;
                }
                Ok((ArrayShape::Tuple(deployed), next_id))
            }
        }
    }

    /// `Array[elem]` for sequences, `[a, b]` for tuples.
    pub fn screen_name<R: Registry + ?Sized>(&self, registry: &R) -> String {
        TypeFormatter::new(registry).format_shape(self, "Array")
    }
}

fn deploy_union<E: LocalEnv + ?Sized>(
    union: &Union,
    env: &mut E,
    mut next_id: ArrayId,
) -> LatticeResult<(Union, ArrayId)> {
    // Unions without arrays deploy to themselves; keep sharing them.
    if !union.iter().any(|ty| matches!(ty, TypeValue::Array { .. })) {
        return Ok((union.clone(), next_id));
    }
    let mut deployed = Vec::with_capacity(union.len());
    for ty in union {
        let (ty, id) = ty.deploy_type(env, next_id)?;
        deployed.push(ty);
        next_id = id;
    }
    Ok((deployed.into_iter().collect(), next_id))
}

#[cfg(test)]
#[path = "../tests/array_tests.rs"]
mod tests;

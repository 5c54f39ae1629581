//! Context elimination (`strip_local_info`).
//!
//! Turns environment-dependent types into context-free ones:
//! - literals generalize to their base type
//! - local arrays are resolved through the environment into array types
//!
//! Both rewrites reach through instances and closures, so a closure whose
//! signature mentions a local array or a literal comes out context-free too.
//!
//! Resolution is the only place the lattice follows references, and local
//! arrays can reach themselves (`a << a`, or `a` holding `b` holding `a`).
//! One `LocalInfoStripper` is built per top-level call and carries a
//! `RecursionGuard` keyed by array id: a local array that is reached again
//! while it is still being resolved becomes `Any`.
//!
//! Resolved arrays are memoized for the rest of the call, so an array shared
//! between sibling positions is expanded once and the work stays linear in
//! the number of distinct arrays. A result is only memoized when it does not
//! depend on where it was reached from: arrays whose resolution cut a cycle
//! back to an enclosing array, or that ran into a limit, are resolved again
//! at the next position.

use crate::array::ArrayShape;
use crate::env::LocalEnv;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::TypeValue;
use crate::union::Union;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tprof_common::ArrayId;
use tracing::{debug, trace};

/// Single-use resolver for one `strip_local_info` call.
pub struct LocalInfoStripper<'a, E: LocalEnv + ?Sized> {
    env: &'a E,
    guard: RecursionGuard<ArrayId>,
    resolved: FxHashMap<ArrayId, Arc<ArrayShape>>,
    /// Outermost path position a cycle has reached back to while resolving
    /// the innermost array. `usize::MAX` when no cycle was cut.
    cycle_floor: usize,
}

impl<'a, E: LocalEnv + ?Sized> LocalInfoStripper<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self::with_profile(env, RecursionProfile::StripLocalInfo)
    }

    pub fn with_profile(env: &'a E, profile: RecursionProfile) -> Self {
        LocalInfoStripper {
            env,
            guard: RecursionGuard::with_profile(profile),
            resolved: FxHashMap::default(),
            cycle_floor: usize::MAX,
        }
    }

    pub fn strip_type(&mut self, ty: &TypeValue) -> TypeValue {
        match ty {
            TypeValue::Literal { base, .. } => (**base).clone(),
            TypeValue::LocalArray { id, base } => self.resolve_local_array(*id, base),
            TypeValue::Array { shape, base } => {
                if shape.is_context_free() && !shape_has_literals(shape) {
                    return ty.clone();
                }
                TypeValue::Array {
                    shape: Arc::new(self.strip_shape(shape)),
                    base: base.clone(),
                }
            }
            TypeValue::Instance { class } => TypeValue::instance(self.strip_type(class)),
            TypeValue::Closure {
                code,
                env,
                underlying,
            } => TypeValue::closure(*code, *env, self.strip_type(underlying)),
            TypeValue::TypedClosure {
                params,
                ret,
                underlying,
            } => TypeValue::typed_closure(
                params.iter().map(|param| self.strip_union(param)).collect(),
                self.strip_union(ret),
                self.strip_type(underlying),
            ),
            TypeValue::Any | TypeValue::Class(_) | TypeValue::Code(_) => ty.clone(),
        }
    }

    pub fn strip_union(&mut self, union: &Union) -> Union {
        union.iter().map(|ty| self.strip_type(ty)).collect()
    }

    pub fn strip_shape(&mut self, shape: &ArrayShape) -> ArrayShape {
        match shape {
            ArrayShape::Seq(elem) => ArrayShape::Seq(self.strip_union(elem)),
            ArrayShape::Tuple(elems) => {
                ArrayShape::Tuple(elems.iter().map(|elem| self.strip_union(elem)).collect())
            }
        }
    }

    fn resolve_local_array(&mut self, id: ArrayId, base: &TypeValue) -> TypeValue {
        if let Some(shape) = self.resolved.get(&id) {
            return TypeValue::Array {
                shape: Arc::clone(shape),
                base: Box::new(base.clone()),
            };
        }
        match self.guard.enter(id) {
            RecursionResult::Entered => {
                let position = self.guard.path().len() - 1;
                let outer_floor = std::mem::replace(&mut self.cycle_floor, usize::MAX);

                let env = self.env;
                let Some(elems) = env.get_array_elem_types(id) else {
                    panic!("local array {id} is not allocated in this environment");
                };
                let shape = Arc::new(self.strip_shape(elems));
                self.guard.leave(id);

                let floor = std::mem::replace(&mut self.cycle_floor, outer_floor);
                if floor < position {
                    self.cycle_floor = self.cycle_floor.min(floor);
                } else if !self.guard.is_exceeded() {
                    self.resolved.insert(id, Arc::clone(&shape));
                }
                TypeValue::Array {
                    shape,
                    base: Box::new(base.clone()),
                }
            }
            RecursionResult::Cycle => {
                if let Some(position) = self.guard.path().iter().position(|&on_path| on_path == id)
                {
                    self.cycle_floor = self.cycle_floor.min(position);
                }
                trace!(
                    id = %id,
                    path = ?self.guard.path(),
                    "local array contains itself; approximating with Any"
                );
                TypeValue::Any
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                debug!(
                    id = %id,
                    depth = self.guard.depth(),
                    iterations = self.guard.iterations(),
                    "local array resolution exceeded its budget; approximating with Any"
                );
                TypeValue::Any
            }
        }
    }
}

fn shape_has_literals(shape: &ArrayShape) -> bool {
    match shape {
        ArrayShape::Seq(elem) => union_has_literals(elem),
        ArrayShape::Tuple(elems) => elems.iter().any(union_has_literals),
    }
}

fn union_has_literals(union: &Union) -> bool {
    union.iter().any(type_has_literals)
}

fn type_has_literals(ty: &TypeValue) -> bool {
    match ty {
        TypeValue::Literal { .. } => true,
        TypeValue::Array { shape, .. } => shape_has_literals(shape),
        TypeValue::Instance { class } => type_has_literals(class),
        TypeValue::Closure { underlying, .. } => type_has_literals(underlying),
        TypeValue::TypedClosure {
            params,
            ret,
            underlying,
        } => {
            params.iter().any(union_has_literals)
                || union_has_literals(ret)
                || type_has_literals(underlying)
        }
        TypeValue::Any | TypeValue::Class(_) | TypeValue::Code(_) | TypeValue::LocalArray { .. } => {
            false
        }
    }
}

#[cfg(test)]
#[path = "../tests/strip_tests.rs"]
mod tests;

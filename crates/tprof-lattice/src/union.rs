//! Union: the join-set of type values.
//!
//! A `Union` means "one of these types". Members are deduplicated by
//! structural equality and the set is order-insensitive for equality and
//! hashing. Insertion order is kept only so that printed names are stable.
//!
//! Storage is an `Arc`-shared index set, so cloning a union (for example the
//! untouched positions of a tuple after a write) shares the members instead
//! of copying them.

use crate::env::LocalEnv;
use crate::format::TypeFormatter;
use crate::registry::Registry;
use crate::strip::LocalInfoStripper;
use crate::types::TypeValue;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHasher};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

type TypeSet = IndexSet<TypeValue, FxBuildHasher>;

#[derive(Clone, Default)]
pub struct Union {
    types: Arc<TypeSet>,
}

impl Union {
    /// The empty union (no possible type).
    pub fn bot() -> Self {
        Union::default()
    }

    /// A union holding exactly `ty`.
    pub fn single(ty: TypeValue) -> Self {
        let mut types = TypeSet::default();
        types.insert(ty);
        Union {
            types: Arc::new(types),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, ty: &TypeValue) -> bool {
        self.types.contains(ty)
    }

    /// Members in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeValue> {
        self.types.iter()
    }

    /// This union with `ty` added.
    pub fn with(&self, ty: TypeValue) -> Union {
        if self.types.contains(&ty) {
            return self.clone();
        }
        let mut types = (*self.types).clone();
        types.insert(ty);
        Union {
            types: Arc::new(types),
        }
    }

    /// Join of two unions. Returns a shared copy when one side already
    /// contains the other.
    pub fn union(&self, other: &Union) -> Union {
        if other.types.iter().all(|ty| self.types.contains(ty)) {
            return self.clone();
        }
        if self.types.iter().all(|ty| other.types.contains(ty)) {
            return other.clone();
        }
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Returns `true` when no member holds a local array.
    pub fn is_context_free(&self) -> bool {
        self.types.iter().all(TypeValue::is_context_free)
    }

    /// Eliminate environment dependence from every member and rebuild the
    /// union, so members that generalize to the same type merge.
    ///
    /// # Panics
    ///
    /// Panics if a local array id reached during resolution was not allocated
    /// by `env`.
    pub fn strip_local_info<E: LocalEnv + ?Sized>(&self, env: &E) -> Union {
        LocalInfoStripper::new(env).strip_union(self)
    }

    /// Member names joined with ` | `; the empty union prints as `bot`.
    pub fn screen_name<R: Registry + ?Sized>(&self, registry: &R) -> String {
        TypeFormatter::new(registry).format_union(self)
    }
}

impl FromIterator<TypeValue> for Union {
    fn from_iter<I: IntoIterator<Item = TypeValue>>(iter: I) -> Self {
        Union {
            types: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl From<TypeValue> for Union {
    fn from(ty: TypeValue) -> Self {
        Union::single(ty)
    }
}

impl<'a> IntoIterator for &'a Union {
    type Item = &'a TypeValue;
    type IntoIter = indexmap::set::Iter<'a, TypeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl PartialEq for Union {
    /// Set equality: same members, in any order.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.types, &other.types) || *self.types == *other.types
    }
}

impl Eq for Union {}

impl Hash for Union {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: combine member hashes commutatively.
        let mut combined: u64 = 0;
        for ty in self.types.iter() {
            let mut hasher = FxHasher::default();
            ty.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        self.types.len().hash(state);
        combined.hash(state);
    }
}

impl fmt::Debug for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.types.iter()).finish()
    }
}

impl Serialize for Union {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.types.iter())
    }
}

#[cfg(test)]
#[path = "../tests/union_tests.rs"]
mod tests;

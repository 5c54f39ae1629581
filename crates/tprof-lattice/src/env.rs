//! Local environments: storage for context-dependent array contents.
//!
//! The driver owns one environment per analysis context. Arrays created or
//! loaded in that context live in environment slots keyed by `ArrayId`; the
//! lattice only ever holds the id (`TypeValue::LocalArray`). Updating a slot
//! changes what every handle to it resolves to, without rebuilding the
//! values that hold the handle.
//!
//! `LocalEnv` is the protocol the lattice needs. `ArrayEnv` is the arena
//! implementation used by the reference driver and the tests.

use crate::array::ArrayShape;
use crate::errors::{LatticeError, LatticeResult};
use crate::types::TypeValue;
use rustc_hash::FxHashMap;
use tprof_common::ArrayId;
use tracing::trace;

pub trait LocalEnv {
    /// Current contents of the local array `id`, or `None` when `id` was not
    /// allocated by this environment.
    fn get_array_elem_types(&self, id: ArrayId) -> Option<&ArrayShape>;

    /// Install the contents of a freshly allocated local array.
    ///
    /// Ids must be installed in increasing order and never twice.
    fn deploy_array(&mut self, id: ArrayId, elems: ArrayShape) -> LatticeResult<()>;

    /// Thread `ty` through allocation: every context-free array inside it is
    /// installed in this environment and replaced by a local array handle,
    /// consuming ids from `next_id` upward.
    ///
    /// Returns the deployed type and the next unused id.
    fn deploy_type(
        &mut self,
        ty: &TypeValue,
        next_id: ArrayId,
    ) -> LatticeResult<(TypeValue, ArrayId)> {
        ty.deploy_type(self, next_id)
    }
}

// ---------------------------------------------------------------------------
// ArrayEnv
// ---------------------------------------------------------------------------

/// Arena of local array slots.
///
/// Keeps a high-water mark so ids are handed out monotonically and never
/// reused. Cloning is cheap (element unions are shared) and gives the driver
/// an independent snapshot.
#[derive(Clone, Debug, Default)]
pub struct ArrayEnv {
    slots: FxHashMap<ArrayId, ArrayShape>,
    next_id: ArrayId,
}

impl ArrayEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next allocation will receive.
    #[inline]
    pub fn next_array_id(&self) -> ArrayId {
        self.next_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: ArrayId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Allocate a new local array holding `elems` and return its handle.
    pub fn new_local_array(
        &mut self,
        elems: ArrayShape,
        base: TypeValue,
    ) -> LatticeResult<TypeValue> {
        let id = self.next_id;
        self.deploy_array(id, elems)?;
        Ok(TypeValue::local_array(id, base))
    }

    /// Replace the contents of `id` with `f(current contents)`.
    pub fn update_array_elem_types(
        &mut self,
        id: ArrayId,
        f: impl FnOnce(&ArrayShape) -> ArrayShape,
    ) -> LatticeResult<()> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(LatticeError::UnknownArray { id })?;
        *slot = f(slot);
        Ok(())
    }

    /// Store `ty` at `idx` of local array `id` (`None` for an unknown index),
    /// with the overwrite/widen rules of [`ArrayShape::write`].
    pub fn write_array_elem(
        &mut self,
        id: ArrayId,
        idx: Option<usize>,
        ty: TypeValue,
    ) -> LatticeResult<()> {
        self.update_array_elem_types(id, |shape| shape.write(idx, ty))
    }
}

impl LocalEnv for ArrayEnv {
    fn get_array_elem_types(&self, id: ArrayId) -> Option<&ArrayShape> {
        self.slots.get(&id)
    }

    fn deploy_array(&mut self, id: ArrayId, elems: ArrayShape) -> LatticeResult<()> {
        if id < self.next_id {
            return Err(LatticeError::ArrayIdReused {
                id,
                next: self.next_id,
            });
        }
        let next = id.next().ok_or(LatticeError::ArrayIdsExhausted { id })?;
        trace!(id = %id, tuple = elems.is_tuple(), "allocating local array");
        self.slots.insert(id, elems);
        self.next_id = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/env_tests.rs"]
mod tests;

//! Call signatures recorded by the profiler.

use crate::format::TypeFormatter;
use crate::registry::Registry;
use crate::types::TypeValue;
use serde::Serialize;
use tprof_common::MemberId;

/// One observed call shape: receiver, member, positional arguments and an
/// optional block. Fixed arity only.
///
/// Every component is context-free; local arrays are stripped before a
/// signature is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub receiver_type: TypeValue,
    /// `true` when the call targets a class-level method.
    pub is_singleton: bool,
    pub member_id: MemberId,
    pub arg_types: Vec<TypeValue>,
    pub block_type: Option<TypeValue>,
}

impl Signature {
    pub fn new(
        receiver_type: TypeValue,
        is_singleton: bool,
        member_id: MemberId,
        arg_types: Vec<TypeValue>,
        block_type: Option<TypeValue>,
    ) -> Self {
        debug_assert!(
            receiver_type.is_context_free()
                && arg_types.iter().all(TypeValue::is_context_free)
                && block_type.as_ref().is_none_or(TypeValue::is_context_free),
            "signature components must be stripped of local arrays"
        );
        Signature {
            receiver_type,
            is_singleton,
            member_id,
            arg_types,
            block_type,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }

    /// Resolve the called method on the receiver.
    ///
    /// An array receiver dispatches through its base type.
    pub fn lookup<R: Registry + ?Sized>(&self, registry: &R) -> Option<R::Method> {
        let receiver = match &self.receiver_type {
            TypeValue::Array { base, .. } => base.as_ref(),
            other => other,
        };
        receiver.get_method(self.member_id, registry)
    }

    pub fn screen_name<R: Registry + ?Sized>(&self, registry: &R) -> String {
        TypeFormatter::new(registry).format_signature(self)
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;

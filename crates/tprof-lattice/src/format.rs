//! Screen names for types, unions, shapes and signatures.
//!
//! Names are for diagnostics and reports. Class names come from the
//! registry, so the same value prints differently under different
//! registries but always the same way under one.

use crate::array::ArrayShape;
use crate::registry::Registry;
use crate::signature::Signature;
use crate::types::TypeValue;
use crate::union::Union;
use smallvec::SmallVec;

type Parts = SmallVec<[String; 4]>;

pub struct TypeFormatter<'a, R: Registry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: Registry + ?Sized> TypeFormatter<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        TypeFormatter { registry }
    }

    /// # Panics
    ///
    /// Panics on a `LocalArray` anywhere inside `ty`.
    pub fn format_type(&self, ty: &TypeValue) -> String {
        match ty {
            TypeValue::Any => "untyped".to_string(),
            TypeValue::Class(class) => {
                format!("singleton({})", self.registry.get_class_name(class))
            }
            TypeValue::Instance { class } => match class.as_ref() {
                TypeValue::Class(class) => self.registry.get_class_name(class),
                other => self.format_type(other),
            },
            TypeValue::Code(code) => format!("<code {code}>"),
            TypeValue::Closure { underlying, .. } => self.format_type(underlying),
            TypeValue::TypedClosure { params, ret, .. } => {
                let params: Parts = params.iter().map(|p| self.format_union(p)).collect();
                format!("^({}) -> {}", params.join(", "), self.format_union(ret))
            }
            TypeValue::Literal { value, base } => format!("{}({value})", self.format_type(base)),
            TypeValue::LocalArray { id, .. } => panic!(
                "cannot format local array {id}: resolve it with strip_local_info first"
            ),
            TypeValue::Array { shape, base } => {
                let base_name = match base.as_ref() {
                    TypeValue::Instance { class } => match class.as_ref() {
                        TypeValue::Class(class) => self.registry.get_class_name(class),
                        _ => "Array".to_string(),
                    },
                    _ => "Array".to_string(),
                };
                self.format_shape(shape, &base_name)
            }
        }
    }

    /// Member names in first-seen order, joined with ` | `.
    pub fn format_union(&self, union: &Union) -> String {
        if union.is_empty() {
            return "bot".to_string();
        }
        let parts: Parts = union.iter().map(|ty| self.format_type(ty)).collect();
        parts.join(" | ")
    }

    /// `Base[elem]` for sequences, `[a, b]` for tuples.
    pub fn format_shape(&self, shape: &ArrayShape, base_name: &str) -> String {
        match shape {
            ArrayShape::Seq(elem) => format!("{base_name}[{}]", self.format_union(elem)),
            ArrayShape::Tuple(elems) => {
                let parts: Parts = elems.iter().map(|elem| self.format_union(elem)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// `Recv#member(args) { block }` for instance calls, `Recv.member(args)`
    /// for singleton calls. The receiver of a singleton call prints as the
    /// bare class name.
    pub fn format_signature(&self, sig: &Signature) -> String {
        let receiver = match (&sig.receiver_type, sig.is_singleton) {
            (TypeValue::Class(class), true) => self.registry.get_class_name(class),
            (receiver, _) => self.format_type(receiver),
        };
        let sep = if sig.is_singleton { "." } else { "#" };
        let args: Parts = sig.arg_types.iter().map(|ty| self.format_type(ty)).collect();
        let mut out = format!(
            "{receiver}{sep}{}({})",
            self.registry.member_name(sig.member_id),
            args.join(", ")
        );
        if let Some(block) = &sig.block_type {
            out.push_str(" { ");
            out.push_str(&self.format_type(block));
            out.push_str(" }");
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;

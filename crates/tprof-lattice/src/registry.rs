//! Class registry: class names and method lookup.
//!
//! The lattice never owns classes. It asks a `Registry` for names when
//! printing and for methods when dispatching. `ClassTable` is the reference
//! registry: a flat table of classes with single inheritance, generic over
//! whatever the driver stores as a method.

use crate::types::{ClassType, TypeValue};
use crate::union::Union;
use rustc_hash::FxHashMap;
use tprof_common::{Atom, ClassId, Interner, MemberId};

pub trait Registry {
    /// Handle returned for a resolved method.
    type Method: Clone;

    fn get_class_name(&self, class: &ClassType) -> String;

    /// Instance method `member` of the class denoted by `class`.
    fn get_method(&self, class: &TypeValue, member: MemberId) -> Option<Self::Method>;

    /// Singleton (class-level) method `member` of `class`.
    fn get_singleton_method(&self, class: &ClassType, member: MemberId) -> Option<Self::Method>;

    fn member_name(&self, member: MemberId) -> String;
}

// ---------------------------------------------------------------------------
// Builtins
// ---------------------------------------------------------------------------

/// The classes the lattice itself needs: literal bases, nil and arrays.
#[derive(Clone, Debug)]
pub struct Builtins {
    /// The root class.
    pub obj: ClassType,
    pub nil: ClassType,
    pub bool: ClassType,
    pub int: ClassType,
    pub str: ClassType,
    pub sym: ClassType,
    pub ary: ClassType,
    pub range: ClassType,
    pub regexp: ClassType,
    pub proc: ClassType,
}

impl Builtins {
    pub fn instance(&self, class: &ClassType) -> TypeValue {
        TypeValue::instance_of(class)
    }

    /// The nil instance type (nil has a single inhabitant, so no literal).
    pub fn nil(&self) -> TypeValue {
        TypeValue::instance_of(&self.nil)
    }

    /// The union holding exactly the nil instance type.
    pub fn nil_union(&self) -> Union {
        Union::single(self.nil())
    }

    /// Base type of every array.
    pub fn array_instance(&self) -> TypeValue {
        TypeValue::instance_of(&self.ary)
    }

    /// Base type of closures created from blocks.
    pub fn proc_instance(&self) -> TypeValue {
        TypeValue::instance_of(&self.proc)
    }
}

// ---------------------------------------------------------------------------
// ClassTable
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct ClassEntry<M> {
    name: Atom,
    superclass: Option<ClassId>,
    methods: FxHashMap<MemberId, M>,
    singleton_methods: FxHashMap<MemberId, M>,
}

/// Reference registry with single inheritance.
///
/// Lookups walk the superclass chain, for instance and singleton methods
/// alike. Superclasses must be registered before their subclasses, which
/// keeps every chain finite.
#[derive(Clone, Debug)]
pub struct ClassTable<M> {
    interner: Interner,
    classes: Vec<ClassEntry<M>>,
}

impl<M: Clone> Default for ClassTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> ClassTable<M> {
    pub fn new() -> Self {
        let mut interner = Interner::new();
        interner.intern_common();
        ClassTable {
            interner,
            classes: Vec::new(),
        }
    }

    /// A table with the builtin classes registered, all deriving from the
    /// root class `Object`.
    pub fn with_builtins() -> (Self, Builtins) {
        let mut table = Self::new();
        let obj = table.new_class("Object", None);
        let mut sub = |name: &str| table.new_class(name, Some(&obj));
        let builtins = Builtins {
            nil: sub("NilClass"),
            bool: sub("Boolean"),
            int: sub("Integer"),
            str: sub("String"),
            sym: sub("Symbol"),
            ary: sub("Array"),
            range: sub("Range"),
            regexp: sub("Regexp"),
            proc: sub("Proc"),
            obj,
        };
        (table, builtins)
    }

    /// Register a class and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if `superclass` was not registered in this table.
    pub fn new_class(&mut self, name: &str, superclass: Option<&ClassType>) -> ClassType {
        let superclass = superclass.map(|sup| {
            assert!(
                (sup.idx.0 as usize) < self.classes.len(),
                "superclass {:?} is not registered in this class table",
                sup.idx
            );
            sup.idx
        });
        let idx = ClassId(self.classes.len() as u32);
        self.classes.push(ClassEntry {
            name: self.interner.intern(name),
            superclass,
            methods: FxHashMap::default(),
            singleton_methods: FxHashMap::default(),
        });
        ClassType::new(idx, Some(name))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn intern_member(&mut self, name: &str) -> MemberId {
        self.interner.intern(name)
    }

    pub fn superclass(&self, class: &ClassType) -> Option<ClassType> {
        let sup = self.entry(class.idx)?.superclass?;
        Some(self.class_type(sup))
    }

    /// Handle for a registered class id, carrying its name.
    pub fn class_type(&self, idx: ClassId) -> ClassType {
        let name = self.entry(idx).map(|entry| self.interner.resolve(entry.name));
        ClassType::new(idx, name)
    }

    /// Define instance method `member` on `class`, replacing an earlier one.
    pub fn add_method(&mut self, class: &ClassType, member: MemberId, method: M) {
        if let Some(entry) = self.entry_mut(class.idx) {
            entry.methods.insert(member, method);
        }
    }

    /// Define singleton method `member` on `class`, replacing an earlier one.
    pub fn add_singleton_method(&mut self, class: &ClassType, member: MemberId, method: M) {
        if let Some(entry) = self.entry_mut(class.idx) {
            entry.singleton_methods.insert(member, method);
        }
    }

    fn entry(&self, idx: ClassId) -> Option<&ClassEntry<M>> {
        self.classes.get(idx.0 as usize)
    }

    fn entry_mut(&mut self, idx: ClassId) -> Option<&mut ClassEntry<M>> {
        self.classes.get_mut(idx.0 as usize)
    }

    fn lookup(
        &self,
        mut idx: ClassId,
        select: impl Fn(&ClassEntry<M>) -> &FxHashMap<MemberId, M>,
        member: MemberId,
    ) -> Option<M> {
        loop {
            let entry = self.entry(idx)?;
            if let Some(method) = select(entry).get(&member) {
                return Some(method.clone());
            }
            idx = entry.superclass?;
        }
    }
}

impl<M: Clone> Registry for ClassTable<M> {
    type Method = M;

    fn get_class_name(&self, class: &ClassType) -> String {
        match self.entry(class.idx) {
            Some(entry) => self.interner.resolve(entry.name).to_string(),
            None => match &class.name {
                Some(name) => name.to_string(),
                None => format!("<class {}>", class.idx.0),
            },
        }
    }

    fn get_method(&self, class: &TypeValue, member: MemberId) -> Option<M> {
        match class {
            TypeValue::Class(class) => self.lookup(class.idx, |entry| &entry.methods, member),
            _ => None,
        }
    }

    fn get_singleton_method(&self, class: &ClassType, member: MemberId) -> Option<M> {
        self.lookup(class.idx, |entry| &entry.singleton_methods, member)
    }

    fn member_name(&self, member: MemberId) -> String {
        self.interner.resolve(member).to_string()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;

//! Runtime values.
//!
//! Functions, classes, and instances are shared through `Rc`: a bound
//! method and the instance it came from, or two closures over one
//! environment, must observe the same underlying object. Equality on
//! these variants is identity, matching the language's reference
//! semantics; numbers, strings, booleans, and `nil` compare by value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lox_ir::{FunctionId, Name};
use rustc_hash::FxHashMap;

use crate::Program;
use crate::environment::EnvRef;

/// A Lox runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Function(Rc<LoxFunction>),
    Native(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
    Instance(InstanceRef),
}

impl Value {
    /// Everything is truthy except `nil` and `false`.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// The number inside, if this is one.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    #[expect(
        clippy::float_cmp,
        reason = "number equality is exact IEEE comparison, not epsilon-based"
    )]
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// A user-declared function or method, closed over its defining
/// environment.
///
/// Carries the [`Program`] it was declared in: its body's node ids are
/// only valid against that program's arena, and the function may be
/// called long after the session has moved on to other programs.
pub struct LoxFunction {
    program: Program,
    declaration: FunctionId,
    closure: EnvRef,
    is_initializer: bool,
}

impl LoxFunction {
    pub(crate) fn new(
        program: &Program,
        declaration: FunctionId,
        closure: &EnvRef,
        is_initializer: bool,
    ) -> Self {
        LoxFunction {
            program: program.clone(),
            declaration,
            closure: closure.clone(),
            is_initializer,
        }
    }

    /// Close this method over `instance`, producing the bound form.
    /// The new closure layer binds `this_name` so the body's `this`
    /// reads resolve to the instance.
    pub(crate) fn bind(
        self: &Rc<Self>,
        instance: &InstanceRef,
        this_name: Name,
    ) -> Rc<LoxFunction> {
        let environment = EnvRef::with_parent(&self.closure);
        environment.define(this_name, Value::Instance(instance.clone()));
        Rc::new(LoxFunction {
            program: self.program.clone(),
            declaration: self.declaration,
            closure: environment,
            is_initializer: self.is_initializer,
        })
    }

    /// How many parameters the declaration takes.
    pub fn arity(&self) -> usize {
        self.program.ast().function(self.declaration).arity()
    }

    /// The declared name.
    pub fn name(&self) -> Name {
        self.program.ast().function(self.declaration).name
    }

    #[inline]
    pub(crate) fn program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub(crate) fn declaration(&self) -> FunctionId {
        self.declaration
    }

    #[inline]
    pub(crate) fn closure(&self) -> &EnvRef {
        &self.closure
    }

    #[inline]
    pub(crate) fn is_initializer(&self) -> bool {
        self.is_initializer
    }
}

impl fmt::Debug for LoxFunction {
    /// Skips the program handle; printing a whole arena per function
    /// value drowns every other field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("declaration", &self.declaration)
            .field("is_initializer", &self.is_initializer)
            .finish_non_exhaustive()
    }
}

/// A built-in function implemented in Rust.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&[Value]) -> Value,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A class object: the method table plus the inherited chain.
#[derive(Debug)]
pub struct LoxClass {
    name: Name,
    superclass: Option<Rc<LoxClass>>,
    methods: FxHashMap<Name, Rc<LoxFunction>>,
}

impl LoxClass {
    pub(crate) fn new(
        name: Name,
        superclass: Option<Rc<LoxClass>>,
        methods: FxHashMap<Name, Rc<LoxFunction>>,
    ) -> Self {
        LoxClass {
            name,
            superclass,
            methods,
        }
    }

    /// The declared class name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Look a method up on this class, then up the superclass chain.
    pub fn find_method(&self, name: Name) -> Option<Rc<LoxFunction>> {
        if let Some(method) = self.methods.get(&name) {
            return Some(method.clone());
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }

    /// Calling a class runs `init` when one exists anywhere on the
    /// chain, so the class's arity is its initializer's.
    pub fn arity(&self, init_name: Name) -> usize {
        self.find_method(init_name)
            .map_or(0, |initializer| initializer.arity())
    }
}

/// A shared handle to one instance's mutable field table.
#[repr(transparent)]
pub struct InstanceRef(Rc<RefCell<LoxInstance>>);

struct LoxInstance {
    class: Rc<LoxClass>,
    fields: FxHashMap<Name, Value>,
}

impl InstanceRef {
    pub(crate) fn new(class: Rc<LoxClass>) -> Self {
        InstanceRef(Rc::new(RefCell::new(LoxInstance {
            class,
            fields: FxHashMap::default(),
        })))
    }

    /// The class this instance was built from.
    pub fn class(&self) -> Rc<LoxClass> {
        self.0.borrow().class.clone()
    }

    /// Read a field. Method lookup is the interpreter's job; fields
    /// always shadow methods.
    pub fn field(&self, name: Name) -> Option<Value> {
        self.0.borrow().fields.get(&name).cloned()
    }

    /// Write a field, creating it on first assignment.
    pub fn set_field(&self, name: Name, value: Value) {
        self.0.borrow_mut().fields.insert(name, value);
    }

    /// Identity comparison; `==` on instances means same object.
    pub fn ptr_eq(&self, other: &InstanceRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for InstanceRef {
    #[inline]
    fn clone(&self) -> Self {
        InstanceRef(Rc::clone(&self.0))
    }
}

impl fmt::Debug for InstanceRef {
    /// Opaque on purpose: a field can hold the instance itself, so a
    /// structural debug print would never terminate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRef").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nil_and_false_are_falsy_everything_else_truthy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::Str("".into()).is_truthy());
    }

    #[test]
    fn primitives_compare_by_value() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_eq!(Value::Number(1.0), Value::Number(1.0));
        assert_eq!(Value::Str("a".into()), Value::Str("a".into()));
        assert_ne!(Value::Number(1.0), Value::Number(2.0));
    }

    #[test]
    fn mixed_types_are_never_equal() {
        assert_ne!(Value::Number(1.0), Value::Str("1".into()));
        assert_ne!(Value::Bool(false), Value::Nil);
        assert_ne!(Value::Number(0.0), Value::Bool(false));
    }

    #[test]
    fn nan_is_unequal_to_itself() {
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }
}

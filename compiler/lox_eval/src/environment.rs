//! Environments: lexically chained variable scopes.
//!
//! Each environment maps names to values and optionally points at the
//! scope it was opened inside. Chains are shared, not cloned: a closure
//! holds an [`EnvRef`] to its defining environment, so a counter
//! captured by two closures is one counter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lox_ir::Name;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// A single scope's bindings plus the link to its parent.
pub struct Environment {
    values: FxHashMap<Name, Value>,
    parent: Option<EnvRef>,
}

/// A shared handle to an [`Environment`].
///
/// Wraps `Rc<RefCell<Environment>>` so all scope allocations go through
/// the two factory methods, and so the interpreter can hold many live
/// references to one scope (closures, instances bound via `this`).
/// `#[repr(transparent)]` keeps the wrapper layout-identical to the
/// `Rc` it holds.
#[repr(transparent)]
pub struct EnvRef(Rc<RefCell<Environment>>);

impl EnvRef {
    /// Create a root environment with no parent. The interpreter's
    /// globals are the only root in practice.
    pub fn new() -> Self {
        EnvRef(Rc::new(RefCell::new(Environment {
            values: FxHashMap::default(),
            parent: None,
        })))
    }

    /// Open a child scope inside `parent`.
    pub fn with_parent(parent: &EnvRef) -> Self {
        EnvRef(Rc::new(RefCell::new(Environment {
            values: FxHashMap::default(),
            parent: Some(parent.clone()),
        })))
    }

    /// Bind a name in this scope, shadowing any outer binding and
    /// overwriting any previous one here.
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().values.insert(name, value);
    }

    /// Read a name, searching outward through the chain.
    pub fn get(&self, name: Name) -> Option<Value> {
        let inner = self.0.borrow();
        if let Some(value) = inner.values.get(&name) {
            return Some(value.clone());
        }
        inner.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Assign to an existing binding, searching outward through the
    /// chain. Returns `false` when the name is bound nowhere.
    #[must_use]
    pub fn assign(&self, name: Name, value: Value) -> bool {
        let mut inner = self.0.borrow_mut();
        if let Some(slot) = inner.values.get_mut(&name) {
            *slot = value;
            return true;
        }
        match &inner.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }

    /// Read a name exactly `hops` scopes up the chain, without
    /// searching. The hop count comes from the resolver.
    pub fn get_at(&self, hops: u32, name: Name) -> Option<Value> {
        self.ancestor(hops).0.borrow().values.get(&name).cloned()
    }

    /// Assign a name exactly `hops` scopes up the chain. Returns
    /// `false` when that scope has no such binding.
    #[must_use]
    pub fn assign_at(&self, hops: u32, name: Name, value: Value) -> bool {
        match self.ancestor(hops).0.borrow_mut().values.get_mut(&name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Walk `hops` parents up the chain. Stops at the root if the chain
    /// is shorter, which the resolver contract rules out.
    fn ancestor(&self, hops: u32) -> EnvRef {
        let mut env = self.clone();
        for _ in 0..hops {
            let parent = env.0.borrow().parent.clone();
            match parent {
                Some(parent) => env = parent,
                None => break,
            }
        }
        env
    }
}

impl Clone for EnvRef {
    #[inline]
    fn clone(&self) -> Self {
        EnvRef(Rc::clone(&self.0))
    }
}

impl Default for EnvRef {
    fn default() -> Self {
        EnvRef::new()
    }
}

impl fmt::Debug for EnvRef {
    /// Opaque on purpose: environment chains are cyclic through closure
    /// values, so a structural debug print would never terminate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvRef").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use lox_ir::StringInterner;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn define_then_get_in_same_scope() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let env = EnvRef::new();
        env.define(x, Value::Number(42.0));
        assert_eq!(env.get(x), Some(Value::Number(42.0)));
    }

    #[test]
    fn get_searches_outward() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let root = EnvRef::new();
        root.define(x, Value::Number(1.0));
        let inner = EnvRef::with_parent(&root);
        assert_eq!(inner.get(x), Some(Value::Number(1.0)));
    }

    #[test]
    fn shadowing_wins_over_the_parent() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let root = EnvRef::new();
        root.define(x, Value::Number(1.0));
        let inner = EnvRef::with_parent(&root);
        inner.define(x, Value::Number(2.0));

        assert_eq!(inner.get(x), Some(Value::Number(2.0)));
        assert_eq!(root.get(x), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_writes_through_to_the_defining_scope() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let root = EnvRef::new();
        root.define(x, Value::Number(1.0));
        let inner = EnvRef::with_parent(&root);

        assert!(inner.assign(x, Value::Number(2.0)));
        assert_eq!(root.get(x), Some(Value::Number(2.0)));
    }

    #[test]
    fn assign_to_unbound_name_fails() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let env = EnvRef::new();
        assert!(!env.assign(x, Value::Nil));
    }

    #[test]
    fn get_at_jumps_without_searching() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let root = EnvRef::new();
        root.define(x, Value::Number(1.0));
        let middle = EnvRef::with_parent(&root);
        middle.define(x, Value::Number(2.0));
        let inner = EnvRef::with_parent(&middle);

        assert_eq!(inner.get_at(0, x), None);
        assert_eq!(inner.get_at(1, x), Some(Value::Number(2.0)));
        assert_eq!(inner.get_at(2, x), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_at_targets_one_scope_only() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let root = EnvRef::new();
        root.define(x, Value::Number(1.0));
        let inner = EnvRef::with_parent(&root);
        inner.define(x, Value::Number(2.0));

        assert!(inner.assign_at(1, x, Value::Number(9.0)));
        assert_eq!(root.get(x), Some(Value::Number(9.0)));
        assert_eq!(inner.get(x), Some(Value::Number(2.0)));
    }

    #[test]
    fn shared_handles_see_each_others_writes() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let env = EnvRef::new();
        let alias = env.clone();
        env.define(x, Value::Number(1.0));
        assert!(alias.assign(x, Value::Number(2.0)));
        assert_eq!(env.get(x), Some(Value::Number(2.0)));
    }
}

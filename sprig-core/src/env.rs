// sprig-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use sprig_parser::{SprigVal, Symbol};

use crate::bridge::{HostBridge, NullBridge};
use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. Each frame has
/// its own bindings map; lookups climb outward, definitions always land in
/// the frame they are made on.
///
/// The root frame (the one without a parent) is owned by whoever created it,
/// normally an [`Interpreter`](crate::Interpreter). Child frames and closures
/// refer to the root weakly, so closures stored in the root never keep it
/// alive. Other frames are held strongly.
///
/// # Examples
///
/// ```
/// use sprig_core::Env;
/// use sprig_parser::{SprigVal, Symbol};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define(Symbol::new("x"), SprigVal::number(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), SprigVal::number(42));
///
/// // A child frame sees the parent's bindings and can shadow them
/// let child = env.child();
/// child.define(Symbol::new("x"), SprigVal::number(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), SprigVal::number(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), SprigVal::number(42));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, SprigVal>,
    parent: Option<EnvLink>,
    /// Host-dispatch bridge (only set on the root environment)
    bridge: Option<Rc<dyn HostBridge>>,
}

/// A non-owning handle to an environment frame.
///
/// Natives that need the root environment (such as `eval`) hold one of these
/// so the frame they are stored in does not keep itself alive.
#[derive(Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl WeakEnv {
    /// Get the environment back, if it is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

/// A reference to an enclosing frame: weak for the root, strong otherwise.
#[derive(Clone)]
pub(crate) enum EnvLink {
    Owned(Env),
    Root(WeakEnv),
}

impl EnvLink {
    pub(crate) fn to(env: &Env) -> Self {
        if env.is_root() {
            EnvLink::Root(env.downgrade())
        } else {
            EnvLink::Owned(env.clone())
        }
    }

    /// The frame, unless it was a root that has since been dropped.
    pub(crate) fn get(&self) -> Option<Env> {
        match self {
            EnvLink::Owned(env) => Some(env.clone()),
            EnvLink::Root(weak) => weak.upgrade(),
        }
    }
}

impl Env {
    /// Create a new root environment with the no-op host bridge.
    pub fn new() -> Self {
        Env::with_bridge(Rc::new(NullBridge))
    }

    /// Create a new root environment with the given host bridge.
    pub fn with_bridge(bridge: Rc<dyn HostBridge>) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
                bridge: Some(bridge),
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(EnvLink::to(self)),
                bridge: None, // Children share the root's bridge
            })),
        }
    }

    /// Create a child frame binding `params` positionally over `args`, with
    /// `rest` (when present) bound to a list of the remaining arguments.
    ///
    /// Fails with `ArityMismatch` when there are too few arguments, or too
    /// many for a parameter list without a rest parameter.
    pub fn bind(
        &self,
        params: &[Symbol],
        rest: Option<&Symbol>,
        args: &[SprigVal],
    ) -> Result<Self> {
        let too_few = args.len() < params.len();
        let too_many = rest.is_none() && args.len() > params.len();
        if too_few || too_many {
            return Err(Error::ArityMismatch.into());
        }

        let env = self.child();
        {
            let mut inner = env.inner.borrow_mut();
            for (param, arg) in params.iter().zip(args) {
                inner.bindings.insert(param.clone(), arg.clone());
            }
            if let Some(rest) = rest {
                let remaining = SprigVal::list(args[params.len()..].iter().cloned());
                inner.bindings.insert(rest.clone(), remaining);
            }
        }
        Ok(env)
    }

    /// Get a non-owning handle to this frame.
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Get the host bridge from the root environment.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn bridge(&self) -> Rc<dyn HostBridge> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(bridge) = &inner.bridge {
                return Rc::clone(bridge);
            }
            let parent = inner.parent.as_ref().and_then(EnvLink::get);
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Rc::new(NullBridge),
            }
        }
    }

    /// Define a binding in this environment (not parent).
    pub fn define(&self, sym: Symbol, val: SprigVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a symbol in this environment or parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn lookup(&self, sym: &Symbol) -> Result<SprigVal> {
        self.find(sym)
            .ok_or_else(|| Error::SymbolNotFound(sym.name().to_string()).into())
    }

    /// Look up a symbol, returning None when it is unbound.
    pub fn find(&self, sym: &Symbol) -> Option<SprigVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let parent = inner.parent.as_ref().and_then(EnvLink::get);
            drop(inner);
            current = parent?;
        }
    }

    /// Check if a symbol is defined in this environment or parent chain.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.find(sym).is_some()
    }

    /// Check if a symbol is defined in this frame, ignoring parents.
    #[must_use]
    pub fn is_defined_locally(&self, sym: &Symbol) -> bool {
        self.inner.borrow().bindings.contains_key(sym)
    }

    /// True for a frame without a parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.inner.borrow().parent.is_none()
    }

    /// True if both handles refer to the same frame.
    #[must_use]
    pub fn same_frame(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        let mut names: Vec<&str> = inner.bindings.keys().map(Symbol::name).collect();
        names.sort_unstable();
        f.debug_struct("Env")
            .field("bindings", &names)
            .field("has_parent", &inner.parent.is_some())
            .finish()
    }
}

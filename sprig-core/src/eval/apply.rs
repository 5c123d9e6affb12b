// sprig-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for Sprig.

use std::any::Any;
use std::rc::Rc;

use sprig_parser::{Closure, FnKind, SprigFn, SprigNativeFn, SprigVal, Symbol};

use super::eval;
use crate::env::{Env, EnvLink};
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[SprigVal]) -> Result<SprigVal>;

/// Apply a function to already-evaluated arguments.
///
/// This is the non-tail path used by builtins (`apply`, `map`, `swap!`) and
/// macro expansion. The evaluator's own call sites loop on closures instead.
pub fn apply(func: &SprigVal, args: &[SprigVal]) -> Result<SprigVal> {
    match func {
        SprigVal::Function(f, _) => apply_fn(f, args),
        _ => Err(Error::InvalidOperation.into()),
    }
}

/// Apply a native function or closure.
pub(crate) fn apply_fn(func: &SprigFn, args: &[SprigVal]) -> Result<SprigVal> {
    match &func.kind {
        FnKind::Native(native) => apply_native(native, args),
        FnKind::Closure(closure) => {
            let fn_env = bind_closure(closure, args)?;
            eval(&closure.body, &fn_env)
        }
    }
}

/// Build the frame a closure body runs in: parameters bound over `args`,
/// with the captured environment as parent.
pub(crate) fn bind_closure(closure: &Closure, args: &[SprigVal]) -> Result<Env> {
    // Downcast the environment; a root that has been dropped cannot be entered
    let captured_env = closure
        .env
        .downcast_ref::<EnvLink>()
        .and_then(EnvLink::get)
        .ok_or(Error::InvalidOperation)?;
    captured_env.bind(&closure.params, closure.rest_param.as_ref(), args)
}

/// Apply a native function.
pub(crate) fn apply_native(func: &SprigNativeFn, args: &[SprigVal]) -> Result<SprigVal> {
    // Downcast the function
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or(Error::InvalidOperation)?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &str,
    func: impl Fn(&[SprigVal]) -> Result<SprigVal> + 'static,
) -> SprigVal {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    SprigVal::function(SprigFn::native(name, SprigNativeFn::new(func_any)))
}

/// Create a closure value capturing `env`. A root frame is captured weakly.
pub(crate) fn make_closure(
    name: Option<&str>,
    params: Vec<Symbol>,
    rest_param: Option<Symbol>,
    body: SprigVal,
    env: &Env,
    is_macro: bool,
) -> SprigVal {
    let closure = Closure {
        params,
        rest_param,
        body,
        env: Rc::new(EnvLink::to(env)),
    };
    SprigVal::function(SprigFn::closure(name, closure, is_macro))
}

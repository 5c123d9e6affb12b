// sprig-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Sprig expressions.
//!
//! [`eval`] is a trampoline: forms in tail position (the chosen `if`
//! branch, the last form of `do`, a `let` body, a `try` handler, a closure
//! body) replace the current expression and environment and the loop goes
//! round again, so tail calls run in constant stack.

// Submodules
pub mod apply;
mod exceptions;
mod objc;
pub mod quasiquote;
mod special_forms;

// Re-exports from submodules
pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use quasiquote::quasiquote;

use std::cell::Cell;
use std::rc::Rc;

use sprig_parser::{FnKind, SprigFn, SprigMap, SprigVal};
use tracing::trace;

use crate::env::Env;
use crate::error::{Error, Result};

use apply::{apply_fn, apply_native, bind_closure};
use exceptions::eval_try;
use objc::eval_objc;
use special_forms::{
    eval_def, eval_defn, eval_do, eval_fn, eval_if, eval_let, eval_macroexpand, eval_quote,
};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum recursion depth for eval. Can be configured via `set_max_eval_depth`.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

/// Native stack eval may use below its outermost frame. Sized for the 2 MiB
/// stacks of spawned threads; hosts with a bigger stack raise it via
/// `set_max_stack_bytes`.
pub const DEFAULT_MAX_STACK_BYTES: usize = 1536 * 1024;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
    static MAX_STACK_BYTES: Cell<usize> = const { Cell::new(DEFAULT_MAX_STACK_BYTES) };
    static STACK_BASE: Cell<usize> = const { Cell::new(0) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
#[must_use]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Set the native stack budget for eval, in bytes. Returns the previous value.
#[inline]
#[must_use]
pub fn set_max_stack_bytes(bytes: usize) -> usize {
    MAX_STACK_BYTES.with(|b| b.replace(bytes))
}

/// Get the native stack budget for eval, in bytes.
#[inline]
#[must_use]
pub fn get_max_stack_bytes() -> usize {
    MAX_STACK_BYTES.with(|b| b.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// Approximate address of the current stack frame.
#[inline(never)]
fn stack_address() -> usize {
    let marker = 0u8;
    std::hint::black_box(&marker) as *const u8 as usize
}

/// RAII guard that tracks eval recursion depth and native stack use.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let here = stack_address();
        let current = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            current
        });
        if current == 1 {
            STACK_BASE.with(|b| b.set(here));
        }
        let max = get_max_eval_depth();
        let used = STACK_BASE.with(|b| b.get()).abs_diff(here);

        if current > max {
            EVAL_DEPTH.with(|d| d.set(current - 1));
            Err(Error::DepthExceeded(max).into())
        } else if used > get_max_stack_bytes() {
            EVAL_DEPTH.with(|d| d.set(current - 1));
            Err(Error::DepthExceeded(current - 1).into())
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Installs a depth limit and stack budget for the lifetime of the guard,
/// restoring the previous values on drop.
pub(crate) struct DepthLimit {
    previous_depth: usize,
    previous_stack: usize,
}

impl DepthLimit {
    pub(crate) fn install(max_depth: usize, max_stack_bytes: usize) -> Self {
        DepthLimit {
            previous_depth: set_max_eval_depth(max_depth),
            previous_stack: set_max_stack_bytes(max_stack_bytes),
        }
    }
}

impl Drop for DepthLimit {
    fn drop(&mut self) {
        let _ = set_max_eval_depth(self.previous_depth);
        let _ = set_max_stack_bytes(self.previous_stack);
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// What a tail-capable form leaves for the loop.
pub(crate) enum Step {
    /// Evaluation finished with this value
    Return(SprigVal),
    /// Continue the loop with this expression in this environment
    TailCall(SprigVal, Env),
}

/// Evaluate an expression in an environment.
pub fn eval(expr: &SprigVal, env: &Env) -> Result<SprigVal> {
    // Check recursion depth to prevent stack overflow
    let _guard = EvalDepthGuard::new()?;

    let mut ast = expr.clone();
    let mut env = env.clone();

    loop {
        ast = macroexpand(&ast, &env)?;

        let items = match &ast {
            SprigVal::List(items, _) if !items.is_empty() => items.clone(),
            _ => return eval_ast(&ast, &env),
        };

        let step = match items[0].as_symbol().map(|s| s.name()) {
            Some("def") => Step::Return(eval_def(&items, &env)?),
            Some("defn") => Step::Return(eval_defn(&items, &env, false)?),
            Some("defmacro") => Step::Return(eval_defn(&items, &env, true)?),
            Some("fn") => Step::Return(eval_fn(&items, &env)?),
            Some("quote") => Step::Return(eval_quote(&items)?),
            Some("macroexpand") => Step::Return(eval_macroexpand(&items, &env)?),
            Some("objc") => Step::Return(eval_objc(&items, &env)?),
            Some("do") => eval_do(&items, &env)?,
            Some("if") => eval_if(&items, &env)?,
            Some("let") => eval_let(&items, &env)?,
            Some("try") => eval_try(&items, &env)?,
            Some("quasiquote") => {
                if items.len() != 2 {
                    return Err(Error::ArityMismatch.into());
                }
                Step::TailCall(quasiquote(&items[1])?, env.clone())
            }
            _ => eval_call(&ast, &env)?,
        };

        match step {
            Step::Return(val) => return Ok(val),
            Step::TailCall(next, next_env) => {
                ast = next;
                env = next_env;
            }
        }
    }
}

/// Evaluate a function call: natives run now, closures continue the loop.
fn eval_call(ast: &SprigVal, env: &Env) -> Result<Step> {
    let SprigVal::List(evaluated, _) = eval_ast(ast, env)? else {
        return Err(Error::InvalidOperation.into());
    };
    let Some(SprigVal::Function(func, _)) = evaluated.front() else {
        return Err(Error::InvalidOperation.into());
    };
    let args: Vec<SprigVal> = evaluated.iter().skip(1).cloned().collect();

    match &func.kind {
        FnKind::Native(native) => Ok(Step::Return(apply_native(native, &args)?)),
        FnKind::Closure(closure) => {
            let fn_env = bind_closure(closure, &args)?;
            Ok(Step::TailCall(closure.body.clone(), fn_env))
        }
    }
}

/// Evaluate a form structurally: symbols resolve, collections evaluate
/// their elements, everything else evaluates to itself.
fn eval_ast(ast: &SprigVal, env: &Env) -> Result<SprigVal> {
    match ast {
        SprigVal::Symbol(sym, _) => env.lookup(sym),
        SprigVal::List(items, _) => Ok(SprigVal::List(eval_items(items, env)?, None)),
        SprigVal::Vector(items, _) => Ok(SprigVal::Vector(eval_items(items, env)?, None)),
        SprigVal::HashMap(map, _) => {
            let mut evaluated = SprigMap::new();
            for (k, v) in map.iter() {
                evaluated.insert(eval(k, env)?, eval(v, env)?);
            }
            Ok(SprigVal::HashMap(evaluated, None))
        }
        _ => Ok(ast.clone()),
    }
}

fn eval_items(items: &im::Vector<SprigVal>, env: &Env) -> Result<im::Vector<SprigVal>> {
    items.iter().map(|item| eval(item, env)).collect()
}

// ============================================================================
// Macro expansion
// ============================================================================

/// Expand `ast` while it is a call to a macro, without evaluating the result.
pub fn macroexpand(ast: &SprigVal, env: &Env) -> Result<SprigVal> {
    let mut ast = ast.clone();
    while let Some((mac, args)) = macro_call(&ast, env) {
        trace!(macro_name = mac.name().unwrap_or("<anonymous>"), "expanding macro");
        ast = apply_fn(&mac, &args)?;
    }
    Ok(ast)
}

/// The macro and its unevaluated arguments, if `ast` is a macro call.
fn macro_call(ast: &SprigVal, env: &Env) -> Option<(Rc<SprigFn>, Vec<SprigVal>)> {
    let SprigVal::List(items, _) = ast else {
        return None;
    };
    let head = items.front()?.as_symbol()?;
    match env.find(head)? {
        SprigVal::Function(func, _) if func.is_macro => {
            Some((func, items.iter().skip(1).cloned().collect()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::error::Exception;
    use sprig_parser::read_str;

    fn run(src: &str) -> Result<SprigVal> {
        let env = Env::new();
        register_builtins(&env);
        eval(&read_str(src)?, &env)
    }

    #[test]
    fn test_self_evaluating() {
        assert_eq!(run("1"), Ok(SprigVal::number(1)));
        assert_eq!(run(":k"), Ok(SprigVal::keyword("k")));
        assert_eq!(run("\"s\""), Ok(SprigVal::string("s")));
        assert_eq!(run("()"), Ok(SprigVal::empty_list()));
    }

    #[test]
    fn test_collections_evaluate_elements() {
        assert_eq!(run("[1 (+ 1 1)]").unwrap().to_string(), "[1 2]");
        assert_eq!(run("{:a (+ 1 2)}").unwrap().to_string(), "{:a 3}");
    }

    #[test]
    fn test_unbound_symbol() {
        assert_eq!(
            run("nope"),
            Err(Error::SymbolNotFound("nope".into()).into())
        );
    }

    #[test]
    fn test_apply_non_function() {
        assert_eq!(run("(1 2)"), Err(Error::InvalidOperation.into()));
    }

    #[test]
    fn test_depth_guard_restores_counter() {
        let before = get_eval_depth();
        let _ = run("(+ 1 (+ 2 (+ 3 4)))");
        assert_eq!(get_eval_depth(), before);
    }

    #[test]
    fn test_depth_limit() {
        let env = Env::new();
        register_builtins(&env);
        let form = read_str("(defn deep [n] (if (= n 0) 0 (+ 1 (deep (- n 1)))))").unwrap();
        eval(&form, &env).unwrap();

        let _limit = DepthLimit::install(50, DEFAULT_MAX_STACK_BYTES);
        let call = read_str("(deep 100)").unwrap();
        assert_eq!(eval(&call, &env), Err(Error::DepthExceeded(50).into()));
        assert_eq!(get_eval_depth(), 0);
    }

    #[test]
    fn test_depth_limit_restored() {
        let before = get_max_eval_depth();
        let before_stack = get_max_stack_bytes();
        {
            let _limit = DepthLimit::install(7, 4096);
            assert_eq!(get_max_eval_depth(), 7);
            assert_eq!(get_max_stack_bytes(), 4096);
        }
        assert_eq!(get_max_eval_depth(), before);
        assert_eq!(get_max_stack_bytes(), before_stack);
    }

    #[test]
    fn test_stack_budget_stops_recursion() {
        let env = Env::new();
        register_builtins(&env);
        let form = read_str("(defn deep [n] (if (= n 0) 0 (+ 1 (deep (- n 1)))))").unwrap();
        eval(&form, &env).unwrap();

        // The depth limit alone would allow this
        let _limit = DepthLimit::install(DEFAULT_MAX_EVAL_DEPTH, 64 * 1024);
        let call = read_str("(deep 5000)").unwrap();
        assert!(matches!(
            eval(&call, &env),
            Err(Exception::Error(Error::DepthExceeded(_)))
        ));
        assert_eq!(get_eval_depth(), 0);

        let shallow = read_str("(deep 3)").unwrap();
        assert_eq!(eval(&shallow, &env), Ok(SprigVal::number(3)));
    }
}

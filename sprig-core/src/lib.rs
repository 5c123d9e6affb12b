// sprig-core - Runtime and evaluator for the Sprig programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # sprig-core
//!
//! Runtime and evaluator for the Sprig programming language.
//! Provides a tail-call-eliminating interpreter for `SprigVal` expressions,
//! its builtin library, and the [`Interpreter`] context that ties them to a
//! root environment.

pub mod bridge;
pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod interpreter;

pub use bridge::{HostArg, HostBridge, HostTarget, NullBridge};
pub use builtins::register_builtins;
pub use config::Config;
pub use env::{Env, WeakEnv};
pub use error::{Error, Exception, Result};
pub use eval::{
    DEFAULT_MAX_EVAL_DEPTH, DEFAULT_MAX_STACK_BYTES, apply, eval, get_eval_depth,
    get_max_eval_depth, get_max_stack_bytes, macroexpand, make_native_fn, quasiquote,
    set_max_eval_depth, set_max_stack_bytes,
};
pub use interpreter::Interpreter;

// Re-export parser types for convenience
pub use sprig_parser::{Keyword, SprigVal, Symbol};

use tracing::debug;

/// Embedded prelude source (macros and utility functions).
const PRELUDE: &str = include_str!("../lib/prelude.sprig");

/// Initialise the prelude by evaluating its forms in `env`.
///
/// Call this after `register_builtins`; the prelude relies on `eval` being
/// bound, which [`Interpreter`] arranges.
pub fn init_prelude(env: &Env) -> Result<()> {
    let forms = sprig_parser::read_all(PRELUDE)?;
    debug!(forms = forms.len(), "loading prelude");
    for form in &forms {
        eval::eval(form, env)?;
    }
    Ok(())
}

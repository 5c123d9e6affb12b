// sprig-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Sprig integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh interpreter (builtins and prelude)
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_all`] - Evaluate multiple expressions, returning the last
//! - [`new_env`] - Create the root environment of a fresh interpreter
//! - [`new_bare_env`] - Create an environment with builtins only
//! - [`print_str`] - Evaluate several forms and print the last readably
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error
//! - [`assert_eval_err_contains!`] - Assert an error message fragment
//! - [`assert_prints!`] - Assert the readable printing of a result

// Re-export common types for convenience
pub use sprig_core::builtins::register_builtins;
pub use sprig_core::env::Env;
pub use sprig_core::eval::eval;
pub use sprig_core::{Config, Interpreter};
#[allow(unused_imports)]
pub use sprig_parser::{Keyword, SprigVal, pr_str, read_all, read_str};

/// Evaluate a Sprig expression string in a fresh interpreter.
///
/// The root environment carries the builtins, `eval` and the prelude.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
pub fn eval_str(s: &str) -> Result<SprigVal, String> {
    eval_str_with_env(s, &new_env())
}

/// Evaluate the first form of a Sprig string in the given environment.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<SprigVal, String> {
    let forms = read_all(s).map_err(|e| e.to_string())?;
    match forms.first() {
        Some(expr) => eval(expr, env).map_err(|e| e.to_string()),
        None => Ok(SprigVal::NIL),
    }
}

/// Evaluate multiple Sprig expressions, returning the last result.
///
/// This is useful when you need to set up definitions before the final
/// expression.
///
/// # Returns
///
/// Returns the value of the last expression, or an error.
#[must_use]
pub fn eval_all(s: &str, env: &Env) -> Result<SprigVal, String> {
    let forms = read_all(s).map_err(|e| e.to_string())?;
    let mut result = SprigVal::NIL;
    for expr in &forms {
        result = eval(expr, env).map_err(|e| e.to_string())?;
    }
    Ok(result)
}

/// Create the root environment of a fresh interpreter.
///
/// # Panics
///
/// Panics if the prelude fails to load (should never happen).
#[must_use]
pub fn new_env() -> Env {
    let interp = Interpreter::new().expect("Failed to load prelude");
    interp.env().clone()
}

/// Create a new environment with builtins registered and nothing else.
#[must_use]
#[allow(dead_code)]
pub fn new_bare_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Evaluate several forms in a fresh interpreter and print the last one
/// readably.
///
/// # Panics
///
/// Panics if any form fails.
#[must_use]
#[allow(dead_code)]
pub fn print_str(s: &str) -> String {
    let env = new_env();
    match eval_all(s, &env) {
        Ok(val) => pr_str(&val, true),
        Err(e) => panic!("Failed to evaluate '{}': {}", s, e),
    }
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", SprigVal::number(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 :not-a-number)");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` fails with a message containing `fragment`.
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(nth (list) 0)", "Index out of range");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $fragment:expr) => {
        match $crate::common::eval_str($input) {
            Ok(val) => panic!("Expected error for '{}' but got {:?}", $input, val),
            Err(msg) => assert!(
                msg.contains($fragment),
                "Error for '{}' was '{}', expected it to contain '{}'",
                $input,
                msg,
                $fragment
            ),
        }
    };
}

/// Assert that the last form of `input` prints readably as `expected`.
///
/// # Example
///
/// ```ignore
/// assert_prints!("(def x 1) (list x)", "(1)");
/// ```
#[macro_export]
macro_rules! assert_prints {
    ($input:expr, $expected:expr) => {
        assert_eq!(
            $crate::common::print_str($input),
            $expected,
            "Printing of '{}' did not match expected",
            $input
        );
    };
}

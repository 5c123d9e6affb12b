// sprig-core - Interpreter configuration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Settings consumed by [`Interpreter::with_config`](crate::Interpreter::with_config).

use std::fmt;
use std::rc::Rc;

use crate::bridge::{HostBridge, NullBridge};
use crate::eval::{DEFAULT_MAX_EVAL_DEPTH, DEFAULT_MAX_STACK_BYTES};

/// Value bound to `*host-language*` unless overridden.
pub const DEFAULT_HOST_LANGUAGE: &str = "sprig v0.1";

/// Interpreter configuration.
///
/// # Example
///
/// ```rust
/// use sprig_core::Config;
///
/// let config = Config::default()
///     .with_argv(["input.txt"])
///     .with_max_eval_depth(500)
///     .with_prelude(false);
/// assert_eq!(config.argv, vec!["input.txt".to_string()]);
/// assert!(!config.load_prelude);
/// ```
#[derive(Clone)]
pub struct Config {
    /// Bound to `*ARGV*` as a list of strings
    pub argv: Vec<String>,
    /// Bound to `*host-language*`
    pub host_language: String,
    /// Evaluate the embedded prelude when the interpreter starts
    pub load_prelude: bool,
    /// Maximum nesting of non-tail evaluations
    pub max_eval_depth: usize,
    /// Native stack eval may use, in bytes. Must stay below the stack size of
    /// the thread the interpreter runs on.
    pub max_stack_bytes: usize,
    /// Receiver of `objc` calls
    pub bridge: Rc<dyn HostBridge>,
}

impl Config {
    #[must_use]
    pub fn with_argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = argv.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_host_language(mut self, host_language: impl Into<String>) -> Self {
        self.host_language = host_language.into();
        self
    }

    #[must_use]
    pub fn with_prelude(mut self, load_prelude: bool) -> Self {
        self.load_prelude = load_prelude;
        self
    }

    #[must_use]
    pub fn with_max_eval_depth(mut self, max_eval_depth: usize) -> Self {
        self.max_eval_depth = max_eval_depth;
        self
    }

    #[must_use]
    pub fn with_max_stack_bytes(mut self, max_stack_bytes: usize) -> Self {
        self.max_stack_bytes = max_stack_bytes;
        self
    }

    #[must_use]
    pub fn with_bridge(mut self, bridge: Rc<dyn HostBridge>) -> Self {
        self.bridge = bridge;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            argv: Vec::new(),
            host_language: DEFAULT_HOST_LANGUAGE.to_string(),
            load_prelude: true,
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            max_stack_bytes: DEFAULT_MAX_STACK_BYTES,
            bridge: Rc::new(NullBridge),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("argv", &self.argv)
            .field("host_language", &self.host_language)
            .field("load_prelude", &self.load_prelude)
            .field("max_eval_depth", &self.max_eval_depth)
            .field("max_stack_bytes", &self.max_stack_bytes)
            .finish_non_exhaustive()
    }
}

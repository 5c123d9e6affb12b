// sprig-core - Interpreter context
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `Interpreter` struct - main entry point for running Sprig.

use std::path::Path;

use sprig_parser::{SprigVal, Symbol, pr_str, read_all, read_str};
use tracing::debug;

use crate::builtins::register_builtins;
use crate::config::Config;
use crate::env::Env;
use crate::error::{Error, Result, check_arity};
use crate::eval::{DepthLimit, eval, make_native_fn};
use crate::init_prelude;

/// A Sprig interpreter: a root environment holding the builtins, the root
/// bindings and the prelude.
///
/// Interpreters share nothing, so several can run side by side. An
/// `Interpreter` is not thread-safe; it uses `Rc` and `RefCell` internally.
///
/// # Example
///
/// ```rust
/// use sprig_core::Interpreter;
///
/// let interp = Interpreter::new().unwrap();
/// assert_eq!(interp.rep("(+ 1 2 3)").unwrap(), "6");
/// ```
pub struct Interpreter {
    env: Env,
    config: Config,
}

impl Interpreter {
    /// Create an interpreter with the default configuration.
    pub fn new() -> Result<Self> {
        Interpreter::with_config(Config::default())
    }

    /// Create an interpreter from a configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let env = Env::with_bridge(config.bridge.clone());
        register_builtins(&env);
        define_root_bindings(&env, &config);

        let interp = Interpreter { env, config };
        if interp.config.load_prelude {
            let _limit = DepthLimit::install(
                interp.config.max_eval_depth,
                interp.config.max_stack_bytes,
            );
            init_prelude(&interp.env)?;
        }
        Ok(interp)
    }

    /// Read the first form in `text`.
    pub fn read(&self, text: &str) -> Result<SprigVal> {
        Ok(read_str(text)?)
    }

    /// Evaluate a form in the root environment.
    pub fn eval(&self, form: &SprigVal) -> Result<SprigVal> {
        self.eval_in(form, &self.env)
    }

    /// Evaluate a form in the given environment.
    pub fn eval_in(&self, form: &SprigVal, env: &Env) -> Result<SprigVal> {
        let _limit = DepthLimit::install(self.config.max_eval_depth, self.config.max_stack_bytes);
        eval(form, env)
    }

    /// Print a value, readably or for display.
    pub fn print(&self, val: &SprigVal, readably: bool) -> String {
        pr_str(val, readably)
    }

    /// Read, evaluate and print one form.
    ///
    /// A failure leaves the root environment as it was before the form ran.
    pub fn rep(&self, text: &str) -> Result<String> {
        let form = self.read(text)?;
        match self.eval(&form) {
            Ok(val) => Ok(self.print(&val, true)),
            Err(e) => {
                debug!(error = %e, "uncaught failure");
                Err(e)
            }
        }
    }

    /// Load a source file: its forms run in order in the root environment
    /// and the last value is returned.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SprigVal> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading file");

        let path_val = SprigVal::string(path.to_string_lossy().into_owned());
        if self.env.is_defined(&Symbol::new("load-file")) {
            let call = SprigVal::list([SprigVal::symbol("load-file"), path_val]);
            return self.eval(&call);
        }

        // Without the prelude, do what load-file does
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("Error reading '{}': {}", path.display(), e)))?;
        let forms = read_all(&source)?;
        let body = SprigVal::list(std::iter::once(SprigVal::symbol("do")).chain(forms));
        self.eval(&body)
    }

    /// Get the root environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Get the configuration this interpreter was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a root binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SprigVal> {
        self.env.find(&Symbol::new(name))
    }

    /// Define a root binding.
    pub fn set(&self, name: &str, value: impl Into<SprigVal>) {
        self.env.define(Symbol::new(name), value.into());
    }

    /// Register a Rust function under `name` in the root environment.
    pub fn register_native(
        &self,
        name: &str,
        func: impl Fn(&[SprigVal]) -> Result<SprigVal> + 'static,
    ) {
        self.env.define(Symbol::new(name), make_native_fn(name, func));
    }
}

/// Bindings that need the root environment or the configuration: `eval`,
/// `*ARGV*` and `*host-language*`.
fn define_root_bindings(env: &Env, config: &Config) {
    let root = env.downgrade();
    let eval_fn = make_native_fn("eval", move |args| {
        check_arity(args, 1)?;
        // The root frame owns this function, so it outlives every call
        let root = root.upgrade().ok_or(Error::InvalidOperation)?;
        eval(&args[0], &root)
    });
    env.define(Symbol::new("eval"), eval_fn);

    let argv = SprigVal::list(config.argv.iter().map(|a| SprigVal::string(a.as_str())));
    env.define(Symbol::new("*ARGV*"), argv);
    env.define(
        Symbol::new("*host-language*"),
        SprigVal::string(config.host_language.as_str()),
    );
}

// sprig - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::io;
use std::process;
use std::thread;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sprig_core::{Config, Interpreter};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stack size of the interpreter thread.
const INTERPRETER_STACK_BYTES: usize = 256 * 1024 * 1024;

/// Stack kept free below the eval budget for natives and printing.
const STACK_RESERVE_BYTES: usize = 8 * 1024 * 1024;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Sprig v{}", VERSION);
        return;
    }

    let spawned = thread::Builder::new()
        .name("sprig".to_string())
        .stack_size(INTERPRETER_STACK_BYTES)
        .spawn(move || run(args));
    let handle = match spawned {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Could not start interpreter thread: {}", e);
            process::exit(1);
        }
    };
    if handle.join().is_err() {
        process::exit(1);
    }
}

/// Interpreter thread body. The config holds `Rc`s, so it is built here.
fn run(args: Vec<String>) {
    let mut config =
        Config::default().with_max_stack_bytes(INTERPRETER_STACK_BYTES - STACK_RESERVE_BYTES);
    if let Some(depth) = max_depth_override() {
        config = config.with_max_eval_depth(depth);
    }

    // If a file is provided, run it with the remaining arguments; otherwise start REPL
    match args.get(1) {
        Some(file) => run_file(file, config.with_argv(args[2..].iter().cloned())),
        None => run_repl(config),
    }
}

/// Log to stderr, filtered by `SPRIG_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("SPRIG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `SPRIG_MAX_DEPTH`, when set to a positive integer.
fn max_depth_override() -> Option<usize> {
    let raw = env::var("SPRIG_MAX_DEPTH").ok()?;
    match raw.parse::<usize>() {
        Ok(depth) if depth > 0 => Some(depth),
        _ => {
            warn!(value = %raw, "ignoring invalid SPRIG_MAX_DEPTH");
            None
        }
    }
}

fn new_interpreter(config: Config) -> Interpreter {
    match Interpreter::with_config(config) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Failed to load prelude: {}", e);
            process::exit(1);
        }
    }
}

/// Load a source file, exiting with status 1 on failure
fn run_file(file: &str, config: Config) {
    let interp = new_interpreter(config);
    if let Err(e) = interp.load_file(file) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Run the interactive REPL
fn run_repl(config: Config) {
    let interp = new_interpreter(config);
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not initialise line editor: {}", e);
            process::exit(1);
        }
    };

    println!("Sprig [{}]", interp.config().host_language);

    loop {
        match rl.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match interp.rep(&line) {
                    Ok(result) => println!("{}", result),
                    Err(e) => println!("Error: {}", e),
                }
            }
            // Ctrl-C abandons the current line
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

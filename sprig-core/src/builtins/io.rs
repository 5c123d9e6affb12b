// sprig-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: pr-str, str, prn, println, read-string, slurp, readline,
//! time-ms

use std::fs;
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use sprig_parser::{SprigVal, pr_seq, read_str};

use crate::error::{Error, Result, check_arity};

// ============================================================================
// Printing
// ============================================================================

/// (pr-str & xs) - Readable forms joined with spaces
pub(crate) fn builtin_pr_str(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::string(pr_seq(args, true, " ")))
}

/// (str & xs) - Display forms concatenated
pub(crate) fn builtin_str(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::string(pr_seq(args, false, "")))
}

/// (prn & xs) - Print readable forms joined with spaces, then a newline
pub(crate) fn builtin_prn(args: &[SprigVal]) -> Result<SprigVal> {
    write_line(&pr_seq(args, true, " "))
}

/// (println & xs) - Print display forms joined with spaces, then a newline
pub(crate) fn builtin_println(args: &[SprigVal]) -> Result<SprigVal> {
    write_line(&pr_seq(args, false, " "))
}

fn write_line(line: &str) -> Result<SprigVal> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", line).map_err(io_error)?;
    Ok(SprigVal::NIL)
}

// ============================================================================
// Reading
// ============================================================================

/// (read-string s) - Read the first form in s
pub(crate) fn builtin_read_string(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    match &args[0] {
        SprigVal::String(s, _) => Ok(read_str(s)?),
        _ => Err(Error::InvalidOperation.into()),
    }
}

/// (slurp path) - Whole file contents as a string
pub(crate) fn builtin_slurp(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    let SprigVal::String(path, _) = &args[0] else {
        return Err(Error::InvalidOperation.into());
    };
    let contents = fs::read_to_string(&**path)
        .map_err(|e| Error::Io(format!("Error reading '{}': {}", path, e)))?;
    Ok(SprigVal::string(contents))
}

/// (readline prompt) - Print prompt and read a line; nil at end of input
pub(crate) fn builtin_readline(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    let SprigVal::String(prompt, _) = &args[0] else {
        return Err(Error::InvalidOperation.into());
    };

    {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt).map_err(io_error)?;
        stdout.flush().map_err(io_error)?;
    }

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).map_err(io_error)? == 0 {
        return Ok(SprigVal::NIL);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(SprigVal::string(trimmed))
}

// ============================================================================
// Host
// ============================================================================

/// (time-ms) - Milliseconds since the Unix epoch
pub(crate) fn builtin_time_ms(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 0)?;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Io(e.to_string()))?;
    let millis = i64::try_from(elapsed.as_millis()).map_err(|_| Error::IntegerOverflow)?;
    Ok(SprigVal::number(millis))
}

fn io_error(e: io::Error) -> Error {
    Error::Io(e.to_string())
}

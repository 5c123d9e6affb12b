// sprig-core - Exception handling
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `try`/`catch` special form. Raising is the `throw` builtin.

use im::Vector;
use sprig_parser::{SprigVal, Symbol};
use tracing::debug;

use super::special_forms::implicit_do;
use super::{Step, eval};
use crate::env::Env;
use crate::error::{Error, Result};

/// (try body (catch name handler...)?)
///
/// The body is evaluated once. Anything it raises, user value or
/// interpreter error, is caught: with a catch clause the handler runs in
/// tail position with `name` bound to the caught value; without one the
/// caught value is the result.
///
/// The catch clause is checked before the body runs. A third form that is
/// not a well-formed `(catch name handler...)` fails without evaluating the
/// body, so `(try x 5)` reports `InvalidOperation` even when `x` is unbound
/// and no body side effects happen.
pub(crate) fn eval_try(items: &Vector<SprigVal>, env: &Env) -> Result<Step> {
    if items.len() != 2 && items.len() != 3 {
        return Err(Error::ArityMismatch.into());
    }
    let catch = items.get(2).map(parse_catch).transpose()?;

    let exception = match eval(&items[1], env) {
        Ok(val) => return Ok(Step::Return(val)),
        Err(exception) => exception,
    };
    debug!(%exception, "caught by try");

    match catch {
        Some((binding, handler)) => {
            let catch_env = env.child();
            catch_env.define(binding, exception.into_value());
            Ok(Step::TailCall(handler, catch_env))
        }
        None => Ok(Step::Return(exception.into_value())),
    }
}

/// Parse `(catch name handler...)` into the binding and handler body.
fn parse_catch(form: &SprigVal) -> Result<(Symbol, SprigVal)> {
    let items = match form {
        SprigVal::List(items, _) if items.front().is_some_and(|h| h.is_symbol_named("catch")) => {
            items
        }
        _ => return Err(Error::InvalidOperation.into()),
    };
    if items.len() < 3 {
        return Err(Error::ArityMismatch.into());
    }
    let binding = items[1].as_symbol().cloned().ok_or(Error::SymbolExpected)?;
    let handler = implicit_do(items.iter().skip(2).cloned().collect());
    Ok((binding, handler))
}

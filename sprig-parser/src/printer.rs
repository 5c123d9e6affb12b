// sprig-parser - Printer for Sprig values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Serialises values back to text.
//!
//! Readable mode escapes strings and wraps them in quotes, so the output
//! can be read back. Display mode emits string contents raw. `Display` for
//! [`SprigVal`] uses readable mode.
//!
//! An atom reached again while its own contents are being printed is
//! written as `(atom ...)`.

use std::fmt;

use crate::value::{SprigAtom, SprigFn, SprigVal};

/// Print a value to a string.
pub fn pr_str(val: &SprigVal, print_readably: bool) -> String {
    Printed::new(val, print_readably).to_string()
}

/// Print several values separated by `sep`.
pub fn pr_seq<'a>(
    vals: impl IntoIterator<Item = &'a SprigVal>,
    print_readably: bool,
    sep: &str,
) -> String {
    vals.into_iter()
        .map(|v| pr_str(v, print_readably))
        .collect::<Vec<_>>()
        .join(sep)
}

/// A value paired with a print mode, for use with `{}` formatting.
pub struct Printed<'a> {
    val: &'a SprigVal,
    readably: bool,
    open: Option<&'a OpenAtom<'a>>,
}

/// Atoms whose contents are being printed, innermost first.
struct OpenAtom<'a> {
    atom: &'a SprigAtom,
    outer: Option<&'a OpenAtom<'a>>,
}

impl<'a> Printed<'a> {
    pub fn new(val: &'a SprigVal, readably: bool) -> Self {
        Printed {
            val,
            readably,
            open: None,
        }
    }

    fn nested<'b>(&'b self, val: &'b SprigVal) -> Printed<'b> {
        Printed {
            val,
            readably: self.readably,
            open: self.open,
        }
    }

    fn is_open(&self, atom: &SprigAtom) -> bool {
        let mut open = self.open;
        while let Some(entry) = open {
            if entry.atom.same_cell(atom) {
                return true;
            }
            open = entry.outer;
        }
        false
    }

    fn write_atom(&self, f: &mut fmt::Formatter<'_>, atom: &SprigAtom) -> fmt::Result {
        if self.is_open(atom) {
            return write!(f, "(atom ...)");
        }
        let inner = atom.deref();
        let open = OpenAtom {
            atom,
            outer: self.open,
        };
        let contents = Printed {
            val: &inner,
            readably: self.readably,
            open: Some(&open),
        };
        write!(f, "(atom {})", contents)
    }

    fn write_items<'b>(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        close: &str,
        items: impl Iterator<Item = &'b SprigVal>,
    ) -> fmt::Result {
        write!(f, "{}", open)?;
        for (i, item) in items.enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.nested(item))?;
        }
        write!(f, "{}", close)
    }
}

impl fmt::Display for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Metadata is never printed
        match self.val {
            SprigVal::Nil(_) => write!(f, "nil"),
            SprigVal::Bool(b, _) => write!(f, "{}", b),
            SprigVal::Number(n, _) => write!(f, "{}", n),
            SprigVal::String(s, _) => {
                if self.readably {
                    write!(f, "\"{}\"", escape_string(s))
                } else {
                    write!(f, "{}", s)
                }
            }
            SprigVal::Symbol(sym, _) => write!(f, "{}", sym),
            SprigVal::Keyword(kw, _) => write!(f, "{}", kw),
            SprigVal::List(items, _) => self.write_items(f, "(", ")", items.iter()),
            SprigVal::Vector(items, _) => self.write_items(f, "[", "]", items.iter()),
            SprigVal::HashMap(map, _) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} {}", self.nested(k), self.nested(v))?;
                }
                write!(f, "}}")
            }
            SprigVal::Atom(atom, _) => self.write_atom(f, atom),
            SprigVal::Function(func, _) => write_function(f, func),
        }
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, func: &SprigFn) -> fmt::Result {
    let kind = if func.is_macro { "macro" } else { "function" };
    match func.name() {
        Some(name) => write!(f, "#<{} {}>", kind, name),
        None => write!(f, "#<{}>", kind),
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

impl fmt::Display for SprigVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Printed::new(self, true))
    }
}

// ============================================================================
// Tests
// ============================================================================

// sprig-parser - Reader and value model for the Sprig Lisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # sprig-parser
//!
//! Tokenizer, reader, value model and printer for Sprig.
//! Produces `SprigVal` trees from source text and prints them back.

mod intern;
pub mod keyword;
pub mod lexer;
pub mod printer;
pub mod reader;
pub mod symbol;
pub mod value;

pub use im::Vector;
pub use keyword::Keyword;
pub use lexer::{Lexer, Token, tokenize};
pub use printer::{Printed, pr_seq, pr_str};
pub use reader::{ReadError, Reader, read_all, read_str};
pub use symbol::Symbol;
pub use value::{Closure, FnKind, Meta, SprigAtom, SprigFn, SprigMap, SprigNativeFn, SprigVal};

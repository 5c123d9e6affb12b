// sprig-parser - Reader for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent reader for Sprig source code.
//!
//! Converts tokens into `SprigVal` trees, expanding reader-macro sugar
//! (`'x`, `` `x ``, `~x`, `~@x`, `@x`, `^m x`) into the equivalent call forms
//! and `(.msg target args...)` into `(objc msg target args...)`.

use std::fmt;

use crate::lexer::{Token, tokenize};
use crate::value::SprigVal;

/// Reader failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The input contained no tokens
    EmptyInput,
    /// The input ended before a collection was closed
    UnexpectedEndOfInput,
    /// A closing delimiter appeared where it does not belong
    UnbalancedParens,
    /// A string literal was not closed
    UnterminatedString,
    /// A map literal with an odd number of forms
    OddMapEntries,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::EmptyInput => write!(f, "Empty Data"),
            ReadError::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            ReadError::UnbalancedParens => write!(f, "Unbalanced parenthesis"),
            ReadError::UnterminatedString => write!(f, "Unterminated String"),
            ReadError::OddMapEntries => {
                write!(f, "Map literal must contain an even number of forms")
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// The reader walks a token buffer with a cursor.
pub struct Reader {
    tokens: Vec<Token>,
    position: usize,
}

impl Reader {
    /// Create a reader over the tokens of `source`.
    pub fn new(source: &str) -> Self {
        Reader {
            tokens: tokenize(source),
            position: 0,
        }
    }

    /// True once every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Read the next complete form.
    pub fn read_form(&mut self) -> Result<SprigVal, ReadError> {
        let token = self.next().ok_or(ReadError::UnexpectedEndOfInput)?;
        match token {
            Token::LParen => {
                if self.peek_is_dot_call() {
                    self.read_dot_call()
                } else {
                    self.read_seq(&Token::RParen).map(SprigVal::list)
                }
            }
            Token::LBracket => self.read_seq(&Token::RBracket).map(SprigVal::vector),
            Token::LBrace => self.read_map(),
            Token::RParen | Token::RBracket | Token::RBrace => Err(ReadError::UnbalancedParens),
            Token::Quote => self.read_wrapped("quote"),
            Token::Quasiquote => self.read_wrapped("quasiquote"),
            Token::Unquote => self.read_wrapped("unquote"),
            Token::SpliceUnquote => self.read_wrapped("splice-unquote"),
            Token::Deref => self.read_wrapped("deref"),
            Token::Meta => self.read_with_meta(),
            Token::Str { raw, terminated } => {
                if terminated {
                    Ok(SprigVal::string(unescape(&raw)))
                } else {
                    Err(ReadError::UnterminatedString)
                }
            }
            Token::Atom(text) => Ok(read_atom(&text)),
        }
    }

    // ========================================================================
    // Internal reading methods
    // ========================================================================

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Read forms up to `closing`, consuming it.
    fn read_seq(&mut self, closing: &Token) -> Result<Vec<SprigVal>, ReadError> {
        let mut elements = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ReadError::UnexpectedEndOfInput),
                Some(t) if t == closing => {
                    self.position += 1;
                    return Ok(elements);
                }
                Some(t) if t.is_closing() => return Err(ReadError::UnbalancedParens),
                Some(_) => elements.push(self.read_form()?),
            }
        }
    }

    fn read_map(&mut self) -> Result<SprigVal, ReadError> {
        let forms = self.read_seq(&Token::RBrace)?;
        if forms.len() % 2 != 0 {
            return Err(ReadError::OddMapEntries);
        }
        let mut forms = forms.into_iter();
        let mut pairs = Vec::new();
        while let (Some(k), Some(v)) = (forms.next(), forms.next()) {
            pairs.push((k, v));
        }
        Ok(SprigVal::hash_map(pairs))
    }

    /// `'x` and friends: `(name x)`
    fn read_wrapped(&mut self, name: &str) -> Result<SprigVal, ReadError> {
        let form = self.read_form()?;
        Ok(SprigVal::list(vec![SprigVal::symbol(name), form]))
    }

    /// `^meta target` reads as `(with-meta target meta)`
    fn read_with_meta(&mut self) -> Result<SprigVal, ReadError> {
        let meta = self.read_form()?;
        let target = self.read_form()?;
        Ok(SprigVal::list(vec![
            SprigVal::symbol("with-meta"),
            target,
            meta,
        ]))
    }

    fn peek_is_dot_call(&self) -> bool {
        matches!(self.peek(), Some(Token::Atom(t)) if t.starts_with('.') && t != ".")
    }

    /// `(.msg target args...)` reads as `(objc msg target args...)`.
    /// The opening paren has been consumed and the next token is the message.
    fn read_dot_call(&mut self) -> Result<SprigVal, ReadError> {
        let message = match self.next() {
            Some(Token::Atom(text)) => text[1..].to_string(),
            _ => return Err(ReadError::UnexpectedEndOfInput),
        };
        let mut elements = vec![SprigVal::symbol("objc"), SprigVal::symbol(&message)];
        elements.extend(self.read_seq(&Token::RParen)?);
        Ok(SprigVal::list(elements))
    }
}

/// Classify a bare token.
fn read_atom(text: &str) -> SprigVal {
    match text {
        "nil" => SprigVal::NIL,
        "true" => SprigVal::bool(true),
        "false" => SprigVal::bool(false),
        _ => {
            if let Ok(n) = text.parse::<i64>() {
                SprigVal::number(n)
            } else if let Some(name) = text.strip_prefix(':') {
                SprigVal::keyword(name)
            } else {
                SprigVal::symbol(text)
            }
        }
    }
}

/// Decode `\\`, `\"` and `\n`. Other backslash pairs are kept as written.
fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('n') => result.push('\n'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Read the first form of `source`. Trailing forms are ignored.
pub fn read_str(source: &str) -> Result<SprigVal, ReadError> {
    let mut reader = Reader::new(source);
    if reader.is_at_end() {
        return Err(ReadError::EmptyInput);
    }
    reader.read_form()
}

/// Read every form of `source` in order. Empty input yields no forms.
pub fn read_all(source: &str) -> Result<Vec<SprigVal>, ReadError> {
    let mut reader = Reader::new(source);
    let mut forms = Vec::new();
    while !reader.is_at_end() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}

// ============================================================================
// Tests
// ============================================================================

// sprig-parser - Lexer for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Sprig source code.
//!
//! Converts a source string into a flat stream of tokens. The lexer never
//! fails: string tokens keep their escapes undecoded, and a string that runs
//! off the end of the input is reported as unterminated for the reader to
//! reject.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    Quasiquote,    // `
    Unquote,       // ~
    SpliceUnquote, // ~@
    Deref,         // @
    Meta,          // ^

    /// String body between the quotes, escapes left as written
    Str { raw: String, terminated: bool },
    /// Any other run of characters: numbers, symbols, keywords, literals
    Atom(String),
}

impl Token {
    /// True for `)`, `]` and `}`.
    pub fn is_closing(&self) -> bool {
        matches!(self, Token::RParen | Token::RBracket | Token::RBrace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::SpliceUnquote => write!(f, "~@"),
            Token::Deref => write!(f, "@"),
            Token::Meta => write!(f, "^"),
            Token::Str {
                raw,
                terminated: true,
            } => write!(f, "\"{}\"", raw),
            Token::Str {
                raw,
                terminated: false,
            } => write!(f, "\"{}", raw),
            Token::Atom(s) => write!(f, "{}", s),
        }
    }
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
        }
    }

    /// Get the next token, or None at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();

        let c = self.chars.next()?;
        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '\'' => Token::Quote,
            '`' => Token::Quasiquote,
            '~' => {
                if self.chars.peek() == Some(&'@') {
                    self.chars.next();
                    Token::SpliceUnquote
                } else {
                    Token::Unquote
                }
            }
            '@' => Token::Deref,
            '^' => Token::Meta,
            '"' => self.read_string(),
            other => self.read_atom(other),
        };
        Some(token)
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Vec<Token> {
        std::iter::from_fn(|| self.next_token()).collect()
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() || *c == ',' => {
                    self.chars.next();
                }
                Some(';') => {
                    // Skip to end of line
                    while self.chars.next_if(|c| *c != '\n').is_some() {}
                }
                _ => break,
            }
        }
    }

    /// Read a string body. The opening quote has been consumed.
    fn read_string(&mut self) -> Token {
        let mut raw = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => {
                    return Token::Str {
                        raw,
                        terminated: true,
                    };
                }
                '\\' => {
                    raw.push(c);
                    // Keep the escaped character verbatim, even a quote
                    if let Some(escaped) = self.chars.next() {
                        raw.push(escaped);
                    }
                }
                _ => raw.push(c),
            }
        }
        Token::Str {
            raw,
            terminated: false,
        }
    }

    fn read_atom(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(c) = self.chars.next_if(|c| !is_atom_terminator(*c)) {
            text.push(c);
        }
        Token::Atom(text)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Characters that end a bare token.
fn is_atom_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | ',' | ';')
}

/// Tokenize a source string.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// Tests
// ============================================================================

//! Recursive-descent parser for polynomial sets and module sets.
//!
//! A [`Parser`] owns its [`Scanner`] and reads tokens on demand. Grammar
//! entry points that need to know the active polynomial ring take a
//! [`ParseContext`]; the context is an immutable view, and parsing an
//! algebraic extension builds a child context rather than changing the
//! caller's.
//!
//! ```text
//! set       := coeff-ring var-list term-order list
//! list      := "(" [ expr { "," expr } ] ")"
//! module    := "(" [ list { "," list } ] ")"
//! expr      := { sign } factor [ exponent ] { ( "*" | sign | <juxtaposed> ) factor [ exponent ] }
//! factor    := numeral | variable | ring-literal | "{" text "}" | quoted | "(" expr ")"
//! exponent  := ( "^" | "**" ) digits
//! ```

use std::io::BufRead;

use log::{trace, warn};

use crate::arith::{CoefficientKind, Ring};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::poly::{Polynomial, PolynomialRing, TermOrder};
use crate::scanner::{Scanner, Token};

mod expressions;
mod header;
mod lists;
mod names;
mod rings;

pub use lists::{parse_module_set, parse_polynomial_set};
pub use names::{variable_names_from_expression, variable_names_from_list};

// ──────────────────────────────────────────────
// Context
// ──────────────────────────────────────────────

/// The polynomial ring expressions are parsed into.
#[derive(Debug)]
pub struct ParseContext<'r, R: Ring> {
    ring: &'r PolynomialRing<R>,
}

impl<R: Ring> Clone for ParseContext<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Ring> Copy for ParseContext<'_, R> {}

impl<'r, R: Ring> ParseContext<'r, R> {
    pub fn new(ring: &'r PolynomialRing<R>) -> Self {
        ParseContext { ring }
    }

    pub fn ring(&self) -> &'r PolynomialRing<R> {
        self.ring
    }

    pub fn coefficients(&self) -> &'r R {
        self.ring.coefficients()
    }

    pub fn vars(&self) -> &'r [String] {
        self.ring.vars()
    }

    pub fn order(&self) -> &'r TermOrder {
        self.ring.order()
    }

    pub fn kind(&self) -> CoefficientKind {
        self.ring.coefficients().kind()
    }
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub struct Parser<B> {
    scanner: Scanner<B>,
    config: ParserConfig,
    depth: usize,
    advisories: Vec<String>,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_text(text: &'a str) -> Self {
        Parser::new(text.as_bytes())
    }
}

impl<B: BufRead> Parser<B> {
    pub fn new(reader: B) -> Self {
        Parser::with_config(reader, ParserConfig::default())
    }

    pub fn with_config(reader: B, config: ParserConfig) -> Self {
        Parser {
            scanner: Scanner::new(reader),
            config,
            depth: 0,
            advisories: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Non-fatal notes collected so far, oldest first.
    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    /// Line the scanner is on.
    pub fn line(&self) -> u32 {
        self.scanner.line()
    }

    // -- Token helpers ----------------------------------------------

    fn advance(&mut self) -> Result<Token, ParseError> {
        let tok = self.scanner.next_token()?;
        trace!("line {}: {:?}", self.scanner.line(), tok);
        Ok(tok)
    }

    fn push_back(&mut self, tok: Token) {
        self.scanner.push_back(tok);
    }

    fn peek_char(&mut self, n: usize) -> Result<Option<char>, ParseError> {
        self.scanner.peek_significant(n)
    }

    fn digit_ahead(&mut self, n: usize) -> Result<bool, ParseError> {
        Ok(self.peek_char(n)?.is_some_and(|c| c.is_ascii_digit()))
    }

    fn malformed(&self, msg: impl Into<String>) -> ParseError {
        ParseError::malformed(self.line(), msg)
    }

    fn invalid_ring(&self, msg: impl Into<String>) -> ParseError {
        ParseError::invalid_ring(self.line(), msg)
    }

    fn advise(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("line {}: {}", self.line(), msg);
        self.advisories.push(msg);
    }

    // -- Nesting ----------------------------------------------------

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.check_depth(1)?;
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn check_depth(&self, extra: usize) -> Result<(), ParseError> {
        if self.depth + extra > self.config.max_depth {
            return Err(self.malformed(format!(
                "nesting deeper than {} levels",
                self.config.max_depth
            )));
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Literals parsed as polynomials
// ──────────────────────────────────────────────

/// State a ring literal inherits from the expression it was read in: the
/// parser limits, the nesting levels already open around it, and the
/// advisories collected so far.
#[derive(Debug)]
pub struct LiteralScope<'a> {
    pub(crate) config: &'a ParserConfig,
    pub(crate) depth: usize,
    pub(crate) advisories: Vec<String>,
}

/// Parse `text` as a single polynomial of `ring` with default limits. Used
/// by [`Ring::parse`] of rings whose elements are themselves polynomials.
pub(crate) fn parse_polynomial_text<R: Ring>(
    ring: &PolynomialRing<R>,
    text: &str,
) -> Result<Polynomial<R>, ParseError> {
    Parser::from_text(text).parse_polynomial(ParseContext::new(ring))
}

/// Parse `text` as a single polynomial of `ring` inside `scope`. Nesting
/// continues from the scope's depth and advisories are handed back to it.
pub(crate) fn parse_literal_text<R: Ring>(
    ring: &PolynomialRing<R>,
    text: &str,
    scope: &mut LiteralScope<'_>,
) -> Result<Polynomial<R>, ParseError> {
    let mut parser = Parser {
        scanner: Scanner::new(text.as_bytes()),
        config: scope.config.clone(),
        depth: scope.depth,
        advisories: std::mem::take(&mut scope.advisories),
    };
    let result = parser.parse_polynomial(ParseContext::new(ring));
    scope.advisories = parser.advisories;
    result
}

//! polytok-core: parser for polynomial expressions, polynomial lists and
//! module lists over selectable coefficient rings.
//!
//! Input is a character stream in the textual polynomial-set grammar:
//!
//! ```text
//! Q(x, y) IGRLEX
//! ( x^2 * y - 3/4 x, {7/2} y^3 )
//! ```
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Parser`] -- grammar entry points over any [`std::io::BufRead`]
//! - [`parse_polynomial_set()`], [`parse_module_set()`] -- whole sets from a string
//! - [`PolynomialSet`], [`ModuleSet`] -- parse results, one variant per coefficient ring
//! - [`PolynomialRing`], [`Polynomial`], [`TermOrder`] -- the polynomial layer
//! - [`Ring`], [`Field`] -- coefficient arithmetic
//! - [`ParseError`] -- parse error type
//! - [`ParserConfig`] -- nesting and modulus limits
//!
//! The crate logs through the `log` facade and installs no logger.

pub mod arith;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod parser;
pub mod poly;
pub mod scanner;
pub mod sets;

// ── Convenience re-exports: key types ────────────────────────────────

pub use arith::{ArithError, CoefficientKind, Field, Ring};
pub use coefficients::CoefficientRing;
pub use config::ParserConfig;
pub use error::ParseError;
pub use parser::{ParseContext, Parser};
pub use poly::{ExpVector, Polynomial, PolynomialRing, TermOrder};
pub use sets::{ModuleSet, PolynomialSet};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use parser::{
    parse_module_set, parse_polynomial_set, variable_names_from_expression,
    variable_names_from_list,
};

//! Coefficient rings.
//!
//! A ring is a factory value. Elements are plain data and all arithmetic
//! goes through the ring that created them, so a modulus or a defining
//! polynomial is stored once per ring rather than once per element.
//!
//! Every ring `Display`s as the descriptor keyword the coefficient-ring
//! selector accepts, and [`Ring::format`] writes elements in a form
//! [`Ring::parse`] reads back.

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parser::LiteralScope;

mod complex;
mod decimal;
mod modular;
mod rational;

pub use complex::{ComplexRing, Octonion, OctonionRing, Quaternion, QuaternionRing};
pub use decimal::DecimalRing;
pub use modular::{ModIntegerRing, ModLongRing};
pub use rational::{IntegerRing, RationalRing};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithError {
    #[error("'{literal}' is not an element of {ring}: {reason}")]
    InvalidLiteral {
        literal: String,
        ring: String,
        reason: String,
    },

    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("{0} has no inverse")]
    NotInvertible(String),

    /// A polynomial ring that cannot be built from the given parts.
    #[error("invalid polynomial ring: {0}")]
    InvalidRing(String),

    /// A literal read as a polynomial expression of its own failed to parse.
    #[error("{0}")]
    Nested(Box<ParseError>),
}

impl ArithError {
    pub(crate) fn literal(
        literal: &str,
        ring: &impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        ArithError::InvalidLiteral {
            literal: literal.to_owned(),
            ring: ring.to_string(),
            reason: reason.into(),
        }
    }
}

/// The closed set of coefficient domains the selector can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoefficientKind {
    Rational,
    Integer,
    ModularInteger,
    Complex,
    Quaternion,
    Octonion,
    Decimal,
    FunctionCoefficient,
    AlgebraicExtension,
}

pub trait Ring: Clone + fmt::Debug + fmt::Display + PartialEq {
    type Elem: Clone + fmt::Debug + PartialEq;

    fn kind(&self) -> CoefficientKind;

    fn zero(&self) -> Self::Elem;

    fn one(&self) -> Self::Elem;

    /// Parse a literal of this ring.
    fn parse(&self, text: &str) -> Result<Self::Elem, ArithError>;

    /// Parse a literal met inside an expression. Rings whose literals are
    /// polynomial expressions read `text` within `scope`, so nesting limits
    /// carry over; the default ignores the scope.
    fn parse_in(&self, text: &str, _scope: &mut LiteralScope<'_>) -> Result<Self::Elem, ArithError> {
        self.parse(text)
    }

    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `a * b`. Not assumed commutative.
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// Text that [`parse`](Ring::parse) maps back to `a`.
    fn format(&self, a: &Self::Elem) -> String;

    /// Zero for rings of characteristic zero, the modulus otherwise.
    fn characteristic(&self) -> BigInt {
        BigInt::zero()
    }

    /// Descriptor used when this ring is the coefficient ring of a
    /// polynomial ring. Defaults to `Display`.
    fn descriptor(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self, a: &Self::Elem) -> bool {
        *a == self.zero()
    }

    fn is_one(&self, a: &Self::Elem) -> bool {
        *a == self.one()
    }

    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        self.add(a, &self.neg(b))
    }

    /// `a^exp` by repeated squaring; `a^0` is one.
    fn pow(&self, a: &Self::Elem, exp: u64) -> Self::Elem {
        let mut result = self.one();
        let mut base = a.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &base);
            }
            e >>= 1;
            if e > 0 {
                base = self.mul(&base, &base);
            }
        }
        result
    }
}

/// A ring in which every non-zero element can be inverted (or that can at
/// least report which ones cannot).
pub trait Field: Ring {
    fn inverse(&self, a: &Self::Elem) -> Result<Self::Elem, ArithError>;
}

/// Strip blanks and read `~` as a minus sign.
pub(crate) fn normalize_literal(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '~' { '-' } else { c })
        .collect()
}

/// Split `text` at the first occurrence of each separator, in order.
///
/// Slot 0 holds the text before the first separator found; slot `k + 1`
/// the text following `separators[k]`. Missing components stay empty, so
/// `"j5"` with separators `i j k` fills only slot 2.
pub(crate) fn split_components<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut slots = vec![""; separators.len() + 1];
    let mut rest = text;
    let mut slot = 0;
    for (k, sep) in separators.iter().enumerate() {
        if let Some(pos) = rest.find(*sep) {
            slots[slot] = &rest[..pos];
            rest = &rest[pos + sep.len_utf8()..];
            slot = k + 1;
        }
    }
    slots[slot] = rest;
    slots
}

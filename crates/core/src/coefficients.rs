//! The coefficient rings the selector can produce, as one closed type.
//!
//! Code that is generic over [`Ring`](crate::arith::Ring) is instantiated
//! per variant through [`dispatch_ring!`].

use std::fmt;

use crate::arith::{
    CoefficientKind, ComplexRing, DecimalRing, IntegerRing, ModIntegerRing, ModLongRing,
    OctonionRing, QuaternionRing, RationalRing,
};
use crate::poly::{AlgebraicNumberRing, PolynomialRing};

/// Integers modulo `m`, word-sized or arbitrary precision.
#[derive(Debug, Clone, PartialEq)]
pub enum ModularRing {
    Word(ModLongRing),
    Big(ModIntegerRing),
}

/// An algebraic extension over the rationals or over a prime field.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgebraicRing {
    Rational(AlgebraicNumberRing<RationalRing>),
    Modular(AlgebraicNumberRing<ModIntegerRing>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoefficientRing {
    Rational,
    Integer,
    ModularInteger(ModularRing),
    Complex,
    Quaternion,
    Octonion,
    Decimal,
    /// Polynomials over the rationals, in INVLEX order.
    FunctionCoefficient(PolynomialRing<RationalRing>),
    AlgebraicExtension(AlgebraicRing),
}

impl CoefficientRing {
    pub fn kind(&self) -> CoefficientKind {
        match self {
            CoefficientRing::Rational => CoefficientKind::Rational,
            CoefficientRing::Integer => CoefficientKind::Integer,
            CoefficientRing::ModularInteger(_) => CoefficientKind::ModularInteger,
            CoefficientRing::Complex => CoefficientKind::Complex,
            CoefficientRing::Quaternion => CoefficientKind::Quaternion,
            CoefficientRing::Octonion => CoefficientKind::Octonion,
            CoefficientRing::Decimal => CoefficientKind::Decimal,
            CoefficientRing::FunctionCoefficient(_) => CoefficientKind::FunctionCoefficient,
            CoefficientRing::AlgebraicExtension(_) => CoefficientKind::AlgebraicExtension,
        }
    }
}

/// Bind `$r` to the concrete ring of a `&CoefficientRing` and wrap the
/// value of `$body` in the matching variant of `$out`.
///
/// `$out` must have the variants `Rational`, `Integer`, `ModLong`,
/// `ModInteger`, `Complex`, `Quaternion`, `Octonion`, `Decimal`,
/// `Function`, `AlgebraicRational` and `AlgebraicModular`. `$body` may use
/// `?`.
macro_rules! dispatch_ring {
    ($ring:expr, $out:ident, $r:ident => $body:expr) => {{
        use $crate::coefficients::{AlgebraicRing, CoefficientRing, ModularRing};
        match $ring {
            CoefficientRing::Rational => {
                let $r = $crate::arith::RationalRing;
                $out::Rational($body)
            }
            CoefficientRing::Integer => {
                let $r = $crate::arith::IntegerRing;
                $out::Integer($body)
            }
            CoefficientRing::ModularInteger(ModularRing::Word(m)) => {
                let $r = m.clone();
                $out::ModLong($body)
            }
            CoefficientRing::ModularInteger(ModularRing::Big(m)) => {
                let $r = m.clone();
                $out::ModInteger($body)
            }
            CoefficientRing::Complex => {
                let $r = $crate::arith::ComplexRing;
                $out::Complex($body)
            }
            CoefficientRing::Quaternion => {
                let $r = $crate::arith::QuaternionRing;
                $out::Quaternion($body)
            }
            CoefficientRing::Octonion => {
                let $r = $crate::arith::OctonionRing;
                $out::Octonion($body)
            }
            CoefficientRing::Decimal => {
                let $r = $crate::arith::DecimalRing;
                $out::Decimal($body)
            }
            CoefficientRing::FunctionCoefficient(p) => {
                let $r = p.clone();
                $out::Function($body)
            }
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Rational(a)) => {
                let $r = a.clone();
                $out::AlgebraicRational($body)
            }
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Modular(a)) => {
                let $r = a.clone();
                $out::AlgebraicModular($body)
            }
        }
    }};
}

pub(crate) use dispatch_ring;

/// The descriptor keyword the selector reads back.
impl fmt::Display for CoefficientRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::arith::Ring;
        match self {
            CoefficientRing::Rational => write!(f, "{}", RationalRing),
            CoefficientRing::Integer => write!(f, "{}", IntegerRing),
            CoefficientRing::ModularInteger(ModularRing::Word(m)) => write!(f, "{}", m),
            CoefficientRing::ModularInteger(ModularRing::Big(m)) => write!(f, "{}", m),
            CoefficientRing::Complex => write!(f, "{}", ComplexRing),
            CoefficientRing::Quaternion => write!(f, "{}", QuaternionRing),
            CoefficientRing::Octonion => write!(f, "{}", OctonionRing),
            CoefficientRing::Decimal => write!(f, "{}", DecimalRing),
            CoefficientRing::FunctionCoefficient(p) => write!(f, "{}", p.descriptor()),
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Rational(a)) => write!(f, "{}", a),
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Modular(a)) => write!(f, "{}", a),
        }
    }
}

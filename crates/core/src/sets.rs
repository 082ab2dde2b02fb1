//! Parse results: a ring together with a polynomial list or module list,
//! one variant per concrete coefficient ring.

use std::fmt;

use crate::arith::{
    CoefficientKind, ComplexRing, DecimalRing, IntegerRing, ModIntegerRing, ModLongRing,
    OctonionRing, QuaternionRing, RationalRing, Ring,
};
use crate::poly::{AlgebraicNumberRing, ModuleList, PolynomialList, PolynomialRing};

#[derive(Debug, Clone, PartialEq)]
pub enum PolynomialSet {
    Rational(PolynomialList<RationalRing>),
    Integer(PolynomialList<IntegerRing>),
    ModLong(PolynomialList<ModLongRing>),
    ModInteger(PolynomialList<ModIntegerRing>),
    Complex(PolynomialList<ComplexRing>),
    Quaternion(PolynomialList<QuaternionRing>),
    Octonion(PolynomialList<OctonionRing>),
    Decimal(PolynomialList<DecimalRing>),
    Function(PolynomialList<PolynomialRing<RationalRing>>),
    AlgebraicRational(PolynomialList<AlgebraicNumberRing<RationalRing>>),
    AlgebraicModular(PolynomialList<AlgebraicNumberRing<ModIntegerRing>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSet {
    Rational(ModuleList<RationalRing>),
    Integer(ModuleList<IntegerRing>),
    ModLong(ModuleList<ModLongRing>),
    ModInteger(ModuleList<ModIntegerRing>),
    Complex(ModuleList<ComplexRing>),
    Quaternion(ModuleList<QuaternionRing>),
    Octonion(ModuleList<OctonionRing>),
    Decimal(ModuleList<DecimalRing>),
    Function(ModuleList<PolynomialRing<RationalRing>>),
    AlgebraicRational(ModuleList<AlgebraicNumberRing<RationalRing>>),
    AlgebraicModular(ModuleList<AlgebraicNumberRing<ModIntegerRing>>),
}

// Evaluate `$body` with `$s` bound to the list inside any variant.
macro_rules! each_variant {
    ($set:ident, $value:expr, $s:ident => $body:expr) => {
        match $value {
            $set::Rational($s) => $body,
            $set::Integer($s) => $body,
            $set::ModLong($s) => $body,
            $set::ModInteger($s) => $body,
            $set::Complex($s) => $body,
            $set::Quaternion($s) => $body,
            $set::Octonion($s) => $body,
            $set::Decimal($s) => $body,
            $set::Function($s) => $body,
            $set::AlgebraicRational($s) => $body,
            $set::AlgebraicModular($s) => $body,
        }
    };
}

impl PolynomialSet {
    /// Kind of the coefficient ring.
    pub fn kind(&self) -> CoefficientKind {
        each_variant!(PolynomialSet, self, s => s.ring().coefficients().kind())
    }

    pub fn vars(&self) -> &[String] {
        each_variant!(PolynomialSet, self, s => s.ring().vars())
    }

    /// Number of polynomials.
    pub fn len(&self) -> usize {
        each_variant!(PolynomialSet, self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ring_header(&self) -> String {
        each_variant!(PolynomialSet, self, s => s.ring().to_string())
    }
}

impl fmt::Display for PolynomialSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        each_variant!(PolynomialSet, self, s => fmt::Display::fmt(s, f))
    }
}

impl ModuleSet {
    pub fn kind(&self) -> CoefficientKind {
        each_variant!(ModuleSet, self, s => s.ring().coefficients().kind())
    }

    pub fn vars(&self) -> &[String] {
        each_variant!(ModuleSet, self, s => s.ring().vars())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        each_variant!(ModuleSet, self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length shared by every row.
    pub fn cols(&self) -> usize {
        each_variant!(ModuleSet, self, s => s.cols())
    }

    pub fn ring_header(&self) -> String {
        each_variant!(ModuleSet, self, s => s.ring().to_string())
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        each_variant!(ModuleSet, self, s => fmt::Display::fmt(s, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::TermOrder;

    #[test]
    fn accessors_see_through_the_variant() {
        let ring = PolynomialRing::new(
            IntegerRing,
            vec!["x".into(), "y".into()],
            TermOrder::default(),
        )
        .unwrap();
        let set = PolynomialSet::Integer(PolynomialList::new(ring.clone(), vec![ring.one()]));
        assert_eq!(set.kind(), CoefficientKind::Integer);
        assert_eq!(set.vars(), ["x".to_string(), "y".to_string()]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.ring_header(), "Z(x, y) IGRLEX");

        let module = ModuleSet::Integer(ModuleList::new(ring.clone(), vec![vec![], vec![ring.one()]]));
        assert_eq!(module.cols(), 1);
        assert!(!module.is_empty());
    }
}

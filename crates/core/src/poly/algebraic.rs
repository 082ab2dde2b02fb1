use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

use super::{Polynomial, PolynomialRing};
use crate::arith::{ArithError, CoefficientKind, Field, Ring};
use crate::parser::LiteralScope;

/// Residues of univariate polynomials modulo a defining polynomial, the
/// field `K[a] / (m(a))` when `m` is irreducible. Elements are kept
/// reduced, so their degree is below the degree of `m`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgebraicNumberRing<R: Field> {
    ring: PolynomialRing<R>,
    modulus: Polynomial<R>,
    degree: u64,
    lead_inverse: R::Elem,
}

impl<R: Field> AlgebraicNumberRing<R> {
    /// `ring` must have exactly one variable; `modulus` must have degree
    /// at least 1 and an invertible leading coefficient.
    pub fn new(ring: PolynomialRing<R>, modulus: Polynomial<R>) -> Result<Self, ArithError> {
        if ring.nvars() != 1 {
            return Err(ArithError::InvalidRing(format!(
                "an algebraic extension needs exactly one variable, got {}",
                ring.nvars()
            )));
        }
        let (degree, lead) = match modulus.terms.iter().next_back() {
            Some((e, c)) if e.as_slice()[0] > 0 => (e.as_slice()[0], c.clone()),
            _ => {
                return Err(ArithError::InvalidRing(format!(
                    "defining polynomial '{}' has degree 0",
                    ring.format(&modulus)
                )))
            }
        };
        let lead_inverse = ring.coefficients().inverse(&lead)?;
        Ok(AlgebraicNumberRing {
            ring,
            modulus,
            degree,
            lead_inverse,
        })
    }

    pub fn ring(&self) -> &PolynomialRing<R> {
        &self.ring
    }

    pub fn modulus(&self) -> &Polynomial<R> {
        &self.modulus
    }

    pub fn degree(&self) -> u64 {
        self.degree
    }

    pub fn variable(&self) -> &str {
        &self.ring.vars()[0]
    }

    /// Remainder of `p` divided by the defining polynomial.
    pub fn reduce(&self, p: &Polynomial<R>) -> Polynomial<R> {
        let base = self.ring.coefficients();
        let mut rem = p.clone();
        while let Some((e, c)) = rem.terms.iter().next_back() {
            let top = e.as_slice()[0];
            if top < self.degree {
                break;
            }
            let factor = base.mul(&self.lead_inverse, c);
            let shifted = self
                .ring
                .mul(&self.ring.univariate(0, top - self.degree), &self.modulus);
            rem = self.ring.sub(&rem, &self.ring.scale(&shifted, &factor));
        }
        rem
    }
}

/// `AN[ (a) ( a^2 - 7 ) ]`, with the modulus of the base after `[` when
/// the base is modular.
impl<R: Field> fmt::Display for AlgebraicNumberRing<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AN[ ")?;
        let characteristic = self.characteristic();
        if !characteristic.is_zero() {
            write!(f, "{} ", characteristic)?;
        }
        write!(
            f,
            "({}) ( {} ) ]",
            self.variable(),
            self.ring.format(&self.modulus)
        )
    }
}

impl<R: Field> Ring for AlgebraicNumberRing<R> {
    type Elem = Polynomial<R>;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::AlgebraicExtension
    }

    fn zero(&self) -> Polynomial<R> {
        self.ring.zero()
    }

    fn one(&self) -> Polynomial<R> {
        self.ring.one()
    }

    fn parse(&self, text: &str) -> Result<Polynomial<R>, ArithError> {
        let p = crate::parser::parse_polynomial_text(&self.ring, text)
            .map_err(|e| ArithError::literal(text, self, e.to_string()))?;
        Ok(self.reduce(&p))
    }

    fn parse_in(&self, text: &str, scope: &mut LiteralScope<'_>) -> Result<Polynomial<R>, ArithError> {
        let p = self.ring.parse_in(text, scope)?;
        Ok(self.reduce(&p))
    }

    fn add(&self, a: &Polynomial<R>, b: &Polynomial<R>) -> Polynomial<R> {
        self.ring.add(a, b)
    }

    fn mul(&self, a: &Polynomial<R>, b: &Polynomial<R>) -> Polynomial<R> {
        self.reduce(&self.ring.mul(a, b))
    }

    fn neg(&self, a: &Polynomial<R>) -> Polynomial<R> {
        self.ring.neg(a)
    }

    fn format(&self, a: &Polynomial<R>) -> String {
        self.ring.format(a)
    }

    fn characteristic(&self) -> BigInt {
        self.ring.coefficients().characteristic()
    }

    fn is_zero(&self, a: &Polynomial<R>) -> bool {
        a.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ModIntegerRing, RationalRing};
    use crate::poly::{ExpVector, TermOrder};

    fn sqrt7() -> AlgebraicNumberRing<RationalRing> {
        let ring =
            PolynomialRing::new(RationalRing, vec!["a".into()], TermOrder::default()).unwrap();
        let q = ring.coefficients();
        let m = ring.polynomial([
            (ExpVector::from_vec(vec![2]), q.one()),
            (ExpVector::from_vec(vec![0]), q.parse("-7").unwrap()),
        ]);
        AlgebraicNumberRing::new(ring, m).unwrap()
    }

    #[test]
    fn square_of_generator_reduces() {
        let an = sqrt7();
        let a = an.ring().univariate(0, 1);
        let seven = an.ring().constant(RationalRing.parse("7").unwrap());
        assert_eq!(an.mul(&a, &a), seven);
        assert_eq!(an.pow(&a, 3), an.ring().scale(&a, &RationalRing.parse("7").unwrap()));
    }

    #[test]
    fn literals_are_reduced() {
        let an = sqrt7();
        assert_eq!(an.parse("a^2 + 1").unwrap(), an.parse("8").unwrap());
        assert!(an.parse("b").is_err());
    }

    #[test]
    fn constant_modulus_is_rejected() {
        let ring =
            PolynomialRing::new(RationalRing, vec!["a".into()], TermOrder::default()).unwrap();
        let five = ring.constant(RationalRing.parse("5").unwrap());
        assert!(AlgebraicNumberRing::new(ring.clone(), five).is_err());
        assert!(AlgebraicNumberRing::new(ring.clone(), ring.zero()).is_err());
    }

    #[test]
    fn two_variables_are_rejected() {
        let ring = PolynomialRing::new(
            RationalRing,
            vec!["a".into(), "b".into()],
            TermOrder::default(),
        )
        .unwrap();
        let a = ring.univariate(0, 1);
        let err = AlgebraicNumberRing::new(ring, a).unwrap_err();
        assert!(err.to_string().contains("exactly one variable"), "{}", err);
    }

    #[test]
    fn modular_base_shows_in_descriptor() {
        let base = ModIntegerRing::new(BigInt::from(7)).unwrap();
        let ring = PolynomialRing::new(base, vec!["a".into()], TermOrder::default()).unwrap();
        let m = ring.add(&ring.univariate(0, 2), &ring.one());
        let an = AlgebraicNumberRing::new(ring, m).unwrap();
        assert_eq!(an.characteristic(), BigInt::from(7));
        assert_eq!(an.to_string(), "AN[ 7 (a) ( a^2 + 1 ) ]");
        assert_eq!(sqrt7().to_string(), "AN[ (a) ( a^2 - 7 ) ]");
    }
}

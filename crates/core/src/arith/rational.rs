use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{normalize_literal, ArithError, CoefficientKind, Field, Ring};

/// Parse a rational literal: `n`, `n/d`, decimals such as `0.25`, each part
/// optionally signed. `~` reads as `-`.
pub(crate) fn parse_rational(text: &str) -> Result<BigRational, String> {
    let s = normalize_literal(text);
    if s.is_empty() {
        return Err("empty literal".into());
    }
    match s.split_once('/') {
        Some((num, den)) => {
            let num = parse_decimal(num)?;
            let den = parse_decimal(den)?;
            if den.is_zero() {
                return Err("zero denominator".into());
            }
            Ok(num / den)
        }
        None => parse_decimal(&s),
    }
}

fn parse_decimal(s: &str) -> Result<BigRational, String> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int, frac) = body.split_once('.').unwrap_or((body, ""));
    if int.is_empty() && frac.is_empty() {
        return Err(format!("'{}' has no digits", s));
    }
    if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(format!("'{}' is not a decimal numeral", s));
    }
    let digits = format!("{}{}", int, frac);
    let numer = BigInt::from_str(&digits).map_err(|e| e.to_string())?;
    let denom = num_traits::pow(BigInt::from(10), frac.len());
    let value = BigRational::new(numer, denom);
    Ok(if negative { -value } else { value })
}

/// Rational numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RationalRing;

impl fmt::Display for RationalRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Q")
    }
}

impl Ring for RationalRing {
    type Elem = BigRational;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Rational
    }

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn parse(&self, text: &str) -> Result<BigRational, ArithError> {
        parse_rational(text).map_err(|reason| ArithError::literal(text, self, reason))
    }

    fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn mul(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn neg(&self, a: &BigRational) -> BigRational {
        -a
    }

    fn format(&self, a: &BigRational) -> String {
        a.to_string()
    }

    fn is_zero(&self, a: &BigRational) -> bool {
        a.is_zero()
    }
}

impl Field for RationalRing {
    fn inverse(&self, a: &BigRational) -> Result<BigRational, ArithError> {
        if a.is_zero() {
            return Err(ArithError::NotInvertible(a.to_string()));
        }
        Ok(a.recip())
    }
}

/// Arbitrary-precision integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerRing;

impl fmt::Display for IntegerRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Z")
    }
}

impl Ring for IntegerRing {
    type Elem = BigInt;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Integer
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn parse(&self, text: &str) -> Result<BigInt, ArithError> {
        let s = normalize_literal(text);
        let digits = s.strip_prefix('+').unwrap_or(&s);
        BigInt::from_str(digits).map_err(|e| ArithError::literal(text, self, e.to_string()))
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }

    fn neg(&self, a: &BigInt) -> BigInt {
        -a
    }

    fn format(&self, a: &BigInt) -> String {
        a.to_string()
    }
}

/// Reduce the rational `r` into `[0, m)`, or `None` when its denominator
/// shares a factor with `m`.
pub(crate) fn rational_mod(r: &BigRational, m: &BigInt) -> Option<BigInt> {
    use num_integer::Integer;

    let num = r.numer().mod_floor(m);
    let den = r.denom().mod_floor(m);
    let egcd = den.extended_gcd(m);
    if !egcd.gcd.is_one() {
        return None;
    }
    Some((num * egcd.x).mod_floor(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> BigRational {
        RationalRing.parse(s).unwrap()
    }

    #[test]
    fn rational_literals() {
        assert_eq!(q("3/4"), BigRational::new(3.into(), 4.into()));
        assert_eq!(q("-3/4"), BigRational::new((-3).into(), 4.into()));
        assert_eq!(q("~3/4"), q("-3/4"));
        assert_eq!(q("0.2"), BigRational::new(1.into(), 5.into()));
        assert_eq!(q("1.5/3"), BigRational::new(1.into(), 2.into()));
        assert_eq!(q("7"), BigRational::from_integer(7.into()));
    }

    #[test]
    fn rational_rejects_symbols_and_zero_denominators() {
        assert!(RationalRing.parse("w").is_err());
        assert!(RationalRing.parse("1/0").is_err());
        assert!(RationalRing.parse("").is_err());
        assert!(RationalRing.parse("3x").is_err());
    }

    #[test]
    fn rational_format_reparses() {
        for s in ["3/4", "-5", "0", "22/7"] {
            let v = q(s);
            assert_eq!(q(&RationalRing.format(&v)), v);
        }
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(IntegerRing.parse("~12").unwrap(), BigInt::from(-12));
        assert!(IntegerRing.parse("1/2").is_err());
    }

    #[test]
    fn rational_reduction_mod_m() {
        let m = BigInt::from(7);
        // 1/2 = 4 mod 7
        assert_eq!(rational_mod(&q("1/2"), &m), Some(BigInt::from(4)));
        assert_eq!(rational_mod(&q("-1"), &m), Some(BigInt::from(6)));
        assert_eq!(rational_mod(&q("1/7"), &m), None);
    }
}

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use super::{normalize_literal, ArithError, CoefficientKind, Ring};

/// Scale kept after a division.
const QUOTIENT_SCALE: u32 = 20;

/// Fixed-point decimals. Sums and products saturate at the representable
/// range instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalRing;

impl DecimalRing {
    fn divide(&self, text: &str, num: Decimal, den: Decimal) -> Result<Decimal, ArithError> {
        let q = num
            .checked_div(den)
            .ok_or_else(|| ArithError::literal(text, self, "division by zero or overflow"))?;
        Ok(q.round_dp_with_strategy(QUOTIENT_SCALE, RoundingStrategy::MidpointNearestEven))
    }
}

impl fmt::Display for DecimalRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "D")
    }
}

impl Ring for DecimalRing {
    type Elem = Decimal;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Decimal
    }

    fn zero(&self) -> Decimal {
        Decimal::ZERO
    }

    fn one(&self) -> Decimal {
        Decimal::ONE
    }

    fn parse(&self, text: &str) -> Result<Decimal, ArithError> {
        let s = normalize_literal(text);
        let number = |p: &str| {
            Decimal::from_str(p).map_err(|e| ArithError::literal(text, self, e.to_string()))
        };
        match s.split_once('/') {
            Some((num, den)) => self.divide(text, number(num)?, number(den)?),
            None => number(&s),
        }
    }

    fn add(&self, a: &Decimal, b: &Decimal) -> Decimal {
        a.saturating_add(*b)
    }

    fn mul(&self, a: &Decimal, b: &Decimal) -> Decimal {
        a.saturating_mul(*b)
    }

    fn neg(&self, a: &Decimal) -> Decimal {
        -*a
    }

    fn format(&self, a: &Decimal) -> String {
        a.normalize().to_string()
    }

    fn is_zero(&self, a: &Decimal) -> bool {
        a.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_literals() {
        let d = DecimalRing;
        assert_eq!(d.parse("1.5").unwrap(), Decimal::new(15, 1));
        assert_eq!(d.parse("~2.25").unwrap(), Decimal::new(-225, 2));
        assert_eq!(d.parse("1/4").unwrap(), Decimal::new(25, 2));
        assert!(d.parse("1/0").is_err());
        assert!(d.parse("x").is_err());
    }

    #[test]
    fn trailing_zeros_do_not_change_value() {
        let d = DecimalRing;
        assert_eq!(d.parse("1.50").unwrap(), d.parse("1.5").unwrap());
        assert_eq!(d.format(&d.parse("1.50").unwrap()), "1.5");
    }

    #[test]
    fn saturating_products() {
        let d = DecimalRing;
        let big = Decimal::MAX;
        assert_eq!(d.mul(&big, &big), Decimal::MAX);
        assert_eq!(d.add(&big, &big), Decimal::MAX);
    }

    #[test]
    fn thirds_round_to_quotient_scale() {
        let d = DecimalRing;
        let third = d.parse("1/3").unwrap();
        assert_eq!(third.scale(), QUOTIENT_SCALE);
        assert_eq!(d.parse(&d.format(&third)).unwrap(), third);
    }
}

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::rational::{parse_rational, rational_mod};
use super::{ArithError, CoefficientKind, Field, Ring};

fn check_modulus(modulus: &BigInt) -> Result<(), ArithError> {
    if *modulus < BigInt::from(2) {
        return Err(ArithError::InvalidModulus(format!(
            "{} (must be at least 2)",
            modulus
        )));
    }
    Ok(())
}

fn parse_residue(text: &str, modulus: &BigInt, ring: &impl fmt::Display) -> Result<BigInt, ArithError> {
    let r = parse_rational(text).map_err(|reason| ArithError::literal(text, ring, reason))?;
    rational_mod(&r, modulus).ok_or_else(|| {
        ArithError::literal(text, ring, "denominator is not invertible")
    })
}

fn invert(a: &BigInt, modulus: &BigInt) -> Result<BigInt, ArithError> {
    let egcd = a.extended_gcd(modulus);
    if !egcd.gcd.is_one() {
        return Err(ArithError::NotInvertible(format!("{} mod {}", a, modulus)));
    }
    Ok(egcd.x.mod_floor(modulus))
}

/// Integers modulo a word-sized modulus. Products are formed in 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModLongRing {
    modulus: u64,
}

impl ModLongRing {
    pub fn new(modulus: u64) -> Result<Self, ArithError> {
        check_modulus(&BigInt::from(modulus))?;
        Ok(ModLongRing { modulus })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl fmt::Display for ModLongRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mod {}", self.modulus)
    }
}

impl Ring for ModLongRing {
    type Elem = u64;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::ModularInteger
    }

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn parse(&self, text: &str) -> Result<u64, ArithError> {
        let m = BigInt::from(self.modulus);
        let v = parse_residue(text, &m, self)?;
        // v < modulus, so it always fits
        v.to_u64()
            .ok_or_else(|| ArithError::literal(text, self, "residue out of range"))
    }

    fn add(&self, a: &u64, b: &u64) -> u64 {
        ((*a as u128 + *b as u128) % self.modulus as u128) as u64
    }

    fn mul(&self, a: &u64, b: &u64) -> u64 {
        ((*a as u128 * *b as u128) % self.modulus as u128) as u64
    }

    fn neg(&self, a: &u64) -> u64 {
        let a = a % self.modulus;
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    fn format(&self, a: &u64) -> String {
        a.to_string()
    }

    fn characteristic(&self) -> BigInt {
        BigInt::from(self.modulus)
    }
}

impl Field for ModLongRing {
    fn inverse(&self, a: &u64) -> Result<u64, ArithError> {
        let m = BigInt::from(self.modulus);
        let inv = invert(&BigInt::from(*a), &m)?;
        inv.to_u64()
            .ok_or_else(|| ArithError::NotInvertible(format!("{} mod {}", a, self.modulus)))
    }
}

/// Integers modulo an arbitrary-precision modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModIntegerRing {
    modulus: BigInt,
}

impl ModIntegerRing {
    pub fn new(modulus: BigInt) -> Result<Self, ArithError> {
        check_modulus(&modulus)?;
        Ok(ModIntegerRing { modulus })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }
}

impl fmt::Display for ModIntegerRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mod {}", self.modulus)
    }
}

impl Ring for ModIntegerRing {
    type Elem = BigInt;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::ModularInteger
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn parse(&self, text: &str) -> Result<BigInt, ArithError> {
        parse_residue(text, &self.modulus, self)
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        (a + b).mod_floor(&self.modulus)
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        (a * b).mod_floor(&self.modulus)
    }

    fn neg(&self, a: &BigInt) -> BigInt {
        (-a).mod_floor(&self.modulus)
    }

    fn format(&self, a: &BigInt) -> String {
        a.to_string()
    }

    fn characteristic(&self) -> BigInt {
        self.modulus.clone()
    }
}

impl Field for ModIntegerRing {
    fn inverse(&self, a: &BigInt) -> Result<BigInt, ArithError> {
        invert(a, &self.modulus)
    }
}

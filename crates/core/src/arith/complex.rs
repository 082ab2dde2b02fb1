//! Complex numbers and the hypercomplex quaternion and octonion algebras,
//! all with rational components.
//!
//! Literal forms put the imaginary separators between components:
//! `3i4` is 3 + 4i, `1i2j3k4` is 1 + 2i + 3j + 4k, and an octonion is two
//! quaternions joined by `o`. Components may use `~` for a minus sign.

use std::fmt;

use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::rational::parse_rational;
use super::{normalize_literal, split_components, ArithError, CoefficientKind, Ring};

fn components(
    text: &str,
    separators: &[char],
    ring: &impl fmt::Display,
) -> Result<Vec<BigRational>, ArithError> {
    let s = normalize_literal(text);
    let parts = split_components(&s, separators);
    if parts.iter().all(|p| p.is_empty()) {
        return Err(ArithError::literal(text, ring, "no components"));
    }
    parts
        .into_iter()
        .map(|p| {
            if p.is_empty() {
                Ok(BigRational::zero())
            } else {
                parse_rational(p).map_err(|reason| ArithError::literal(text, ring, reason))
            }
        })
        .collect()
}

fn write_components(out: &mut String, parts: &[&BigRational], separators: &[char]) {
    out.push_str(&parts[0].to_string());
    if parts[1..].iter().all(|p| p.is_zero()) {
        return;
    }
    for (sep, part) in separators.iter().zip(&parts[1..]) {
        out.push(*sep);
        out.push_str(&part.to_string());
    }
}

// ──────────────────────────────────────────────
// Complex
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplexRing;

impl fmt::Display for ComplexRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "C")
    }
}

impl Ring for ComplexRing {
    type Elem = Complex<BigRational>;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Complex
    }

    fn zero(&self) -> Complex<BigRational> {
        Complex::zero()
    }

    fn one(&self) -> Complex<BigRational> {
        Complex::one()
    }

    fn parse(&self, text: &str) -> Result<Complex<BigRational>, ArithError> {
        let mut parts = components(text, &['i'], self)?.into_iter();
        let re = parts.next().unwrap_or_else(BigRational::zero);
        let im = parts.next().unwrap_or_else(BigRational::zero);
        Ok(Complex::new(re, im))
    }

    fn add(&self, a: &Complex<BigRational>, b: &Complex<BigRational>) -> Complex<BigRational> {
        a + b
    }

    fn mul(&self, a: &Complex<BigRational>, b: &Complex<BigRational>) -> Complex<BigRational> {
        a * b
    }

    fn neg(&self, a: &Complex<BigRational>) -> Complex<BigRational> {
        -a
    }

    fn format(&self, a: &Complex<BigRational>) -> String {
        let mut out = String::new();
        write_components(&mut out, &[&a.re, &a.im], &['i']);
        out
    }
}

// ──────────────────────────────────────────────
// Quaternion
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quaternion {
    pub re: BigRational,
    pub i: BigRational,
    pub j: BigRational,
    pub k: BigRational,
}

impl Quaternion {
    pub fn new(re: BigRational, i: BigRational, j: BigRational, k: BigRational) -> Self {
        Quaternion { re, i, j, k }
    }

    pub fn real(re: BigRational) -> Self {
        Quaternion::new(re, BigRational::zero(), BigRational::zero(), BigRational::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.i.is_zero() && self.j.is_zero() && self.k.is_zero()
    }

    fn add(&self, o: &Quaternion) -> Quaternion {
        Quaternion::new(&self.re + &o.re, &self.i + &o.i, &self.j + &o.j, &self.k + &o.k)
    }

    fn neg(&self) -> Quaternion {
        Quaternion::new(-&self.re, -&self.i, -&self.j, -&self.k)
    }

    fn conj(&self) -> Quaternion {
        Quaternion::new(self.re.clone(), -&self.i, -&self.j, -&self.k)
    }

    /// Hamilton product.
    fn mul(&self, o: &Quaternion) -> Quaternion {
        let (a1, b1, c1, d1) = (&self.re, &self.i, &self.j, &self.k);
        let (a2, b2, c2, d2) = (&o.re, &o.i, &o.j, &o.k);
        Quaternion::new(
            a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
            a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
            a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
        )
    }

    fn parse(text: &str, ring: &impl fmt::Display) -> Result<Quaternion, ArithError> {
        let mut c = components(text, &['i', 'j', 'k'], ring)?.into_iter();
        let mut next = || c.next().unwrap_or_else(BigRational::zero);
        Ok(Quaternion::new(next(), next(), next(), next()))
    }

    fn write(&self, out: &mut String) {
        write_components(out, &[&self.re, &self.i, &self.j, &self.k], &['i', 'j', 'k']);
    }
}

/// Quaternions over the rationals. Multiplication is not commutative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuaternionRing;

impl fmt::Display for QuaternionRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Quat")
    }
}

impl Ring for QuaternionRing {
    type Elem = Quaternion;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Quaternion
    }

    fn zero(&self) -> Quaternion {
        Quaternion::real(BigRational::zero())
    }

    fn one(&self) -> Quaternion {
        Quaternion::real(BigRational::one())
    }

    fn parse(&self, text: &str) -> Result<Quaternion, ArithError> {
        Quaternion::parse(text, self)
    }

    fn add(&self, a: &Quaternion, b: &Quaternion) -> Quaternion {
        a.add(b)
    }

    fn mul(&self, a: &Quaternion, b: &Quaternion) -> Quaternion {
        a.mul(b)
    }

    fn neg(&self, a: &Quaternion) -> Quaternion {
        a.neg()
    }

    fn format(&self, a: &Quaternion) -> String {
        let mut out = String::new();
        a.write(&mut out);
        out
    }

    fn is_zero(&self, a: &Quaternion) -> bool {
        a.is_zero()
    }
}

// ──────────────────────────────────────────────
// Octonion
// ──────────────────────────────────────────────

/// A pair of quaternions under the Cayley-Dickson product
/// `(a, b)(c, d) = (ac - d*b, da + bc*)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Octonion {
    pub left: Quaternion,
    pub right: Quaternion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctonionRing;

impl fmt::Display for OctonionRing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Oct")
    }
}

impl Ring for OctonionRing {
    type Elem = Octonion;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::Octonion
    }

    fn zero(&self) -> Octonion {
        Octonion {
            left: Quaternion::real(BigRational::zero()),
            right: Quaternion::real(BigRational::zero()),
        }
    }

    fn one(&self) -> Octonion {
        Octonion {
            left: Quaternion::real(BigRational::one()),
            right: Quaternion::real(BigRational::zero()),
        }
    }

    fn parse(&self, text: &str) -> Result<Octonion, ArithError> {
        let s = normalize_literal(text);
        let (l, r) = s.split_once('o').unwrap_or((s.as_str(), ""));
        if l.is_empty() && r.is_empty() {
            return Err(ArithError::literal(text, self, "no components"));
        }
        let half = |p: &str| {
            if p.is_empty() {
                Ok(Quaternion::real(BigRational::zero()))
            } else {
                Quaternion::parse(p, self)
            }
        };
        Ok(Octonion {
            left: half(l)?,
            right: half(r)?,
        })
    }

    fn add(&self, a: &Octonion, b: &Octonion) -> Octonion {
        Octonion {
            left: a.left.add(&b.left),
            right: a.right.add(&b.right),
        }
    }

    fn mul(&self, x: &Octonion, y: &Octonion) -> Octonion {
        let (a, b) = (&x.left, &x.right);
        let (c, d) = (&y.left, &y.right);
        Octonion {
            left: a.mul(c).add(&d.conj().mul(b).neg()),
            right: d.mul(a).add(&b.mul(&c.conj())),
        }
    }

    fn neg(&self, a: &Octonion) -> Octonion {
        Octonion {
            left: a.left.neg(),
            right: a.right.neg(),
        }
    }

    fn format(&self, a: &Octonion) -> String {
        let mut out = String::new();
        a.left.write(&mut out);
        if !a.right.is_zero() {
            out.push('o');
            a.right.write(&mut out);
        }
        out
    }

    fn is_zero(&self, a: &Octonion) -> bool {
        a.left.is_zero() && a.right.is_zero()
    }
}

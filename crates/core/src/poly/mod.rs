//! Sparse multivariate polynomials over a [`Ring`].
//!
//! A [`PolynomialRing`] fixes the coefficient ring, the variable names and
//! the term order; polynomials are plain term maps and all arithmetic goes
//! through the ring. A polynomial ring is itself a [`Ring`], which gives
//! polynomial coefficients for function-coefficient rings.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::arith::{ArithError, CoefficientKind, Ring};
use crate::parser::LiteralScope;

mod algebraic;
mod list;
mod order;

pub use algebraic::AlgebraicNumberRing;
pub use list::{ModuleList, PolynomialList};
pub use order::{OrderKind, SplitIndex, TermOrder};

/// One exponent per declared variable, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpVector(Vec<u64>);

impl ExpVector {
    pub fn zero(nvars: usize) -> Self {
        ExpVector(vec![0; nvars])
    }

    pub fn univariate(nvars: usize, index: usize, exp: u64) -> Self {
        let mut e = vec![0; nvars];
        e[index] = exp;
        ExpVector(e)
    }

    pub fn from_vec(exps: Vec<u64>) -> Self {
        ExpVector(exps)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the exponents, saturating at `u64::MAX`.
    pub fn total_degree(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &e| acc.saturating_add(e))
    }

    /// Componentwise sum, the exponents of a product of monomials. An
    /// exponent that would pass `u64::MAX` is clamped there.
    pub fn sum(&self, other: &ExpVector) -> ExpVector {
        ExpVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(&a, &b)| a.saturating_add(b))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<R: Ring> {
    terms: BTreeMap<ExpVector, R::Elem>,
}

impl<R: Ring> Polynomial<R> {
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn coefficient(&self, exp: &ExpVector) -> Option<&R::Elem> {
        self.terms.get(exp)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&ExpVector, &R::Elem)> {
        self.terms.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRing<R: Ring> {
    coefficients: R,
    vars: Vec<String>,
    index: HashMap<String, usize>,
    order: TermOrder,
}

impl<R: Ring> PolynomialRing<R> {
    /// Variable names must be unique and `order` must fit their count.
    pub fn new(coefficients: R, vars: Vec<String>, order: TermOrder) -> Result<Self, ArithError> {
        order.validate(vars.len()).map_err(ArithError::InvalidRing)?;
        let mut index = HashMap::with_capacity(vars.len());
        for (i, v) in vars.iter().enumerate() {
            if index.insert(v.clone(), i).is_some() {
                return Err(ArithError::InvalidRing(format!(
                    "variable '{}' declared twice",
                    v
                )));
            }
        }
        Ok(PolynomialRing {
            coefficients,
            vars,
            index,
            order,
        })
    }

    pub fn coefficients(&self) -> &R {
        &self.coefficients
    }

    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn nvars(&self) -> usize {
        self.vars.len()
    }

    pub fn order(&self) -> &TermOrder {
        &self.order
    }

    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn constant(&self, c: R::Elem) -> Polynomial<R> {
        self.monomial(ExpVector::zero(self.nvars()), c)
    }

    pub fn monomial(&self, exp: ExpVector, c: R::Elem) -> Polynomial<R> {
        let mut terms = BTreeMap::new();
        if !self.coefficients.is_zero(&c) {
            terms.insert(exp, c);
        }
        Polynomial { terms }
    }

    /// `vars[index]^exp`.
    pub fn univariate(&self, index: usize, exp: u64) -> Polynomial<R> {
        self.monomial(
            ExpVector::univariate(self.nvars(), index, exp),
            self.coefficients.one(),
        )
    }

    /// Sum of the given terms; repeated exponents are combined.
    pub fn polynomial(&self, terms: impl IntoIterator<Item = (ExpVector, R::Elem)>) -> Polynomial<R> {
        let mut map = BTreeMap::new();
        for (e, c) in terms {
            self.add_term(&mut map, e, c);
        }
        Polynomial { terms: map }
    }

    /// `p * c`, with `c` multiplied from the right.
    pub fn scale(&self, p: &Polynomial<R>, c: &R::Elem) -> Polynomial<R> {
        let terms = p
            .terms
            .iter()
            .map(|(e, a)| (e.clone(), self.coefficients.mul(a, c)))
            .filter(|(_, a)| !self.coefficients.is_zero(a))
            .collect();
        Polynomial { terms }
    }

    /// Terms from the largest monomial down.
    pub fn terms_descending<'p>(&self, p: &'p Polynomial<R>) -> Vec<(&'p ExpVector, &'p R::Elem)> {
        let mut terms: Vec<_> = p.terms.iter().collect();
        terms.sort_by(|x, y| self.order.compare(y.0, x.0));
        terms
    }

    pub fn leading_term<'p>(&self, p: &'p Polynomial<R>) -> Option<(&'p ExpVector, &'p R::Elem)> {
        p.terms
            .iter()
            .max_by(|x, y| self.order.compare(x.0, y.0))
    }

    fn add_term(&self, terms: &mut BTreeMap<ExpVector, R::Elem>, e: ExpVector, c: R::Elem) {
        if self.coefficients.is_zero(&c) {
            return;
        }
        match terms.entry(e) {
            Entry::Vacant(slot) => {
                slot.insert(c);
            }
            Entry::Occupied(mut slot) => {
                let sum = self.coefficients.add(slot.get(), &c);
                if self.coefficients.is_zero(&sum) {
                    slot.remove();
                } else {
                    slot.insert(sum);
                }
            }
        }
    }

    fn format_monomial(&self, e: &ExpVector) -> String {
        let factors: Vec<String> = self
            .vars
            .iter()
            .zip(e.as_slice())
            .filter(|(_, &x)| x > 0)
            .map(|(v, &x)| {
                if x == 1 {
                    v.clone()
                } else {
                    format!("{}^{}", v, x)
                }
            })
            .collect();
        factors.join(" * ")
    }

    // Returns the sign pulled out of the coefficient and the coefficient
    // text. A unit coefficient in front of a monomial is left out.
    fn format_coefficient(&self, c: &R::Elem, bare: bool) -> (bool, String) {
        let ring = &self.coefficients;
        if !bare {
            if ring.is_one(c) {
                return (false, String::new());
            }
            if ring.is_one(&ring.neg(c)) {
                return (true, String::new());
            }
        }
        let text = ring.format(c);
        if let Some(abs) = text.strip_prefix('-') {
            if is_plain_numeral(abs) {
                return (true, abs.to_owned());
            }
        }
        if is_plain_numeral(&text) {
            (false, text)
        } else {
            (false, format!("{{{}}}", text))
        }
    }
}

fn is_plain_numeral(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '/' || c == '.')
}

/// `Q(x, y) IGRLEX`: the ring header accepted by the set parsers.
impl<R: Ring> fmt::Display for PolynomialRing<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}({}) {}",
            self.coefficients.descriptor(),
            self.vars.join(", "),
            self.order
        )
    }
}

impl<R: Ring> Ring for PolynomialRing<R> {
    type Elem = Polynomial<R>;

    fn kind(&self) -> CoefficientKind {
        CoefficientKind::FunctionCoefficient
    }

    fn zero(&self) -> Polynomial<R> {
        Polynomial {
            terms: BTreeMap::new(),
        }
    }

    fn one(&self) -> Polynomial<R> {
        self.constant(self.coefficients.one())
    }

    fn parse(&self, text: &str) -> Result<Polynomial<R>, ArithError> {
        crate::parser::parse_polynomial_text(self, text).map_err(|e| ArithError::InvalidLiteral {
            literal: text.to_owned(),
            ring: self.descriptor(),
            reason: e.to_string(),
        })
    }

    fn parse_in(&self, text: &str, scope: &mut LiteralScope<'_>) -> Result<Polynomial<R>, ArithError> {
        crate::parser::parse_literal_text(self, text, scope).map_err(|e| ArithError::Nested(Box::new(e)))
    }

    fn add(&self, a: &Polynomial<R>, b: &Polynomial<R>) -> Polynomial<R> {
        let mut terms = a.terms.clone();
        for (e, c) in &b.terms {
            self.add_term(&mut terms, e.clone(), c.clone());
        }
        Polynomial { terms }
    }

    fn mul(&self, a: &Polynomial<R>, b: &Polynomial<R>) -> Polynomial<R> {
        let mut terms = BTreeMap::new();
        for (ea, ca) in &a.terms {
            for (eb, cb) in &b.terms {
                self.add_term(&mut terms, ea.sum(eb), self.coefficients.mul(ca, cb));
            }
        }
        Polynomial { terms }
    }

    fn neg(&self, a: &Polynomial<R>) -> Polynomial<R> {
        let terms = a
            .terms
            .iter()
            .map(|(e, c)| (e.clone(), self.coefficients.neg(c)))
            .collect();
        Polynomial { terms }
    }

    /// Terms in descending order, `-x^2 * y - 3/4 x + {1i2}`. Coefficients
    /// that are not plain numerals are wrapped in braces.
    fn format(&self, p: &Polynomial<R>) -> String {
        if p.is_zero() {
            return "0".to_owned();
        }
        let mut out = String::new();
        for (i, (e, c)) in self.terms_descending(p).into_iter().enumerate() {
            let monomial = self.format_monomial(e);
            let (negative, coeff) = self.format_coefficient(c, monomial.is_empty());
            match (i, negative) {
                (0, true) => out.push('-'),
                (0, false) => {}
                (_, true) => out.push_str(" - "),
                (_, false) => out.push_str(" + "),
            }
            out.push_str(&coeff);
            if !coeff.is_empty() && !monomial.is_empty() {
                out.push(' ');
            }
            out.push_str(&monomial);
        }
        out
    }

    /// `IntFunc(a, b)`. Only rational coefficients in INVLEX order read
    /// back as the same ring.
    fn descriptor(&self) -> String {
        format!("IntFunc({})", self.vars.join(", "))
    }

    fn is_zero(&self, a: &Polynomial<R>) -> bool {
        a.is_zero()
    }
}

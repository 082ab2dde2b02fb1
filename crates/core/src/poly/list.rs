use std::fmt;

use super::{Polynomial, PolynomialRing};
use crate::arith::Ring;

/// An ordered list of polynomials together with the ring they live in.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialList<R: Ring> {
    ring: PolynomialRing<R>,
    list: Vec<Polynomial<R>>,
}

impl<R: Ring> PolynomialList<R> {
    pub fn new(ring: PolynomialRing<R>, list: Vec<Polynomial<R>>) -> Self {
        PolynomialList { ring, list }
    }

    pub fn ring(&self) -> &PolynomialRing<R> {
        &self.ring
    }

    pub fn list(&self) -> &[Polynomial<R>] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn into_parts(self) -> (PolynomialRing<R>, Vec<Polynomial<R>>) {
        (self.ring, self.list)
    }
}

/// Ring header followed by the parenthesised list, one polynomial per line.
impl<R: Ring> fmt::Display for PolynomialList<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.ring)?;
        writeln!(f, "(")?;
        for (i, p) in self.list.iter().enumerate() {
            let sep = if i + 1 < self.list.len() { "," } else { "" };
            writeln!(f, "  {}{}", self.ring.format(p), sep)?;
        }
        write!(f, ")")
    }
}

/// Rows of polynomials (a list of vectors). Every row has the same length;
/// short rows are padded with zeros on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleList<R: Ring> {
    ring: PolynomialRing<R>,
    rows: Vec<Vec<Polynomial<R>>>,
}

impl<R: Ring> ModuleList<R> {
    pub fn new(ring: PolynomialRing<R>, mut rows: Vec<Vec<Polynomial<R>>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize_with(cols, || ring.zero());
        }
        ModuleList { ring, rows }
    }

    pub fn ring(&self) -> &PolynomialRing<R> {
        &self.ring
    }

    pub fn rows(&self) -> &[Vec<Polynomial<R>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of every row.
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

impl<R: Ring> fmt::Display for ModuleList<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.ring)?;
        writeln!(f, "(")?;
        for (i, row) in self.rows.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|p| self.ring.format(p)).collect();
            let sep = if i + 1 < self.rows.len() { "," } else { "" };
            writeln!(f, "  ( {} ){}", cells.join(", "), sep)?;
        }
        write!(f, ")")
    }
}

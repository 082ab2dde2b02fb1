use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ExpVector;

/// Monomial comparison kinds. Exponent vectors are in declaration order,
/// so LEX treats the first declared variable as most significant and
/// INVLEX the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderKind {
    Lex,
    InvLex,
    GrLex,
    #[default]
    IGrLex,
    /// Inverse lexicographic with the smaller exponent winning
    RevILex,
    /// Total degree, then REVILEX (degree reverse lexicographic)
    RevITDG,
    /// Weight matrix rows, then INVLEX
    Weighted,
}

impl OrderKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            OrderKind::Lex => "LEX",
            OrderKind::InvLex => "INVLEX",
            OrderKind::GrLex => "GRLEX",
            OrderKind::IGrLex => "IGRLEX",
            OrderKind::RevILex => "REVILEX",
            OrderKind::RevITDG => "REVITDG",
            OrderKind::Weighted => "W",
        }
    }

    /// Case-insensitive keyword lookup. `W` is not included; it introduces
    /// a weight array rather than naming an order.
    pub fn from_keyword(word: &str) -> Option<OrderKind> {
        match word.to_ascii_uppercase().as_str() {
            "L" | "IL" | "INVLEX" => Some(OrderKind::InvLex),
            "LEX" => Some(OrderKind::Lex),
            "G" | "IG" | "IGRLEX" => Some(OrderKind::IGrLex),
            "GRLEX" => Some(OrderKind::GrLex),
            "REVITDG" => Some(OrderKind::RevITDG),
            "REVILEX" => Some(OrderKind::RevILex),
            _ => None,
        }
    }

    fn compare(self, a: &[u64], b: &[u64]) -> Ordering {
        match self {
            OrderKind::Lex => a.cmp(b),
            OrderKind::InvLex | OrderKind::Weighted => inv_lex(a, b),
            OrderKind::GrLex => degree(a).cmp(&degree(b)).then_with(|| a.cmp(b)),
            OrderKind::IGrLex => degree(a).cmp(&degree(b)).then_with(|| inv_lex(a, b)),
            OrderKind::RevILex => inv_lex(b, a),
            OrderKind::RevITDG => degree(a).cmp(&degree(b)).then_with(|| inv_lex(b, a)),
        }
    }
}

fn inv_lex(a: &[u64], b: &[u64]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

fn degree(e: &[u64]) -> u128 {
    e.iter().map(|&x| x as u128).sum()
}

fn weight(row: &[u64], e: &[u64]) -> u128 {
    row.iter().zip(e).map(|(&w, &x)| w as u128 * x as u128).sum()
}

/// Where a term order splits the variables into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitIndex {
    #[default]
    Unspecified,
    /// `|i|`
    Single(usize),
    /// `[i,j]`
    Pair(usize, usize),
}

impl SplitIndex {
    /// Positive split points, ascending and without repeats.
    pub fn points(&self) -> Vec<usize> {
        let mut points: Vec<usize> = match *self {
            SplitIndex::Unspecified => Vec::new(),
            SplitIndex::Single(i) => vec![i],
            SplitIndex::Pair(i, j) => vec![i, j],
        };
        points.retain(|&p| p > 0);
        points.sort_unstable();
        points.dedup();
        points
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TermOrder {
    kind: OrderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<Vec<u64>>>,
    #[serde(default)]
    split: SplitIndex,
}

impl TermOrder {
    pub fn new(kind: OrderKind) -> Self {
        TermOrder {
            kind,
            weights: None,
            split: SplitIndex::Unspecified,
        }
    }

    pub fn weighted(rows: Vec<Vec<u64>>) -> Self {
        TermOrder {
            kind: OrderKind::Weighted,
            weights: Some(rows),
            split: SplitIndex::Unspecified,
        }
    }

    /// A block order when `split` has a positive point, the plain order
    /// otherwise.
    pub fn block(kind: OrderKind, split: SplitIndex) -> Self {
        let split = if split.points().is_empty() {
            SplitIndex::Unspecified
        } else {
            split
        };
        TermOrder {
            kind,
            weights: None,
            split,
        }
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn weights(&self) -> Option<&[Vec<u64>]> {
        self.weights.as_deref()
    }

    pub fn split(&self) -> SplitIndex {
        self.split
    }

    /// Check the order against a variable count.
    pub fn validate(&self, nvars: usize) -> Result<(), String> {
        if let Some(rows) = &self.weights {
            if rows.is_empty() {
                return Err("weight matrix has no rows".into());
            }
            if let Some(row) = rows.iter().find(|r| r.len() != nvars) {
                return Err(format!(
                    "weight row {:?} has {} entries for {} variables",
                    row,
                    row.len(),
                    nvars
                ));
            }
        }
        if let Some(p) = self.split.points().into_iter().find(|&p| p > nvars) {
            return Err(format!("split index {} exceeds {} variables", p, nvars));
        }
        Ok(())
    }

    /// `Greater` when `a` is the larger monomial.
    pub fn compare(&self, a: &ExpVector, b: &ExpVector) -> Ordering {
        let (a, b) = (a.as_slice(), b.as_slice());
        if let Some(rows) = &self.weights {
            for row in rows {
                let o = weight(row, a).cmp(&weight(row, b));
                if o != Ordering::Equal {
                    return o;
                }
            }
            return inv_lex(a, b);
        }

        let mut start = 0;
        for end in self.split.points().into_iter().chain(std::iter::once(a.len())) {
            let end = end.min(a.len());
            if end <= start {
                continue;
            }
            let o = self.kind.compare(&a[start..end], &b[start..end]);
            if o != Ordering::Equal {
                return o;
            }
            start = end;
        }
        Ordering::Equal
    }
}

impl fmt::Display for TermOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.weights {
            Some(rows) => {
                write!(f, "W(")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    let cells: Vec<String> = row.iter().map(u64::to_string).collect();
                    write!(f, "({})", cells.join(","))?;
                }
                write!(f, ")")?;
            }
            None => write!(f, "{}", self.kind.keyword())?,
        }
        match self.split {
            SplitIndex::Unspecified => Ok(()),
            SplitIndex::Single(i) => write!(f, " |{}|", i),
            SplitIndex::Pair(i, j) => write!(f, " [{},{}]", i, j),
        }
    }
}

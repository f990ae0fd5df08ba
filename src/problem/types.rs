//! Literals and clauses.

use std::fmt;

/// A signed reference to a variable, decoded from its DIMACS integer.
///
/// `index` is 0-based; `positive` is the polarity the variable must take
/// for the literal to be true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub index: u32,
    pub positive: bool,
}

impl Literal {
    /// Decodes a DIMACS literal. Returns `None` for the `0` terminator.
    pub fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 {
            return None;
        }
        Some(Self {
            index: value.unsigned_abs() - 1,
            positive: value > 0,
        })
    }

    pub fn to_dimacs(self) -> i32 {
        let var = self.index as i32 + 1;
        if self.positive {
            var
        } else {
            -var
        }
    }

    /// 1-based variable number.
    pub fn variable(self) -> u32 {
        self.index + 1
    }

    #[inline]
    pub fn is_true_under(self, bits: &[bool]) -> bool {
        bits[self.index as usize] == self.positive
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A disjunction of literals. The empty clause is never satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals (the clause's arity).
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True iff at least one literal holds. Stops at the first one that does.
    ///
    /// Indices must be in range for `bits`; [`Problem`](super::Problem)
    /// guarantees this for validated instances.
    #[inline]
    pub fn is_satisfied_by(&self, bits: &[bool]) -> bool {
        self.literals.iter().any(|lit| lit.is_true_under(bits))
    }

    pub fn to_dimacs(&self) -> Vec<i32> {
        self.literals.iter().map(|l| l.to_dimacs()).collect()
    }
}

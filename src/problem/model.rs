//! Validated CNF instance.

use super::types::{Clause, Literal};
use crate::assignment::Assignment;
use crate::error::{Result, SatError};

/// An immutable CNF formula over `num_variables` variables.
///
/// Construction guarantees every literal refers to a variable in
/// `1..=num_variables`, so evaluation never indexes out of bounds.
///
/// # Examples
///
/// ```
/// use sat_anneal::assignment::Assignment;
/// use sat_anneal::problem::Problem;
///
/// let problem = Problem::build(2, [vec![1, 2], vec![-1]]).unwrap();
/// let a = Assignment::from_bits(vec![false, true]);
/// assert_eq!(problem.energy(&a).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Problem {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Problem {
    /// Builds a problem from sentinel-stripped DIMACS clauses.
    ///
    /// # Errors
    /// [`SatError::InvalidInstance`] if a literal is `0`, if a literal's
    /// variable lies outside `[1, num_variables]`, or if clauses are given
    /// with `num_variables == 0`.
    pub fn build<I, C>(num_variables: usize, clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[i32]>,
    {
        let mut decoded = Vec::new();
        for (ci, raw) in clauses.into_iter().enumerate() {
            let raw = raw.as_ref();
            if num_variables == 0 {
                return Err(SatError::InvalidInstance(
                    "clauses given but num_variables is 0".into(),
                ));
            }
            let mut literals = Vec::with_capacity(raw.len());
            for &value in raw {
                let lit = Literal::from_dimacs(value).ok_or_else(|| {
                    SatError::InvalidInstance(format!("clause {ci}: literal 0 inside clause"))
                })?;
                if lit.variable() as usize > num_variables {
                    return Err(SatError::InvalidInstance(format!(
                        "clause {ci}: literal {value} out of range 1..={num_variables}"
                    )));
                }
                literals.push(lit);
            }
            decoded.push(Clause::new(literals));
        }
        Ok(Self {
            num_variables,
            clauses: decoded,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses not satisfied by `assignment`.
    ///
    /// # Errors
    /// [`SatError::DimensionMismatch`] if the assignment length differs
    /// from [`num_variables`](Self::num_variables).
    pub fn energy(&self, assignment: &Assignment) -> Result<usize> {
        let bits = self.check_dimension(assignment)?;
        Ok(self
            .clauses
            .iter()
            .filter(|c| !c.is_satisfied_by(bits))
            .count())
    }

    /// Indices of the clauses `assignment` violates, in clause order.
    pub fn unsatisfied_clauses(&self, assignment: &Assignment) -> Result<Vec<usize>> {
        let bits = self.check_dimension(assignment)?;
        Ok(self
            .clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied_by(bits))
            .map(|(i, _)| i)
            .collect())
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> Result<bool> {
        let bits = self.check_dimension(assignment)?;
        Ok(self.clauses.iter().all(|c| c.is_satisfied_by(bits)))
    }

    /// Keeps only clauses with exactly `arity` literals (e.g. 3 for 3-SAT).
    ///
    /// The variable count is unchanged.
    pub fn restrict_to_arity(&self, arity: usize) -> Problem {
        Problem {
            num_variables: self.num_variables,
            clauses: self
                .clauses
                .iter()
                .filter(|c| c.len() == arity)
                .cloned()
                .collect(),
        }
    }

    fn check_dimension<'a>(&self, assignment: &'a Assignment) -> Result<&'a [bool]> {
        if assignment.len() != self.num_variables {
            return Err(SatError::DimensionMismatch {
                expected: self.num_variables,
                actual: assignment.len(),
            });
        }
        Ok(assignment.as_slice())
    }
}

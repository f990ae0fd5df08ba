//! Clause model and energy evaluation.
//!
//! A [`Problem`] is a CNF formula: a list of [`Clause`]s over
//! `num_variables` Boolean variables. Its energy under an
//! [`Assignment`](crate::assignment::Assignment) is the number of clauses
//! left unsatisfied, the quantity the annealer minimizes.
//!
//! # Key Types
//!
//! - [`Literal`]: decoded signed variable reference
//! - [`Clause`]: disjunction of literals
//! - [`Problem`]: immutable, validated clause set

mod model;
mod types;

pub use model::Problem;
pub use types::{Clause, Literal};

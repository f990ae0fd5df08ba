//! Truth assignments and single-flip neighborhoods.

use rand::Rng;
use std::fmt;

/// A fixed-length vector of truth values, indexed by 0-based variable.
///
/// Index `i` holds the value of DIMACS variable `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    bits: Vec<bool>,
}

impl Assignment {
    /// Draws each variable independently true/false with probability 1/2.
    pub fn random<R: Rng>(num_variables: usize, rng: &mut R) -> Self {
        let bits = (0..num_variables).map(|_| rng.random_bool(0.5)).collect();
        Self { bits }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Returns a copy with exactly one uniformly chosen variable inverted.
    ///
    /// `self` is left untouched. An empty assignment has no neighbor other
    /// than itself.
    pub fn flip_neighbor<R: Rng>(&self, rng: &mut R) -> Self {
        let mut neighbor = self.clone();
        if !neighbor.bits.is_empty() {
            let index = rng.random_range(0..neighbor.bits.len());
            neighbor.flip(index);
        }
        neighbor
    }

    /// Inverts variable `index` in place.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Signed DIMACS literals for every variable, e.g. `[1, -2, 3]`.
    pub fn to_literals(&self) -> Vec<i64> {
        self.bits
            .iter()
            .enumerate()
            .map(|(i, &b)| {
                let var = i as i64 + 1;
                if b {
                    var
                } else {
                    -var
                }
            })
            .collect()
    }

    /// Formats the assignment as a DIMACS model line: `v 1 -2 3 0`.
    pub fn to_dimacs_line(&self) -> String {
        let mut line = String::from("v");
        for lit in self.to_literals() {
            line.push(' ');
            line.push_str(&lit.to_string());
        }
        line.push_str(" 0");
        line
    }
}

impl From<Vec<bool>> for Assignment {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

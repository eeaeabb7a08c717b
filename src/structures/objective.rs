/*!
An optional objective: a weighted sum of atoms the SLS core tries to maximize once a feasible
assignment has been found (§4.3, "Optimization").
*/

use crate::structures::atom::Atom;

/// A weighted sum of atoms. Weights may be negative (minimizing is maximizing the negation).
#[derive(Clone, Debug, Default)]
pub struct Objective {
    pub terms: Vec<(Atom, f64)>,
}

impl Objective {
    pub fn new(terms: Vec<(Atom, f64)>) -> Self {
        Self { terms }
    }

    /// The value of the objective under `value_of`, a closure giving the current truth value
    /// of an atom.
    pub fn value(&self, mut value_of: impl FnMut(Atom) -> bool) -> f64 {
        self.terms
            .iter()
            .filter(|(atom, _)| value_of(*atom))
            .map(|(_, weight)| weight)
            .sum()
    }
}

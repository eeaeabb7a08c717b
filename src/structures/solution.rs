/*!
[Solution]: an immutable snapshot of a solve, and [SolutionBuilder], the mutable scratch space
theory solvers commit their variable values into during a `solve` callback.
*/

use std::collections::HashMap;

use crate::structures::atom::Atom;

/// A value committed by a theory solver for one of its variables.
///
/// A plain enum rather than a reflective/typed-erased value: the design notes rule out runtime
/// field inspection, and every theory module in this crate needs only these four shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum TheoryValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Symbol(String),
}

impl TheoryValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TheoryValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TheoryValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            TheoryValue::Symbol(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TheoryValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Mutable scratch space passed to [TheorySolver::solve](crate::structures::theory::TheorySolver::solve)
/// so a theory solver can commit values for the variables it owns.
#[derive(Default)]
pub struct SolutionBuilder {
    theory: HashMap<(&'static str, u32), TheoryValue>,
}

impl SolutionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a value for `variable` owned by the theory solver tagged `solver`.
    pub fn commit(&mut self, solver: &'static str, variable: u32, value: TheoryValue) {
        self.theory.insert((solver, variable), value);
    }

    fn into_theory_map(self) -> HashMap<(&'static str, u32), TheoryValue> {
        self.theory
    }
}

/// An immutable snapshot of a solve: the Boolean assignment plus, per theory solver, the
/// committed theory variable values.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    assignment: Vec<bool>,
    theory: HashMap<(&'static str, u32), TheoryValue>,
}

impl Solution {
    pub(crate) fn new(assignment: Vec<bool>, builder: SolutionBuilder) -> Self {
        Self {
            assignment,
            theory: builder.into_theory_map(),
        }
    }

    /// The truth value of `atom` in this solution.
    pub fn get(&self, atom: Atom) -> bool {
        self.assignment[(atom.id() - 1) as usize]
    }

    /// The committed value of `variable`, owned by the theory solver tagged `solver`.
    pub fn get_theory(&self, solver: &'static str, variable: u32) -> Option<&TheoryValue> {
        self.theory.get(&(solver, variable))
    }

    /// Iterates over every (atom, value) pair in the solution, atoms in id order.
    pub fn atom_valued_pairs(&self) -> impl Iterator<Item = (Atom, bool)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .map(|(index, value)| (Atom(index as u32 + 1), *value))
    }

    /// A clause excluding this exact Boolean assignment: `(0, k-1, L1..Lk)` where each `Li` is
    /// the literal satisfied by this solution for atom `i`. Used by
    /// [Problem::solutions](crate::problem::Problem::solutions) to enumerate distinct models.
    pub(crate) fn negation_literals(&self) -> Vec<crate::structures::literal::Literal> {
        self.atom_valued_pairs()
            .map(|(atom, value)| crate::structures::literal::Literal::new(atom, !value))
            .collect()
    }
}

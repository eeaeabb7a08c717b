/*!
The finite-domain (enumeration) theory: one proposition per `(variable, value)` pair, backed
by a cardinality clause enforcing at most (and, for unconditional variables, exactly) one true
value per variable (§4.5).
*/

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::structures::atom::Atom;
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::structures::solution::{SolutionBuilder, TheoryValue};
use crate::structures::theory::{BooleanCandidate, Conflict, TheorySolver};
use crate::types::err::TheoryFailureReason;

/// A single finite-domain variable: its possible `(value, proposition atom)` pairs, and an
/// optional condition literal for variables that need not be assigned at all.
pub struct FiniteDomainVariable {
    pub id: u32,
    pub values: Vec<(TheoryValue, Atom)>,
    pub condition: Option<Literal>,
}

/// Commits the unique true value of each registered variable; no runtime search of its own.
#[derive(Default)]
pub struct FiniteDomainTheory {
    variables: Vec<FiniteDomainVariable>,
}

impl FiniteDomainTheory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable. `values` pairs each domain value with the atom asserting the
    /// variable takes that value; `condition`, if set, makes the variable optional — the
    /// cardinality clause then only forbids more than one value, rather than requiring one.
    pub fn add_variable(
        &mut self,
        id: u32,
        values: Vec<(TheoryValue, Atom)>,
        condition: Option<Literal>,
    ) {
        self.variables.push(FiniteDomainVariable { id, values, condition });
    }
}

impl TheorySolver for FiniteDomainTheory {
    fn tag(&self) -> &'static str {
        "finite_domain"
    }

    fn preprocess(
        &mut self,
        clauses: &mut ClauseDb,
        atoms: &mut AtomDb,
    ) -> Result<(), TheoryFailureReason> {
        for variable in &self.variables {
            if variable.values.is_empty() {
                return Err(TheoryFailureReason {
                    solver: self.tag(),
                    reason: format!("finite-domain variable {} has no values", variable.id),
                });
            }

            let mut literals: Vec<Literal> =
                variable.values.iter().map(|(_, atom)| atom.pos()).collect();
            let min = match variable.condition {
                None => 1,
                Some(cond) => {
                    literals.push(cond.negate());
                    0
                }
            };

            clauses
                .add_clause(min, Bound::Count(1), literals, atoms)
                .map_err(|e| TheoryFailureReason {
                    solver: self.tag(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    fn solve(
        &mut self,
        candidate: &dyn BooleanCandidate,
        solution: &mut SolutionBuilder,
        _rng: &mut Stream,
    ) -> Result<(), Conflict> {
        for variable in &self.variables {
            if let Some(cond) = variable.condition {
                if !candidate.value_of(cond) {
                    continue;
                }
            }
            if let Some((value, _)) = variable
                .values
                .iter()
                .find(|(_, atom)| candidate.value_of(atom.pos()))
            {
                solution.commit(self.tag(), variable.id, value.clone());
            }
        }
        Ok(())
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::AtomKind;
    use std::collections::HashMap;

    struct FixedCandidate(HashMap<Atom, bool>);
    impl BooleanCandidate for FixedCandidate {
        fn value_of(&self, literal: Literal) -> bool {
            literal.satisfied_by(*self.0.get(&literal.atom()).unwrap_or(&false))
        }
    }

    #[test]
    fn commits_the_true_value() {
        let mut atoms = AtomDb::new();
        let v1 = atoms.new_atom("v=1", AtomKind::Plain, None).unwrap();
        let v2 = atoms.new_atom("v=2", AtomKind::Plain, None).unwrap();
        let mut theory = FiniteDomainTheory::new();
        theory.add_variable(
            0,
            vec![(TheoryValue::Int(1), v1), (TheoryValue::Int(2), v2)],
            None,
        );

        let mut candidate = HashMap::new();
        candidate.insert(v1, false);
        candidate.insert(v2, true);
        let candidate = FixedCandidate(candidate);

        let mut builder = SolutionBuilder::new();
        let mut rng = Stream::from_seed(0);
        theory.solve(&candidate, &mut builder, &mut rng).unwrap();
        let solution = crate::structures::solution::Solution::new(vec![false, true], builder);
        assert_eq!(solution.get_theory("finite_domain", 0), Some(&TheoryValue::Int(2)));
    }
}

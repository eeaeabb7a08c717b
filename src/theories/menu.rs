/*!
The menu theory: a variable draws its value from a base menu or, if asserted, from one of a
set of included menus (§4.5).

When a variable carries a base menu, it always wins over any asserted inclusion — documented
behavior inherited as-is from the source this library was distilled from (see DESIGN.md); an
inclusion only matters for a variable with *no* base menu.
*/

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::structures::solution::{SolutionBuilder, TheoryValue};
use crate::structures::theory::{BooleanCandidate, Conflict, TheorySolver};
use crate::types::err::TheoryFailureReason;

/// A single named menu: a non-empty list of values and the proposition asserting it is
/// included in some variable's candidate set.
pub struct Inclusion {
    pub proposition: Literal,
    pub menu: Vec<TheoryValue>,
}

pub struct MenuVariable {
    pub id: u32,
    pub base_menu: Option<Vec<TheoryValue>>,
    pub inclusions: Vec<Inclusion>,
    /// If set, the variable need not be assigned at all when this literal is false.
    pub condition: Option<Literal>,
}

/// Samples a value per variable from its base menu, or from a uniformly chosen asserted
/// inclusion when no base menu is configured.
#[derive(Default)]
pub struct MenuTheory {
    variables: Vec<MenuVariable>,
}

impl MenuTheory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, variable: MenuVariable) {
        self.variables.push(variable);
    }
}

impl TheorySolver for MenuTheory {
    fn tag(&self) -> &'static str {
        "menu"
    }

    /// For a variable with no base menu, injects a clause requiring at least one of its
    /// inclusions to be true whenever the variable is active — so `solve` never has to fail
    /// for lack of a menu to sample from.
    fn preprocess(
        &mut self,
        clauses: &mut ClauseDb,
        atoms: &mut AtomDb,
    ) -> Result<(), TheoryFailureReason> {
        for variable in &self.variables {
            if variable.base_menu.is_none() && variable.inclusions.is_empty() {
                return Err(TheoryFailureReason {
                    solver: self.tag(),
                    reason: format!(
                        "menu variable {} has neither a base menu nor any inclusion",
                        variable.id
                    ),
                });
            }
            if variable.base_menu.is_some() {
                continue;
            }
            let mut literals: Vec<Literal> =
                variable.inclusions.iter().map(|i| i.proposition).collect();
            if let Some(cond) = variable.condition {
                literals.push(cond.negate());
            }
            clauses
                .add_clause(1, Bound::Unbounded, literals, atoms)
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
        rng: &mut Stream,
    ) -> Result<(), Conflict> {
        for variable in &self.variables {
            if let Some(cond) = variable.condition {
                if !candidate.value_of(cond) {
                    continue;
                }
            }

            let chosen_menu: &[TheoryValue] = if let Some(base) = &variable.base_menu {
                base
            } else {
                let included: Vec<&Vec<TheoryValue>> = variable
                    .inclusions
                    .iter()
                    .filter(|i| candidate.value_of(i.proposition))
                    .map(|i| &i.menu)
                    .collect();
                if included.is_empty() {
                    // Guaranteed unreachable by the preprocess-time clause, but a theory solver
                    // never trusts that invariant blindly against a candidate it didn't build.
                    let literals = variable.inclusions.iter().map(|i| i.proposition.negate()).collect();
                    return Err(Conflict::new(literals));
                }
                rng.choose(&included)
            };

            let value = rng.choose(chosen_menu).clone();
            solution.commit(self.tag(), variable.id, value);
        }
        Ok(())
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::{Atom, AtomKind};
    use std::collections::HashMap;

    struct FixedCandidate(HashMap<Atom, bool>);
    impl BooleanCandidate for FixedCandidate {
        fn value_of(&self, literal: Literal) -> bool {
            literal.satisfied_by(*self.0.get(&literal.atom()).unwrap_or(&false))
        }
    }

    #[test]
    fn base_menu_wins_over_inclusion() {
        let mut atoms = AtomDb::new();
        let include_ab = atoms.new_atom("include_ab", AtomKind::Plain, None).unwrap();

        let mut theory = MenuTheory::new();
        theory.add_variable(MenuVariable {
            id: 0,
            base_menu: Some(vec![TheoryValue::Symbol("C".into())]),
            inclusions: vec![Inclusion {
                proposition: include_ab.pos(),
                menu: vec![TheoryValue::Symbol("A".into()), TheoryValue::Symbol("B".into())],
            }],
            condition: None,
        });

        let mut candidate = HashMap::new();
        candidate.insert(include_ab, true);
        let candidate = FixedCandidate(candidate);

        let mut builder = SolutionBuilder::new();
        let mut rng = Stream::from_seed(7);
        theory.solve(&candidate, &mut builder, &mut rng).unwrap();
        let solution = crate::structures::solution::Solution::new(vec![true], builder);
        assert_eq!(
            solution.get_theory("menu", 0),
            Some(&TheoryValue::Symbol("C".into()))
        );
    }
}

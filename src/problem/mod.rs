/*!
[Problem]: the glue surface tying the Variable Store, Clause Store, configuration, objective,
and Theory-Solver Coordinator together into the public builder/solve API (§6).
*/

mod builder;
mod field_binder;
mod solve_api;

use crate::config::Config;
use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::structures::objective::Objective;
use crate::structures::solution::Solution;
use crate::theories::Coordinator;
use crate::types::err::InvalidProblem;

pub use field_binder::FieldBinder;
pub use solve_api::Solutions;

/// A problem under construction (or, after the first [solve](Problem::solve), frozen).
///
/// Atoms, clauses, rules, the objective, and theory solvers may only be added before the first
/// freeze; any mutation attempted afterward is rejected with
/// [FrozenMutation](crate::types::err::InvalidProblem::FrozenMutation).
pub struct Problem {
    atoms: AtomDb,
    clauses: ClauseDb,
    config: Config,
    objective: Objective,
    theories: Coordinator,
}

impl Default for Problem {
    fn default() -> Self {
        Self {
            atoms: AtomDb::new(),
            clauses: ClauseDb::new(),
            config: Config::default(),
            objective: Objective::default(),
            theories: Coordinator::new(),
        }
    }
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.clauses.is_frozen()
    }

    pub fn atoms(&self) -> &AtomDb {
        &self.atoms
    }

    pub fn clauses(&self) -> &ClauseDb {
        &self.clauses
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Projects `solution` back into `target` through `binder`'s registered `(name, setter)`
    /// pairs — the "populate fields of a record from a solution" bridge.
    pub fn apply_bindings<T>(
        &self,
        binder: &FieldBinder<T>,
        solution: &Solution,
        target: &mut T,
    ) -> Result<(), InvalidProblem> {
        binder.apply(&self.atoms, solution, target)
    }
}

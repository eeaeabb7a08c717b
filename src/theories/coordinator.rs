/*!
The Theory-Solver Coordinator: runs registered [TheorySolver]s in registration order against
each Boolean-feasible candidate the SLS core reaches, lifting any [Conflict] into a blocking
clause added back to the Clause Store (§4.4, the SMT loop).
*/

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::structures::clause::Bound;
use crate::structures::theory::{BooleanCandidate, Conflict, TheorySolver};
use crate::structures::solution::SolutionBuilder;
use crate::types::err::{InvalidProblem, TheoryFailureReason};

/// Owns the registered theory solvers and drives the preprocess/solve/reset protocol.
#[derive(Default)]
pub struct Coordinator {
    solvers: Vec<Box<dyn TheorySolver>>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// Registers `solver`, rejecting a second solver with the same [tag](TheorySolver::tag).
    pub fn register(&mut self, solver: Box<dyn TheorySolver>) -> Result<(), InvalidProblem> {
        if self.solvers.iter().any(|s| s.tag() == solver.tag()) {
            return Err(InvalidProblem::DuplicateTheorySolver(solver.tag()));
        }
        self.solvers.push(solver);
        Ok(())
    }

    /// Runs every solver's [preprocess](TheorySolver::preprocess) in registration order.
    pub fn preprocess_all(
        &mut self,
        clauses: &mut ClauseDb,
        atoms: &mut AtomDb,
    ) -> Result<(), TheoryFailureReason> {
        for solver in &mut self.solvers {
            solver.preprocess(clauses, atoms)?;
        }
        Ok(())
    }

    /// Runs every solver's [solve](TheorySolver::solve) against `candidate` in registration
    /// order, stopping at the first [Conflict] (the SLS core must resolve it — via the
    /// blocking clause this produces — before theory solvers are asked again).
    pub fn solve_all(
        &mut self,
        candidate: &dyn BooleanCandidate,
        solution: &mut SolutionBuilder,
        rng: &mut Stream,
    ) -> Result<(), Conflict> {
        for solver in &mut self.solvers {
            solver.solve(candidate, solution, rng)?;
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for solver in &mut self.solvers {
            solver.reset();
        }
    }

    /// Converts a [Conflict] into the clause that forbids its exact combination of literals
    /// from recurring, and adds it to `clauses`. A theory solver may cite the same literal as a
    /// cause more than once (e.g. one repeatedly tightening an AC-3 bound); deduplicated by atom
    /// before negation, since the Clause Store rejects a clause naming one atom twice.
    pub fn block(
        &self,
        conflict: &Conflict,
        clauses: &mut ClauseDb,
        atoms: &AtomDb,
    ) -> Result<usize, InvalidProblem> {
        let mut seen = std::collections::HashSet::new();
        let negated: Vec<_> = conflict
            .literals
            .iter()
            .filter(|l| seen.insert(l.atom()))
            .map(|l| l.negate())
            .collect();
        let width = negated.len() as u32;
        log::debug!(
            target: crate::reports::targets::THEORY,
            "learned blocking clause over {width} literals"
        );
        clauses.add_clause_post_freeze(1, Bound::Count(width), negated, atoms)
    }
}

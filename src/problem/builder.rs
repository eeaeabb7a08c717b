/*!
The Problem builder surface: atom/clause/rule registration, fixation, the objective, theory
solver registration, and the config knobs from §6, all rejecting mutation once the problem is
frozen.
*/

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::problem::Problem;
use crate::structures::atom::{Atom, AtomKind};
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::structures::theory::TheorySolver;
use crate::types::err::InvalidProblem;

impl Problem {
    fn guard_mutable(&self) -> Result<(), InvalidProblem> {
        if self.is_frozen() {
            Err(InvalidProblem::FrozenMutation)
        } else {
            Ok(())
        }
    }

    /// Registers an ordinary atom, free to be assigned by the search.
    pub fn new_atom(
        &mut self,
        name: impl Into<String>,
        bias: Option<f64>,
    ) -> Result<Atom, InvalidProblem> {
        let bias = bias.or(Some(self.config.default_bias.value));
        self.atoms.new_atom(name, AtomKind::Plain, bias)
    }

    /// Registers an atom whose truth must come from [rules](Problem::add_rule), never assigned
    /// directly by the search.
    pub fn new_derived_atom(&mut self, name: impl Into<String>) -> Result<Atom, InvalidProblem> {
        self.atoms.new_atom(name, AtomKind::Derived, None)
    }

    /// Registers a proposition atom owned by a theory solver.
    pub fn new_theory_atom(&mut self, name: impl Into<String>) -> Result<Atom, InvalidProblem> {
        self.atoms.new_atom(name, AtomKind::TheoryShadow, None)
    }

    /// Fixes `atom` to `value` for every search try; rejects a fixation contradicting a prior one.
    pub fn fix(&mut self, atom: Atom, value: bool) -> Result<(), InvalidProblem> {
        self.atoms.fix(atom, value)
    }

    /// Adds a generalized clause `min ≤ Σ literals ≤ max`.
    pub fn add_clause(
        &mut self,
        min: u32,
        max: Bound,
        literals: Vec<Literal>,
    ) -> Result<usize, InvalidProblem> {
        self.clauses.add_clause(min, max, literals, &self.atoms)
    }

    /// Adds a rule `head ← body`; `head` must name a [Derived](AtomKind::Derived) atom.
    pub fn add_rule(&mut self, head: Atom, body: Vec<Literal>) -> Result<(), InvalidProblem> {
        self.clauses.add_rule(head, body, &self.atoms)
    }

    /// Adds `weight * atom` to the objective the engine maximizes once a feasible assignment is
    /// reached; a negative weight minimizes.
    pub fn add_objective_term(&mut self, atom: Atom, weight: f64) -> Result<(), InvalidProblem> {
        self.guard_mutable()?;
        self.atoms.validate(atom)?;
        self.objective.terms.push((atom, weight));
        Ok(())
    }

    /// Registers a theory solver; rejects a second solver sharing the same
    /// [tag](TheorySolver::tag).
    pub fn register_theory_solver(
        &mut self,
        solver: Box<dyn TheorySolver>,
    ) -> Result<(), InvalidProblem> {
        self.guard_mutable()?;
        self.theories.register(solver)
    }

    /// Sets the deterministic random stream's seed.
    pub fn set_seed(&mut self, seed: u64) -> Result<(), InvalidProblem> {
        self.guard_mutable()?;
        self.config.seed = seed;
        Ok(())
    }

    /// Sets the search limits governing [solve](Problem::solve): independent restarts, flips per
    /// try, random-walk noise, and the wall-clock timeout in milliseconds (`0` = unbounded).
    pub fn set_limits(
        &mut self,
        max_tries: u32,
        max_flips: u32,
        noise: f64,
        timeout_ms: u64,
    ) -> Result<(), InvalidProblem> {
        self.guard_mutable()?;
        self.config.max_tries.set(max_tries);
        self.config.max_flips.set(max_flips);
        self.config.noise.set(noise);
        self.config.timeout_ms.set(timeout_ms);
        Ok(())
    }

    /// Sets the default initial bias used for atoms created without an explicit one, and the
    /// flip budget spent improving the objective once feasibility is first reached per try.
    pub fn set_defaults(&mut self, default_bias: f64, optimization_budget: u32) -> Result<(), InvalidProblem> {
        self.guard_mutable()?;
        self.config.default_bias.set(default_bias);
        self.config.optimization_budget.set(optimization_budget);
        Ok(())
    }

    /// Borrows the Variable Store and Clause Store together, mutably, for the
    /// [grounder](crate::grounder) to expand typed predicates/fluents/actions into ground atoms
    /// and clauses. Rejected once the problem is frozen.
    pub fn grounding_context(&mut self) -> Result<(&mut AtomDb, &mut ClauseDb), InvalidProblem> {
        self.guard_mutable()?;
        Ok((&mut self.atoms, &mut self.clauses))
    }
}

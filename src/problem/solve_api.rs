/*!
The solve entry points: freezing a problem (rule completion, theory preprocessing, the
occurrence index), the single-solution [Problem::solve], and the distinct-models
[Problem::solutions] iterator (§6).
*/

use std::collections::HashMap;

use crate::db::assignment::Assignment;
use crate::problem::Problem;
use crate::procedures::{self, FeasibleVerdict, SolveOutcome};
use crate::structures::atom::Atom;
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::structures::solution::{Solution, SolutionBuilder};
use crate::structures::theory::BooleanCandidate;
use crate::types::err::{InvalidProblem, SolveError};

struct CandidateView<'a>(&'a Assignment);

impl BooleanCandidate for CandidateView<'_> {
    fn value_of(&self, literal: Literal) -> bool {
        literal.satisfied_by(self.0.value(literal.atom()))
    }
}

impl Problem {
    /// Completes rules into clauses, runs theory preprocessing, and builds the occurrence
    /// index, proving [Unsatisfiable](SolveError::Unsatisfiable) where possible along the way.
    /// Idempotent: a second call on an already-frozen problem is a no-op. [solve](Problem::solve)
    /// calls this automatically; exposed directly for callers that want to validate a problem
    /// without searching for a model.
    pub fn freeze(&mut self) -> Result<(), SolveError> {
        if self.is_frozen() {
            return Ok(());
        }
        self.clauses.complete(&mut self.atoms)?;
        if self.structural_unsat() {
            return Err(SolveError::Unsatisfiable);
        }
        self.theories
            .preprocess_all(&mut self.clauses, &mut self.atoms)
            .map_err(SolveError::TheoryFailure)?;
        if self.structural_unsat() {
            return Err(SolveError::Unsatisfiable);
        }
        self.clauses.finalize(&mut self.atoms);
        Ok(())
    }

    /// Runs the stochastic local search, coordinating registered theory solvers and the
    /// objective at every Boolean-feasible candidate, and returns the first accepted model.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        self.freeze()?;
        self.run_search()
    }

    /// An iterator yielding up to `n` distinct solutions: each solution found is excluded from
    /// the next search by a blocking clause over its exact Boolean assignment, and the random
    /// stream is re-seeded before each search so a repeated model isn't just a coincidence of
    /// the same candidate surviving the new clause.
    pub fn solutions(&mut self, n: usize) -> Solutions<'_> {
        Solutions {
            problem: self,
            remaining: n,
            previous: None,
            reseed_counter: 0,
            exhausted: false,
        }
    }

    /// Detects the forms of UNSAT a preprocessor can prove without running the search: a
    /// width-1 clause whose only satisfiable literal count is one the clause itself forbids (an
    /// immediate contradiction), two width-1 clauses forcing the same atom to different values,
    /// or a forced value contradicting an explicit [fix](Problem::fix).
    fn structural_unsat(&self) -> bool {
        let mut forced: HashMap<Atom, bool> = HashMap::new();
        for clause in self.clauses.iter_clauses() {
            if clause.width() != 1 {
                continue;
            }
            let literal = clause.literals[0];
            let required = match (clause.bounds_hold(0), clause.bounds_hold(1)) {
                (false, false) => return true,
                (true, true) => continue,
                (false, true) => literal.polarity(),
                (true, false) => !literal.polarity(),
            };
            match forced.get(&literal.atom()) {
                Some(&existing) if existing != required => return true,
                Some(_) => {}
                None => {
                    forced.insert(literal.atom(), required);
                }
            }
        }
        forced
            .iter()
            .any(|(&atom, &value)| self.atoms.fixed(atom) == Some(!value))
    }

    fn exclude_solution(&mut self, solution: &Solution) -> Result<(), InvalidProblem> {
        let negated = solution.negation_literals();
        let width = negated.len() as u32;
        self.clauses
            .add_clause_post_freeze(1, Bound::Count(width), negated, &self.atoms)?;
        Ok(())
    }

    fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
    }

    /// Drives the SLS core to a single accepted candidate: at every Boolean-feasible point,
    /// first climbs the objective (if any), then runs the Theory-Solver Coordinator, accepting
    /// the candidate on success or learning a blocking clause and continuing the same try on
    /// [Conflict](crate::structures::theory::Conflict).
    fn run_search(&mut self) -> Result<Solution, SolveError> {
        let atoms = &self.atoms;
        let clauses = &mut self.clauses;
        let config = &self.config;
        let objective = &self.objective;
        let theories = &mut self.theories;
        let mut solution_holder: Option<SolutionBuilder> = None;

        let outcome = procedures::solve(atoms, clauses, config, |assignment, clauses, atoms, rng| {
            procedures::optimize(
                assignment,
                clauses,
                atoms,
                objective,
                config.optimization_budget.value,
            );

            let mut builder = SolutionBuilder::new();
            let candidate = CandidateView(assignment);
            match theories.solve_all(&candidate, &mut builder, rng) {
                Ok(()) => {
                    solution_holder = Some(builder);
                    FeasibleVerdict::Accept
                }
                Err(conflict) => match theories.block(&conflict, clauses, atoms) {
                    Ok(clause_index) => {
                        assignment.extend_for_new_clause(clause_index, clauses);
                        FeasibleVerdict::Continue
                    }
                    // A theory solver reported a conflict the coordinator could not turn into a
                    // new clause (e.g. it named an atom no longer in the store); nothing better
                    // to do than keep searching with the assignment as it stands.
                    Err(_) => FeasibleVerdict::Continue,
                },
            }
        });

        match outcome {
            SolveOutcome::Feasible(assignment) => {
                let values = (1..=self.atoms.len() as u32)
                    .map(|id| assignment.value(Atom(id)))
                    .collect();
                Ok(Solution::new(values, solution_holder.unwrap_or_default()))
            }
            SolveOutcome::ExhaustedBudget => Err(SolveError::Unknown),
            SolveOutcome::TimedOut => Err(SolveError::Timeout),
        }
    }
}

/// An iterator over up to `n` distinct solutions to a [Problem]; see
/// [Problem::solutions](Problem::solutions).
pub struct Solutions<'a> {
    problem: &'a mut Problem,
    remaining: usize,
    previous: Option<Solution>,
    reseed_counter: u64,
    exhausted: bool,
}

impl Iterator for Solutions<'_> {
    type Item = Result<Solution, SolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.remaining == 0 {
            return None;
        }

        if let Err(e) = self.problem.freeze() {
            self.exhausted = true;
            return Some(Err(e));
        }

        if let Some(previous) = self.previous.take() {
            if let Err(e) = self.problem.exclude_solution(&previous) {
                self.exhausted = true;
                return Some(Err(SolveError::from(e)));
            }
        }

        self.reseed_counter += 1;
        let next_seed = self.problem.config.seed.wrapping_add(self.reseed_counter);
        self.problem.reseed(next_seed);
        self.remaining -= 1;

        match self.problem.run_search() {
            Ok(solution) => {
                self.previous = Some(solution.clone());
                Some(Ok(solution))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

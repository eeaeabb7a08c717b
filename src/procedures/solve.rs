/*!
The outer WalkSAT loop: independent random restarts (tries), each spending a bounded number of
flips searching for a feasible assignment, with a wall-clock timeout checked periodically
(§4.2, §4.3).
*/

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::db::{assignment::Assignment, atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::procedures::{initialize::initialize, select::select_flip_atom};

/// The result of running the Boolean search to completion of its budget.
pub enum SolveOutcome {
    /// A feasible assignment accepted by `on_feasible` — see [solve].
    Feasible(Assignment),

    /// `max_tries` restarts were exhausted without an accepted feasible assignment.
    ExhaustedBudget,

    /// The wall-clock `timeout_ms` elapsed before a verdict was reached.
    TimedOut,
}

/// What to do once the core reaches a Boolean-feasible candidate.
pub enum FeasibleVerdict {
    /// The candidate stands: stop and return it.
    Accept,

    /// The candidate was rejected (e.g. a theory solver found a [Conflict](crate::structures::theory::Conflict)
    /// and the caller added a blocking clause via
    /// [ClauseDb::add_clause_post_freeze](crate::db::clause_db::ClauseDb::add_clause_post_freeze)
    /// plus [Assignment::extend_for_new_clause](crate::db::assignment::Assignment::extend_for_new_clause)).
    /// The current try's flip budget keeps counting down from where it left off.
    Continue,
}

/// Runs the WalkSAT core against `clauses`/`atoms` under `config`. Each time a try's assignment
/// becomes feasible, `on_feasible` is asked whether to accept it; this is the hook the
/// Theory-Solver Coordinator and the objective optimizer use to validate and refine a candidate
/// before it is returned.
pub fn solve(
    atoms: &AtomDb,
    clauses: &mut ClauseDb,
    config: &Config,
    mut on_feasible: impl FnMut(&mut Assignment, &mut ClauseDb, &AtomDb, &mut Stream) -> FeasibleVerdict,
) -> SolveOutcome {
    let mut rng = Stream::from_seed(config.seed);
    let timeout = (config.timeout_ms.value > 0)
        .then(|| Duration::from_millis(config.timeout_ms.value));
    let started = Instant::now();
    let check_interval = config.timeout_check_interval.value.max(1) as u64;
    let mut flips_taken: u64 = 0;

    for try_index in 0..config.max_tries.value {
        let mut assignment = Assignment::new(atoms.len(), clauses.clause_count());
        initialize(&mut assignment, &mut rng, atoms, clauses);
        log::debug!(
            target: crate::reports::targets::SEARCH,
            "try {try_index}: starting with {} unsatisfied",
            assignment.unsat_count()
        );

        let mut flips_this_try: u32 = 0;
        loop {
            if assignment.is_feasible() {
                match on_feasible(&mut assignment, clauses, atoms, &mut rng) {
                    FeasibleVerdict::Accept => return SolveOutcome::Feasible(assignment),
                    FeasibleVerdict::Continue => {
                        // `clauses` grew; fall through to keep flipping against it.
                    }
                }
            }
            if flips_this_try >= config.max_flips.value {
                break;
            }
            flips_this_try += 1;

            flips_taken += 1;
            if let Some(limit) = timeout {
                if flips_taken % check_interval == 0 && started.elapsed() >= limit {
                    return SolveOutcome::TimedOut;
                }
            }

            // `on_feasible` promised `Continue` only after making the assignment infeasible
            // again (by growing `clauses` and extending it); re-check rather than trust that,
            // since a caller that couldn't block a conflict has nothing infeasible to flip.
            if assignment.is_feasible() {
                continue;
            }

            let clause_index = assignment.random_unsat_clause(&mut rng);
            match select_flip_atom(clause_index, clauses, &assignment, atoms, &mut rng, config.noise.value) {
                Some(atom) => assignment.flip(atom, clauses),
                None => break,
            }
        }
    }

    SolveOutcome::ExhaustedBudget
}

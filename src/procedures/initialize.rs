/*!
Random initialization of a fresh candidate assignment at the start of each try (§4.2).
*/

use crate::db::{assignment::Assignment, atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;

/// Assigns every non-fixed atom `true` with probability equal to its bias, fixes the atoms the
/// caller pinned, and rebuilds the satisfaction bookkeeping from scratch.
pub fn initialize(assignment: &mut Assignment, rng: &mut Stream, atoms: &AtomDb, clauses: &ClauseDb) {
    assignment.initialize(rng, atoms, clauses);
    log::trace!(
        target: crate::reports::targets::SEARCH,
        "initialized try: {} clauses unsatisfied",
        assignment.unsat_count()
    );
}

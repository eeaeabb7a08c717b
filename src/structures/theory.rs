/*!
The theory-solver protocol: registration, preprocessing, and the per-candidate `solve` callback
described in §4.4 of the specification.

A theory solver owns a set of *theory propositions* — Boolean atoms whose truth constrains
some non-Boolean structure — and a set of theory variables whose values it commits into a
[Solution](crate::structures::solution::Solution) once the Boolean candidate is consistent.
*/

use crate::{
    db::{atom_db::AtomDb, clause_db::ClauseDb},
    generic::rng::Stream,
    structures::{literal::Literal, solution::SolutionBuilder},
    types::err::TheoryFailureReason,
};

/// A theory proposition pairs a shadow atom with an opaque payload interpreted only by the
/// theory solver that owns it.
///
/// Generic over the payload so each theory module (finite-domain, menu, float) can reuse this
/// bookkeeping shape without the coordinator needing to know the payload type.
#[derive(Clone, Debug)]
pub struct TheoryProposition<P> {
    pub literal: Literal,
    pub payload: P,
}

impl<P> TheoryProposition<P> {
    pub fn new(literal: Literal, payload: P) -> Self {
        Self { literal, payload }
    }
}

/// A minimal subset of proposition literals whose combined truth caused an inconsistency.
///
/// The coordinator negates the conjunction of these literals and adds the result as a
/// [blocking clause](crate::theories::coordinator::Coordinator) to the Clause Store.
#[derive(Clone, Debug, Default)]
pub struct Conflict {
    pub literals: Vec<Literal>,
}

impl Conflict {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }
}

/// The read view of the current Boolean candidate a theory solver inspects during `solve`.
pub trait BooleanCandidate {
    fn value_of(&self, literal: Literal) -> bool;
}

/// A registered plug-in checking consistency of a subset of propositions under non-Boolean
/// semantics (finite domains, floats, menus, ...).
///
/// Methods are called in the order documented on each; the coordinator in
/// [theories::coordinator](crate::theories::coordinator) drives this protocol.
pub trait TheorySolver {
    /// A stable identifier used in diagnostics and to detect duplicate registration.
    fn tag(&self) -> &'static str;

    /// Called once after [freeze](crate::db::clause_db::ClauseDb::freeze). May add further
    /// clauses (e.g. sorted bound implications) directly to `clauses`/`atoms`. Returning
    /// `Err` aborts solving with [TheoryFailure](crate::types::err::SolveError::TheoryFailure)
    /// before search begins.
    fn preprocess(
        &mut self,
        clauses: &mut ClauseDb,
        atoms: &mut AtomDb,
    ) -> Result<(), TheoryFailureReason>;

    /// Called each time the SLS core reaches a Boolean-feasible candidate assignment. Inspects
    /// which of this solver's propositions are true in `candidate`, runs the theory's own
    /// procedure, and either commits variable values into `solution` or returns a `Conflict`.
    /// `rng` draws from the same seeded stream as the rest of the solve, so a solver that
    /// samples (the menu and float theories) stays reproducible for a given seed.
    fn solve(
        &mut self,
        candidate: &dyn BooleanCandidate,
        solution: &mut SolutionBuilder,
        rng: &mut Stream,
    ) -> Result<(), Conflict>;

    /// Clears per-solve state between tries (e.g. cached intervals, alias classes).
    fn reset(&mut self);
}

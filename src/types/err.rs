/*!
Error types returned from the public API.

Two enums cover the taxonomy from the error handling design:
- [InvalidProblem] for mistakes made while *building* a problem (duplicate names, malformed
  clauses, frozen-problem mutation, ...). These are always caught before search begins.
- [SolveError] for everything that can happen at or after [solve](crate::problem::Problem::solve),
  including [InvalidProblem] surfaced through the solve entry point.

Neither enum carries a partial solution: a failed solve has nothing useful to hand back.
*/

use std::fmt;

/// A mistake made while constructing a [Problem](crate::problem::Problem).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidProblem {
    /// Two atoms were registered with the same diagnostic name.
    DuplicateAtomName(String),

    /// A literal referenced an atom id outside the current Variable Store.
    UndefinedLiteral(i64),

    /// A clause was built with `min > max`.
    MinExceedsMax { min: u32, max: u32 },

    /// A clause or rule body was empty.
    EmptyLiterals,

    /// A clause referenced the same atom twice.
    DuplicateAtomInClause(u32),

    /// A rule's head was not an atom of kind [Derived](crate::structures::atom::AtomKind::Derived).
    RuleHeadNotDerived(u32),

    /// An atom was fixed to both `true` and `false`.
    ConflictingFixation(u32),

    /// An attempt was made to mutate a problem after [freeze](crate::db::clause_db::ClauseDb::freeze).
    FrozenMutation,

    /// A theory solver of the given type-tag was registered more than once.
    DuplicateTheorySolver(&'static str),

    /// A [FieldBinder](crate::problem::FieldBinder) binding named an atom absent from the
    /// problem's Variable Store.
    UnknownAtomName(String),
}

impl fmt::Display for InvalidProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAtomName(name) => write!(f, "duplicate atom name: {name}"),
            Self::UndefinedLiteral(lit) => write!(f, "literal {lit} names no atom in the problem"),
            Self::MinExceedsMax { min, max } => {
                write!(f, "clause bound min ({min}) exceeds max ({max})")
            }
            Self::EmptyLiterals => write!(f, "a clause or rule body must name at least one literal"),
            Self::DuplicateAtomInClause(atom) => {
                write!(f, "atom {atom} appears more than once in the same clause")
            }
            Self::RuleHeadNotDerived(atom) => {
                write!(f, "atom {atom} is not of derived-by-rules kind, and cannot head a rule")
            }
            Self::ConflictingFixation(atom) => {
                write!(f, "atom {atom} is fixed to both true and false")
            }
            Self::FrozenMutation => write!(f, "the problem is frozen and may not be mutated"),
            Self::DuplicateTheorySolver(tag) => {
                write!(f, "a theory solver tagged {tag} is already registered")
            }
            Self::UnknownAtomName(name) => {
                write!(f, "no atom named {name} exists in this problem")
            }
        }
    }
}

impl std::error::Error for InvalidProblem {}

/// A reason a registered theory solver rejected the problem during preprocessing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TheoryFailureReason {
    /// The type-tag of the theory solver that rejected the problem.
    pub solver: &'static str,

    /// A human-readable explanation, for diagnostics.
    pub reason: String,
}

/// The outcome of a call to [solve](crate::problem::Problem::solve).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveError {
    /// The problem was proved unsatisfiable before search began: an empty clause, conflicting
    /// fixed atoms, or a completion encoding with no possible support.
    Unsatisfiable,

    /// The search budget (`max_tries` × `max_flips`) was exhausted without finding a feasible
    /// assignment, and without proof of unsatisfiability.
    Unknown,

    /// The wall-clock limit configured via `timeout_ms` was exceeded during search.
    Timeout,

    /// A registered theory solver rejected the problem during preprocessing.
    TheoryFailure(TheoryFailureReason),

    /// The problem was malformed; see [InvalidProblem].
    InvalidProblem(InvalidProblem),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsatisfiable => write!(f, "problem proved unsatisfiable"),
            Self::Unknown => write!(f, "search budget exhausted without a verdict"),
            Self::Timeout => write!(f, "solve exceeded its wall-clock limit"),
            Self::TheoryFailure(reason) => {
                write!(f, "theory solver {} rejected the problem: {}", reason.solver, reason.reason)
            }
            Self::InvalidProblem(invalid) => write!(f, "{invalid}"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<InvalidProblem> for SolveError {
    fn from(value: InvalidProblem) -> Self {
        Self::InvalidProblem(value)
    }
}

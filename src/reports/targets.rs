/*!
Log target names, defined once so callers can filter `RUST_LOG` by subsystem rather than by
module path (§7.1).
*/

/// The Variable Store and Clause Store: atom/clause registration, rule completion.
pub const BUILD: &str = "catsat::build";

/// The SLS core: initialization, tries, flips.
pub const SEARCH: &str = "catsat::search";

/// The theory-solver coordinator: preprocessing, per-candidate solves, conflicts.
pub const THEORY: &str = "catsat::theory";

/// The grounder: predicate/fluent/action expansion.
pub const GROUND: &str = "catsat::ground";

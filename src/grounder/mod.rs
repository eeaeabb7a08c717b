/*!
The Grounder: expands typed predicate/fluent/action builders into ground atoms, rules, and
clauses fed to the Clause Store (§4.6).
*/

pub mod fluent;
pub mod predicate;

pub use fluent::{Action, Effect, Fluent};
pub use predicate::{canonical_pairs, Predicate};

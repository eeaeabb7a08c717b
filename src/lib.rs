/*!
A library for finding uniformly-sampled satisfying models of declarative problems.

catsat is a stochastic local-search (WalkSAT-family) solver for *generalized* clauses
(cardinality bounds `min ≤ Σ literals ≤ max`, not just plain disjunctions), extended with:

- stable-model style [rules](structures::rule), completed into the same clause set at
  [freeze](problem::Problem::freeze),
- a registry of pluggable [theory solvers](theories::TheorySolver) coordinating non-Boolean
  variables (finite-domain selections, floats, menus) with the Boolean search, and
- a [grounder](grounder) for expanding typed predicates, fluents and actions into ground
  atoms and rules.

Unlike a complete (DPLL/CDCL) solver, catsat never proves unsatisfiability by search: a
formula is only reported [Unsatisfiable](types::err::SolveError::Unsatisfiable) when
preprocessing finds a direct contradiction (an empty clause, a fixed atom required both
true and false, or a theory solver rejecting during preprocessing). Otherwise, exhausting
the search budget without finding a model is reported as
[Unknown](types::err::SolveError::Unknown).

# Orientation

- Build a problem with [Problem](problem::Problem): [new_atom](problem::Problem::new_atom),
  [add_clause](problem::Problem::add_clause), [add_rule](problem::Problem::add_rule).
- Call [solve](problem::Problem::solve) to obtain a single [Solution](structures::solution::Solution),
  or [solutions](problem::Problem::solutions) for a stream of distinct models.
- See [config] for the knobs governing the search (`max_tries`, `max_flips`, `noise`, ...).
- See [theories] for the SMT coordination protocol, and [grounder] for expanding typed
  predicates/fluents/actions into ground clauses.
- Use [FieldBinder](problem::FieldBinder) to project a solution's values back into a
  caller-owned record by atom name.

# Example

```rust
use catsat::problem::Problem;
use catsat::structures::clause::Bound;

let mut problem = Problem::new();
let a = problem.new_atom("a", None).unwrap();
let b = problem.new_atom("b", None).unwrap();
let c = problem.new_atom("c", None).unwrap();

// exactly one of a, b, c
problem.add_clause(1, Bound::Count(1), vec![a.pos(), b.pos(), c.pos()]).unwrap();

let solution = problem.solve().unwrap();
let true_count = [a, b, c].iter().filter(|atom| solution.get(**atom)).count();
assert_eq!(true_count, 1);
```
*/
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod db;
pub mod generic;
pub mod grounder;
pub mod problem;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod theories;
pub mod types;

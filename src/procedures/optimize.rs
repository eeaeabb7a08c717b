/*!
Post-feasibility optimization: once a feasible assignment is found, spend a bounded number of
flips hill-climbing the configured [Objective], never leaving the feasible region (§4.3).
*/

use crate::db::{assignment::Assignment, atom_db::AtomDb, clause_db::ClauseDb};
use crate::structures::objective::Objective;

/// Greedily flips non-fixed atoms named by `objective`'s terms as long as doing so strictly
/// improves the objective's value without unsatisfying any clause, for up to `budget` flips.
/// Stops early at a local optimum — no remaining feasibility-preserving flip improves the
/// objective.
pub fn optimize(
    assignment: &mut Assignment,
    clauses: &ClauseDb,
    atoms: &AtomDb,
    objective: &Objective,
    budget: u32,
) {
    if objective.terms.is_empty() {
        return;
    }

    for _ in 0..budget {
        let mut best: Option<(crate::structures::atom::Atom, f64)> = None;

        for &(atom, weight) in &objective.terms {
            if atoms.fixed(atom).is_some() {
                continue;
            }
            if assignment.flip_delta(atom, clauses) != 0 {
                // Flipping this atom would unsatisfy some clause; not a feasible move.
                continue;
            }
            // Flipping toggles whether this term contributes `weight`: the gain is `+weight`
            // if the atom is currently false (about to become true), `-weight` otherwise.
            let gain = if assignment.value(atom) { -weight } else { weight };
            let better = match best {
                None => gain > 0.0,
                Some((_, best_gain)) => gain > best_gain,
            };
            if better {
                best = Some((atom, gain));
            }
        }

        match best {
            Some((atom, gain)) if gain > 0.0 => {
                assignment.flip(atom, clauses);
            }
            _ => break,
        }
    }
}

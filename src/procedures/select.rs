/*!
WalkSAT-style flip selection: with probability `noise` flip a uniformly random atom of an
unsatisfied clause, otherwise flip the atom of that clause whose flip least harms (or most
helps) the number of unsatisfied clauses, breaking ties in favor of the atom flipped longest
ago, and then by the lowest atom id (§4.2, §4.3 "tie-breaking").
*/

use crate::db::{assignment::Assignment, atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::structures::atom::Atom;

/// The atoms of `clause_index` that are not pinned by [AtomDb::fixed] — only these are ever
/// legal flip candidates.
fn movable_atoms(clause_index: usize, clauses: &ClauseDb, atoms: &AtomDb) -> Vec<Atom> {
    let clause = clauses.clause(clause_index);
    clause
        .literals
        .iter()
        .map(|l| l.atom())
        .filter(|a| atoms.fixed(*a).is_none())
        .collect()
}

/// Picks the atom to flip within `clause_index`, an unsatisfied clause.
pub fn select_flip_atom(
    clause_index: usize,
    clauses: &ClauseDb,
    assignment: &Assignment,
    atoms: &AtomDb,
    rng: &mut Stream,
    noise: f64,
) -> Option<Atom> {
    let candidates = movable_atoms(clause_index, clauses, atoms);
    if candidates.is_empty() {
        return None;
    }

    if rng.gen_bool(noise) {
        return Some(*rng.choose(&candidates));
    }

    let mut best: Option<(Atom, i64)> = None;
    for &atom in &candidates {
        let delta = assignment.flip_delta(atom, clauses);
        let better = match best {
            None => true,
            Some((best_atom, best_delta)) => {
                delta < best_delta
                    || (delta == best_delta
                        && tie_break_prefers(atom, best_atom, assignment))
            }
        };
        if better {
            best = Some((atom, delta));
        }
    }
    best.map(|(atom, _)| atom)
}

/// `true` if `candidate` should be preferred over `incumbent` among equally-good flips: the
/// one flipped longer ago wins, then the lower atom id.
fn tie_break_prefers(candidate: Atom, incumbent: Atom, assignment: &Assignment) -> bool {
    let candidate_age = assignment.last_flipped(candidate);
    let incumbent_age = assignment.last_flipped(incumbent);
    match candidate_age.cmp(&incumbent_age) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => candidate.id() < incumbent.id(),
    }
}

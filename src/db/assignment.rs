/*!
The Truth-Assignment State: the current candidate model, with incremental satisfaction
counters per clause, the set of currently-unsatisfied clauses, and the machinery to evaluate
the effect of a prospective flip (§4.2).
*/

use crate::db::atom_db::AtomDb;
use crate::db::clause_db::ClauseDb;
use crate::generic::rng::Stream;
use crate::structures::atom::Atom;

/// An index into the unsatisfied-clause set supporting O(1) membership test, insertion, and
/// removal, and O(1) uniform random selection — the same shape as a swap-remove free list.
#[derive(Default)]
struct UnsatSet {
    members: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl UnsatSet {
    fn with_capacity(clause_count: usize) -> Self {
        Self {
            members: Vec::new(),
            position: vec![None; clause_count],
        }
    }

    fn contains(&self, clause: usize) -> bool {
        self.position[clause].is_some()
    }

    fn insert(&mut self, clause: usize) {
        if self.contains(clause) {
            return;
        }
        self.position[clause] = Some(self.members.len());
        self.members.push(clause);
    }

    fn remove(&mut self, clause: usize) {
        let Some(pos) = self.position[clause] else {
            return;
        };
        let last = self.members.len() - 1;
        self.members.swap(pos, last);
        self.members.pop();
        self.position[clause] = None;
        if pos < self.members.len() {
            let moved = self.members[pos];
            self.position[moved] = Some(pos);
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn pick(&self, rng: &mut Stream) -> usize {
        *rng.choose(&self.members)
    }

    fn grow(&mut self) {
        self.position.push(None);
    }
}

/// The current candidate assignment and its incremental bookkeeping.
pub struct Assignment {
    value: Vec<bool>,
    satisfied_count: Vec<u32>,
    unsat: UnsatSet,
    /// The flip index at which each atom was last flipped, used to break ties among equally
    /// good candidate flips by preferring the least-recently flipped atom (§4.3).
    last_flipped: Vec<u64>,
    flip_clock: u64,
}

impl Assignment {
    pub fn new(atom_count: usize, clause_count: usize) -> Self {
        Self {
            value: vec![false; atom_count],
            satisfied_count: vec![0; clause_count],
            unsat: UnsatSet::with_capacity(clause_count),
            last_flipped: vec![0; atom_count],
            flip_clock: 0,
        }
    }

    pub fn value(&self, atom: Atom) -> bool {
        self.value[(atom.id() - 1) as usize]
    }

    fn set_raw(&mut self, atom: Atom, value: bool) {
        self.value[(atom.id() - 1) as usize] = value;
    }

    pub fn last_flipped(&self, atom: Atom) -> u64 {
        self.last_flipped[(atom.id() - 1) as usize]
    }

    pub fn unsat_count(&self) -> usize {
        self.unsat.len()
    }

    pub fn is_feasible(&self) -> bool {
        self.unsat.len() == 0
    }

    pub fn random_unsat_clause(&self, rng: &mut Stream) -> usize {
        self.unsat.pick(rng)
    }

    /// Assigns every atom `true` with probability equal to its initial bias, forces fixed
    /// atoms to their fixed value, then computes `satisfied_count`/`unsat` from scratch.
    pub fn initialize(&mut self, rng: &mut Stream, atoms: &AtomDb, clauses: &ClauseDb) {
        for atom in atoms.atoms() {
            let value = match atoms.fixed(atom) {
                Some(fixed) => fixed,
                None => rng.gen_bool(atoms.bias(atom)),
            };
            self.set_raw(atom, value);
        }
        self.last_flipped.iter_mut().for_each(|f| *f = 0);
        self.flip_clock = 0;
        self.recompute_all(clauses);
    }

    fn recompute_all(&mut self, clauses: &ClauseDb) {
        self.unsat = UnsatSet::with_capacity(clauses.clause_count());
        for (index, clause) in clauses.iter_clauses().enumerate() {
            let count = clause
                .literals
                .iter()
                .filter(|l| l.satisfied_by(self.value(l.atom())))
                .count() as u32;
            self.satisfied_count[index] = count;
            if !clause.bounds_hold(count) {
                self.unsat.insert(index);
            }
        }
    }

    /// Flips `atom`, updating `satisfied_count` and `unsat` membership for every clause
    /// touching it in O(clauses-touching-atom × clause-width).
    pub fn flip(&mut self, atom: Atom, clauses: &ClauseDb) {
        let new_value = !self.value(atom);
        self.set_raw(atom, new_value);
        self.flip_clock += 1;
        self.last_flipped[(atom.id() - 1) as usize] = self.flip_clock;

        for &(clause_index, literal_index) in clauses.clauses_touching(atom) {
            let clause = clauses.clause(clause_index);
            let literal = clause.literals[literal_index];
            let now_satisfied = literal.satisfied_by(new_value);
            if now_satisfied {
                self.satisfied_count[clause_index] += 1;
            } else {
                self.satisfied_count[clause_index] -= 1;
            }
            if clause.bounds_hold(self.satisfied_count[clause_index]) {
                self.unsat.remove(clause_index);
            } else {
                self.unsat.insert(clause_index);
            }
        }
    }

    /// Accounts for a clause appended to the Clause Store mid-search (a theory-learned blocking
    /// clause, added via
    /// [ClauseDb::add_clause_post_freeze](crate::db::clause_db::ClauseDb::add_clause_post_freeze)):
    /// evaluates it against the current assignment and joins `unsat` if it isn't satisfied.
    pub fn extend_for_new_clause(&mut self, clause_index: usize, clauses: &ClauseDb) {
        let clause = clauses.clause(clause_index);
        let count = clause
            .literals
            .iter()
            .filter(|l| l.satisfied_by(self.value(l.atom())))
            .count() as u32;
        self.satisfied_count.push(count);
        self.unsat.grow();
        if !clause.bounds_hold(count) {
            self.unsat.insert(clause_index);
        }
    }

    /// The change in `|unsat|` that would result from flipping `atom`, without mutating state.
    /// Negative is an improvement. Computed by simulating the same per-clause bound check
    /// [flip] performs, over the clauses `atom` touches.
    pub fn flip_delta(&self, atom: Atom, clauses: &ClauseDb) -> i64 {
        let new_value = !self.value(atom);
        let mut delta = 0i64;
        for &(clause_index, literal_index) in clauses.clauses_touching(atom) {
            let clause = clauses.clause(clause_index);
            let literal = clause.literals[literal_index];
            let was_satisfied = literal.satisfied_by(self.value(atom));
            let now_satisfied = literal.satisfied_by(new_value);
            if was_satisfied == now_satisfied {
                continue;
            }
            let before = self.satisfied_count[clause_index];
            let after = if now_satisfied { before + 1 } else { before - 1 };
            let was_unsat = !clause.bounds_hold(before);
            let is_unsat = !clause.bounds_hold(after);
            match (was_unsat, is_unsat) {
                (false, true) => delta += 1,
                (true, false) => delta -= 1,
                _ => {}
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::AtomKind;
    use crate::structures::clause::Bound;

    #[test]
    fn flip_tracks_unsat_set() {
        let mut atoms = AtomDb::new();
        let a = atoms.new_atom("a", AtomKind::Plain, None).unwrap();
        let mut clauses = ClauseDb::new();
        clauses
            .add_clause(1, Bound::Count(1), vec![a.pos()], &atoms)
            .unwrap();
        clauses.freeze(&mut atoms).unwrap();

        let mut assignment = Assignment::new(atoms.len(), clauses.clause_count());
        let mut rng = Stream::from_seed(1);
        assignment.initialize(&mut rng, &atoms, &clauses);
        // regardless of the random initial value, flipping should toggle satisfiability.
        let initially_feasible = assignment.is_feasible();
        assignment.flip(a, &clauses);
        assert_eq!(assignment.is_feasible(), !initially_feasible);
    }

    #[test]
    fn flip_delta_matches_actual_flip() {
        let mut atoms = AtomDb::new();
        let a = atoms.new_atom("a", AtomKind::Plain, None).unwrap();
        let b = atoms.new_atom("b", AtomKind::Plain, None).unwrap();
        let mut clauses = ClauseDb::new();
        clauses
            .add_clause(1, Bound::Count(2), vec![a.pos(), b.pos()], &atoms)
            .unwrap();
        clauses.freeze(&mut atoms).unwrap();

        let mut assignment = Assignment::new(atoms.len(), clauses.clause_count());
        assignment.value.fill(false);
        assignment.satisfied_count = vec![0];
        assignment.unsat = UnsatSet::with_capacity(1);
        assignment.unsat.insert(0);

        let predicted = assignment.flip_delta(a, &clauses);
        let before_unsat = assignment.unsat_count();
        assignment.flip(a, &clauses);
        let after_unsat = assignment.unsat_count();
        assert_eq!(predicted, after_unsat as i64 - before_unsat as i64);
    }
}

/*!
The float theory: variables own an interval `[lo,hi]`, narrowed by asserted propositions
`x ≤ c`, `x ≥ c`, `x ≤ y`, `x ≥ y`, and `x = y` (alias), then sampled uniformly once a
fixed point is reached (§4.5).
*/

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::generic::rng::Stream;
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::structures::solution::{SolutionBuilder, TheoryValue};
use crate::structures::theory::{BooleanCandidate, Conflict, TheorySolver};
use crate::types::err::TheoryFailureReason;

/// The relation a single float proposition asserts, once true.
#[derive(Clone, Copy)]
pub enum FloatRelation {
    LeConst(f64),
    GeConst(f64),
    LeVar(u32),
    GeVar(u32),
    EqVar(u32),
}

pub struct FloatProposition {
    pub literal: Literal,
    pub variable: u32,
    pub relation: FloatRelation,
}

pub struct FloatVariable {
    pub id: u32,
    pub domain: (f64, f64),
}

/// A disjoint-set over variable ids, used to group variables an `x = y` proposition aliases
/// together so they're tightened and sampled as one.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

struct VarState {
    lo: f64,
    hi: f64,
    contributors: Vec<Literal>,
}

impl VarState {
    fn tighten_lo(&mut self, lo: f64, cause: Literal) {
        if lo > self.lo {
            self.lo = lo;
            self.contributors.push(cause);
        }
    }

    fn tighten_hi(&mut self, hi: f64, cause: Literal) {
        if hi < self.hi {
            self.hi = hi;
            self.contributors.push(cause);
        }
    }

    fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    fn merge_from(&mut self, other: &VarState) {
        if other.lo > self.lo {
            self.lo = other.lo;
        }
        if other.hi < self.hi {
            self.hi = other.hi;
        }
        self.contributors.extend(other.contributors.iter().copied());
    }
}

#[derive(Default)]
pub struct FloatTheory {
    variables: Vec<FloatVariable>,
    propositions: Vec<FloatProposition>,
}

impl FloatTheory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, id: u32, domain: (f64, f64)) {
        self.variables.push(FloatVariable { id, domain });
    }

    pub fn add_proposition(&mut self, proposition: FloatProposition) {
        self.propositions.push(proposition);
    }

    fn index_of(&self, variable: u32) -> Option<usize> {
        self.variables.iter().position(|v| v.id == variable)
    }
}

impl TheorySolver for FloatTheory {
    fn tag(&self) -> &'static str {
        "float"
    }

    /// Sorts the constant-bound propositions per variable and emits the implication chain
    /// `x ≤ cᵢ → x ≤ cⱼ` (for `cᵢ < cⱼ`) and `x ≥ cⱼ → x ≥ cᵢ`, so the SLS core never proposes
    /// a Boolean candidate with an internally-inconsistent set of constant bounds.
    fn preprocess(
        &mut self,
        clauses: &mut ClauseDb,
        atoms: &mut AtomDb,
    ) -> Result<(), TheoryFailureReason> {
        for variable in &self.variables {
            let mut le_consts: Vec<(f64, Literal)> = self
                .propositions
                .iter()
                .filter(|p| p.variable == variable.id)
                .filter_map(|p| match p.relation {
                    FloatRelation::LeConst(c) => Some((c, p.literal)),
                    _ => None,
                })
                .collect();
            le_consts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            for pair in le_consts.windows(2) {
                let (_, smaller) = pair[0];
                let (_, larger) = pair[1];
                clauses
                    .add_clause(1, Bound::Count(2), vec![smaller.negate(), larger], atoms)
                    .map_err(|e| TheoryFailureReason { solver: self.tag(), reason: e.to_string() })?;
            }

            let mut ge_consts: Vec<(f64, Literal)> = self
                .propositions
                .iter()
                .filter(|p| p.variable == variable.id)
                .filter_map(|p| match p.relation {
                    FloatRelation::GeConst(c) => Some((c, p.literal)),
                    _ => None,
                })
                .collect();
            ge_consts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            for pair in ge_consts.windows(2) {
                let (_, smaller) = pair[0];
                let (_, larger) = pair[1];
                clauses
                    .add_clause(1, Bound::Count(2), vec![larger.negate(), smaller], atoms)
                    .map_err(|e| TheoryFailureReason { solver: self.tag(), reason: e.to_string() })?;
            }
        }
        Ok(())
    }

    /// Narrows each variable's interval from its domain by every true constant bound, merges
    /// alias classes from true `x = y` propositions, then runs an AC-3-style fixed point over
    /// the `x ≤ y` / `x ≥ y` edges until no interval changes, and finally samples each
    /// variable's value uniformly inside its settled interval.
    fn solve(
        &mut self,
        candidate: &dyn BooleanCandidate,
        solution: &mut SolutionBuilder,
        rng: &mut Stream,
    ) -> Result<(), Conflict> {
        let n = self.variables.len();
        let mut states: Vec<VarState> = self
            .variables
            .iter()
            .map(|v| VarState { lo: v.domain.0, hi: v.domain.1, contributors: Vec::new() })
            .collect();
        let mut uf = UnionFind::new(n);

        let active: Vec<&FloatProposition> = self
            .propositions
            .iter()
            .filter(|p| candidate.value_of(p.literal))
            .collect();

        for p in &active {
            let Some(i) = self.index_of(p.variable) else { continue };
            match p.relation {
                FloatRelation::LeConst(c) => states[i].tighten_hi(c, p.literal),
                FloatRelation::GeConst(c) => states[i].tighten_lo(c, p.literal),
                FloatRelation::EqVar(other) => {
                    if let Some(j) = self.index_of(other) {
                        uf.union(i, j);
                    }
                }
                _ => {}
            }
        }

        // Fold aliased variables into one representative interval (the intersection).
        for idx in 0..n {
            let root = uf.find(idx);
            if root == idx {
                continue;
            }
            let member = VarState {
                lo: states[idx].lo,
                hi: states[idx].hi,
                contributors: states[idx].contributors.clone(),
            };
            states[root].merge_from(&member);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for p in &active {
                let (relation, variable, literal) = (p.relation, p.variable, p.literal);
                let Some(i_raw) = self.index_of(variable) else { continue };
                let i = uf.find(i_raw);
                match relation {
                    FloatRelation::LeVar(other) => {
                        let Some(j_raw) = self.index_of(other) else { continue };
                        let j = uf.find(j_raw);
                        let (x_hi, y_lo) = (states[i].hi, states[j].lo);
                        let y_hi = states[j].hi;
                        let x_lo = states[i].lo;
                        if y_hi < x_hi {
                            states[i].tighten_hi(y_hi, literal);
                            changed = true;
                        }
                        if x_lo > y_lo {
                            states[j].tighten_lo(x_lo, literal);
                            changed = true;
                        }
                    }
                    FloatRelation::GeVar(other) => {
                        let Some(j_raw) = self.index_of(other) else { continue };
                        let j = uf.find(j_raw);
                        let (x_lo, y_hi) = (states[i].lo, states[j].hi);
                        let y_lo = states[j].lo;
                        let x_hi = states[i].hi;
                        if y_lo > x_lo {
                            states[i].tighten_lo(y_lo, literal);
                            changed = true;
                        }
                        if x_hi < y_hi {
                            states[j].tighten_hi(x_hi, literal);
                            changed = true;
                        }
                    }
                    _ => {}
                }
            }

            for idx in 0..n {
                if states[idx].is_empty() {
                    return Err(Conflict::new(states[idx].contributors.clone()));
                }
            }
        }

        // Sample once per alias class so every variable an `x = y` proposition joined commits
        // the same value, not independently-drawn values that merely share an interval.
        let mut sampled: std::collections::HashMap<usize, f64> = std::collections::HashMap::new();
        for (idx, variable) in self.variables.iter().enumerate() {
            let root = uf.find(idx);
            let value = *sampled
                .entry(root)
                .or_insert_with(|| rng.gen_range_f64(states[root].lo, states[root].hi));
            solution.commit(self.tag(), variable.id, TheoryValue::Float(value));
        }
        Ok(())
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::{Atom, AtomKind};
    use std::collections::HashMap;

    struct FixedCandidate(HashMap<Atom, bool>);
    impl BooleanCandidate for FixedCandidate {
        fn value_of(&self, literal: Literal) -> bool {
            literal.satisfied_by(*self.0.get(&literal.atom()).unwrap_or(&false))
        }
    }

    #[test]
    fn bounds_narrow_the_sampled_interval() {
        let mut atoms = AtomDb::new();
        let le5 = atoms.new_atom("x<=5", AtomKind::Plain, None).unwrap();
        let ge3 = atoms.new_atom("x>=3", AtomKind::Plain, None).unwrap();

        let mut theory = FloatTheory::new();
        theory.add_variable(0, (0.0, 10.0));
        theory.add_proposition(FloatProposition {
            literal: le5.pos(),
            variable: 0,
            relation: FloatRelation::LeConst(5.0),
        });
        theory.add_proposition(FloatProposition {
            literal: ge3.pos(),
            variable: 0,
            relation: FloatRelation::GeConst(3.0),
        });

        let mut candidate = HashMap::new();
        candidate.insert(le5, true);
        candidate.insert(ge3, true);
        let candidate = FixedCandidate(candidate);

        let mut builder = SolutionBuilder::new();
        let mut rng = Stream::from_seed(3);
        theory.solve(&candidate, &mut builder, &mut rng).unwrap();
        let solution = crate::structures::solution::Solution::new(vec![true, true], builder);
        let value = solution.get_theory("float", 0).unwrap().as_float().unwrap();
        assert!((3.0..=5.0).contains(&value));
    }
}

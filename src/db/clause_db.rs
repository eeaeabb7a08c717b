/*!
The Clause Store: generalized clauses plus the grounded rules, completed into clauses at
[freeze](ClauseDb::freeze) (§4.1).
*/

use crate::db::atom_db::AtomDb;
use crate::structures::atom::{Atom, AtomKind};
use crate::structures::clause::{Bound, Clause};
use crate::structures::literal::Literal;
use crate::structures::rule::Rule;
use crate::types::err::InvalidProblem;

/// Owns every [Clause] and [Rule] in a problem, and synthesizes the completion encoding on
/// [freeze].
#[derive(Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
    rules: Vec<Rule>,
    /// For each atom (indexed by `id - 1`), the `(clause index, literal index)` pairs of every
    /// occurrence of either polarity of that atom. Built at [freeze].
    occurrences: Vec<Vec<(usize, usize)>>,
    rules_completed: bool,
    frozen: bool,
}

impl ClauseDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn clause(&self, index: usize) -> &Clause {
        &self.clauses[index]
    }

    pub fn iter_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// The `(clause index, literal index)` pairs touching `atom`, of either polarity.
    /// Only meaningful after [freeze].
    pub fn clauses_touching(&self, atom: Atom) -> &[(usize, usize)] {
        &self.occurrences[(atom.id() - 1) as usize]
    }

    /// Adds a generalized clause `min ≤ Σ literals ≤ max`.
    pub fn add_clause(
        &mut self,
        min: u32,
        max: Bound,
        literals: Vec<Literal>,
        atoms: &AtomDb,
    ) -> Result<usize, InvalidProblem> {
        if self.frozen {
            return Err(InvalidProblem::FrozenMutation);
        }
        self.push_validated(min, max, literals, atoms)
    }

    /// Adds a clause after [finalize](ClauseDb::finalize), extending the occurrence index for
    /// just the new clause rather than rebuilding it. Used by the
    /// [Coordinator](crate::theories::coordinator::Coordinator) to add blocking clauses learned
    /// from a theory [Conflict](crate::structures::theory::Conflict) mid-search; every atom the
    /// clause names must already exist (no new atoms may be registered after freeze).
    pub fn add_clause_post_freeze(
        &mut self,
        min: u32,
        max: Bound,
        literals: Vec<Literal>,
        atoms: &AtomDb,
    ) -> Result<usize, InvalidProblem> {
        let index = self.push_validated(min, max, literals, atoms)?;
        let clause = &self.clauses[index];
        for (literal_index, literal) in clause.literals.iter().enumerate() {
            self.occurrences[(literal.atom().id() - 1) as usize].push((index, literal_index));
        }
        Ok(index)
    }

    fn push_validated(
        &mut self,
        min: u32,
        max: Bound,
        literals: Vec<Literal>,
        atoms: &AtomDb,
    ) -> Result<usize, InvalidProblem> {
        if literals.is_empty() {
            return Err(InvalidProblem::EmptyLiterals);
        }
        if let Bound::Count(max_count) = max {
            if min > max_count {
                return Err(InvalidProblem::MinExceedsMax { min, max: max_count });
            }
        }
        self.check_no_duplicates(&literals)?;
        for literal in &literals {
            atoms.validate(literal.atom())?;
        }

        let index = self.clauses.len();
        self.clauses.push(Clause::new(min, max, literals));
        Ok(index)
    }

    /// Adds a rule `head ← body`. `head` must name a [Derived](AtomKind::Derived) atom.
    pub fn add_rule(
        &mut self,
        head: Atom,
        body: Vec<Literal>,
        atoms: &AtomDb,
    ) -> Result<(), InvalidProblem> {
        if self.frozen || self.rules_completed {
            return Err(InvalidProblem::FrozenMutation);
        }
        atoms.validate(head)?;
        if !atoms.is_derived(head) {
            return Err(InvalidProblem::RuleHeadNotDerived(head.id()));
        }
        if body.is_empty() {
            return Err(InvalidProblem::EmptyLiterals);
        }
        for literal in &body {
            atoms.validate(literal.atom())?;
        }

        self.rules.push(Rule::new(head, body));
        Ok(())
    }

    fn check_no_duplicates(&self, literals: &[Literal]) -> Result<(), InvalidProblem> {
        let mut seen = std::collections::HashSet::new();
        for literal in literals {
            if !seen.insert(literal.atom()) {
                return Err(InvalidProblem::DuplicateAtomInClause(literal.atom().id()));
            }
        }
        Ok(())
    }

    fn push_clause_unchecked(&mut self, min: u32, max: Bound, literals: Vec<Literal>) {
        self.clauses.push(Clause::new(min, max, literals));
    }

    /// Synthesizes the completion encoding (support, firing, and loop-formula clauses) from the
    /// accumulated rules, then builds the per-atom occurrence index. Idempotent: a second call
    /// is a no-op. Equivalent to [complete](ClauseDb::complete) followed by
    /// [finalize](ClauseDb::finalize); registered theory solvers need the two phases split so
    /// they can add clauses of their own in between (see
    /// [Coordinator::preprocess_all](crate::theories::coordinator::Coordinator::preprocess_all)).
    pub fn freeze(&mut self, atoms: &mut AtomDb) -> Result<(), InvalidProblem> {
        if self.frozen {
            return Ok(());
        }
        self.complete(atoms)?;
        self.finalize(atoms);
        Ok(())
    }

    /// Turns accumulated rules into their completion clauses. After this call `add_rule` is
    /// rejected, but `add_clause` remains open until [finalize](ClauseDb::finalize) — the
    /// window theory solvers use to inject their own clauses during preprocessing.
    pub fn complete(&mut self, atoms: &mut AtomDb) -> Result<(), InvalidProblem> {
        if self.rules_completed {
            return Ok(());
        }
        self.complete_rules(atoms)?;
        self.rules_completed = true;
        Ok(())
    }

    /// Freezes the Variable Store and builds the per-atom occurrence index. No further clauses,
    /// rules, or atoms may be added afterward.
    pub fn finalize(&mut self, atoms: &mut AtomDb) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        atoms.freeze();
        self.build_occurrences(atoms.len());
        log::info!(
            target: crate::reports::targets::BUILD,
            "frozen: {} atoms, {} clauses",
            atoms.len(),
            self.clauses.len()
        );
    }

    fn build_occurrences(&mut self, atom_count: usize) {
        self.occurrences = vec![Vec::new(); atom_count];
        for (clause_index, clause) in self.clauses.iter().enumerate() {
            for (literal_index, literal) in clause.literals.iter().enumerate() {
                self.occurrences[(literal.atom().id() - 1) as usize]
                    .push((clause_index, literal_index));
            }
        }
    }

    /// Emits the Clark completion plus loop-formula clauses for every derived atom, per §4.1.
    fn complete_rules(&mut self, atoms: &mut AtomDb) -> Result<(), InvalidProblem> {
        // Group rules by head, preserving the (deterministic) insertion order within each group.
        let mut rules_by_head: std::collections::BTreeMap<u32, Vec<usize>> =
            std::collections::BTreeMap::new();
        for (rule_index, rule) in self.rules.iter().enumerate() {
            rules_by_head.entry(rule.head.id()).or_default().push(rule_index);
        }

        // Rule index -> the literal representing "this rule's body is fully true" (SUP(r)).
        // A single-literal body needs no auxiliary atom; longer bodies get a fresh structural
        // marker tied to the body by a small Tseitin encoding.
        let mut support_literal: Vec<Option<Literal>> = vec![None; self.rules.len()];

        for atom in atoms.derived_atoms().collect::<Vec<_>>() {
            let heading = rules_by_head.get(&atom.id()).cloned().unwrap_or_default();

            if heading.is_empty() {
                // A derived atom with zero rules becomes permanently false.
                self.push_clause_unchecked(0, Bound::Count(0), vec![atom.pos()]);
                continue;
            }

            let mut supports = Vec::with_capacity(heading.len());
            for &rule_index in &heading {
                let body = self.rules[rule_index].body.clone();
                let sup = if body.len() == 1 {
                    body[0]
                } else {
                    let aux = atoms.new_atom(
                        format!("__sup_r{rule_index}_of_{atom}"),
                        AtomKind::StructuralMarker,
                        None,
                    )?;
                    // aux -> bj for each body literal bj.
                    for &bj in &body {
                        self.push_clause_unchecked(1, Bound::Count(2), vec![aux.neg(), bj]);
                    }
                    // (b1 ∧ ... ∧ bn) -> aux.
                    let mut firing = body.iter().map(|l| l.negate()).collect::<Vec<_>>();
                    firing.push(aux.pos());
                    self.push_clause_unchecked(1, Bound::Count(firing.len() as u32), firing);
                    aux.pos()
                };
                support_literal[rule_index] = Some(sup);
                supports.push(sup);
            }

            // a -> (SUP(r1) ∨ ... ∨ SUP(rn)): support.
            let mut support_clause = vec![atom.neg()];
            support_clause.extend(supports.iter().copied());
            let width = support_clause.len() as u32;
            self.push_clause_unchecked(1, Bound::Count(width), support_clause);

            // SUP(ri) -> a: rule firing, one clause per rule.
            for sup in &supports {
                self.push_clause_unchecked(1, Bound::Count(2), vec![sup.negate(), atom.pos()]);
            }
        }

        self.emit_loop_formulas(atoms, &rules_by_head, &support_literal);
        Ok(())
    }

    /// Forbids unsupported positive cycles among derived atoms: for each strongly-connected
    /// component `L` of the positive-body dependency graph, every atom in `L` must have some
    /// rule whose support does not itself depend (even indirectly) on `L` (§4.1).
    fn emit_loop_formulas(
        &mut self,
        atoms: &AtomDb,
        rules_by_head: &std::collections::BTreeMap<u32, Vec<usize>>,
        support_literal: &[Option<Literal>],
    ) {
        let derived: Vec<Atom> = atoms.derived_atoms().collect();
        let edges = |a: Atom| -> Vec<Atom> {
            let mut out = Vec::new();
            if let Some(rule_indices) = rules_by_head.get(&a.id()) {
                for &rule_index in rule_indices {
                    for b in self.rules[rule_index].positive_body_atoms() {
                        if atoms.is_derived(b) {
                            out.push(b);
                        }
                    }
                }
            }
            out
        };

        for component in tarjan_sccs(&derived, edges) {
            let in_component: std::collections::HashSet<u32> =
                component.iter().map(|a| a.id()).collect();
            let is_loop = component.len() > 1 || edges(component[0]).contains(&component[0]);
            if !is_loop {
                continue;
            }

            for &atom in &component {
                let mut external_supports = Vec::new();
                if let Some(rule_indices) = rules_by_head.get(&atom.id()) {
                    for &rule_index in rule_indices {
                        // A rule supports escape from the loop only if it has no positive-body
                        // dependency inside the component.
                        let depends_on_component = self.rules[rule_index]
                            .positive_body_atoms()
                            .any(|b| in_component.contains(&b.id()));
                        if !depends_on_component {
                            if let Some(sup) = support_literal[rule_index] {
                                external_supports.push(sup);
                            }
                        }
                    }
                }

                if external_supports.is_empty() {
                    self.push_clause_unchecked(0, Bound::Count(0), vec![atom.pos()]);
                } else {
                    let mut clause = vec![atom.neg()];
                    clause.extend(external_supports.iter().copied());
                    let width = clause.len() as u32;
                    self.push_clause_unchecked(1, Bound::Count(width), clause);
                }
            }
        }
    }
}

/// Tarjan's strongly-connected-components algorithm, recursive. Problems this library targets
/// (procedural content generation) involve at most a few hundred derived atoms, so recursion
/// depth is not a practical concern; see DESIGN.md for the tradeoff.
fn tarjan_sccs(atoms: &[Atom], edges: impl Fn(Atom) -> Vec<Atom>) -> Vec<Vec<Atom>> {
    struct State<'a, F: Fn(Atom) -> Vec<Atom>> {
        edges: &'a F,
        index_of: std::collections::HashMap<u32, usize>,
        low_link: std::collections::HashMap<u32, usize>,
        on_stack: std::collections::HashSet<u32>,
        stack: Vec<Atom>,
        next_index: usize,
        components: Vec<Vec<Atom>>,
    }

    impl<'a, F: Fn(Atom) -> Vec<Atom>> State<'a, F> {
        fn visit(&mut self, v: Atom) {
            self.index_of.insert(v.id(), self.next_index);
            self.low_link.insert(v.id(), self.next_index);
            self.next_index += 1;
            self.stack.push(v);
            self.on_stack.insert(v.id());

            for w in (self.edges)(v) {
                if !self.index_of.contains_key(&w.id()) {
                    self.visit(w);
                    let w_low = self.low_link[&w.id()];
                    let v_low = self.low_link[&v.id()];
                    self.low_link.insert(v.id(), v_low.min(w_low));
                } else if self.on_stack.contains(&w.id()) {
                    let w_index = self.index_of[&w.id()];
                    let v_low = self.low_link[&v.id()];
                    self.low_link.insert(v.id(), v_low.min(w_index));
                }
            }

            if self.low_link[&v.id()] == self.index_of[&v.id()] {
                let mut component = Vec::new();
                loop {
                    let w = self.stack.pop().unwrap();
                    self.on_stack.remove(&w.id());
                    component.push(w);
                    if w.id() == v.id() {
                        break;
                    }
                }
                component.sort_by_key(|a| a.id());
                self.components.push(component);
            }
        }
    }

    let mut state = State {
        edges: &edges,
        index_of: Default::default(),
        low_link: Default::default(),
        on_stack: Default::default(),
        stack: Vec::new(),
        next_index: 0,
        components: Vec::new(),
    };

    for &atom in atoms {
        if !state.index_of.contains_key(&atom.id()) {
            state.visit(atom);
        }
    }

    state.components
}

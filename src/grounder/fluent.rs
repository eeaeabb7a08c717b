/*!
Time-indexed fluents and actions: frame axioms linking adjacent timepoints, and the
precondition/effect rules tying actions to the fluents they activate or deactivate (§4.6).
*/

use std::collections::HashMap;

use crate::db::{atom_db::AtomDb, clause_db::ClauseDb};
use crate::structures::atom::{Atom, AtomKind};
use crate::structures::clause::Bound;
use crate::structures::literal::Literal;
use crate::types::err::InvalidProblem;

type Instance = Vec<String>;

/// A fluent grounded over a horizon `H`: one proposition atom per `(instance, t)` for
/// `t ∈ [0,H)`, plus, for each `t ∈ [0,H-1)`, the `activate`/`deactivate` atoms that support
/// transitioning it.
pub struct Fluent {
    name: String,
    horizon: u32,
    fluent_atoms: HashMap<(Instance, u32), Atom>,
    activate_atoms: HashMap<(Instance, u32), Atom>,
    deactivate_atoms: HashMap<(Instance, u32), Atom>,
}

impl Fluent {
    pub fn new(name: impl Into<String>, horizon: u32) -> Self {
        assert!(horizon >= 1, "a fluent needs at least one timepoint");
        Self {
            name: name.into(),
            horizon,
            fluent_atoms: HashMap::new(),
            activate_atoms: HashMap::new(),
            deactivate_atoms: HashMap::new(),
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Creates every atom for one instance: the fluent atom at each `t`, and the
    /// `activate`/`deactivate` pair at each `t < H-1`. `activate`/`deactivate` are
    /// [Derived](AtomKind::Derived): they are only ever true when some action's effect rule
    /// supports them.
    pub fn ground(&mut self, args: &[String], atoms: &mut AtomDb) -> Result<(), InvalidProblem> {
        let key = args.to_vec();
        for t in 0..self.horizon {
            let name = format!("{}({})@{t}", self.name, key.join(","));
            let atom = atoms.new_atom(name, AtomKind::Plain, None)?;
            self.fluent_atoms.insert((key.clone(), t), atom);
        }
        for t in 0..self.horizon.saturating_sub(1) {
            let activate = atoms.new_atom(
                format!("activate_{}({})@{t}", self.name, key.join(",")),
                AtomKind::Derived,
                None,
            )?;
            let deactivate = atoms.new_atom(
                format!("deactivate_{}({})@{t}", self.name, key.join(",")),
                AtomKind::Derived,
                None,
            )?;
            self.activate_atoms.insert((key.clone(), t), activate);
            self.deactivate_atoms.insert((key.clone(), t), deactivate);
        }
        Ok(())
    }

    pub fn at(&self, args: &[String], t: u32) -> Option<Atom> {
        self.fluent_atoms.get(&(args.to_vec(), t)).copied()
    }

    pub fn activate_at(&self, args: &[String], t: u32) -> Option<Atom> {
        self.activate_atoms.get(&(args.to_vec(), t)).copied()
    }

    pub fn deactivate_at(&self, args: &[String], t: u32) -> Option<Atom> {
        self.deactivate_atoms.get(&(args.to_vec(), t)).copied()
    }

    /// Emits the four frame-axiom clauses plus the activate/deactivate mutex, for every
    /// grounded instance, at every `t ∈ [0,H-1)`.
    pub fn emit_frame_axioms(
        &self,
        clauses: &mut ClauseDb,
        atoms: &AtomDb,
    ) -> Result<(), InvalidProblem> {
        let mut instances: Vec<&Instance> =
            self.activate_atoms.keys().map(|(instance, _)| instance).collect();
        instances.sort();
        instances.dedup();

        for instance in instances {
            for t in 0..self.horizon.saturating_sub(1) {
                let f_t = self.fluent_atoms[&(instance.clone(), t)];
                let f_t1 = self.fluent_atoms[&(instance.clone(), t + 1)];
                let act = self.activate_atoms[&(instance.clone(), t)];
                let deact = self.deactivate_atoms[&(instance.clone(), t)];

                // activate_t -> fluent_{t+1}
                clauses.add_clause(1, Bound::Count(2), vec![act.neg(), f_t1.pos()], atoms)?;
                // deactivate_t -> ¬fluent_{t+1}
                clauses.add_clause(1, Bound::Count(2), vec![deact.neg(), f_t1.neg()], atoms)?;
                // fluent_t -> fluent_{t+1} ∨ deactivate_t
                clauses.add_clause(
                    1,
                    Bound::Count(3),
                    vec![f_t.neg(), f_t1.pos(), deact.pos()],
                    atoms,
                )?;
                // ¬fluent_t -> ¬fluent_{t+1} ∨ activate_t
                clauses.add_clause(
                    1,
                    Bound::Count(3),
                    vec![f_t.pos(), f_t1.neg(), act.pos()],
                    atoms,
                )?;
                // ¬(activate_t ∧ deactivate_t)
                clauses.add_clause(0, Bound::Count(1), vec![act.pos(), deact.pos()], atoms)?;
            }
        }
        Ok(())
    }
}

/// Which direction an action's effect pushes a fluent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    Activate,
    Deactivate,
}

/// An action grounded at timepoints `t ∈ [0,H-1)`, one atom per `(instance, t)`.
pub struct Action {
    name: String,
    action_atoms: HashMap<(Instance, u32), Atom>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), action_atoms: HashMap::new() }
    }

    pub fn ground(&mut self, args: &[String], t: u32, atoms: &mut AtomDb) -> Result<Atom, InvalidProblem> {
        let key = (args.to_vec(), t);
        if let Some(&atom) = self.action_atoms.get(&key) {
            return Ok(atom);
        }
        let name = format!("{}({})@{t}", self.name, args.join(","));
        let atom = atoms.new_atom(name, AtomKind::Plain, None)?;
        self.action_atoms.insert(key, atom);
        Ok(atom)
    }

    pub fn at(&self, args: &[String], t: u32) -> Option<Atom> {
        self.action_atoms.get(&(args.to_vec(), t)).copied()
    }

    /// Adds `action → precondition` as a plain clause (a classical implication, not a rule:
    /// the precondition need not be a derived atom).
    pub fn add_precondition(
        &self,
        args: &[String],
        t: u32,
        precondition: Literal,
        clauses: &mut ClauseDb,
        atoms: &AtomDb,
    ) -> Result<(), InvalidProblem> {
        let action_atom = self
            .at(args, t)
            .expect("action must be grounded before a precondition is attached");
        clauses.add_clause(1, Bound::Count(2), vec![action_atom.neg(), precondition], atoms)
    }

    /// Adds `activate(f) ← action` or `deactivate(f) ← action` as a rule: this action is one
    /// alternative support for the fluent transitioning at `t`.
    pub fn add_effect(
        &self,
        args: &[String],
        t: u32,
        effect: Effect,
        fluent: &Fluent,
        fluent_args: &[String],
        clauses: &mut ClauseDb,
        atoms: &AtomDb,
    ) -> Result<(), InvalidProblem> {
        let action_atom = self
            .at(args, t)
            .expect("action must be grounded before an effect is attached");
        let head = match effect {
            Effect::Activate => fluent.activate_at(fluent_args, t),
            Effect::Deactivate => fluent.deactivate_at(fluent_args, t),
        }
        .expect("fluent must be grounded at this timepoint before an effect is attached");
        clauses.add_rule(head, vec![action_atom.pos()], atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_axioms_forbid_silent_change() {
        let mut atoms = AtomDb::new();
        let mut at = Fluent::new("at", 2);
        at.ground(&["room1".into()], &mut atoms).unwrap();
        let mut clauses = ClauseDb::new();
        at.emit_frame_axioms(&mut clauses, &atoms).unwrap();

        let f0 = at.at(&["room1".into()], 0).unwrap();
        let f1 = at.at(&["room1".into()], 1).unwrap();
        let act0 = at.activate_at(&["room1".into()], 0).unwrap();
        // ¬fluent_0 -> ¬fluent_1 ∨ activate_0
        assert!(clauses
            .iter_clauses()
            .any(|c| c.literals == vec![f0.pos(), f1.neg(), act0.pos()]));
    }

    #[test]
    fn action_effect_is_a_rule_not_a_clause() {
        let mut atoms = AtomDb::new();
        let mut at = Fluent::new("at", 2);
        at.ground(&["room2".into()], &mut atoms).unwrap();
        let mut goto = Action::new("goto");
        let action_atom = goto.ground(&["room2".into()], 0, &mut atoms).unwrap();

        let mut clauses = ClauseDb::new();
        goto.add_effect(
            &["room2".into()],
            0,
            Effect::Activate,
            &at,
            &["room2".into()],
            &mut clauses,
            &atoms,
        )
        .unwrap();
        at.emit_frame_axioms(&mut clauses, &atoms).unwrap();
        clauses.freeze(&mut atoms).unwrap();

        let activate = at.activate_at(&["room2".into()], 0).unwrap();
        // activate_0 is derived and supported only by goto(room2)@0; firing clause present.
        assert!(clauses
            .iter_clauses()
            .any(|c| c.literals == vec![action_atom.neg(), activate.pos()]));
    }
}

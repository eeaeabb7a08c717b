/*!
The Variable Store: propositional variables, their initial biases, fixed assignments, and
per-variable metadata (§4, Variable Store).
*/

use std::collections::HashMap;

use crate::structures::atom::{Atom, AtomKind, AtomRecord};
use crate::types::err::InvalidProblem;

/// Owns every [Atom] in a problem and its [AtomRecord].
#[derive(Default)]
pub struct AtomDb {
    records: Vec<AtomRecord>,
    names: HashMap<String, Atom>,
    frozen: bool,
}

impl AtomDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Registers a fresh atom. Plain/derived atoms created through the builder reject
    /// duplicate names; the grounder creates many structural-marker atoms and is expected to
    /// pass unique names of its own devising, but uniqueness is not enforced for that kind.
    pub fn new_atom(
        &mut self,
        name: impl Into<String>,
        kind: AtomKind,
        bias: Option<f64>,
    ) -> Result<Atom, InvalidProblem> {
        if self.frozen {
            return Err(InvalidProblem::FrozenMutation);
        }

        let name = name.into();
        if !matches!(kind, AtomKind::StructuralMarker | AtomKind::TheoryShadow) {
            if self.names.contains_key(&name) {
                return Err(InvalidProblem::DuplicateAtomName(name));
            }
        }

        let id = (self.records.len() + 1) as u32;
        let atom = Atom(id);
        self.records.push(AtomRecord::new(name.clone(), kind, bias));
        self.names.insert(name, atom);
        Ok(atom)
    }

    /// Fixes `atom` to `value`, rejecting a fixation that contradicts a prior one.
    pub fn fix(&mut self, atom: Atom, value: bool) -> Result<(), InvalidProblem> {
        if self.frozen {
            return Err(InvalidProblem::FrozenMutation);
        }
        self.validate(atom)?;
        let record = &mut self.records[(atom.id() - 1) as usize];
        match record.fixed {
            Some(existing) if existing != value => {
                Err(InvalidProblem::ConflictingFixation(atom.id()))
            }
            _ => {
                record.fixed = Some(value);
                Ok(())
            }
        }
    }

    pub fn validate(&self, atom: Atom) -> Result<(), InvalidProblem> {
        if atom.id() == 0 || atom.id() as usize > self.records.len() {
            return Err(InvalidProblem::UndefinedLiteral(atom.id() as i64));
        }
        Ok(())
    }

    pub fn record(&self, atom: Atom) -> &AtomRecord {
        &self.records[(atom.id() - 1) as usize]
    }

    pub fn kind(&self, atom: Atom) -> AtomKind {
        self.record(atom).kind
    }

    pub fn is_derived(&self, atom: Atom) -> bool {
        matches!(self.record(atom).kind, AtomKind::Derived)
    }

    pub fn bias(&self, atom: Atom) -> f64 {
        self.record(atom).bias
    }

    pub fn fixed(&self, atom: Atom) -> Option<bool> {
        self.record(atom).fixed
    }

    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        (1..=self.records.len() as u32).map(Atom)
    }

    pub fn derived_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.atoms().filter(move |a| self.is_derived(*a))
    }

    /// Looks up an atom by the name it was registered under.
    pub fn atom_named(&self, name: &str) -> Option<Atom> {
        self.names.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let mut db = AtomDb::new();
        db.new_atom("p", AtomKind::Plain, None).unwrap();
        let err = db.new_atom("p", AtomKind::Plain, None).unwrap_err();
        assert_eq!(err, InvalidProblem::DuplicateAtomName("p".into()));
    }

    #[test]
    fn rejects_conflicting_fixation() {
        let mut db = AtomDb::new();
        let a = db.new_atom("a", AtomKind::Plain, None).unwrap();
        db.fix(a, true).unwrap();
        assert_eq!(db.fix(a, false).unwrap_err(), InvalidProblem::ConflictingFixation(1));
        // Fixing to the same value again is fine (idempotent).
        db.fix(a, true).unwrap();
    }
}

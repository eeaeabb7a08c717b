/*!
[FieldBinder]: the "populate fields of a caller record from a solution" bridge (§2, glue
surfaces). A caller registers `(atom name, setter)` pairs once against the names it gave
[new_atom](crate::problem::Problem::new_atom)/[new_derived_atom](crate::problem::Problem::new_derived_atom),
and [apply](FieldBinder::apply) resolves each name against the Variable Store and invokes the
setters against a [Solution] — no runtime reflection over the caller's record type.
*/

use crate::db::atom_db::AtomDb;
use crate::structures::solution::Solution;
use crate::types::err::InvalidProblem;

/// Registers `(atom name, setter)` pairs for a caller's record type `T`.
pub struct FieldBinder<T> {
    bindings: Vec<(String, Box<dyn Fn(&mut T, bool)>)>,
}

impl<T> Default for FieldBinder<T> {
    fn default() -> Self {
        Self { bindings: Vec::new() }
    }
}

impl<T> FieldBinder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `setter` to run with the truth value of the atom named `name` once a solution
    /// is available. Returns `self` so bindings can be chained.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        setter: impl Fn(&mut T, bool) + 'static,
    ) -> &mut Self {
        self.bindings.push((name.into(), Box::new(setter)));
        self
    }

    /// Resolves every registered name against `atoms` and invokes each setter with the
    /// corresponding value in `solution`, writing into `target`.
    pub fn apply(
        &self,
        atoms: &AtomDb,
        solution: &Solution,
        target: &mut T,
    ) -> Result<(), InvalidProblem> {
        for (name, setter) in &self.bindings {
            let atom = atoms
                .atom_named(name)
                .ok_or_else(|| InvalidProblem::UnknownAtomName(name.clone()))?;
            setter(target, solution.get(atom));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::AtomKind;
    use crate::structures::solution::SolutionBuilder;

    #[derive(Default)]
    struct Character {
        brave: bool,
        cunning: bool,
    }

    #[test]
    fn setters_run_against_the_named_atoms_values() {
        let mut atoms = AtomDb::new();
        let brave = atoms.new_atom("brave", AtomKind::Plain, None).unwrap();
        atoms.new_atom("cunning", AtomKind::Plain, None).unwrap();

        let mut binder = FieldBinder::new();
        binder.bind("brave", |c: &mut Character, v| c.brave = v);
        binder.bind("cunning", |c: &mut Character, v| c.cunning = v);

        let solution = Solution::new(vec![true, false], SolutionBuilder::new());
        let mut character = Character::default();
        binder.apply(&atoms, &solution, &mut character).unwrap();

        assert!(character.brave);
        assert!(!character.cunning);
        let _ = brave;
    }

    #[test]
    fn an_unknown_name_is_rejected() {
        let atoms = AtomDb::new();
        let mut binder: FieldBinder<Character> = FieldBinder::new();
        binder.bind("missing", |c, v| c.brave = v);
        let solution = Solution::new(vec![], SolutionBuilder::new());
        let mut character = Character::default();
        let err = binder.apply(&atoms, &solution, &mut character).unwrap_err();
        assert_eq!(err, InvalidProblem::UnknownAtomName("missing".into()));
    }
}

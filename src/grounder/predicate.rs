/*!
Typed predicate grounding: expands a predicate applied to concrete argument tuples into atoms,
canonicalizing symmetric two-argument predicates so `p(a,b)` and `p(b,a)` name the same atom
(§4.6).
*/

use std::collections::HashMap;

use crate::db::atom_db::AtomDb;
use crate::structures::atom::{Atom, AtomKind};
use crate::types::err::InvalidProblem;

/// A predicate grounded over string-named constants. Symmetric predicates must be binary;
/// grounding canonicalizes the argument pair by lexicographic order before interning.
pub struct Predicate {
    name: String,
    arity: usize,
    symmetric: bool,
    atoms: HashMap<Vec<String>, Atom>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, arity: usize, symmetric: bool) -> Self {
        assert!(!symmetric || arity == 2, "only binary predicates may be symmetric");
        Self { name: name.into(), arity, symmetric, atoms: HashMap::new() }
    }

    fn canonicalize(&self, args: &[String]) -> Vec<String> {
        if self.symmetric && args[0] > args[1] {
            vec![args[1].clone(), args[0].clone()]
        } else {
            args.to_vec()
        }
    }

    /// Returns the atom for `self(args...)`, creating it (of `kind`, with `bias`) on first use.
    /// For a symmetric predicate, `p(a,b)` and `p(b,a)` return the identical atom.
    pub fn ground(
        &mut self,
        args: &[String],
        atoms: &mut AtomDb,
        kind: AtomKind,
        bias: Option<f64>,
    ) -> Result<Atom, InvalidProblem> {
        assert_eq!(args.len(), self.arity, "argument count does not match predicate arity");
        let key = self.canonicalize(args);
        if let Some(&atom) = self.atoms.get(&key) {
            return Ok(atom);
        }
        let name = format!("{}({})", self.name, key.join(","));
        let atom = atoms.new_atom(name, kind, bias)?;
        self.atoms.insert(key, atom);
        Ok(atom)
    }

    /// The atom for `self(args...)`, if already grounded.
    pub fn get(&self, args: &[String]) -> Option<Atom> {
        self.atoms.get(&self.canonicalize(args)).copied()
    }

    pub fn atoms(&self) -> impl Iterator<Item = (&[String], Atom)> + '_ {
        self.atoms.iter().map(|(k, &v)| (k.as_slice(), v))
    }
}

/// Enumerates `(d1, d2)` with `d1 <= d2` over `domain`, including `d1 == d2`.
///
/// The right way to drive a bulk grounding loop over a *symmetric* predicate or fluent: since
/// canonicalization already folds `p(a,b)` and `p(b,a)` onto the same atom, looping every
/// ordered pair would ground (and, for a symmetric fluent, emit frame axioms for) the same
/// instance twice.
pub fn canonical_pairs(domain: &[String]) -> impl Iterator<Item = (String, String)> + '_ {
    (0..domain.len()).flat_map(move |i| {
        (i..domain.len()).map(move |j| (domain[i].clone(), domain[j].clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_predicate_canonicalizes_argument_order() {
        let mut atoms = AtomDb::new();
        let mut adjacent = Predicate::new("adjacent", 2, true);
        let ab = adjacent
            .ground(&["a".into(), "b".into()], &mut atoms, AtomKind::Plain, None)
            .unwrap();
        let ba = adjacent
            .ground(&["b".into(), "a".into()], &mut atoms, AtomKind::Plain, None)
            .unwrap();
        assert_eq!(ab, ba);
        assert_eq!(atoms.len(), 1);
    }

    #[test]
    fn canonical_pairs_excludes_the_mirrored_half() {
        let domain = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let pairs: Vec<_> = canonical_pairs(&domain).collect();
        assert_eq!(pairs.len(), 6); // 3 + 2 + 1, not 9
        assert!(pairs.contains(&("a".into(), "b".into())));
        assert!(!pairs.contains(&("b".into(), "a".into())));
    }

    #[test]
    fn distinct_arguments_ground_distinct_atoms() {
        let mut atoms = AtomDb::new();
        let mut likes = Predicate::new("likes", 2, false);
        let ab = likes
            .ground(&["a".into(), "b".into()], &mut atoms, AtomKind::Plain, None)
            .unwrap();
        let ba = likes
            .ground(&["b".into(), "a".into()], &mut atoms, AtomKind::Plain, None)
            .unwrap();
        assert_ne!(ab, ba);
    }
}

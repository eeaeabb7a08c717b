/*!
Atoms: propositional variables identified by a stable positive integer.
*/

use crate::structures::literal::Literal;

/// The kind of an atom, as tracked for diagnostics and for enforcing the rule-completion
/// invariants (only [Derived](AtomKind::Derived) atoms may head a rule).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AtomKind {
    /// An ordinary atom, free to be assigned by the search.
    Plain,

    /// An atom whose truth is supported only by [rules](crate::structures::rule::Rule)
    /// (stable-model semantics); see the completion encoding in
    /// [ClauseDb::freeze](crate::db::clause_db::ClauseDb::freeze).
    Derived,

    /// A proposition owned by a registered [theory solver](crate::theories::TheorySolver).
    TheoryShadow,

    /// A structural marker introduced by the grounder, e.g. to canonicalize a symmetric
    /// predicate or to name a fluent/action pairing; never meant to be inspected by callers.
    StructuralMarker,
}

/// A propositional variable.
///
/// Atom ids are 1-based and contiguous: the first atom created has id 1, the next 2, and so
/// on. Id 0 is reserved (see [Literal]) and is never assigned to an atom.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Atom(pub(crate) u32);

impl Atom {
    /// The raw id of the atom.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// The positive literal naming this atom.
    pub fn pos(&self) -> Literal {
        Literal::new(*self, true)
    }

    /// The negative literal naming the negation of this atom.
    pub fn neg(&self) -> Literal {
        Literal::new(*self, false)
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Per-atom metadata held by the [Variable Store](crate::db::atom_db::AtomDb).
#[derive(Clone, Debug)]
pub struct AtomRecord {
    /// A diagnostic name; need not be unique for theory-shadow atoms created by the grounder,
    /// but the builder API rejects duplicate names for atoms created directly by a caller.
    pub name: String,

    /// The atom's kind.
    pub kind: AtomKind,

    /// Probability in `[0,1]` of the atom starting `true` on a fresh random assignment.
    /// Defaults to `0.5`.
    pub bias: f64,

    /// If set, the atom's value is fixed and never flipped by the search.
    pub fixed: Option<bool>,
}

impl AtomRecord {
    pub fn new(name: impl Into<String>, kind: AtomKind, bias: Option<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            bias: bias.unwrap_or(0.5).clamp(0.0, 1.0),
            fixed: None,
        }
    }
}

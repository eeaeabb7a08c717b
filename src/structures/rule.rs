/*!
Rules: `head ← body`, the logic-programming layer completed into clauses at freeze.
*/

use crate::structures::{atom::Atom, literal::Literal};

/// A single rule `head ← L₁ ∧ ... ∧ Lₙ`.
///
/// `head` names an atom of [Derived](crate::structures::atom::AtomKind::Derived) kind.
/// Multiple rules may share the same head; each is an alternative support.
#[derive(Clone, Debug)]
pub struct Rule {
    pub head: Atom,
    pub body: Vec<Literal>,
}

impl Rule {
    pub fn new(head: Atom, body: Vec<Literal>) -> Self {
        Self { head, body }
    }

    /// The positive literals in the body: edges of the positive-body dependency graph used to
    /// find strongly-connected components for loop-formula support.
    pub fn positive_body_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.body.iter().filter(|l| l.polarity()).map(|l| l.atom())
    }
}

/*!
Literals: a signed atom id.

Unlike the teacher's dual `ABLiteral`/`IntLiteral` representation (kept for an incremental
CDCL data structure this library does not need), a single canonical representation is used
throughout: a literal is an atom paired with a polarity, convertible to and from the signed
integer form used when a clause is described as `min ≤ Σ literals ≤ max` over raw ids.
*/

use crate::structures::atom::Atom;

/// An atom or its negation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Literal {
    atom: Atom,
    polarity: bool,
}

impl Literal {
    pub fn new(atom: Atom, polarity: bool) -> Self {
        Self { atom, polarity }
    }

    /// Builds a literal directly from a signed atom id; id 0 is invalid and panics, matching
    /// the reserved-literal invariant from the data model.
    pub fn from_signed(id: i64) -> Self {
        assert!(id != 0, "literal 0 is reserved");
        Self {
            atom: Atom(id.unsigned_abs() as u32),
            polarity: id > 0,
        }
    }

    pub fn atom(&self) -> Atom {
        self.atom
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn negate(&self) -> Self {
        Self {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    /// `true` if this literal is satisfied by `value` (the current value of its atom).
    pub fn satisfied_by(&self, value: bool) -> bool {
        value == self.polarity
    }

    pub fn as_signed(&self) -> i64 {
        match self.polarity {
            true => self.atom.id() as i64,
            false => -(self.atom.id() as i64),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.polarity {
            write!(f, "-")?;
        }
        write!(f, "{}", self.atom)
    }
}

impl std::ops::Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_round_trips() {
        let a = Atom(7);
        let lit = Literal::new(a, true);
        assert_eq!(lit.negate().negate(), lit);
        assert_eq!(-lit, lit.negate());
    }

    #[test]
    fn satisfaction_matches_polarity() {
        let a = Atom(3);
        let pos = Literal::new(a, true);
        let neg = Literal::new(a, false);
        assert!(pos.satisfied_by(true));
        assert!(!pos.satisfied_by(false));
        assert!(neg.satisfied_by(false));
        assert!(!neg.satisfied_by(true));
    }
}

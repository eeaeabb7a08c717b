//! The "populate fields of a record from a solution" bridge (§2, glue surfaces): a caller
//! registers setters against the atom names it gave the builder, and `apply_bindings` projects
//! a solved model back into a caller-owned record without any reflection over its type.

use catsat::problem::{FieldBinder, Problem};
use catsat::structures::clause::Bound;

#[derive(Default, Debug, PartialEq)]
struct Character {
    brave: bool,
    cunning: bool,
}

#[test]
fn a_solution_is_projected_back_into_a_caller_record_by_name() {
    let mut problem = Problem::new();
    problem.new_atom("brave", None).unwrap();
    problem.new_atom("cunning", None).unwrap();
    problem.set_seed(3).unwrap();

    let solution = problem.solve().unwrap();

    let mut binder: FieldBinder<Character> = FieldBinder::new();
    binder.bind("brave", |c: &mut Character, v| c.brave = v);
    binder.bind("cunning", |c: &mut Character, v| c.cunning = v);

    let mut character = Character::default();
    problem
        .apply_bindings(&binder, &solution, &mut character)
        .unwrap();

    let brave_atom = problem.atoms().atom_named("brave").unwrap();
    let cunning_atom = problem.atoms().atom_named("cunning").unwrap();
    assert_eq!(character.brave, solution.get(brave_atom));
    assert_eq!(character.cunning, solution.get(cunning_atom));
}

#[test]
fn a_binding_against_an_unregistered_name_is_rejected() {
    let mut problem = Problem::new();
    let a = problem.new_atom("a", None).unwrap();
    problem
        .add_clause(1, Bound::Count(1), vec![a.pos()])
        .unwrap();

    let solution = problem.solve().unwrap();

    let mut binder: FieldBinder<Character> = FieldBinder::new();
    binder.bind("nonexistent", |c: &mut Character, v| c.brave = v);

    let mut character = Character::default();
    let err = problem
        .apply_bindings(&binder, &solution, &mut character)
        .unwrap_err();
    assert_eq!(
        err,
        catsat::types::err::InvalidProblem::UnknownAtomName("nonexistent".into())
    );
}

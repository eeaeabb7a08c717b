//! Clause-level soundness and the "exactly one" scenario (§8, scenario 1), plus the UNSAT
//! proof scenario (§8, scenario 6).

use catsat::problem::Problem;
use catsat::structures::clause::Bound;
use catsat::types::err::SolveError;

#[test]
fn exactly_one_of_three_is_always_satisfiable_and_sound() {
    for seed in 0..20 {
        let mut problem = Problem::new();
        let a = problem.new_atom("a", None).unwrap();
        let b = problem.new_atom("b", None).unwrap();
        let c = problem.new_atom("c", None).unwrap();
        problem
            .add_clause(1, Bound::Count(1), vec![a.pos(), b.pos(), c.pos()])
            .unwrap();
        problem.set_seed(seed).unwrap();

        let solution = problem.solve().unwrap();
        let true_count = [a, b, c].iter().filter(|atom| solution.get(**atom)).count();
        assert_eq!(true_count, 1, "seed {seed}: exactly one of a,b,c must hold");
    }
}

#[test]
fn exactly_one_eventually_reaches_every_single_positive_model() {
    let mut problem = Problem::new();
    let a = problem.new_atom("a", None).unwrap();
    let b = problem.new_atom("b", None).unwrap();
    let c = problem.new_atom("c", None).unwrap();
    problem
        .add_clause(1, Bound::Count(1), vec![a.pos(), b.pos(), c.pos()])
        .unwrap();
    problem.set_seed(11).unwrap();

    let mut seen = std::collections::HashSet::new();
    for solution in problem.solutions(3) {
        let solution = solution.unwrap();
        let which = [a, b, c].iter().position(|atom| solution.get(*atom)).unwrap();
        seen.insert(which);
    }
    assert_eq!(seen, [0, 1, 2].into_iter().collect());
}

#[test]
fn conflicting_unit_clauses_are_proved_unsatisfiable_without_search() {
    let mut problem = Problem::new();
    let a = problem.new_atom("a", None).unwrap();
    problem.add_clause(1, Bound::Count(1), vec![a.pos()]).unwrap();
    problem.add_clause(0, Bound::Count(0), vec![a.pos()]).unwrap();

    assert_eq!(problem.solve().unwrap_err(), SolveError::Unsatisfiable);
}

#[test]
fn a_clause_requiring_min_greater_than_width_is_rejected_at_construction() {
    let mut problem = Problem::new();
    let a = problem.new_atom("a", None).unwrap();
    let err = problem.add_clause(2, Bound::Count(1), vec![a.pos()]).unwrap_err();
    assert!(matches!(
        err,
        catsat::types::err::InvalidProblem::MinExceedsMax { min: 2, max: 1 }
    ));
}

//! Theory-solver coordination scenarios (§8): finite-domain exclusivity (scenario 3), float
//! interval narrowing (scenario 4), and menu restriction via inclusion (scenario 5).

use catsat::problem::Problem;
use catsat::structures::solution::TheoryValue;
use catsat::theories::finite_domain::FiniteDomainTheory;
use catsat::theories::float::{FloatProposition, FloatRelation, FloatTheory};
use catsat::theories::menu::{Inclusion, MenuTheory, MenuVariable};

#[test]
fn finite_domain_variable_commits_exactly_the_value_its_proposition_selects() {
    let mut problem = Problem::new();
    let v1 = problem.new_theory_atom("v=1").unwrap();
    let v2 = problem.new_theory_atom("v=2").unwrap();
    let v3 = problem.new_theory_atom("v=3").unwrap();

    let mut theory = FiniteDomainTheory::new();
    theory.add_variable(
        0,
        vec![
            (TheoryValue::Int(1), v1),
            (TheoryValue::Int(2), v2),
            (TheoryValue::Int(3), v3),
        ],
        None,
    );
    problem.register_theory_solver(Box::new(theory)).unwrap();

    let solution = problem.solve().unwrap();
    let true_count = [v1, v2, v3].iter().filter(|a| solution.get(**a)).count();
    assert_eq!(true_count, 1, "exactly one domain proposition must hold");

    let committed = solution.get_theory("finite_domain", 0).unwrap();
    let expected = match committed {
        TheoryValue::Int(1) => v1,
        TheoryValue::Int(2) => v2,
        TheoryValue::Int(3) => v3,
        other => panic!("unexpected committed value {other:?}"),
    };
    assert!(solution.get(expected));
}

#[test]
fn float_variable_is_sampled_inside_the_asserted_bounds() {
    let mut problem = Problem::new();
    let at_least_two = problem.new_atom("x_ge_2", None).unwrap();
    let at_most_five = problem.new_atom("x_le_5", None).unwrap();
    problem.fix(at_least_two, true).unwrap();
    problem.fix(at_most_five, true).unwrap();

    let mut theory = FloatTheory::new();
    theory.add_variable(0, (0.0, 10.0));
    theory.add_proposition(FloatProposition {
        literal: at_least_two.pos(),
        variable: 0,
        relation: FloatRelation::GeConst(2.0),
    });
    theory.add_proposition(FloatProposition {
        literal: at_most_five.pos(),
        variable: 0,
        relation: FloatRelation::LeConst(5.0),
    });
    problem.register_theory_solver(Box::new(theory)).unwrap();

    let solution = problem.solve().unwrap();
    let value = match solution.get_theory("float", 0).unwrap() {
        TheoryValue::Float(v) => *v,
        other => panic!("unexpected committed value {other:?}"),
    };
    assert!((2.0..=5.0).contains(&value), "sampled {value} out of bounds");
}

#[test]
fn menu_variable_with_no_base_menu_is_restricted_to_its_asserted_inclusion() {
    let mut problem = Problem::new();
    let include_cd = problem.new_atom("include_cd", None).unwrap();
    problem.fix(include_cd, true).unwrap();

    let mut theory = MenuTheory::new();
    theory.add_variable(MenuVariable {
        id: 0,
        base_menu: None,
        inclusions: vec![Inclusion {
            proposition: include_cd.pos(),
            menu: vec![TheoryValue::Symbol("C".into()), TheoryValue::Symbol("D".into())],
        }],
        condition: None,
    });
    problem.register_theory_solver(Box::new(theory)).unwrap();

    let solution = problem.solve().unwrap();
    let committed = solution.get_theory("menu", 0).unwrap();
    assert!(
        matches!(committed, TheoryValue::Symbol(s) if s == "C" || s == "D"),
        "expected a value from the asserted inclusion, got {committed:?}"
    );
}

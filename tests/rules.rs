//! The stable-model support invariant (§8): a derived atom that is true in a returned solution
//! always has a satisfied rule body backing it, zero-rule derived atoms collapse to false, and
//! unsupported cycles are forbidden.

use catsat::problem::Problem;

#[test]
fn derived_atom_is_forced_true_once_its_only_rule_bodys_trigger_is_fixed() {
    let mut problem = Problem::new();
    let trigger = problem.new_atom("trigger", None).unwrap();
    let active = problem.new_derived_atom("active").unwrap();
    problem.add_rule(active, vec![trigger.pos()]).unwrap();
    problem.fix(trigger, true).unwrap();

    let solution = problem.solve().unwrap();
    assert!(solution.get(trigger));
    assert!(solution.get(active), "active must follow its only support");
}

#[test]
fn derived_atom_with_zero_rules_is_always_false() {
    let mut problem = Problem::new();
    let orphan = problem.new_derived_atom("orphan").unwrap();
    let filler = problem.new_atom("filler", None).unwrap();
    problem.fix(filler, true).unwrap();

    let solution = problem.solve().unwrap();
    assert!(!solution.get(orphan));
}

#[test]
fn an_unsupported_cycle_is_forced_false_on_both_sides() {
    let mut problem = Problem::new();
    let p = problem.new_derived_atom("p").unwrap();
    let q = problem.new_derived_atom("q").unwrap();
    problem.add_rule(p, vec![q.pos()]).unwrap();
    problem.add_rule(q, vec![p.pos()]).unwrap();

    let solution = problem.solve().unwrap();
    assert!(!solution.get(p));
    assert!(!solution.get(q));
}

#[test]
fn a_rule_head_on_a_non_derived_atom_is_rejected() {
    let mut problem = Problem::new();
    let plain = problem.new_atom("plain", None).unwrap();
    let body = problem.new_atom("body", None).unwrap();
    let err = problem.add_rule(plain, vec![body.pos()]).unwrap_err();
    assert!(matches!(
        err,
        catsat::types::err::InvalidProblem::RuleHeadNotDerived(_)
    ));
}

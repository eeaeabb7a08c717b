//! The grounder's toy planning scenario (§8, scenario 2): two rooms, a `goto` action moving
//! between them across a two-timepoint horizon, and frame axioms tying the fluent's transition
//! to whichever action rule supports it.

use catsat::grounder::{Action, Effect, Fluent};
use catsat::problem::Problem;
use catsat::structures::clause::Bound;

#[test]
fn the_planner_moves_the_agent_from_room1_to_room2() {
    let rooms = ["room1".to_string(), "room2".to_string()];
    let mut problem = Problem::new();

    let mut at = Fluent::new("at", 2);
    let mut goto = Action::new("goto");

    {
        let (atoms, _clauses) = problem.grounding_context().unwrap();
        for room in &rooms {
            at.ground(std::slice::from_ref(room), atoms).unwrap();
        }
        for room in &rooms {
            goto.ground(std::slice::from_ref(room), 0, atoms).unwrap();
        }
    }

    {
        let (atoms, clauses) = problem.grounding_context().unwrap();
        at.emit_frame_axioms(clauses, atoms).unwrap();
        for room in &rooms {
            goto.add_effect(
                std::slice::from_ref(room),
                0,
                Effect::Activate,
                &at,
                std::slice::from_ref(room),
                clauses,
                atoms,
            )
            .unwrap();
        }
    }

    // exactly one goto at t=0
    let goto_room1 = goto.at(&[rooms[0].clone()], 0).unwrap();
    let goto_room2 = goto.at(&[rooms[1].clone()], 0).unwrap();
    problem
        .add_clause(1, Bound::Count(1), vec![goto_room1.pos(), goto_room2.pos()])
        .unwrap();

    // start state: at room1, not at room2
    let at_room1_t0 = at.at(&[rooms[0].clone()], 0).unwrap();
    let at_room2_t0 = at.at(&[rooms[1].clone()], 0).unwrap();
    problem.fix(at_room1_t0, true).unwrap();
    problem.fix(at_room2_t0, false).unwrap();

    // goal: at room2 by t=1
    let at_room2_t1 = at.at(&[rooms[1].clone()], 1).unwrap();
    problem.fix(at_room2_t1, true).unwrap();

    let solution = problem.solve().unwrap();
    assert!(solution.get(at_room2_t1));
    assert!(solution.get(goto_room2), "the plan must actually move via goto(room2)");
    assert!(!solution.get(goto_room1));
}

//! State transitions and plan replay.
//!
//! `apply` is the hot path used by expansion and trusts its caller.
//! `replay` and `verify_plan` check every step and are meant for plans that
//! come from outside the solver.

use crate::error::PlanError;
use crate::problem::Problem;
use crate::state::{Bank, Margin, Operator, State};

/// Ferry `operator` from the boat's bank to the other one.
///
/// The operator must be feasible for `state`; an infeasible one is a bug in
/// the caller.
pub fn apply(state: &State, operator: Operator) -> State {
    debug_assert!(
        state.boat_bank().can_supply(operator),
        "operator {operator} is infeasible in {state}"
    );

    let (left_bank, right_bank) = match state.margin {
        Margin::Left => (
            depart(state.left_bank, operator),
            arrive(state.right_bank, operator),
        ),
        Margin::Right => (
            arrive(state.left_bank, operator),
            depart(state.right_bank, operator),
        ),
    };

    State::new(left_bank, right_bank, state.margin.opposite())
}

fn depart(bank: Bank, operator: Operator) -> Bank {
    Bank::new(
        bank.missionaries - operator.missionaries,
        bank.cannibals - operator.cannibals,
    )
}

fn arrive(bank: Bank, operator: Operator) -> Bank {
    Bank::new(
        bank.missionaries + operator.missionaries,
        bank.cannibals + operator.cannibals,
    )
}

/// Apply `plan` from the problem's initial state, checking each step.
///
/// Returns every state visited, starting with the initial one.
pub fn replay(problem: &Problem, plan: &[Operator]) -> Result<Vec<State>, PlanError> {
    let capacity = u64::from(problem.config().boat_capacity);
    let mut state = problem.initial_state();
    let mut states = Vec::with_capacity(plan.len() + 1);
    states.push(state);

    for (step, &operator) in plan.iter().enumerate() {
        if operator.passengers() == 0
            || operator.passengers() > capacity
            || !operator.is_safe_load()
        {
            return Err(PlanError::InvalidLoad { step, operator });
        }
        if !state.boat_bank().can_supply(operator) {
            return Err(PlanError::Infeasible {
                step,
                operator,
                state,
            });
        }

        state = apply(&state, operator);
        if !state.is_safe() {
            return Err(PlanError::Unsafe {
                step,
                operator,
                state,
            });
        }
        states.push(state);
    }

    Ok(states)
}

/// Replay `plan` and require it to finish exactly at the goal
pub fn verify_plan(problem: &Problem, plan: &[Operator]) -> Result<Vec<State>, PlanError> {
    let states = replay(problem, plan)?;
    let reached = states.last().copied().unwrap_or_else(|| problem.initial_state());
    if !problem.is_goal(&reached) {
        return Err(PlanError::NotAtGoal {
            reached,
            goal: problem.goal_state(),
        });
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Enumeration;
    use crate::problem::ProblemConfig;

    fn classic() -> Problem {
        Problem::new(ProblemConfig::default(), Enumeration::Exhaustive).unwrap()
    }

    fn plan(pairs: &[(u32, u32)]) -> Vec<Operator> {
        pairs.iter().map(|&(m, c)| Operator::new(m, c)).collect()
    }

    const CLASSIC_SOLUTION: [(u32, u32); 11] = [
        (1, 1),
        (1, 0),
        (0, 2),
        (0, 1),
        (2, 0),
        (1, 1),
        (2, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 1),
    ];

    #[test]
    fn test_apply_moves_people_and_boat() {
        let start = State::new(Bank::new(3, 3), Bank::EMPTY, Margin::Left);
        let next = apply(&start, Operator::new(1, 1));
        assert_eq!(next, State::new(Bank::new(2, 2), Bank::new(1, 1), Margin::Right));

        let back = apply(&next, Operator::new(1, 0));
        assert_eq!(back, State::new(Bank::new(3, 2), Bank::new(0, 1), Margin::Left));
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let start = State::new(Bank::new(2, 2), Bank::new(1, 1), Margin::Right);
        let copy = start;
        let _ = apply(&start, Operator::new(0, 1));
        assert_eq!(start, copy);
    }

    #[test]
    fn test_verify_classic_solution() {
        let problem = classic();
        let states = verify_plan(&problem, &plan(&CLASSIC_SOLUTION)).unwrap();
        assert_eq!(states.len(), 12);
        assert!(states.iter().all(|s| s.is_safe() && problem.conserves(s)));
        assert_eq!(states.last(), Some(&problem.goal_state()));
    }

    #[test]
    fn test_replay_rejects_unsafe_step() {
        let err = replay(&classic(), &plan(&[(2, 0)])).unwrap_err();
        assert!(matches!(err, PlanError::Unsafe { step: 0, .. }));
    }

    #[test]
    fn test_replay_rejects_infeasible_step() {
        // Boat is on the right with one missionary there
        let err = replay(&classic(), &plan(&[(1, 1), (2, 0)])).unwrap_err();
        assert!(matches!(err, PlanError::Infeasible { step: 1, .. }));
    }

    #[test]
    fn test_replay_rejects_bad_loads() {
        let err = replay(&classic(), &plan(&[(0, 0)])).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLoad { step: 0, .. }));

        let err = replay(&classic(), &plan(&[(0, 3)])).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLoad { step: 0, .. }));
    }

    #[test]
    fn test_replay_rejects_load_beyond_u32_range() {
        let err = replay(&classic(), &plan(&[(u32::MAX, 1)])).unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidLoad {
                step: 0,
                operator: Operator::new(u32::MAX, 1),
            }
        );
    }

    #[test]
    fn test_verify_requires_goal() {
        let err = verify_plan(&classic(), &plan(&CLASSIC_SOLUTION[..3])).unwrap_err();
        assert!(matches!(err, PlanError::NotAtGoal { .. }));

        let err = verify_plan(&classic(), &[]).unwrap_err();
        assert!(matches!(err, PlanError::NotAtGoal { .. }));
    }
}

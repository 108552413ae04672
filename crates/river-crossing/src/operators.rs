//! Operator catalog and the legality rules applied during expansion.
//!
//! The catalog is built once per problem. Each expansion then narrows it
//! twice: first to the loads the boat's bank can actually supply, then to
//! the loads that leave both banks safe after the crossing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::problem::{Problem, ProblemConfig};
use crate::state::{Bank, Operator, State};
use crate::transition::apply;

/// Operators legal from a single state. Boats rarely carry more than a
/// handful of people, so this almost never spills to the heap.
pub type Operators = SmallVec<[Operator; 8]>;

/// How the structural operator catalog is enumerated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Enumeration {
    /// Every `(m, c)` with `1 <= m + c <= capacity` and a safe boat load
    #[default]
    Exhaustive,
    /// Row-by-row scan that stops a row at its first rejected load, followed
    /// by a separate pass adding every pure-cannibal load up to capacity
    ReferenceScan,
}

/// Build the sorted, deduplicated operator catalog for `config`
pub fn enumerate_operators(config: &ProblemConfig, enumeration: Enumeration) -> Vec<Operator> {
    let mut catalog = match enumeration {
        Enumeration::Exhaustive => exhaustive_catalog(config),
        Enumeration::ReferenceScan => reference_scan_catalog(config),
    };
    catalog.sort_unstable();
    catalog.dedup();
    catalog
}

fn exhaustive_catalog(config: &ProblemConfig) -> Vec<Operator> {
    // Loads beyond the population can never be supplied, so they are not listed.
    let max_missionaries = config.boat_capacity.min(config.missionaries);
    let mut catalog = Vec::new();

    for missionaries in 0..=max_missionaries {
        let max_cannibals = (config.boat_capacity - missionaries).min(config.cannibals);
        for cannibals in 0..=max_cannibals {
            let operator = Operator::new(missionaries, cannibals);
            if operator.passengers() > 0 && operator.is_safe_load() {
                catalog.push(operator);
            }
        }
    }

    catalog
}

fn reference_scan_catalog(config: &ProblemConfig) -> Vec<Operator> {
    let mut catalog = Vec::new();

    for missionaries in 0..=config.missionaries {
        for cannibals in 0..=config.cannibals {
            let operator = Operator::new(missionaries, cannibals);
            // The empty load ends the whole missionary-free row.
            if operator.passengers() == 0
                || operator.passengers() > u64::from(config.boat_capacity)
                || !operator.is_safe_load()
            {
                break;
            }
            catalog.push(operator);
        }
    }

    for cannibals in 1..=config.boat_capacity {
        catalog.push(Operator::new(0, cannibals));
    }

    catalog
}

/// Whether `bank` holds enough people for the load
pub fn is_feasible(operator: Operator, bank: &Bank) -> bool {
    bank.can_supply(operator)
}

/// Whether crossing with `operator` keeps both banks safe.
///
/// Callers must check feasibility first.
pub fn is_safe_crossing(operator: Operator, state: &State) -> bool {
    apply(state, operator).is_safe()
}

/// Operators from the catalog that are feasible and safe in `state`
pub fn legal_operators(problem: &Problem, state: &State) -> Operators {
    let bank = state.boat_bank();

    problem
        .catalog()
        .iter()
        .copied()
        .filter(|&operator| is_feasible(operator, bank))
        .filter(|&operator| is_safe_crossing(operator, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Margin;
    use rstest::rstest;
    use std::collections::{HashSet, VecDeque};

    fn config(missionaries: u32, cannibals: u32, boat_capacity: u32) -> ProblemConfig {
        ProblemConfig {
            missionaries,
            cannibals,
            boat_capacity,
            initial_margin: Margin::Left,
        }
    }

    fn ops(pairs: &[(u32, u32)]) -> Vec<Operator> {
        pairs.iter().map(|&(m, c)| Operator::new(m, c)).collect()
    }

    #[test]
    fn test_classic_catalog() {
        let catalog = enumerate_operators(&config(3, 3, 2), Enumeration::Exhaustive);
        assert_eq!(catalog, ops(&[(0, 1), (0, 2), (1, 0), (1, 1), (2, 0)]));
    }

    #[test]
    fn test_catalog_excludes_outnumbered_boat() {
        let catalog = enumerate_operators(&config(3, 3, 3), Enumeration::Exhaustive);
        assert!(!catalog.contains(&Operator::new(1, 2)));
        assert!(catalog.contains(&Operator::new(2, 1)));
        assert!(catalog.contains(&Operator::new(0, 3)));
        assert!(catalog.contains(&Operator::new(3, 0)));
    }

    #[test]
    fn test_reference_scan_adds_pure_cannibal_loads_up_to_capacity() {
        // The second pass ignores the population, the exhaustive catalog does not.
        let reference = enumerate_operators(&config(1, 1, 3), Enumeration::ReferenceScan);
        assert_eq!(reference, ops(&[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1)]));

        let exhaustive = enumerate_operators(&config(1, 1, 3), Enumeration::Exhaustive);
        assert_eq!(exhaustive, ops(&[(0, 1), (1, 0), (1, 1)]));
    }

    /// The row scan stops at its first rejected load, but both rejection
    /// rules are monotone in the cannibal count, so the break only skips
    /// loads that would be rejected anyway. The legal operators therefore
    /// match the exhaustive catalog on every reachable state.
    #[rstest]
    #[case(3, 3, 2)]
    #[case(3, 3, 3)]
    #[case(4, 4, 3)]
    #[case(5, 5, 4)]
    #[case(2, 4, 5)]
    #[case(0, 3, 2)]
    fn test_reference_scan_matches_exhaustive_legal_sets(
        #[case] missionaries: u32,
        #[case] cannibals: u32,
        #[case] boat_capacity: u32,
    ) {
        let cfg = config(missionaries, cannibals, boat_capacity);
        let exhaustive = Problem::new(cfg, Enumeration::Exhaustive).unwrap();
        let reference = Problem::new(cfg, Enumeration::ReferenceScan).unwrap();

        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([exhaustive.initial_state()]);
        seen.insert(exhaustive.initial_state());

        while let Some(state) = queue.pop_front() {
            let legal = legal_operators(&exhaustive, &state);
            assert_eq!(legal, legal_operators(&reference, &state), "state {state}");
            for operator in legal {
                let next = apply(&state, operator);
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    #[test]
    fn test_legal_operators_from_classic_start() {
        let problem = Problem::new(config(3, 3, 2), Enumeration::Exhaustive).unwrap();
        let legal = legal_operators(&problem, &problem.initial_state());
        // (1,0) and (2,0) leave the left bank outnumbered
        assert_eq!(legal.to_vec(), ops(&[(0, 1), (0, 2), (1, 1)]));
    }

    #[test]
    fn test_feasibility_uses_boat_side() {
        let problem = Problem::new(config(3, 3, 2), Enumeration::Exhaustive).unwrap();
        let state = State::new(Bank::new(3, 1), Bank::new(0, 2), Margin::Right);
        let legal = legal_operators(&problem, &state);
        assert_eq!(legal.to_vec(), ops(&[(0, 1), (0, 2)]));
    }

    #[test]
    fn test_zero_missionaries_has_no_safety_constraint() {
        let problem = Problem::new(config(0, 3, 2), Enumeration::Exhaustive).unwrap();
        let legal = legal_operators(&problem, &problem.initial_state());
        assert_eq!(legal.to_vec(), ops(&[(0, 1), (0, 2)]));
    }
}

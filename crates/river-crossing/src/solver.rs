//! Breadth-first search driver.
//!
//! The driver seeds the frontier with the root, then repeatedly dequeues a
//! node, tests it against the goal and otherwise expands it. Children whose
//! state was already enqueued are dropped, so each state is expanded at most
//! once and the first goal dequeued is at minimum depth.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{Error, SearchError};
use crate::frontier::Frontier;
use crate::operators::Enumeration;
use crate::problem::{Problem, ProblemConfig};
use crate::state::{Operator, Plan, State};
use crate::tree::{Node, SearchTree};

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// How the operator catalog is enumerated
    pub enumeration: Enumeration,
    /// Stop after this many expansions
    pub max_expansions: Option<usize>,
    /// Record every visited and generated state
    pub record_trace: bool,
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SearchOutcome {
    /// A shortest plan to the goal
    Solved { plan: Plan },
    /// Every reachable state was expanded without meeting the goal
    Exhausted,
    /// `max_expansions` was reached first
    BudgetExceeded { expansions: usize },
}

impl SearchOutcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Solved { plan } => Some(plan),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved { .. })
    }
}

/// Counters collected during a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub duplicates_skipped: usize,
    pub states_visited: usize,
    pub frontier_high_water: usize,
    pub time_elapsed_ms: u64,
}

/// One step of a recorded search trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TraceEvent {
    /// A node was taken off the frontier
    Visit { depth: u32, state: State },
    /// A child was produced by expanding the last visited node
    Generate {
        operator: Operator,
        state: State,
        duplicate: bool,
    },
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Empty unless `record_trace` was set
    pub trace: Vec<TraceEvent>,
}

fn check_invariants(problem: &Problem, state: &State) -> Result<(), SearchError> {
    let violation = if !problem.conserves(state) {
        Some("population is not conserved")
    } else if !state.is_safe() {
        Some("a bank is unsafe")
    } else {
        None
    };

    debug_assert!(
        violation.is_none(),
        "generated state {state} breaks an invariant: {violation:?}"
    );
    match violation {
        Some(reason) => Err(SearchError::InvariantViolation {
            state: *state,
            reason,
        }),
        None => Ok(()),
    }
}

/// Find a shortest plan for an already validated problem
pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<SolverResult, SearchError> {
    let start_time = Instant::now();

    let mut stats = SearchStats::default();
    let mut trace = Vec::new();
    let mut tree = SearchTree::new();
    let mut frontier = Frontier::new();

    let root = tree.insert(Node::root(problem.initial_state()));
    frontier.enqueue(root, problem.initial_state());

    let outcome = loop {
        let Ok(id) = frontier.dequeue() else {
            break SearchOutcome::Exhausted;
        };
        let node = *tree.get(id);

        if config.record_trace {
            trace.push(TraceEvent::Visit {
                depth: node.depth,
                state: node.state,
            });
        }

        if problem.is_goal(&node.state) {
            break SearchOutcome::Solved {
                plan: tree.reconstruct_plan(id),
            };
        }

        if config
            .max_expansions
            .is_some_and(|limit| stats.nodes_expanded >= limit)
        {
            break SearchOutcome::BudgetExceeded {
                expansions: stats.nodes_expanded,
            };
        }

        stats.nodes_expanded += 1;

        for child in tree.expand(id, problem) {
            check_invariants(problem, &child.state)?;
            stats.nodes_generated += 1;

            let duplicate = frontier.is_visited(&child.state);
            if config.record_trace {
                if let Some(operator) = child.operator {
                    trace.push(TraceEvent::Generate {
                        operator,
                        state: child.state,
                        duplicate,
                    });
                }
            }

            if duplicate {
                stats.duplicates_skipped += 1;
                continue;
            }
            let child_id = tree.insert(child);
            frontier.enqueue(child_id, child.state);
        }
    };

    stats.states_visited = frontier.visited_count();
    stats.frontier_high_water = frontier.high_water();
    stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;

    Ok(SolverResult {
        outcome,
        stats,
        trace,
    })
}

/// Validate `problem`, then search it
pub fn solve_config(problem: ProblemConfig, config: &SolverConfig) -> Result<SolverResult, Error> {
    let problem = Problem::new(problem, config.enumeration)?;
    Ok(solve(&problem, config)?)
}

//! Breadth-first solver for the missionaries and cannibals river crossing.
//!
//! Given how many missionaries and cannibals start on one bank and how many
//! people the boat holds, the solver finds a shortest sequence of crossings
//! that moves everyone to the other bank without ever leaving missionaries
//! outnumbered on either side.

pub mod error;
pub mod frontier;
pub mod operators;
pub mod problem;
pub mod solver;
pub mod state;
pub mod transition;
pub mod tree;

// Re-export main types
pub use error::{ConfigError, EmptyFrontier, Error, PlanError, SearchError};
pub use operators::{enumerate_operators, legal_operators, Enumeration};
pub use problem::{Problem, ProblemConfig};
pub use solver::{solve, solve_config, SearchOutcome, SearchStats, SolverConfig, SolverResult, TraceEvent};
pub use state::{Bank, Margin, Operator, Plan, State};
pub use transition::{apply, replay, verify_plan};

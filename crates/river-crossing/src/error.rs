//! Error types for configuration, search and plan verification.

use thiserror::Error;

use crate::state::{Operator, State};

/// Rejected problem configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("boat capacity must be at least 1")]
    ZeroBoatCapacity,
    #[error("there must be at least one missionary or cannibal to ferry")]
    EmptyPopulation,
    #[error("unrecognized margin {0:?} (expected left/esquerda or right/direita)")]
    UnknownMargin(String),
}

/// Defect detected while the search was running
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("generated state {state} breaks an invariant: {reason}")]
    InvariantViolation { state: State, reason: &'static str },
}

/// The frontier had nothing left to hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frontier is empty")]
pub struct EmptyFrontier;

/// Why a plan does not solve a problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("step {step}: operator {operator} needs more people than {state} offers")]
    Infeasible {
        step: usize,
        operator: Operator,
        state: State,
    },
    #[error("step {step}: operator {operator} is not an allowed boat load")]
    InvalidLoad { step: usize, operator: Operator },
    #[error("step {step}: operator {operator} leaves an unsafe bank in {state}")]
    Unsafe {
        step: usize,
        operator: Operator,
        state: State,
    },
    #[error("plan ends in {reached}, not the goal {goal}")]
    NotAtGoal { reached: State, goal: State },
}

/// Any failure of a full solve, from configuration to search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

//! Problem configuration and the validated problem instance.
//!
//! `ProblemConfig` is the raw input (CLI flags or JSON). `Problem` is built
//! from it once per search and owns everything derived from the config: the
//! operator catalog and the initial and goal states.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::operators::{enumerate_operators, Enumeration};
use crate::state::{Bank, Margin, Operator, State};

/// Raw puzzle parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemConfig {
    pub missionaries: u32,
    pub cannibals: u32,
    pub boat_capacity: u32,
    #[serde(default = "default_margin")]
    pub initial_margin: Margin,
}

fn default_margin() -> Margin {
    Margin::Left
}

impl Default for ProblemConfig {
    /// The classic three missionaries, three cannibals, two-seat boat
    fn default() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            boat_capacity: 2,
            initial_margin: Margin::Left,
        }
    }
}

impl ProblemConfig {
    /// Reject configurations the search cannot meaningfully run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boat_capacity == 0 {
            return Err(ConfigError::ZeroBoatCapacity);
        }
        if self.missionaries == 0 && self.cannibals == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Ok(())
    }

    fn everyone(&self) -> Bank {
        Bank::new(self.missionaries, self.cannibals)
    }

    /// Everyone and the boat on the starting side
    pub fn initial_state(&self) -> State {
        match self.initial_margin {
            Margin::Left => State::new(self.everyone(), Bank::EMPTY, Margin::Left),
            Margin::Right => State::new(Bank::EMPTY, self.everyone(), Margin::Right),
        }
    }

    /// Everyone and the boat on the far side
    pub fn goal_state(&self) -> State {
        match self.initial_margin {
            Margin::Left => State::new(Bank::EMPTY, self.everyone(), Margin::Right),
            Margin::Right => State::new(self.everyone(), Bank::EMPTY, Margin::Left),
        }
    }
}

/// A validated problem ready to be searched
#[derive(Debug, Clone)]
pub struct Problem {
    config: ProblemConfig,
    catalog: Vec<Operator>,
    initial: State,
    goal: State,
}

impl Problem {
    /// Validate `config` and enumerate its operator catalog
    pub fn new(config: ProblemConfig, enumeration: Enumeration) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog: enumerate_operators(&config, enumeration),
            initial: config.initial_state(),
            goal: config.goal_state(),
            config,
        })
    }

    pub fn config(&self) -> &ProblemConfig {
        &self.config
    }

    /// Structurally valid operators, independent of any state
    pub fn catalog(&self) -> &[Operator] {
        &self.catalog
    }

    pub fn initial_state(&self) -> State {
        self.initial
    }

    pub fn goal_state(&self) -> State {
        self.goal
    }

    /// Exact match on both banks and the boat position
    pub fn is_goal(&self, state: &State) -> bool {
        *state == self.goal
    }

    /// Population is conserved across both banks
    pub fn conserves(&self, state: &State) -> bool {
        state.conserves(self.config.missionaries, self.config.cannibals)
    }
}

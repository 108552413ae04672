//! FIFO frontier with visited-state deduplication.

use std::collections::{HashSet, VecDeque};

use crate::error::EmptyFrontier;
use crate::state::State;
use crate::tree::NodeId;

/// Breadth-first frontier.
///
/// A state is marked visited when it is first enqueued, so each state enters
/// the queue at most once and at its shallowest depth.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<NodeId>,
    visited: HashSet<State>,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` unless `state` was already seen.
    ///
    /// Returns `false` if the state was a duplicate and nothing was added.
    pub fn enqueue(&mut self, node: NodeId, state: State) -> bool {
        if !self.visited.insert(state) {
            return false;
        }
        self.queue.push_back(node);
        self.high_water = self.high_water.max(self.queue.len());
        true
    }

    /// Remove the earliest-enqueued node
    pub fn dequeue(&mut self) -> Result<NodeId, EmptyFrontier> {
        self.queue.pop_front().ok_or(EmptyFrontier)
    }

    pub fn is_visited(&self, state: &State) -> bool {
        self.visited.contains(state)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest queue length seen so far
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of distinct states ever enqueued
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

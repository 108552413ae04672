//! Search tree stored as an arena of nodes.
//!
//! Nodes only point at their parent, by index, so the arena is the single
//! owner and dropping it releases the whole tree at once.

use smallvec::SmallVec;

use crate::operators::legal_operators;
use crate::problem::Problem;
use crate::state::{Operator, Plan, State};
use crate::transition::apply;

/// Index of a node in its `SearchTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A state together with how the search reached it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub state: State,
    /// `None` only for the root
    pub parent: Option<NodeId>,
    /// Operator applied to the parent; `None` only for the root
    pub operator: Option<Operator>,
    pub depth: u32,
}

impl Node {
    pub fn root(state: State) -> Self {
        Self {
            state,
            parent: None,
            operator: None,
            depth: 0,
        }
    }
}

/// Children of one expansion, not yet stored in the tree
pub type Children = SmallVec<[Node; 8]>;

#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node` and return its id
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// One child per legal operator from the node's state
    pub fn expand(&self, id: NodeId, problem: &Problem) -> Children {
        let node = self.get(id);

        legal_operators(problem, &node.state)
            .into_iter()
            .map(|operator| Node {
                state: apply(&node.state, operator),
                parent: Some(id),
                operator: Some(operator),
                depth: node.depth + 1,
            })
            .collect()
    }

    /// Operators from the root down to `id`
    pub fn reconstruct_plan(&self, id: NodeId) -> Plan {
        let mut plan = Vec::with_capacity(self.get(id).depth as usize);
        let mut current = Some(id);

        while let Some(id) = current {
            let node = self.get(id);
            if let Some(operator) = node.operator {
                plan.push(operator);
            }
            current = node.parent;
        }

        plan.reverse();
        plan
    }
}

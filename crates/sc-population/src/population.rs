//! `Agent` and the `Population` that owns them.

use sc_core::{AgentId, NodeId};

use crate::plan::Plan;

/// A synthetic traveller.  Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:   AgentId,
    pub home: NodeId,
    pub work: NodeId,
    pub plan: Plan,
}

/// Agents indexed by `AgentId`.
///
/// Ids are assigned by [`push`](Self::push) in insertion order starting at 0,
/// so `agents[i].id == AgentId(i)` always holds.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { agents: Vec::with_capacity(n) }
    }

    /// Append an agent with the next sequential id and return that id.
    pub fn push(&mut self, home: NodeId, work: NodeId, plan: Plan) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent { id, home, work, plan });
        id
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}

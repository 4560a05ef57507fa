//! In-memory registry of the fixed agent pool.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{AgentId, UserId};

use super::types::{AgentRecord, AgentStatus, ReplyMode};

/// Tracks every configured agent's live state.
///
/// The pool is established at construction and never changes. Scan order is
/// the configuration order, which makes assignment deterministic: the first
/// idle agent in that order wins.
#[derive(Debug)]
pub struct AgentRegistry {
    /// Pool members in configuration order.
    order: Vec<AgentId>,
    records: HashMap<AgentId, AgentRecord>,
}

impl AgentRegistry {
    /// Build the registry from the configured pool, keeping order and
    /// skipping duplicate identities.
    pub fn new(pool: &[AgentId]) -> Self {
        let mut order = Vec::with_capacity(pool.len());
        let mut records = HashMap::with_capacity(pool.len());
        for &agent in pool {
            if records.insert(agent, AgentRecord::new(agent)).is_none() {
                order.push(agent);
            }
        }
        Self { order, records }
    }

    /// Whether the identity belongs to the configured pool.
    pub fn contains(&self, agent: AgentId) -> bool {
        self.records.contains_key(&agent)
    }

    /// The record for one agent.
    pub fn get(&self, agent: AgentId) -> Option<&AgentRecord> {
        self.records.get(&agent)
    }

    /// First idle agent in configuration order, if any.
    pub fn first_idle(&self) -> Option<AgentId> {
        self.order
            .iter()
            .copied()
            .find(|agent| self.status(*agent) == Some(AgentStatus::Idle))
    }

    /// Current availability of one agent.
    pub fn status(&self, agent: AgentId) -> Option<AgentStatus> {
        self.records.get(&agent).map(|record| record.status)
    }

    /// Flip an agent's availability. Unknown identities are ignored.
    pub fn set_status(&mut self, agent: AgentId, status: AgentStatus) {
        if let Some(record) = self.records.get_mut(&agent) {
            debug!("agent {} status {} -> {}", agent, record.status, status);
            record.status = status;
        }
    }

    /// The user an agent's next authored reply goes to.
    pub fn reply_target(&self, agent: AgentId) -> Option<UserId> {
        self.records.get(&agent).and_then(|record| record.reply_target)
    }

    /// Point (or clear) an agent's reply-target. Unknown identities are
    /// ignored.
    pub fn set_reply_target(&mut self, agent: AgentId, target: Option<UserId>) {
        if let Some(record) = self.records.get_mut(&agent) {
            record.reply_target = target;
        }
    }

    /// Where an agent stands in the reply flow.
    pub fn mode(&self, agent: AgentId) -> Option<ReplyMode> {
        self.records.get(&agent).map(|record| record.mode)
    }

    /// Move an agent through the reply flow. Unknown identities are ignored.
    pub fn set_mode(&mut self, agent: AgentId, mode: ReplyMode) {
        if let Some(record) = self.records.get_mut(&agent) {
            debug!("agent {} reply mode {} -> {}", agent, record.mode, mode);
            record.mode = mode;
        }
    }

    /// First agent (in configuration order) whose reply-target points at the
    /// given user.
    pub fn find_by_reply_target(&self, user: UserId) -> Option<AgentId> {
        self.order
            .iter()
            .copied()
            .find(|agent| self.reply_target(*agent) == Some(user))
    }

    /// Pool members in configuration order.
    pub fn ids(&self) -> &[AgentId] {
        &self.order
    }

    /// Number of configured agents.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of agents currently idle.
    pub fn idle_count(&self) -> usize {
        self.order
            .iter()
            .filter(|agent| self.status(**agent) == Some(AgentStatus::Idle))
            .count()
    }
}

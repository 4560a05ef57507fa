//! Agent state types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{AgentId, UserId};

/// Availability of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    /// Free to take the next user.
    Idle,
    /// Currently serving a session.
    Busy,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Busy => write!(f, "busy"),
        }
    }
}

/// The two-state reply flow of an agent.
///
/// Pressing a reply control moves the agent to [`ReplyMode::AwaitingReply`];
/// their next message resolves it and moves them back to
/// [`ReplyMode::Normal`]. There is no timeout: an agent that never types
/// stays in reply mode until they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyMode {
    /// Not composing a reply; plain messages from the agent are ignored.
    Normal,
    /// The agent's next message is a reply to their reply-target.
    AwaitingReply,
}

impl fmt::Display for ReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyMode::Normal => write!(f, "normal"),
            ReplyMode::AwaitingReply => write!(f, "awaiting-reply"),
        }
    }
}

/// Live state of one agent in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// The agent's identity.
    pub id: AgentId,
    /// Current availability.
    pub status: AgentStatus,
    /// The user the agent's next authored reply goes to.
    pub reply_target: Option<UserId>,
    /// Where the agent stands in the reply flow.
    pub mode: ReplyMode,
}

impl AgentRecord {
    /// Create a fresh record: idle, no reply-target, normal mode.
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            status: AgentStatus::Idle,
            reply_target: None,
            mode: ReplyMode::Normal,
        }
    }
}

//! Engine configuration.
//!
//! Configuration is consumed once at construction. The engine has no
//! mechanism to change it afterwards; in particular the agent pool is fixed
//! for the life of the process.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LiveChatError, Result};
use crate::types::AgentId;

/// Top-level configuration for the live chat engine.
///
/// # Examples
///
/// ```
/// use livedesk_chat_engine::config::LiveChatConfig;
///
/// let config = LiveChatConfig::with_agents([101, 102]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveChatConfig {
    /// Human-readable service name, used in logs.
    pub service_name: String,

    /// The fixed agent pool.
    pub agents: AgentPoolConfig,
}

impl Default for LiveChatConfig {
    fn default() -> Self {
        Self {
            service_name: "livedesk".to_string(),
            agents: AgentPoolConfig::default(),
        }
    }
}

impl LiveChatConfig {
    /// Build a configuration from agent identities, keeping their order.
    pub fn with_agents<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            agents: AgentPoolConfig {
                members: ids.into_iter().map(AgentId::new).collect(),
            },
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// Rejects duplicate agent identities: a duplicated agent would hold two
    /// slots in the assignment scan while only ever serving one session.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for agent in &self.agents.members {
            if !seen.insert(*agent) {
                return Err(LiveChatError::configuration(format!(
                    "duplicate agent identity in pool: {}",
                    agent
                )));
            }
        }
        Ok(())
    }
}

/// The fixed, ordered pool of agent identities.
///
/// Pool order matters: assignment scans for the first idle agent in this
/// order, so earlier members receive more sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentPoolConfig {
    /// Agent identities, in assignment-scan order.
    pub members: Vec<AgentId>,
}

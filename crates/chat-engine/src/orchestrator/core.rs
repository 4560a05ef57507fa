//! Core engine: all mutable routing state behind a single lock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::agent::{AgentRegistry, AgentStatus, ReplyMode};
use crate::config::LiveChatConfig;
use crate::directory::UserDirectory;
use crate::error::Result;
use crate::events::InboundEvent;
use crate::intents::OutboundIntent;
use crate::queue::WaitingQueue;
use crate::session::SessionRegistry;
use crate::types::{AgentId, UserId};
use crate::LiveChatStats;

use super::types::RoutingStats;

/// Everything the engine mutates, owned as one unit.
///
/// Handlers take the engine's write lock once, perform the whole
/// read-modify-write against this struct, and only then release it. That
/// single serialization point is what keeps "find idle agent, mark busy,
/// bind session" atomic with respect to every other event.
pub(crate) struct EngineState {
    pub(crate) agents: AgentRegistry,
    pub(crate) sessions: SessionRegistry,
    pub(crate) queue: WaitingQueue,
    pub(crate) directory: UserDirectory,
    pub(crate) stats: RoutingStats,
}

/// The session routing and assignment engine.
///
/// Decides which agent serves which user, queues users FIFO when the pool
/// is saturated, drains the queue whenever an agent frees up, runs the
/// two-step agent reply flow, and records post-session ratings. The engine
/// is purely reactive: it holds no timers and performs no delivery, it only
/// turns inbound events into outbound intents.
///
/// # Examples
///
/// ```
/// use livedesk_chat_engine::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<()> {
/// let engine = LiveChatEngine::new(LiveChatConfig::with_agents([9001]))?;
///
/// let intents = engine
///     .handle_event(InboundEvent::UserMessage {
///         user: UserId::new(1),
///         display_name: "Ana".into(),
///         text: "hi, I need help".into(),
///     })
///     .await?;
///
/// // First contact: the user is greeted and assigned to agent 9001.
/// assert!(intents
///     .iter()
///     .any(|intent| matches!(intent, OutboundIntent::SendToAgent { .. })));
/// # Ok(())
/// # }
/// ```
pub struct LiveChatEngine {
    pub(crate) config: LiveChatConfig,
    pub(crate) state: RwLock<EngineState>,
}

impl LiveChatEngine {
    /// Create an engine from configuration.
    ///
    /// Fails if the configuration does not validate. An empty agent pool is
    /// allowed but useless: every user queues forever.
    pub fn new(config: LiveChatConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let agents = AgentRegistry::new(&config.agents.members);
        if agents.is_empty() {
            warn!("⚠️ agent pool is empty, every user will wait forever");
        }
        info!(
            "🚀 {} engine ready with {} agent(s)",
            config.service_name,
            agents.len()
        );
        Ok(Arc::new(Self {
            config,
            state: RwLock::new(EngineState {
                agents,
                sessions: SessionRegistry::new(),
                queue: WaitingQueue::new(),
                directory: UserDirectory::new(),
                stats: RoutingStats::default(),
            }),
        }))
    }

    /// Dispatch one normalized inbound event to its handler.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<Vec<OutboundIntent>> {
        match event {
            InboundEvent::JoinRequest { user } => self.handle_join_request(user).await,
            InboundEvent::UserMessage {
                user,
                display_name,
                text,
            } => self.handle_user_message(user, display_name, text).await,
            InboundEvent::ReplyButton { agent, target } => {
                self.handle_reply_button(agent, target).await
            }
            InboundEvent::AgentMessage { agent, text } => {
                self.handle_agent_message(agent, text).await
            }
            InboundEvent::UserEndChat { user } => self.handle_user_end_chat(user).await,
            InboundEvent::AgentEndChat { agent, user } => {
                self.handle_agent_end_chat(agent, user).await
            }
            InboundEvent::RatingSubmitted { user, value } => {
                self.handle_rating(user, value).await
            }
        }
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &LiveChatConfig {
        &self.config
    }

    /// Point-in-time statistics snapshot.
    pub async fn stats(&self) -> LiveChatStats {
        let state = self.state.read().await;
        let idle = state.agents.idle_count();
        LiveChatStats {
            active_sessions: state.sessions.len(),
            idle_agents: idle,
            busy_agents: state.agents.len() - idle,
            waiting_users: state.queue.len(),
            routing: state.stats.clone(),
        }
    }

    /// The agent serving a user, if any.
    pub async fn agent_for(&self, user: UserId) -> Option<AgentId> {
        self.state.read().await.sessions.agent_for(user)
    }

    /// The user an agent is serving, if any.
    pub async fn user_for(&self, agent: AgentId) -> Option<UserId> {
        self.state.read().await.sessions.user_for(agent)
    }

    /// Current availability of an agent.
    pub async fn agent_status(&self, agent: AgentId) -> Option<AgentStatus> {
        self.state.read().await.agents.status(agent)
    }

    /// Where an agent stands in the reply flow.
    pub async fn reply_mode(&self, agent: AgentId) -> Option<ReplyMode> {
        self.state.read().await.agents.mode(agent)
    }

    /// The user an agent's next authored reply goes to.
    pub async fn reply_target(&self, agent: AgentId) -> Option<UserId> {
        self.state.read().await.agents.reply_target(agent)
    }

    /// Waiting users, head of the queue first.
    pub async fn waiting_users(&self) -> Vec<UserId> {
        self.state.read().await.queue.snapshot()
    }

    /// A user's last stored rating.
    pub async fn rating_for(&self, user: UserId) -> Option<u8> {
        self.state.read().await.directory.rating(user)
    }
}

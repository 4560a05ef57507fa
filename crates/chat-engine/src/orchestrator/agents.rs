//! Agent-originated event handlers.

use tracing::{debug, info, warn};

use crate::agent::ReplyMode;
use crate::error::{LiveChatError, Result};
use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};
use crate::types::{AgentId, UserId};

use super::core::LiveChatEngine;

impl LiveChatEngine {
    /// Handle an agent pressing the reply control for a user.
    ///
    /// Binds the session if it is not already bound (the control may sit on
    /// an old forwarded message), points the agent's reply-target at the
    /// user, and arms the reply flow: the agent's next message goes to that
    /// user. Adopting a waiting user takes them out of the queue; the
    /// binding is their assignment. Availability is not touched here; only
    /// assignment and end-events flip it.
    pub async fn handle_reply_button(
        &self,
        agent: AgentId,
        target: UserId,
    ) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        if !state.agents.contains(agent) {
            warn!("⚠️ reply control from unknown agent {}", agent);
            return Err(LiveChatError::not_found(format!(
                "agent {} is not in the pool",
                agent
            )));
        }

        if state.sessions.agent_for(target) != Some(agent) {
            state.sessions.bind(target, agent);
            state.queue.remove(target);
        }
        state.agents.set_reply_target(agent, Some(target));
        state.agents.set_mode(agent, ReplyMode::AwaitingReply);
        info!("✏️ agent {} composing a reply to user {}", agent, target);

        Ok(vec![OutboundIntent::to_agent(
            agent,
            AgentNotice::ReplyPrompt,
            Controls::None,
        )])
    }

    /// Handle a message authored by an agent.
    ///
    /// Only meaningful while the agent is composing a reply: the text goes
    /// verbatim to the reply-target, or a missing target is reported back to
    /// the agent. Both paths land the agent back in normal mode. Messages
    /// outside the reply flow produce nothing.
    pub async fn handle_agent_message(
        &self,
        agent: AgentId,
        text: String,
    ) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        if !state.agents.contains(agent) {
            warn!("⚠️ message from unknown agent {}", agent);
            return Err(LiveChatError::not_found(format!(
                "agent {} is not in the pool",
                agent
            )));
        }

        if state.agents.mode(agent) != Some(ReplyMode::AwaitingReply) {
            debug!("agent {} message outside the reply flow, ignored", agent);
            return Ok(Vec::new());
        }

        state.agents.set_mode(agent, ReplyMode::Normal);
        match state.agents.reply_target(agent) {
            Some(user) => {
                state.stats.replies_to_users += 1;
                info!("📤 agent {} -> user {}", agent, user);
                Ok(vec![
                    OutboundIntent::to_user(
                        user,
                        UserNotice::AgentReply { text },
                        Controls::EndChat,
                    ),
                    OutboundIntent::to_agent(agent, AgentNotice::ReplySent, Controls::None),
                ])
            }
            None => {
                warn!("agent {} replied with no target bound", agent);
                Ok(vec![OutboundIntent::to_agent(
                    agent,
                    AgentNotice::NoReplyTarget,
                    Controls::None,
                )])
            }
        }
    }

    /// Handle an agent ending the chat with a user.
    ///
    /// Clearing is deliberately double-sided: whatever session the agent is
    /// serving and whatever session the named user is in are both removed,
    /// even if they are not the same one. The user-facing notices may fail
    /// at delivery (blocked or unreachable recipient); that is isolated by
    /// the transport and never blocks the agent acknowledgment or the
    /// drain.
    pub async fn handle_agent_end_chat(
        &self,
        agent: AgentId,
        user: UserId,
    ) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        if !state.agents.contains(agent) {
            warn!("⚠️ end-chat from unknown agent {}", agent);
            return Err(LiveChatError::not_found(format!(
                "agent {} is not in the pool",
                agent
            )));
        }

        let own_session = state.sessions.remove_by_agent(agent);
        let user_session = state.sessions.remove_by_user(user);
        if own_session.is_some() || user_session.is_some() {
            state.stats.sessions_ended_by_agent += 1;
        }
        state.release_agent(agent);
        info!("❌ agent {} closed the chat with user {}", agent, user);

        let mut intents = vec![
            OutboundIntent::to_user(user, UserNotice::ClosedByAgent, Controls::None),
            OutboundIntent::to_user(user, UserNotice::RatingPrompt, Controls::Rating { user }),
            OutboundIntent::to_agent(agent, AgentNotice::SessionClosed, Controls::None),
        ];
        state.assign_next_user(agent, &mut intents);
        Ok(intents)
    }
}

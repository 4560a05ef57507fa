//! User-originated event handlers.

use tracing::{debug, info};

use crate::error::Result;
use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};
use crate::types::UserId;

use super::core::LiveChatEngine;

impl LiveChatEngine {
    /// Handle a user's request to start (or restart) a live chat.
    ///
    /// Any session the user is in is abandoned: the paired agent is freed,
    /// notified, and immediately offered the next queued user. A join
    /// request also supersedes queue membership and clears the greeted flag
    /// so the welcome sequence replays. No session is created here;
    /// assignment happens lazily on the user's next message.
    pub async fn handle_join_request(&self, user: UserId) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        let mut intents = Vec::new();

        if let Some(session) = state.sessions.remove_by_user(user) {
            info!(
                "👤 user {} rejoined, abandoning session {} with agent {}",
                user, session.id, session.agent
            );
            state.release_agent(session.agent);
            state.stats.sessions_abandoned += 1;
            intents.push(OutboundIntent::to_agent(
                session.agent,
                AgentNotice::UserStartedNewSession { user },
                Controls::None,
            ));
            state.assign_next_user(session.agent, &mut intents);
        }

        if state.queue.remove(user) {
            debug!("user {} left the queue to rejoin", user);
        }

        state.directory.clear_greeted(user);
        intents.push(OutboundIntent::to_user(
            user,
            UserNotice::JoinConfirmation,
            Controls::EndChat,
        ));
        Ok(intents)
    }

    /// Handle a message authored by a user.
    ///
    /// Three phases: stale-session detection, one-time greeting, routing. A
    /// user with a session gets relayed verbatim to their agent; otherwise
    /// the first idle agent in configuration order takes them; otherwise
    /// they queue (or are told they are still queued).
    pub async fn handle_user_message(
        &self,
        user: UserId,
        display_name: String,
        text: String,
    ) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        let mut intents = Vec::new();

        // A greeted user with no session and no queue slot is talking into
        // a chat that silently ended. Redirect them to the menu instead of
        // routing the message.
        if state.directory.is_greeted(user)
            && !state.sessions.contains_user(user)
            && !state.queue.contains(user)
        {
            info!("user {} messaged an expired session, redirecting", user);
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::SessionExpired,
                Controls::None,
            ));
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::MainMenu,
                Controls::None,
            ));
            return Ok(intents);
        }

        if state.directory.mark_greeted(user) {
            debug!("greeting user {}", user);
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::Welcome,
                Controls::None,
            ));
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::CommonQuestions,
                Controls::EndChat,
            ));
        }

        if let Some(agent) = state.sessions.agent_for(user) {
            // Established session: relay verbatim, no state change.
            state.stats.messages_to_agents += 1;
            info!("📨 user {} -> agent {}", user, agent);
            intents.push(OutboundIntent::to_agent(
                agent,
                AgentNotice::UserText {
                    user,
                    display_name,
                    text,
                },
                Controls::None,
            ));
        } else if let Some(agent) = state.agents.first_idle() {
            let session = state.bind_assignment(user, agent);
            state.stats.users_assigned_directly += 1;
            state.stats.messages_to_agents += 1;
            info!("🎯 user {} assigned to agent {} ({})", user, agent, session);
            intents.push(OutboundIntent::to_agent(
                agent,
                AgentNotice::UserText {
                    user,
                    display_name,
                    text,
                },
                Controls::ReplyAndEnd { target: user },
            ));
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::ForwardedToAgent,
                Controls::EndChat,
            ));
        } else if state.queue.enqueue(user) {
            state.stats.users_enqueued += 1;
            info!(
                "⏳ no idle agent, user {} queued ({} waiting)",
                user,
                state.queue.len()
            );
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::QueueJoined,
                Controls::None,
            ));
        } else {
            debug!("user {} nudged the queue, still waiting", user);
            intents.push(OutboundIntent::to_user(
                user,
                UserNotice::QueueWait,
                Controls::None,
            ));
        }

        Ok(intents)
    }

    /// Handle a user ending their chat.
    ///
    /// Frees the paired agent and drains the queue for them in the same
    /// step. The ended notice and the rating prompt go out even when no
    /// session existed; the prompt is deliberately unconditional. Queue
    /// membership is left alone: a waiting user who ends "their chat" keeps
    /// their spot.
    pub async fn handle_user_end_chat(&self, user: UserId) -> Result<Vec<OutboundIntent>> {
        let mut state = self.state.write().await;
        let mut intents = Vec::new();

        if let Some(session) = state.sessions.remove_by_user(user) {
            info!(
                "🔚 user {} ended session {} with agent {}",
                user, session.id, session.agent
            );
            state.release_agent(session.agent);
            state.stats.sessions_ended_by_user += 1;
            intents.push(OutboundIntent::to_agent(
                session.agent,
                AgentNotice::UserEndedChat { user },
                Controls::None,
            ));
            state.assign_next_user(session.agent, &mut intents);
        } else {
            debug!("user {} ended a chat with no session", user);
        }

        intents.push(OutboundIntent::to_user(
            user,
            UserNotice::ChatEnded,
            Controls::None,
        ));
        intents.push(OutboundIntent::to_user(
            user,
            UserNotice::RatingPrompt,
            Controls::Rating { user },
        ));
        Ok(intents)
    }
}

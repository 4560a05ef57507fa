//! Assignment and queue-drain primitives.
//!
//! These run on [`EngineState`] while the caller holds the engine's write
//! lock, so an assignment can never interleave with another event's
//! assignment for the same agent.

use tracing::info;

use crate::agent::AgentStatus;
use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};
use crate::session::SessionId;
use crate::types::{AgentId, UserId};

use super::core::EngineState;

impl EngineState {
    /// Bind a user to an agent: mark the agent busy, create the session,
    /// point the reply-target at the user.
    ///
    /// Also drops any stray queue entry for the user, so nobody is queued
    /// and assigned at the same time.
    pub(crate) fn bind_assignment(&mut self, user: UserId, agent: AgentId) -> SessionId {
        self.agents.set_status(agent, AgentStatus::Busy);
        self.agents.set_reply_target(agent, Some(user));
        self.queue.remove(user);
        self.sessions.bind(user, agent)
    }

    /// Free an agent whose session went away: idle status, no reply-target.
    ///
    /// The reply mode is left alone; an agent mid-composition keeps their
    /// armed reply and resolves it with their next message.
    pub(crate) fn release_agent(&mut self, agent: AgentId) {
        self.agents.set_status(agent, AgentStatus::Idle);
        self.agents.set_reply_target(agent, None);
    }

    /// Hand the queue head to a newly freed agent.
    ///
    /// The sole path by which waiting users obtain an agent. Runs in the
    /// same critical section as the event that freed the agent, so the pop
    /// and the status flip are atomic with every other assignment. An empty
    /// queue leaves the agent idle.
    pub(crate) fn assign_next_user(&mut self, agent: AgentId, intents: &mut Vec<OutboundIntent>) {
        let user = match self.queue.pop_next() {
            Some(user) => user,
            None => return,
        };

        let session = self.bind_assignment(user, agent);
        self.stats.users_assigned_from_queue += 1;
        info!(
            "🔄 queue drained: user {} connected to agent {} ({})",
            user, agent, session
        );

        intents.push(OutboundIntent::to_agent(
            agent,
            AgentNotice::QueuedUserConnected { user },
            Controls::ReplyAndEnd { target: user },
        ));
        intents.push(OutboundIntent::to_user(
            user,
            UserNotice::AgentConnected,
            Controls::EndChat,
        ));
    }
}

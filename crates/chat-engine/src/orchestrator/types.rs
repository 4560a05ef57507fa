//! Statistics types.

use serde::Serialize;

/// Cumulative routing counters.
///
/// Monotonic for the life of the process. Snapshots come back as part of
/// [`crate::LiveChatStats`] via [`super::LiveChatEngine::stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutingStats {
    /// Users handed straight to an idle agent on their first message.
    pub users_assigned_directly: u64,
    /// Users popped from the waiting queue by a drain.
    pub users_assigned_from_queue: u64,
    /// Users appended to the waiting queue.
    pub users_enqueued: u64,
    /// User messages relayed to agents.
    pub messages_to_agents: u64,
    /// Agent replies forwarded to users.
    pub replies_to_users: u64,
    /// Sessions ended by the user side.
    pub sessions_ended_by_user: u64,
    /// Sessions ended by the agent side.
    pub sessions_ended_by_agent: u64,
    /// Sessions abandoned by a fresh join request.
    pub sessions_abandoned: u64,
    /// Ratings stored, overwrites included.
    pub ratings_recorded: u64,
}

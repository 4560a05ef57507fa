//! Session registry keyed by synthetic session ids.
//!
//! The registry is the single source of truth for "user X is served by
//! agent Y". The by-user and by-agent indexes are maintained from it and can
//! never disagree: binding a pair first removes whatever session either
//! party was in.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AgentId, UserId};

/// Session ID type
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(format!("chat-{}", uuid::Uuid::new_v4()))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One active pairing of a user with an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user: UserId,
    pub agent: AgentId,
    pub started_at: DateTime<Utc>,
}

/// All active sessions, with secondary indexes by user and by agent.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    by_user: HashMap<UserId, SessionId>,
    by_agent: HashMap<AgentId, SessionId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a user to an agent, returning the new session's id.
    ///
    /// Any session either party was already in is removed first, so at most
    /// one session per user and one per agent can exist.
    pub fn bind(&mut self, user: UserId, agent: AgentId) -> SessionId {
        if let Some(displaced) = self.remove_by_user(user) {
            debug!("session {} displaced by rebinding user {}", displaced.id, user);
        }
        if let Some(displaced) = self.remove_by_agent(agent) {
            debug!(
                "session {} displaced by rebinding agent {}",
                displaced.id, agent
            );
        }

        let id = SessionId::new();
        self.by_user.insert(user, id.clone());
        self.by_agent.insert(agent, id.clone());
        self.sessions.insert(
            id.clone(),
            Session {
                id: id.clone(),
                user,
                agent,
                started_at: Utc::now(),
            },
        );
        debug!("session {} bound: user {} <-> agent {}", id, user, agent);
        id
    }

    /// Remove the session a user is in, if any.
    pub fn remove_by_user(&mut self, user: UserId) -> Option<Session> {
        let id = self.by_user.get(&user).cloned()?;
        self.remove(&id)
    }

    /// Remove the session an agent is serving, if any.
    pub fn remove_by_agent(&mut self, agent: AgentId) -> Option<Session> {
        let id = self.by_agent.get(&agent).cloned()?;
        self.remove(&id)
    }

    fn remove(&mut self, id: &SessionId) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        self.by_user.remove(&session.user);
        self.by_agent.remove(&session.agent);
        debug!(
            "session {} removed: user {} <-> agent {}",
            session.id, session.user, session.agent
        );
        Some(session)
    }

    /// The agent serving a user, if any.
    pub fn agent_for(&self, user: UserId) -> Option<AgentId> {
        let id = self.by_user.get(&user)?;
        self.sessions.get(id).map(|session| session.agent)
    }

    /// The user an agent is serving, if any.
    pub fn user_for(&self, agent: AgentId) -> Option<UserId> {
        let id = self.by_agent.get(&agent)?;
        self.sessions.get(id).map(|session| session.user)
    }

    /// Whether the user is in an active session.
    pub fn contains_user(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    /// Whether the agent is serving a session.
    pub fn contains_agent(&self, agent: AgentId) -> bool {
        self.by_agent.contains_key(&agent)
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is active.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

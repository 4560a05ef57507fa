//! FIFO waiting queue.
//!
//! Users land here when every agent is busy and leave in arrival order as
//! agents free up. The queue never holds the same user twice; a user with an
//! active session is never queued (routing enforces this, the queue itself
//! only guards against duplicates).

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::UserId;

/// One waiting user.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedUser {
    /// The waiting user.
    pub user: UserId,
    /// When they entered the queue.
    pub queued_at: DateTime<Utc>,
}

/// Ordered, duplicate-free queue of users awaiting an agent.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    users: VecDeque<QueuedUser>,
}

impl WaitingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            users: VecDeque::new(),
        }
    }

    /// Append a user to the tail.
    ///
    /// Returns `false` without modifying the queue when the user is already
    /// waiting, so a repeated request cannot create a second entry.
    pub fn enqueue(&mut self, user: UserId) -> bool {
        if self.contains(user) {
            debug!("user {} already queued at position {}", user, self.len());
            return false;
        }
        self.users.push_back(QueuedUser {
            user,
            queued_at: Utc::now(),
        });
        debug!("user {} queued, {} waiting", user, self.users.len());
        true
    }

    /// Pop the head of the queue, if any.
    pub fn pop_next(&mut self) -> Option<UserId> {
        let next = self.users.pop_front().map(|entry| entry.user);
        if let Some(user) = next {
            debug!("user {} popped, {} still waiting", user, self.users.len());
        }
        next
    }

    /// Remove a user from wherever they sit in the queue.
    ///
    /// Returns `true` if the user was waiting.
    pub fn remove(&mut self, user: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|entry| entry.user != user);
        self.users.len() != before
    }

    /// Whether the user is currently waiting.
    pub fn contains(&self, user: UserId) -> bool {
        self.users.iter().any(|entry| entry.user == user)
    }

    /// Number of waiting users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Waiting users in order, head first.
    pub fn snapshot(&self) -> Vec<UserId> {
        self.users.iter().map(|entry| entry.user).collect()
    }
}

//! Per-user bookkeeping: greeted flags and ratings.
//!
//! Both stores grow for the life of the process; inactive users are never
//! evicted.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::UserId;

/// Greeted set and rating store.
#[derive(Debug, Default)]
pub struct UserDirectory {
    greeted: HashSet<UserId>,
    ratings: HashMap<UserId, u8>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user already received the one-time welcome sequence.
    pub fn is_greeted(&self, user: UserId) -> bool {
        self.greeted.contains(&user)
    }

    /// Mark the user as greeted. Returns `false` if they already were.
    pub fn mark_greeted(&mut self, user: UserId) -> bool {
        self.greeted.insert(user)
    }

    /// Clear the greeted flag so the welcome sequence replays.
    pub fn clear_greeted(&mut self, user: UserId) {
        self.greeted.remove(&user);
    }

    /// Store a rating, overwriting any prior value. Returns the replaced
    /// rating, if there was one.
    pub fn record_rating(&mut self, user: UserId, value: u8) -> Option<u8> {
        let prior = self.ratings.insert(user, value);
        if let Some(prior) = prior {
            debug!("user {} rating overwritten {} -> {}", user, prior, value);
        }
        prior
    }

    /// The user's last submitted rating.
    pub fn rating(&self, user: UserId) -> Option<u8> {
        self.ratings.get(&user).copied()
    }

    /// Number of users with a stored rating.
    pub fn ratings_recorded(&self) -> usize {
        self.ratings.len()
    }
}

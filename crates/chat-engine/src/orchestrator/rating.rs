//! Post-session rating capture.

use tracing::{info, warn};

use crate::error::{LiveChatError, Result};
use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};
use crate::types::UserId;

use super::core::LiveChatEngine;

impl LiveChatEngine {
    /// Handle a 1-5 rating submitted by a user.
    ///
    /// The score overwrites any earlier one from the same user. The agent
    /// who served the session is told about it when one can still be found:
    /// first through the live session (the user may already be in a new
    /// chat), then through whichever agent still has this user as their
    /// reply-target from the closed session.
    pub async fn handle_rating(&self, user: UserId, value: u8) -> Result<Vec<OutboundIntent>> {
        if !(1..=5).contains(&value) {
            warn!("⚠️ user {} sent an out-of-range rating {}", user, value);
            return Err(LiveChatError::invalid_input(format!(
                "rating must be between 1 and 5, got {}",
                value
            )));
        }

        let mut state = self.state.write().await;
        state.directory.record_rating(user, value);
        state.stats.ratings_recorded += 1;
        info!("⭐ user {} rated their chat {}/5", user, value);

        let mut intents = vec![OutboundIntent::to_user(
            user,
            UserNotice::RatingSaved,
            Controls::None,
        )];
        let agent = state
            .sessions
            .agent_for(user)
            .or_else(|| state.agents.find_by_reply_target(user));
        if let Some(agent) = agent {
            intents.push(OutboundIntent::to_agent(
                agent,
                AgentNotice::RatingReceived { user, value },
                Controls::None,
            ));
        }
        Ok(intents)
    }
}

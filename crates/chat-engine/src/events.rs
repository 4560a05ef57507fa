//! Normalized inbound events.
//!
//! The transport adapter translates whatever its messaging platform produces
//! (commands, button callbacks, plain messages) into these shapes before
//! handing them to the engine. The engine never sees transport payloads.

use serde::{Deserialize, Serialize};

use crate::types::{AgentId, UserId};

/// A normalized event arriving from the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// User asked to start (or restart) a live chat.
    JoinRequest { user: UserId },

    /// User sent a message while in, waiting for, or trying to enter a chat.
    UserMessage {
        user: UserId,
        display_name: String,
        text: String,
    },

    /// Agent pressed the reply control attached to a forwarded message.
    ReplyButton { agent: AgentId, target: UserId },

    /// Agent sent a message. Only meaningful while the agent is composing a
    /// reply; ignored otherwise.
    AgentMessage { agent: AgentId, text: String },

    /// User ended their chat.
    UserEndChat { user: UserId },

    /// Agent ended the chat with the given user.
    AgentEndChat { agent: AgentId, user: UserId },

    /// User submitted a satisfaction rating.
    RatingSubmitted { user: UserId, value: u8 },
}

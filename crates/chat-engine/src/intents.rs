//! Outbound intents.
//!
//! Every engine operation returns a list of [`OutboundIntent`] values
//! describing what should be sent to whom. The engine never delivers
//! anything itself: a transport collaborator renders the semantic notice
//! into platform text and keyboards, then performs the send. Delivery is
//! fire-and-forget; the engine does not wait for confirmation.

use serde::{Deserialize, Serialize};

use crate::types::{AgentId, UserId};

/// Interactive controls to attach to an outbound message.
///
/// The transport decides how a control is rendered (inline keyboard, quick
/// reply, slash-command hint). The engine only states which interaction the
/// recipient should be offered next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controls {
    /// No controls attached.
    None,
    /// A single "end chat" control.
    EndChat,
    /// Reply and end-chat controls targeting the given user.
    ReplyAndEnd { target: UserId },
    /// Rating controls (1-5) for the given user.
    Rating { user: UserId },
}

/// Semantic content of a message addressed to a user.
///
/// Variants carry only the data the transport cannot reconstruct; all
/// wording, localization, and formatting live in the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserNotice {
    /// The join request was accepted; the user may start typing.
    JoinConfirmation,
    /// One-time welcome content, sent on first contact.
    Welcome,
    /// Common questions / help topics, sent right after the welcome.
    CommonQuestions,
    /// The previous session is gone; the user must rejoin.
    SessionExpired,
    /// Replay of the start menu.
    MainMenu,
    /// The user's message was relayed to their agent.
    ForwardedToAgent,
    /// All agents are busy; the user entered the waiting queue.
    QueueJoined,
    /// The user is still queued; asking again does not change their spot.
    QueueWait,
    /// An agent's reply, forwarded verbatim.
    AgentReply { text: String },
    /// A previously queued user is now connected to an agent.
    AgentConnected,
    /// The user ended the session.
    ChatEnded,
    /// The agent ended the session.
    ClosedByAgent,
    /// Ask the user to rate the finished session.
    RatingPrompt,
    /// The submitted rating was stored.
    RatingSaved,
}

/// Semantic content of a message addressed to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentNotice {
    /// A user's message, forwarded verbatim.
    UserText {
        user: UserId,
        display_name: String,
        text: String,
    },
    /// A queued user was assigned to this agent by a queue drain.
    QueuedUserConnected { user: UserId },
    /// The served user abandoned the session by starting a new join request.
    UserStartedNewSession { user: UserId },
    /// The served user ended the session.
    UserEndedChat { user: UserId },
    /// Prompt the agent to type their reply.
    ReplyPrompt,
    /// The agent's reply was forwarded to the target user.
    ReplySent,
    /// The agent composed a reply but no reply-target was bound.
    NoReplyTarget,
    /// Acknowledgment of an agent-initiated end-chat.
    SessionClosed,
    /// A user this agent served submitted a rating.
    RatingReceived { user: UserId, value: u8 },
}

/// A single outbound send the collaborator should perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutboundIntent {
    /// Deliver `notice` to a user, with the given controls attached.
    SendToUser {
        user: UserId,
        notice: UserNotice,
        controls: Controls,
    },
    /// Deliver `notice` to an agent, with the given controls attached.
    SendToAgent {
        agent: AgentId,
        notice: AgentNotice,
        controls: Controls,
    },
}

impl OutboundIntent {
    /// Build a user-directed intent.
    pub fn to_user(user: UserId, notice: UserNotice, controls: Controls) -> Self {
        Self::SendToUser {
            user,
            notice,
            controls,
        }
    }

    /// Build an agent-directed intent.
    pub fn to_agent(agent: AgentId, notice: AgentNotice, controls: Controls) -> Self {
        Self::SendToAgent {
            agent,
            notice,
            controls,
        }
    }
}

//! # Livedesk Chat Engine
//!
//! A session routing and assignment engine for live support chat. This crate
//! decides which human agent serves which user, queues users when every
//! agent is busy, drains the queue the moment an agent frees up, runs the
//! two-step agent reply flow, and captures post-session satisfaction
//! ratings.
//!
//! ## Overview
//!
//! The engine is the routing heart of a live chat deployment, providing:
//!
//! - **Session Assignment**: First idle agent in configuration order takes the user
//! - **FIFO Queuing**: Duplicate-free waiting queue when the agent pool is saturated
//! - **Queue Draining**: Freed agents immediately receive the longest-waiting user
//! - **Reply Flow**: Two-state compose flow so agent chatter is never misdelivered
//! - **Rating Capture**: 1-5 post-session scores, latest submission wins
//! - **Delivery Isolation**: One unreachable recipient never stalls the rest
//!
//! ## Architecture
//!
//! The engine is transport-agnostic. Adapters normalize platform traffic
//! into [`InboundEvent`] values; every operation answers with
//! [`OutboundIntent`] values for the adapter to render and send:
//!
//! ```text
//!  ┌─────────────────┐         ┌─────────────────┐
//!  │  User Adapter   │         │  Agent Adapter  │
//!  └─────────────────┘         └─────────────────┘
//!           │   InboundEvent / OutboundIntent │
//!           └────────────────┬────────────────┘
//!                            │
//!                  ┌─────────────────┐
//!                  │  LiveChatEngine │
//!                  └─────────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        │                   │                   │
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │ Session Registry│ │  Agent Registry │ │  Waiting Queue  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ### Routing a first message
//!
//! ```
//! use livedesk_chat_engine::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! // One agent, id 9001, known at startup.
//! let engine = LiveChatEngine::new(LiveChatConfig::with_agents([9001]))?;
//!
//! let intents = engine
//!     .handle_event(InboundEvent::UserMessage {
//!         user: UserId::new(1),
//!         display_name: "Ana".into(),
//!         text: "my order never arrived".into(),
//!     })
//!     .await?;
//!
//! // The user is greeted and handed to agent 9001; the message text
//! // travels with the forward.
//! assert_eq!(engine.agent_for(UserId::new(1)).await, Some(AgentId::new(9001)));
//! assert!(intents
//!     .iter()
//!     .any(|i| matches!(i, OutboundIntent::SendToAgent { .. })));
//! # Ok(())
//! # }
//! ```
//!
//! ### Monitoring and statistics
//!
//! ```
//! use livedesk_chat_engine::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! # let engine = LiveChatEngine::new(LiveChatConfig::with_agents([9001]))?;
//! let stats = engine.stats().await;
//! println!("Live Chat Status:");
//! println!("  Active sessions: {}", stats.active_sessions);
//! println!("  Idle agents: {}", stats.idle_agents);
//! println!("  Waiting users: {}", stats.waiting_users);
//! println!("  Ratings recorded: {}", stats.routing.ratings_recorded);
//! # Ok(())
//! # }
//! ```
//!
//! For a complete deployment (event channel, background loop, pluggable
//! delivery) see [`server::LiveChatServer`].
//!
//! ## Key Modules
//!
//! - [`orchestrator`]: Core routing engine and event dispatch
//! - [`agent`]: Agent pool with availability and reply-flow state
//! - [`queue`]: FIFO waiting queue for unassigned users
//! - [`session`]: Active session registry with two-way lookup
//! - [`directory`]: Per-user greeting memory and rating store
//! - [`server`]: Event-loop server and the [`server::ChatTransport`] trait
//! - [`events`] / [`intents`]: The contract with transport adapters
//! - [`config`]: Configuration management and validation
//! - [`error`]: Error handling and result types

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Routing functionality modules
pub mod agent;
pub mod directory;
pub mod orchestrator;
pub mod queue;
pub mod session;

// External interfaces
pub mod events;
pub mod intents;
pub mod server;

// Re-exports for convenience
pub use config::LiveChatConfig;
pub use error::{LiveChatError, Result};
pub use events::InboundEvent;
pub use intents::OutboundIntent;
pub use orchestrator::{LiveChatEngine, RoutingStats};
pub use types::{AgentId, UserId};

/// Live chat statistics and routing metrics
///
/// A snapshot of the engine's current operational state: session and queue
/// occupancy, agent availability, and the cumulative routing counters.
#[derive(Debug, Clone, Default)]
pub struct LiveChatStats {
    /// Number of currently active sessions
    pub active_sessions: usize,
    /// Number of idle agents ready for assignment
    pub idle_agents: usize,
    /// Number of agents currently serving a user
    pub busy_agents: usize,
    /// Number of users waiting in the queue
    pub waiting_users: usize,
    /// Cumulative routing counters since startup
    pub routing: RoutingStats,
}

/// Prelude module for convenient imports
///
/// Import this module to get access to the most commonly used types and
/// traits:
///
/// ```
/// use livedesk_chat_engine::prelude::*;
/// ```
pub mod prelude {
    //! Commonly used types and traits for live chat applications

    // Core types
    pub use crate::{LiveChatConfig, LiveChatError, LiveChatStats, Result};
    pub use crate::orchestrator::{LiveChatEngine, RoutingStats};
    pub use crate::server::{
        ChatTransport, EventSender, LiveChatServer, LiveChatServerBuilder,
    };

    // Identifier types
    pub use crate::types::{AgentId, UserId};

    // Transport contract
    pub use crate::events::InboundEvent;
    pub use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};

    // Registry types
    pub use crate::agent::{AgentRecord, AgentRegistry, AgentStatus, ReplyMode};
    pub use crate::config::AgentPoolConfig;
    pub use crate::queue::{QueuedUser, WaitingQueue};
    pub use crate::session::{Session, SessionId, SessionRegistry};

    // Common external types
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}

pub use server::{LiveChatServer, LiveChatServerBuilder};

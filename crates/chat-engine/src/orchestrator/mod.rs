//! Engine orchestration.
//!
//! [`LiveChatEngine`] owns every piece of mutable routing state behind one
//! lock and exposes the event operations as async methods. Each operation
//! takes the write lock once, performs the whole read-modify-write under it,
//! and returns the outbound intents for the collaborator to deliver after
//! the lock is released.
//!
//! Handlers are grouped by origin:
//!
//! - [`users`]: join requests, user messages, user-initiated end-chat
//! - [`agents`]: the reply flow and agent-initiated end-chat
//! - [`rating`]: rating capture
//! - [`routing`]: assignment and queue-drain primitives shared by handlers

pub mod agents;
pub mod core;
pub mod rating;
pub mod routing;
pub mod types;
pub mod users;

pub use core::LiveChatEngine;
pub use types::RoutingStats;

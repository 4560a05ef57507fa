//! Agent pool management.
//!
//! Agents are human operators drawn from a fixed allow-list known at
//! startup. This module tracks each agent's availability, their
//! reply-target pointer, and the two-state reply flow.

pub mod registry;
pub mod types;

pub use registry::AgentRegistry;
pub use types::{AgentRecord, AgentStatus, ReplyMode};

//! Waiting queue for users with no available agent.

pub mod manager;

pub use manager::{QueuedUser, WaitingQueue};

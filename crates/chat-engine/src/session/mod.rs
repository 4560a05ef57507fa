//! Active session registry.

pub mod registry;

pub use registry::{Session, SessionId, SessionRegistry};

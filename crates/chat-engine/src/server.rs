//! # Live Chat Server
//!
//! High-level server wrapper around [`LiveChatEngine`]: it owns the inbound
//! event channel, runs the engine loop as a background task, and delivers
//! the resulting intents through a pluggable [`ChatTransport`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             LiveChatServer              │
//! ├─────────────────────────────────────────┤
//! │   EventSender  │  event loop (spawned)  │
//! ├─────────────────────────────────────────┤
//! │             LiveChatEngine              │
//! ├─────────────────────────────────────────┤
//! │  Sessions │ Agents │ Queue │ Directory  │
//! ├─────────────────────────────────────────┤
//! │         ChatTransport (yours)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The transport adapter is the only platform-specific piece: it renders
//! semantic notices into real messages (text, keyboards, buttons) and
//! performs the sends. A delivery failure is logged and skipped; it never
//! stops the event loop and never rolls back engine state.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use livedesk_chat_engine::prelude::*;
//!
//! struct NullTransport;
//!
//! #[async_trait]
//! impl ChatTransport for NullTransport {
//!     async fn send_to_user(
//!         &self,
//!         _user: UserId,
//!         _notice: &UserNotice,
//!         _controls: Controls,
//!     ) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn send_to_agent(
//!         &self,
//!         _agent: AgentId,
//!         _notice: &AgentNotice,
//!         _controls: Controls,
//!     ) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let mut server = LiveChatServerBuilder::new()
//!     .with_config(LiveChatConfig::with_agents([9001]))
//!     .with_transport(Arc::new(NullTransport))
//!     .build()?;
//!
//! let sender = server.sender();
//! server.start().await?;
//!
//! sender.send(InboundEvent::JoinRequest { user: UserId::new(1) })?;
//!
//! // The server drains and stops once every sender is gone.
//! drop(sender);
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::LiveChatConfig;
use crate::error::{LiveChatError, Result};
use crate::events::InboundEvent;
use crate::intents::{AgentNotice, Controls, OutboundIntent, UserNotice};
use crate::orchestrator::LiveChatEngine;
use crate::types::{AgentId, UserId};

/// Delivery side of the system, implemented per messaging platform.
///
/// Implementations render the semantic notice into whatever the platform
/// speaks and perform the send. Errors are reported back so the server can
/// log them, but they are otherwise swallowed: one unreachable recipient
/// must not block the rest of an event's deliveries.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver a notice to a user.
    async fn send_to_user(
        &self,
        user: UserId,
        notice: &UserNotice,
        controls: Controls,
    ) -> Result<()>;

    /// Deliver a notice to an agent.
    async fn send_to_agent(
        &self,
        agent: AgentId,
        notice: &AgentNotice,
        controls: Controls,
    ) -> Result<()>;
}

/// Cloneable handle for feeding events into a running server.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<InboundEvent>,
}

impl EventSender {
    /// Queue one event for the server's event loop.
    pub fn send(&self, event: InboundEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| LiveChatError::internal("event channel closed"))
    }
}

/// A complete live chat server that manages engine lifecycle and delivery.
pub struct LiveChatServer {
    /// The core routing engine.
    engine: Arc<LiveChatEngine>,

    /// Renders and sends outbound notices.
    transport: Arc<dyn ChatTransport>,

    /// Template for [`EventSender`] handles.
    events_tx: mpsc::UnboundedSender<InboundEvent>,

    /// Receiving end, consumed by `start`.
    events_rx: Option<mpsc::UnboundedReceiver<InboundEvent>>,

    /// Optional handle to the event loop task.
    loop_handle: Option<JoinHandle<()>>,
}

impl LiveChatServer {
    /// Create a new server from configuration and a transport.
    pub fn new(config: LiveChatConfig, transport: Arc<dyn ChatTransport>) -> Result<Self> {
        let engine = LiveChatEngine::new(config)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            engine,
            transport,
            events_tx,
            events_rx: Some(events_rx),
            loop_handle: None,
        })
    }

    /// Start the event loop and begin accepting events.
    pub async fn start(&mut self) -> Result<()> {
        let events_rx = self
            .events_rx
            .take()
            .ok_or_else(|| LiveChatError::internal("server already started"))?;

        let engine = Arc::clone(&self.engine);
        let transport = Arc::clone(&self.transport);
        self.loop_handle = Some(tokio::spawn(Self::event_loop(engine, transport, events_rx)));

        info!(
            "✅ {} server accepting events",
            self.engine.config().service_name
        );
        Ok(())
    }

    /// Stop the server, dropping any events still queued.
    pub async fn stop(&mut self) -> Result<()> {
        info!("🛑 stopping {} server", self.engine.config().service_name);

        if let Some(handle) = self.loop_handle.take() {
            handle.abort();
            let _ = handle.await;
        }

        info!("✅ {} server stopped", self.engine.config().service_name);
        Ok(())
    }

    /// Run until every [`EventSender`] is dropped and the queue drains.
    ///
    /// Consumes the server so its own sender template dies here; only the
    /// handles given out via [`sender`](Self::sender) keep the loop alive.
    pub async fn run(mut self) -> Result<()> {
        if self.events_rx.is_some() {
            self.start().await?;
        }
        info!(
            "📞 {} server running until event senders finish",
            self.engine.config().service_name
        );

        let Self {
            engine,
            events_tx,
            loop_handle,
            ..
        } = self;
        drop(events_tx);

        if let Some(handle) = loop_handle {
            handle
                .await
                .map_err(|e| LiveChatError::internal(format!("event loop failed: {}", e)))?;
        }

        info!("✅ {} server stopped", engine.config().service_name);
        Ok(())
    }

    /// Get a reference to the engine (for stats and advanced usage).
    pub fn engine(&self) -> &Arc<LiveChatEngine> {
        &self.engine
    }

    /// Create a handle for feeding events into the server.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.events_tx.clone(),
        }
    }

    /// Internal event loop: pull, route, deliver.
    async fn event_loop(
        engine: Arc<LiveChatEngine>,
        transport: Arc<dyn ChatTransport>,
        mut events_rx: mpsc::UnboundedReceiver<InboundEvent>,
    ) {
        while let Some(event) = events_rx.recv().await {
            match engine.handle_event(event).await {
                Ok(intents) => Self::deliver_all(transport.as_ref(), &intents).await,
                Err(e) => warn!("event rejected: {}", e),
            }
        }
    }

    /// Deliver intents in order, skipping (and logging) failed sends.
    async fn deliver_all(transport: &dyn ChatTransport, intents: &[OutboundIntent]) {
        for intent in intents {
            let outcome = match intent {
                OutboundIntent::SendToUser {
                    user,
                    notice,
                    controls,
                } => transport.send_to_user(*user, notice, *controls).await,
                OutboundIntent::SendToAgent {
                    agent,
                    notice,
                    controls,
                } => transport.send_to_agent(*agent, notice, *controls).await,
            };
            if let Err(e) = outcome {
                warn!("delivery failed, skipping: {}", e);
            }
        }
    }
}

/// Builder for [`LiveChatServer`] with fluent API.
pub struct LiveChatServerBuilder {
    config: Option<LiveChatConfig>,
    transport: Option<Arc<dyn ChatTransport>>,
}

impl LiveChatServerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: LiveChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the transport adapter.
    pub fn with_transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the server.
    pub fn build(self) -> Result<LiveChatServer> {
        let config = self
            .config
            .ok_or_else(|| LiveChatError::configuration("configuration not provided"))?;
        let transport = self
            .transport
            .ok_or_else(|| LiveChatError::configuration("transport not provided"))?;
        LiveChatServer::new(config, transport)
    }
}

impl Default for LiveChatServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Transport that records recipients in delivery order and can be told
    /// to fail for specific users.
    #[derive(Default)]
    struct RecordingTransport {
        log: Mutex<Vec<String>>,
        unreachable_users: Vec<UserId>,
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_to_user(
            &self,
            user: UserId,
            _notice: &UserNotice,
            _controls: Controls,
        ) -> Result<()> {
            if self.unreachable_users.contains(&user) {
                return Err(LiveChatError::delivery(format!("user {} unreachable", user)));
            }
            self.log.lock().unwrap().push(format!("user:{}", user));
            Ok(())
        }

        async fn send_to_agent(
            &self,
            agent: AgentId,
            _notice: &AgentNotice,
            _controls: Controls,
        ) -> Result<()> {
            self.log.lock().unwrap().push(format!("agent:{}", agent));
            Ok(())
        }
    }

    fn server_with(transport: Arc<RecordingTransport>) -> LiveChatServer {
        LiveChatServerBuilder::new()
            .with_config(LiveChatConfig::with_agents([9001]))
            .with_transport(transport)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn delivers_intents_in_order() {
        let transport = Arc::new(RecordingTransport::default());
        let server = server_with(Arc::clone(&transport));
        let sender = server.sender();

        sender
            .send(InboundEvent::UserMessage {
                user: UserId::new(1),
                display_name: "Ana".into(),
                text: "hello".into(),
            })
            .unwrap();

        drop(sender);
        server.run().await.unwrap();

        // Welcome, common questions, forward to agent, user acknowledgment.
        let log = transport.log.lock().unwrap();
        assert_eq!(*log, vec!["user:1", "user:1", "agent:9001", "user:1"]);
    }

    #[tokio::test]
    async fn delivery_failure_does_not_block_later_intents() {
        let transport = Arc::new(RecordingTransport {
            log: Mutex::new(Vec::new()),
            unreachable_users: vec![UserId::new(1)],
        });
        let server = server_with(Arc::clone(&transport));
        let sender = server.sender();

        sender
            .send(InboundEvent::UserMessage {
                user: UserId::new(1),
                display_name: "Ana".into(),
                text: "hello".into(),
            })
            .unwrap();

        drop(sender);
        server.run().await.unwrap();

        // Every user-bound send failed; the agent still got the forward.
        let log = transport.log.lock().unwrap();
        assert_eq!(*log, vec!["agent:9001"]);
    }

    #[tokio::test]
    async fn sender_errors_once_stopped() {
        let transport = Arc::new(RecordingTransport::default());
        let mut server = server_with(transport);
        let sender = server.sender();

        server.start().await.unwrap();
        server.stop().await.unwrap();

        let result = sender.send(InboundEvent::JoinRequest {
            user: UserId::new(1),
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let transport = Arc::new(RecordingTransport::default());
        let mut server = server_with(transport);

        server.start().await.unwrap();
        assert!(server.start().await.is_err());
        server.stop().await.unwrap();
    }
}

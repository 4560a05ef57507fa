//! Scripted routing walkthrough
//!
//! Drives a [`LiveChatServer`] through a small support-desk scenario on the
//! console: users join and write in, the pool saturates, the queue drains as
//! chats close, one agent runs the reply flow, and ratings come in at the
//! end. Every outbound notice is rendered as a console line, standing in
//! for a real messaging platform.
//!
//! ```text
//! cargo run --bin simulate -- --agents 1 --users 3
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use tokio::time::sleep;
use tracing::info;

use livedesk_chat_engine::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scripted livedesk routing walkthrough", long_about = None)]
struct Args {
    /// Number of agents in the pool
    #[arg(short, long, default_value = "1")]
    agents: usize,

    /// Number of users contacting support
    #[arg(short, long, default_value = "3")]
    users: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const NAMES: [&str; 5] = ["Ana", "Bruno", "Carla", "Dario", "Elena"];

/// Renders semantic notices as console lines.
struct ConsoleTransport;

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send_to_user(
        &self,
        user: UserId,
        notice: &UserNotice,
        controls: Controls,
    ) -> Result<()> {
        println!(
            "💬 → user {:<5} {}{}",
            user,
            render_user_notice(notice),
            render_controls(controls)
        );
        Ok(())
    }

    async fn send_to_agent(
        &self,
        agent: AgentId,
        notice: &AgentNotice,
        controls: Controls,
    ) -> Result<()> {
        println!(
            "🎧 → agent {:<4} {}{}",
            agent,
            render_agent_notice(notice),
            render_controls(controls)
        );
        Ok(())
    }
}

fn render_user_notice(notice: &UserNotice) -> String {
    match notice {
        UserNotice::JoinConfirmation => {
            "You are connected to live support. Type your question and an agent will pick it up."
                .into()
        }
        UserNotice::Welcome => "Hi! Welcome to livedesk support.".into(),
        UserNotice::CommonQuestions => {
            "Frequent topics: orders, billing, returns. An agent will be with you shortly.".into()
        }
        UserNotice::SessionExpired => "This conversation has ended.".into(),
        UserNotice::MainMenu => "Main menu: start a new chat whenever you are ready.".into(),
        UserNotice::ForwardedToAgent => {
            "Your message was forwarded to an agent. Hold on for the reply.".into()
        }
        UserNotice::QueueJoined => {
            "All agents are busy right now. You are in line and will be connected automatically."
                .into()
        }
        UserNotice::QueueWait => {
            "Still in line. An agent will take your chat as soon as one frees up.".into()
        }
        UserNotice::AgentReply { text } => format!("Agent: {}", text),
        UserNotice::AgentConnected => "An agent is now handling your chat. Go ahead.".into(),
        UserNotice::ChatEnded => "Chat ended.".into(),
        UserNotice::ClosedByAgent => "The agent closed this chat.".into(),
        UserNotice::RatingPrompt => "How was your chat? Rate it from 1 to 5.".into(),
        UserNotice::RatingSaved => "Thanks! Your rating was saved.".into(),
    }
}

fn render_agent_notice(notice: &AgentNotice) -> String {
    match notice {
        AgentNotice::UserText {
            user,
            display_name,
            text,
        } => format!("{} (user {}): {}", display_name, user, text),
        AgentNotice::QueuedUserConnected { user } => {
            format!("User {} was waiting in line and is now yours.", user)
        }
        AgentNotice::UserStartedNewSession { user } => {
            format!("User {} started a new session; this chat is closed.", user)
        }
        AgentNotice::UserEndedChat { user } => format!("User {} ended the chat.", user),
        AgentNotice::ReplyPrompt => "Type your reply; the next message goes to the user.".into(),
        AgentNotice::ReplySent => "Reply delivered.".into(),
        AgentNotice::NoReplyTarget => "No user is bound to this reply. Pick a chat first.".into(),
        AgentNotice::SessionClosed => "Chat closed.".into(),
        AgentNotice::RatingReceived { user, value } => {
            format!("User {} rated the chat {}/5.", user, value)
        }
    }
}

fn render_controls(controls: Controls) -> String {
    match controls {
        Controls::None => String::new(),
        Controls::EndChat => "  [end chat]".into(),
        Controls::ReplyAndEnd { target } => format!("  [reply to {} | end chat]", target),
        Controls::Rating { .. } => "  [rate 1-5]".into(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("livedesk_chat_engine={}", log_level).parse()?)
                .add_directive(format!("simulate={}", log_level).parse()?),
        )
        .init();

    let agents: Vec<i64> = (0..args.agents).map(|i| 9001 + i as i64).collect();
    let users: Vec<UserId> = (0..args.users)
        .map(|i| UserId::new(101 + i as i64))
        .collect();

    info!("🤖 starting walkthrough: {} agent(s), {} user(s)", args.agents, args.users);

    let mut server = LiveChatServerBuilder::new()
        .with_config(LiveChatConfig::with_agents(agents.clone()))
        .with_transport(Arc::new(ConsoleTransport))
        .build()?;
    let engine = Arc::clone(server.engine());
    let sender = server.sender();
    server.start().await?;

    // Everyone joins and asks a question; the pool saturates and the rest
    // wait in line.
    for (i, &user) in users.iter().enumerate() {
        sender.send(InboundEvent::JoinRequest { user })?;
        sender.send(InboundEvent::UserMessage {
            user,
            display_name: NAMES[i % NAMES.len()].to_string(),
            text: format!("hello, I have a question about order #{}", 5000 + i),
        })?;
    }
    sleep(Duration::from_millis(100)).await;

    if let (Some(&first_agent), Some(&first_user)) = (agents.first(), users.first()) {
        let first_agent = AgentId::new(first_agent);

        // The first agent answers the first user through the reply flow,
        // the user responds, then the agent closes the chat. Closing frees
        // the agent, so the next user in line is connected automatically.
        sender.send(InboundEvent::ReplyButton {
            agent: first_agent,
            target: first_user,
        })?;
        sender.send(InboundEvent::AgentMessage {
            agent: first_agent,
            text: "Your order shipped this morning.".into(),
        })?;
        sender.send(InboundEvent::UserMessage {
            user: first_user,
            display_name: NAMES[0].to_string(),
            text: "great, thanks!".into(),
        })?;
        sender.send(InboundEvent::AgentEndChat {
            agent: first_agent,
            user: first_user,
        })?;
        sender.send(InboundEvent::RatingSubmitted {
            user: first_user,
            value: 5,
        })?;
    }
    sleep(Duration::from_millis(100)).await;

    if let Some(&second_user) = users.get(1) {
        // The second user hangs up from their side and leaves a rating,
        // freeing the agent for whoever is still waiting.
        sender.send(InboundEvent::UserEndChat { user: second_user })?;
        sender.send(InboundEvent::RatingSubmitted {
            user: second_user,
            value: 4,
        })?;
    }

    drop(sender);
    server.run().await?;

    let stats = engine.stats().await;
    info!("📊 walkthrough finished:");
    info!("  direct assignments: {}", stats.routing.users_assigned_directly);
    info!("  queue assignments:  {}", stats.routing.users_assigned_from_queue);
    info!("  users queued:       {}", stats.routing.users_enqueued);
    info!("  replies delivered:  {}", stats.routing.replies_to_users);
    info!("  ratings recorded:   {}", stats.routing.ratings_recorded);
    info!("  active sessions:    {}", stats.active_sessions);
    info!("  waiting users:      {}", stats.waiting_users);

    Ok(())
}

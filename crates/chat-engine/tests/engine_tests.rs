//! Integration tests for the chat engine
//!
//! These tests drive the engine through the full event surface (joins,
//! messages, the reply flow, both end-chat directions, ratings) and verify
//! the routing state and the outbound intents against each other.

use std::sync::Arc;

use livedesk_chat_engine::prelude::*;

fn test_engine(agents: impl IntoIterator<Item = i64>) -> Arc<LiveChatEngine> {
    LiveChatEngine::new(LiveChatConfig::with_agents(agents)).expect("engine creation failed")
}

fn user(n: i64) -> UserId {
    UserId::new(n)
}

fn agent(n: i64) -> AgentId {
    AgentId::new(n)
}

fn message(n: i64, text: &str) -> InboundEvent {
    InboundEvent::UserMessage {
        user: user(n),
        display_name: format!("User {}", n),
        text: text.to_string(),
    }
}

fn rating(n: i64, value: u8) -> InboundEvent {
    InboundEvent::RatingSubmitted {
        user: user(n),
        value,
    }
}

/// Notices addressed to one user, in intent order.
fn user_notices(intents: &[OutboundIntent], target: UserId) -> Vec<&UserNotice> {
    intents
        .iter()
        .filter_map(|intent| match intent {
            OutboundIntent::SendToUser { user, notice, .. } if *user == target => Some(notice),
            _ => None,
        })
        .collect()
}

/// Notices addressed to one agent, in intent order.
fn agent_notices(intents: &[OutboundIntent], target: AgentId) -> Vec<&AgentNotice> {
    intents
        .iter()
        .filter_map(|intent| match intent {
            OutboundIntent::SendToAgent { agent, notice, .. } if *agent == target => Some(notice),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_engine_creation() {
    let engine = test_engine([9001, 9002]);
    let stats = engine.stats().await;

    assert_eq!(stats.active_sessions, 0);
    assert_eq!(stats.idle_agents, 2);
    assert_eq!(stats.busy_agents, 0);
    assert_eq!(stats.waiting_users, 0);
    assert_eq!(engine.config().agents.members.len(), 2);

    // Duplicate agent ids never validate.
    assert!(LiveChatEngine::new(LiveChatConfig::with_agents([7, 7])).is_err());
}

#[tokio::test]
async fn test_first_contact_greets_and_assigns() {
    let engine = test_engine([9001]);

    let intents = engine
        .handle_event(message(1, "my payment failed"))
        .await
        .expect("routing failed");

    let to_user = user_notices(&intents, user(1));
    assert!(matches!(to_user[0], UserNotice::Welcome));
    assert!(matches!(to_user[1], UserNotice::CommonQuestions));
    assert!(matches!(to_user[2], UserNotice::ForwardedToAgent));

    // The message text travels with the forward, and the forward carries the
    // reply / end controls for this user.
    let to_agent = agent_notices(&intents, agent(9001));
    assert!(matches!(
        to_agent[0],
        AgentNotice::UserText { text, .. } if text == "my payment failed"
    ));
    assert!(intents.iter().any(|intent| matches!(
        intent,
        OutboundIntent::SendToAgent {
            controls: Controls::ReplyAndEnd { target },
            ..
        } if *target == user(1)
    )));

    assert_eq!(engine.agent_for(user(1)).await, Some(agent(9001)));
    assert_eq!(engine.user_for(agent(9001)).await, Some(user(1)));
    assert_eq!(engine.agent_status(agent(9001)).await, Some(AgentStatus::Busy));
    assert_eq!(engine.reply_target(agent(9001)).await, Some(user(1)));
}

#[tokio::test]
async fn test_in_session_relay_sends_nothing_to_user() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "first")).await.unwrap();

    let intents = engine.handle_event(message(1, "second")).await.unwrap();

    assert_eq!(intents.len(), 1);
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToAgent {
            agent: a,
            notice: AgentNotice::UserText { text, .. },
            controls: Controls::None,
        } if *a == agent(9001) && text == "second"
    ));
}

#[tokio::test]
async fn test_saturated_pool_queues_users_in_order() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();

    let second = engine.handle_event(message(2, "hi")).await.unwrap();
    let third = engine.handle_event(message(3, "hi")).await.unwrap();

    assert!(user_notices(&second, user(2))
        .iter()
        .any(|n| matches!(n, UserNotice::QueueJoined)));
    assert!(user_notices(&third, user(3))
        .iter()
        .any(|n| matches!(n, UserNotice::QueueJoined)));

    // Queued users hold no session; no agent heard about them yet.
    assert_eq!(engine.waiting_users().await, vec![user(2), user(3)]);
    assert_eq!(engine.agent_for(user(2)).await, None);
    assert_eq!(engine.agent_for(user(3)).await, None);

    let stats = engine.stats().await;
    assert_eq!(stats.active_sessions, 1);
    assert_eq!(stats.waiting_users, 2);
    assert_eq!(stats.routing.users_enqueued, 2);
}

#[tokio::test]
async fn test_renewed_request_does_not_duplicate_queue_entry() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();

    let intents = engine.handle_event(message(2, "still there?")).await.unwrap();

    let notices = user_notices(&intents, user(2));
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], UserNotice::QueueWait));
    assert_eq!(engine.waiting_users().await, vec![user(2)]);
    assert_eq!(engine.stats().await.routing.users_enqueued, 1);
}

#[tokio::test]
async fn test_user_end_frees_agent_and_drains_queue_in_same_step() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();
    engine.handle_event(message(3, "hi")).await.unwrap();

    let intents = engine
        .handle_event(InboundEvent::UserEndChat { user: user(1) })
        .await
        .unwrap();

    // Agent learns about the end, gets the queue head, then the ending user
    // receives the wrap-up and the rating prompt.
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToAgent { notice: AgentNotice::UserEndedChat { user: u }, .. }
            if *u == user(1)
    ));
    assert!(matches!(
        &intents[1],
        OutboundIntent::SendToAgent { notice: AgentNotice::QueuedUserConnected { user: u }, .. }
            if *u == user(2)
    ));
    assert!(matches!(
        &intents[2],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::AgentConnected, .. }
            if *u == user(2)
    ));
    assert!(matches!(
        &intents[3],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::ChatEnded, .. }
            if *u == user(1)
    ));
    assert!(matches!(
        &intents[4],
        OutboundIntent::SendToUser {
            notice: UserNotice::RatingPrompt,
            controls: Controls::Rating { user: u },
            ..
        } if *u == user(1)
    ));

    assert_eq!(engine.agent_for(user(1)).await, None);
    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));
    assert_eq!(engine.waiting_users().await, vec![user(3)]);
}

#[tokio::test]
async fn test_agent_end_acknowledges_then_drains() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();

    let intents = engine
        .handle_event(InboundEvent::AgentEndChat {
            agent: agent(9001),
            user: user(1),
        })
        .await
        .unwrap();

    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::ClosedByAgent, .. }
            if *u == user(1)
    ));
    assert!(matches!(
        &intents[1],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::RatingPrompt, .. }
            if *u == user(1)
    ));
    assert!(matches!(
        &intents[2],
        OutboundIntent::SendToAgent { notice: AgentNotice::SessionClosed, .. }
    ));
    assert!(matches!(
        &intents[3],
        OutboundIntent::SendToAgent { notice: AgentNotice::QueuedUserConnected { user: u }, .. }
            if *u == user(2)
    ));
    assert!(matches!(
        &intents[4],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::AgentConnected, .. }
            if *u == user(2)
    ));

    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));
    assert_eq!(engine.stats().await.routing.sessions_ended_by_agent, 1);
}

#[tokio::test]
async fn test_queue_drains_in_fifo_order() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();
    engine.handle_event(message(3, "hi")).await.unwrap();

    engine
        .handle_event(InboundEvent::UserEndChat { user: user(1) })
        .await
        .unwrap();
    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));

    engine
        .handle_event(InboundEvent::AgentEndChat {
            agent: agent(9001),
            user: user(2),
        })
        .await
        .unwrap();
    assert_eq!(engine.agent_for(user(3)).await, Some(agent(9001)));

    assert!(engine.waiting_users().await.is_empty());
    assert_eq!(engine.stats().await.routing.users_assigned_from_queue, 2);
}

#[tokio::test]
async fn test_concurrent_first_messages_assign_exactly_once() {
    let engine = test_engine([9001]);

    let (first, second) = tokio::join!(
        engine.handle_event(message(1, "hi")),
        engine.handle_event(message(2, "hi")),
    );
    first.unwrap();
    second.unwrap();

    // One of the two owns the only agent; the other waits. Never both.
    let stats = engine.stats().await;
    assert_eq!(stats.active_sessions, 1);
    assert_eq!(stats.waiting_users, 1);
    assert_eq!(stats.idle_agents, 0);

    let assignments = [
        engine.agent_for(user(1)).await,
        engine.agent_for(user(2)).await,
    ];
    assert_eq!(assignments.iter().filter(|a| a.is_some()).count(), 1);
}

#[tokio::test]
async fn test_reply_flow_roundtrip() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();

    let armed = engine
        .handle_event(InboundEvent::ReplyButton {
            agent: agent(9001),
            target: user(1),
        })
        .await
        .unwrap();
    assert_eq!(armed.len(), 1);
    assert!(matches!(
        &armed[0],
        OutboundIntent::SendToAgent { notice: AgentNotice::ReplyPrompt, .. }
    ));
    assert_eq!(
        engine.reply_mode(agent(9001)).await,
        Some(ReplyMode::AwaitingReply)
    );

    let sent = engine
        .handle_event(InboundEvent::AgentMessage {
            agent: agent(9001),
            text: "the refund is on its way".into(),
        })
        .await
        .unwrap();
    assert!(matches!(
        &sent[0],
        OutboundIntent::SendToUser {
            user: u,
            notice: UserNotice::AgentReply { text },
            controls: Controls::EndChat,
        } if *u == user(1) && text == "the refund is on its way"
    ));
    assert!(matches!(
        &sent[1],
        OutboundIntent::SendToAgent { notice: AgentNotice::ReplySent, .. }
    ));

    assert_eq!(engine.reply_mode(agent(9001)).await, Some(ReplyMode::Normal));
    assert_eq!(engine.stats().await.routing.replies_to_users, 1);
}

#[tokio::test]
async fn test_agent_chatter_outside_reply_flow_is_dropped() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();

    let intents = engine
        .handle_event(InboundEvent::AgentMessage {
            agent: agent(9001),
            text: "note to self".into(),
        })
        .await
        .unwrap();

    assert!(intents.is_empty());
}

#[tokio::test]
async fn test_reply_with_no_target_reports_back() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine
        .handle_event(InboundEvent::ReplyButton {
            agent: agent(9001),
            target: user(1),
        })
        .await
        .unwrap();

    // The user walks away mid-composition; the rejoin clears the agent's
    // reply-target but leaves the armed reply flow in place.
    engine
        .handle_event(InboundEvent::JoinRequest { user: user(1) })
        .await
        .unwrap();
    assert_eq!(
        engine.reply_mode(agent(9001)).await,
        Some(ReplyMode::AwaitingReply)
    );

    let intents = engine
        .handle_event(InboundEvent::AgentMessage {
            agent: agent(9001),
            text: "too late".into(),
        })
        .await
        .unwrap();

    assert_eq!(intents.len(), 1);
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToAgent { notice: AgentNotice::NoReplyTarget, .. }
    ));
    assert_eq!(engine.reply_mode(agent(9001)).await, Some(ReplyMode::Normal));
}

#[tokio::test]
async fn test_reply_button_adopts_unassigned_user() {
    let engine = test_engine([9001]);

    // The control may sit on an old forwarded message; pressing it binds
    // the session without touching availability.
    engine
        .handle_event(InboundEvent::ReplyButton {
            agent: agent(9001),
            target: user(7),
        })
        .await
        .unwrap();

    assert_eq!(engine.agent_for(user(7)).await, Some(agent(9001)));
    assert_eq!(engine.agent_status(agent(9001)).await, Some(AgentStatus::Idle));

    let sent = engine
        .handle_event(InboundEvent::AgentMessage {
            agent: agent(9001),
            text: "are you still there?".into(),
        })
        .await
        .unwrap();
    assert!(matches!(
        &sent[0],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::AgentReply { .. }, .. }
            if *u == user(7)
    ));
}

#[tokio::test]
async fn test_reply_button_dequeues_adopted_user() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();
    assert_eq!(engine.waiting_users().await, vec![user(2)]);

    // Replying to the waiting user adopts them: the binding is their
    // assignment, so the queue spot goes away and a later drain cannot hand
    // them to someone else.
    engine
        .handle_event(InboundEvent::ReplyButton {
            agent: agent(9001),
            target: user(2),
        })
        .await
        .unwrap();

    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));
    assert!(engine.waiting_users().await.is_empty());
    // The displaced first user lost their session to the adoption.
    assert_eq!(engine.agent_for(user(1)).await, None);
}

#[tokio::test]
async fn test_unknown_agent_events_are_rejected() {
    let engine = test_engine([9001]);

    let from_stranger = [
        InboundEvent::ReplyButton {
            agent: agent(4242),
            target: user(1),
        },
        InboundEvent::AgentMessage {
            agent: agent(4242),
            text: "let me in".into(),
        },
        InboundEvent::AgentEndChat {
            agent: agent(4242),
            user: user(1),
        },
    ];

    for event in from_stranger {
        let result = engine.handle_event(event).await;
        assert!(matches!(result, Err(LiveChatError::NotFound(_))));
    }

    let stats = engine.stats().await;
    assert_eq!(stats.active_sessions, 0);
    assert_eq!(stats.idle_agents, 1);
}

#[tokio::test]
async fn test_rating_is_stored_and_overwritten() {
    let engine = test_engine([9001]);

    let first = engine.handle_event(rating(1, 3)).await.unwrap();
    assert!(matches!(
        &first[0],
        OutboundIntent::SendToUser { notice: UserNotice::RatingSaved, .. }
    ));
    assert_eq!(engine.rating_for(user(1)).await, Some(3));

    engine.handle_event(rating(1, 5)).await.unwrap();
    assert_eq!(engine.rating_for(user(1)).await, Some(5));
    assert_eq!(engine.stats().await.routing.ratings_recorded, 2);
}

#[tokio::test]
async fn test_out_of_range_rating_is_rejected() {
    let engine = test_engine([9001]);

    for bad in [0u8, 6, 200] {
        let result = engine.handle_event(rating(1, bad)).await;
        assert!(matches!(result, Err(LiveChatError::InvalidInput(_))));
    }

    assert_eq!(engine.rating_for(user(1)).await, None);
    assert_eq!(engine.stats().await.routing.ratings_recorded, 0);
}

#[tokio::test]
async fn test_rating_reaches_agent_serving_the_user() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();

    // A rating prompt from an earlier chat can be answered mid-session; the
    // score goes to whoever serves the user now.
    let intents = engine.handle_event(rating(1, 4)).await.unwrap();
    assert!(agent_notices(&intents, agent(9001))
        .iter()
        .any(|n| matches!(n, AgentNotice::RatingReceived { value: 4, .. })));
}

#[tokio::test]
async fn test_rating_after_clean_close_has_no_agent_to_notify() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine
        .handle_event(InboundEvent::AgentEndChat {
            agent: agent(9001),
            user: user(1),
        })
        .await
        .unwrap();

    // The close dropped both the session and the reply-target, so only the
    // user acknowledgment goes out.
    let intents = engine.handle_event(rating(1, 5)).await.unwrap();
    assert_eq!(intents.len(), 1);
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToUser { notice: UserNotice::RatingSaved, .. }
    ));
    assert_eq!(engine.rating_for(user(1)).await, Some(5));
}

#[tokio::test]
async fn test_rating_prompt_is_unconditional_on_user_end() {
    let engine = test_engine([9001]);

    // No session at all: the wrap-up and the prompt still go out.
    let intents = engine
        .handle_event(InboundEvent::UserEndChat { user: user(5) })
        .await
        .unwrap();

    assert_eq!(intents.len(), 2);
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToUser { notice: UserNotice::ChatEnded, .. }
    ));
    assert!(matches!(
        &intents[1],
        OutboundIntent::SendToUser { notice: UserNotice::RatingPrompt, .. }
    ));
}

#[tokio::test]
async fn test_ending_from_the_queue_keeps_the_spot() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();

    engine
        .handle_event(InboundEvent::UserEndChat { user: user(2) })
        .await
        .unwrap();

    // Ending "their chat" closes nothing for a waiting user; the queue
    // spot survives.
    assert_eq!(engine.waiting_users().await, vec![user(2)]);
}

#[tokio::test]
async fn test_join_supersedes_queue_membership() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();

    let intents = engine
        .handle_event(InboundEvent::JoinRequest { user: user(2) })
        .await
        .unwrap();

    assert!(engine.waiting_users().await.is_empty());
    assert!(matches!(
        intents.last(),
        Some(OutboundIntent::SendToUser { notice: UserNotice::JoinConfirmation, .. })
    ));
}

#[tokio::test]
async fn test_join_abandons_session_and_replays_greeting() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();

    let intents = engine
        .handle_event(InboundEvent::JoinRequest { user: user(1) })
        .await
        .unwrap();

    // Old agent hears about it, inherits the queue head, and the rejoining
    // user gets the confirmation last.
    assert!(matches!(
        &intents[0],
        OutboundIntent::SendToAgent { notice: AgentNotice::UserStartedNewSession { user: u }, .. }
            if *u == user(1)
    ));
    assert!(matches!(
        &intents[1],
        OutboundIntent::SendToAgent { notice: AgentNotice::QueuedUserConnected { user: u }, .. }
            if *u == user(2)
    ));
    assert!(matches!(
        &intents[2],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::AgentConnected, .. }
            if *u == user(2)
    ));
    assert!(matches!(
        &intents[3],
        OutboundIntent::SendToUser { user: u, notice: UserNotice::JoinConfirmation, .. }
            if *u == user(1)
    ));

    assert_eq!(engine.agent_for(user(1)).await, None);
    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));
    assert_eq!(engine.stats().await.routing.sessions_abandoned, 1);

    // The greeting replays, and with the agent busy again the user queues.
    let next = engine.handle_event(message(1, "back again")).await.unwrap();
    assert!(user_notices(&next, user(1))
        .iter()
        .any(|n| matches!(n, UserNotice::Welcome)));
    assert_eq!(engine.waiting_users().await, vec![user(1)]);
}

#[tokio::test]
async fn test_message_into_expired_session_redirects() {
    let engine = test_engine([9001]);
    engine.handle_event(message(1, "hi")).await.unwrap();
    engine
        .handle_event(InboundEvent::AgentEndChat {
            agent: agent(9001),
            user: user(1),
        })
        .await
        .unwrap();

    let intents = engine.handle_event(message(1, "anyone there?")).await.unwrap();

    let notices = user_notices(&intents, user(1));
    assert_eq!(notices.len(), 2);
    assert!(matches!(notices[0], UserNotice::SessionExpired));
    assert!(matches!(notices[1], UserNotice::MainMenu));

    // The message was not routed anywhere.
    assert_eq!(engine.agent_for(user(1)).await, None);
    assert_eq!(engine.agent_status(agent(9001)).await, Some(AgentStatus::Idle));
}

#[tokio::test]
async fn test_agents_are_picked_in_pool_order() {
    let engine = test_engine([9001, 9002]);

    engine.handle_event(message(1, "hi")).await.unwrap();
    engine.handle_event(message(2, "hi")).await.unwrap();
    assert_eq!(engine.agent_for(user(1)).await, Some(agent(9001)));
    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9002)));

    engine.handle_event(message(3, "hi")).await.unwrap();
    assert_eq!(engine.waiting_users().await, vec![user(3)]);

    // Whichever agent frees up takes the queue head.
    engine
        .handle_event(InboundEvent::UserEndChat { user: user(2) })
        .await
        .unwrap();
    assert_eq!(engine.agent_for(user(3)).await, Some(agent(9002)));
}

#[tokio::test]
async fn test_full_support_scenario() {
    let engine = test_engine([9001]);

    // Two users come in; the single agent takes the first, the second waits.
    engine
        .handle_event(InboundEvent::JoinRequest { user: user(1) })
        .await
        .unwrap();
    engine.handle_event(message(1, "order #5001 is late")).await.unwrap();
    engine
        .handle_event(InboundEvent::JoinRequest { user: user(2) })
        .await
        .unwrap();
    engine.handle_event(message(2, "billing question")).await.unwrap();

    assert_eq!(engine.agent_for(user(1)).await, Some(agent(9001)));
    assert_eq!(engine.waiting_users().await, vec![user(2)]);

    // Reply flow roundtrip, then a follow-up from the user.
    engine
        .handle_event(InboundEvent::ReplyButton {
            agent: agent(9001),
            target: user(1),
        })
        .await
        .unwrap();
    engine
        .handle_event(InboundEvent::AgentMessage {
            agent: agent(9001),
            text: "it ships tomorrow".into(),
        })
        .await
        .unwrap();
    engine.handle_event(message(1, "thanks!")).await.unwrap();

    // Agent closes the first chat; the waiting user is connected in the
    // same step.
    engine
        .handle_event(InboundEvent::AgentEndChat {
            agent: agent(9001),
            user: user(1),
        })
        .await
        .unwrap();
    assert_eq!(engine.agent_for(user(2)).await, Some(agent(9001)));

    engine.handle_event(rating(1, 5)).await.unwrap();

    // The second user hangs up and rates as well.
    engine
        .handle_event(InboundEvent::UserEndChat { user: user(2) })
        .await
        .unwrap();
    engine.handle_event(rating(2, 4)).await.unwrap();

    assert_eq!(engine.rating_for(user(1)).await, Some(5));
    assert_eq!(engine.rating_for(user(2)).await, Some(4));

    let stats = engine.stats().await;
    assert_eq!(stats.active_sessions, 0);
    assert_eq!(stats.idle_agents, 1);
    assert_eq!(stats.waiting_users, 0);
    assert_eq!(stats.routing.users_assigned_directly, 1);
    assert_eq!(stats.routing.users_assigned_from_queue, 1);
    assert_eq!(stats.routing.users_enqueued, 1);
    assert_eq!(stats.routing.messages_to_agents, 2);
    assert_eq!(stats.routing.replies_to_users, 1);
    assert_eq!(stats.routing.sessions_ended_by_user, 1);
    assert_eq!(stats.routing.sessions_ended_by_agent, 1);
    assert_eq!(stats.routing.ratings_recorded, 2);
}

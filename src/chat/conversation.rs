//! Conversation log: append-only message sequence with delayed replies.
//!
//! `submit` appends the user message at once and schedules the assistant
//! reply after the configured delay. Each scheduled reply is independent:
//! overlapping submissions are not serialized, so replies land in timer
//! completion order and may interleave with later user messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::profile::Profile;

use super::matcher::ResponseMatcher;
use super::model::Message;

/// Change notifications for the display layer.
#[derive(Debug, Clone)]
pub enum ConversationEvent {
    MessageAppended(Message),
    RepliesCancelled { count: usize },
}

/// One-click buttons below the chat that map to fixed utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Emergency,
    FindDoctor,
}

impl Shortcut {
    pub fn utterance(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::FindDoctor => "Find doctor",
        }
    }
}

/// Ordered, append-only log of the session's messages.
pub struct Conversation {
    profile: Profile,
    matcher: ResponseMatcher,
    messages: RwLock<Vec<Message>>,
    tx: broadcast::Sender<ConversationEvent>,
    reply_delay: Duration,
    pending: Mutex<JoinSet<()>>,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter when a reply task ends or is aborted.
struct InFlightGuard(Arc<Conversation>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Conversation {
    pub fn new(profile: Profile, matcher: ResponseMatcher, config: &ChatConfig) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(config.event_capacity.max(1));
        Arc::new(Self {
            profile,
            matcher,
            messages: RwLock::new(Vec::new()),
            tx,
            reply_delay: config.reply_delay,
            pending: Mutex::new(JoinSet::new()),
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Subscribe to append/cancel events.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.tx.subscribe()
    }

    /// Submit user text. Blank text is ignored and returns `None`.
    ///
    /// Otherwise returns the id of the appended user message. The reply is
    /// appended after the configured delay, or before returning when the
    /// delay is zero.
    pub async fn submit(self: &Arc<Self>, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }

        let user = Message::user(text);
        let id = user.id;
        self.append(user).await;

        if self.reply_delay.is_zero() {
            let reply = self.matcher.respond(text, &self.profile);
            self.append(reply).await;
            return Some(id);
        }

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(self));
        let text = text.to_string();
        let delay = self.reply_delay;

        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            tokio::time::sleep(delay).await;
            let conversation = &guard.0;
            let reply = conversation.matcher.respond(&text, &conversation.profile);
            conversation.append(reply).await;
        });

        Some(id)
    }

    /// Same as submitting the quick-reply text.
    pub async fn quick_reply(self: &Arc<Self>, reply: &str) -> Option<Uuid> {
        self.submit(reply).await
    }

    pub async fn shortcut(self: &Arc<Self>, shortcut: Shortcut) -> Option<Uuid> {
        self.submit(shortcut.utterance()).await
    }

    /// Whether any reply is still scheduled.
    pub fn is_typing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Wait until every scheduled reply has been appended.
    pub async fn settle(&self) {
        let mut pending = self.pending.lock().await;
        while let Some(result) = pending.join_next().await {
            match result {
                Err(e) if e.is_panic() => warn!(error = %e, "Reply task panicked"),
                _ => {}
            }
        }
    }

    /// Abort every scheduled reply. Returns how many were dropped.
    pub async fn cancel_pending(&self) -> usize {
        let mut pending = self.pending.lock().await;
        pending.abort_all();

        let mut cancelled = 0;
        while let Some(result) = pending.join_next().await {
            if matches!(result, Err(ref e) if e.is_cancelled()) {
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            info!(count = cancelled, "Cancelled pending replies");
            let _ = self
                .tx
                .send(ConversationEvent::RepliesCancelled { count: cancelled });
        }
        cancelled
    }

    /// Snapshot of all messages in display order.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// The most recent assistant message, if any.
    pub async fn last_assistant(&self) -> Option<Message> {
        self.messages
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .cloned()
    }

    async fn append(&self, message: Message) {
        debug!(
            id = %message.id,
            sender = ?message.sender,
            kind = ?message.kind,
            "Message appended"
        );
        {
            let mut messages = self.messages.write().await;
            messages.push(message.clone());
        }
        // No receivers is fine.
        let _ = self.tx.send(ConversationEvent::MessageAppended(message));
    }
}

//! The display-layer abstraction: a source of user input lines and a sink
//! for rendered output.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::chat::{Message, MessageKind};
use crate::error::ChannelError;

/// Stream of raw input lines from the user.
pub type InputStream = Pin<Box<dyn Stream<Item = String> + Send>>;

#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Begin reading user input.
    async fn start(&self) -> Result<InputStream, ChannelError>;

    /// Write a block of text to the user.
    async fn send(&self, text: &str) -> Result<(), ChannelError>;

    /// Signal that input is expected.
    async fn prompt(&self) -> Result<(), ChannelError> {
        Ok(())
    }

    /// Render one conversation message.
    async fn show_message(&self, message: &Message) -> Result<(), ChannelError> {
        self.send(&format_message(message)).await
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}

/// Plain-text rendering of a message with numbered quick replies.
pub fn format_message(message: &Message) -> String {
    let marker = if message.is_user() {
        "🧑"
    } else {
        match message.kind {
            Some(MessageKind::Emergency) => "🚨",
            Some(MessageKind::Warning) => "❤️",
            _ => "🤖",
        }
    };

    let mut out = format!(
        "{} {}\n   {}",
        marker,
        message.text.replace('\n', "\n   "),
        message.created_at.with_timezone(&chrono::Local).format("%H:%M:%S")
    );

    if message.is_assistant() && !message.quick_replies.is_empty() {
        let replies: Vec<String> = message
            .quick_replies
            .iter()
            .enumerate()
            .map(|(i, r)| format!("[{}] {}", i + 1, r))
            .collect();
        out.push_str("\n   ");
        out.push_str(&replies.join("  "));
    }
    out
}

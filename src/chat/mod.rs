//! Chat flow: response matching and the conversation log.

pub mod commands;
pub mod conversation;
pub mod matcher;
pub mod model;

pub use commands::{ChatCommand, CommandParser};
pub use conversation::{Conversation, ConversationEvent, Shortcut};
pub use matcher::{MatchedRule, Reply, ResponseMatcher};
pub use model::{DISCLAIMER, Message, MessageKind, Sender, greeting};

//! HealthChat: a rule-based health assistant chat core.

pub mod channels;
pub mod chat;
pub mod config;
pub mod error;
pub mod panels;
pub mod profile;
pub mod session;

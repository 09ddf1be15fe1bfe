//! Parses terminal input into chat commands.

use crate::panels::Panel;

use super::conversation::Shortcut;

/// Largest bare number treated as a quick-reply pick.
const MAX_QUICK_REPLY: usize = 9;

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Free text for the conversation.
    Say(String),
    /// 1-based index into the last assistant message's quick replies.
    QuickReply(usize),
    Shortcut(Shortcut),
    Show(Panel),
    Help,
    Quit,
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(content: &str) -> ChatCommand {
        let trimmed = content.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "/alerts" => ChatCommand::Show(Panel::Alerts),
            "/news" => ChatCommand::Show(Panel::News),
            "/vaccines" => ChatCommand::Show(Panel::Vaccines),
            "/overview" | "/stats" => ChatCommand::Show(Panel::Overview),
            "/profile" => ChatCommand::Show(Panel::Profile),
            "/emergency" | "/sos" => ChatCommand::Shortcut(Shortcut::Emergency),
            "/doctor" => ChatCommand::Shortcut(Shortcut::FindDoctor),
            "/help" | "/?" => ChatCommand::Help,
            "/quit" | "/exit" => ChatCommand::Quit,
            _ if lower.starts_with('/') => ChatCommand::Unknown(trimmed.to_string()),
            _ => match trimmed.parse::<usize>() {
                Ok(n) if (1..=MAX_QUICK_REPLY).contains(&n) => ChatCommand::QuickReply(n),
                _ => ChatCommand::Say(trimmed.to_string()),
            },
        }
    }

    pub fn help() -> &'static str {
        "Commands:\n  \
         /alerts     Health alerts for your area\n  \
         /news       Health news\n  \
         /vaccines   Vaccination schedule\n  \
         /overview   Quick stats, helplines and a health tip\n  \
         /profile    Your profile\n  \
         /emergency  Emergency contacts\n  \
         /doctor     Find a doctor\n  \
         1-9         Pick a suggested reply\n  \
         /quit       Exit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_commands() {
        assert_eq!(CommandParser::parse("/alerts"), ChatCommand::Show(Panel::Alerts));
        assert_eq!(CommandParser::parse(" /NEWS "), ChatCommand::Show(Panel::News));
        assert_eq!(CommandParser::parse("/vaccines"), ChatCommand::Show(Panel::Vaccines));
        assert_eq!(CommandParser::parse("/profile"), ChatCommand::Show(Panel::Profile));
        assert_eq!(CommandParser::parse("/stats"), ChatCommand::Show(Panel::Overview));
        assert_eq!(CommandParser::parse("/overview"), ChatCommand::Show(Panel::Overview));
    }

    #[test]
    fn shortcuts_and_control() {
        assert_eq!(
            CommandParser::parse("/emergency"),
            ChatCommand::Shortcut(Shortcut::Emergency)
        );
        assert_eq!(
            CommandParser::parse("/doctor"),
            ChatCommand::Shortcut(Shortcut::FindDoctor)
        );
        assert_eq!(CommandParser::parse("/quit"), ChatCommand::Quit);
        assert_eq!(CommandParser::parse("/?"), ChatCommand::Help);
        assert_eq!(
            CommandParser::parse("/teleport"),
            ChatCommand::Unknown("/teleport".into())
        );
    }

    #[test]
    fn small_numbers_pick_quick_replies() {
        assert_eq!(CommandParser::parse("2"), ChatCommand::QuickReply(2));
        assert_eq!(CommandParser::parse("0"), ChatCommand::Say("0".into()));
        assert_eq!(CommandParser::parse("108"), ChatCommand::Say("108".into()));
    }

    #[test]
    fn everything_else_is_said() {
        assert_eq!(
            CommandParser::parse("  I have a fever  "),
            ChatCommand::Say("I have a fever".into())
        );
        assert_eq!(CommandParser::parse("   "), ChatCommand::Say(String::new()));
    }
}

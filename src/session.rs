//! Session driver: runs onboarding then the chat loop over a [`Channel`].

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::channels::{Channel, InputStream};
use crate::chat::{
    ChatCommand, CommandParser, Conversation, ConversationEvent, DISCLAIMER, ResponseMatcher,
    greeting,
};
use crate::config::ChatConfig;
use crate::error::{ChannelError, ConfigError, OnboardingError, Result};
use crate::panels;
use crate::profile::{
    Gender, HealthDomain, InteractionMode, Language, MedicineType, OnboardingStep, Profile,
    ProfileCollector, ProfileDraft,
};

pub const BANNER: &str = "❤️ HealthChat AI\n   स्वास्थ्य सहायक | ସ୍ୱାସ୍ଥ୍ୟ ସହାୟକ | Health Assistant";

const PRIVACY_NOTICE: &str = "Data Privacy Agreement\n\
    • Your health information will be kept confidential and secure\n\
    • Information is used only to provide personalized health guidance\n\
    • Nothing you enter is stored after this session ends\n\
    • This service is not a substitute for professional medical advice";

const REVIEW_NOTICE: &str = "Important: This assistant provides health information and guidance \
    but is not a substitute for professional medical advice. Please consult qualified \
    healthcare providers for medical diagnosis and treatment.";

/// Load and validate a profile draft from a JSON file.
pub async fn load_profile(path: &Path) -> Result<Profile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(ConfigError::Io)?;
    let draft: ProfileDraft = serde_json::from_str(&raw)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;
    let profile = crate::profile::validate(&draft)?;
    info!(path = %path.display(), "Loaded profile from file");
    Ok(profile)
}

/// Run a full session: obtain a profile, then chat until quit or end of input.
pub async fn run(channel: Arc<dyn Channel>, config: ChatConfig) -> Result<()> {
    let mut input = channel.start().await?;
    channel.send(BANNER).await?;

    let profile = match config.profile_path.as_deref() {
        Some(path) => load_profile(path).await?,
        None => run_onboarding(channel.as_ref(), &mut input).await?,
    };

    chat_loop(channel.clone(), &mut input, profile, &config).await?;
    channel.shutdown().await?;
    Ok(())
}

/// Walk the onboarding wizard over the channel.
pub async fn run_onboarding(
    channel: &dyn Channel,
    input: &mut InputStream,
) -> Result<Profile> {
    let mut collector = ProfileCollector::new();

    loop {
        let step = collector.step();
        channel
            .send(&format!(
                "{}  Step {}/{} — {}",
                step.progress(),
                step.number(),
                OnboardingStep::ALL.len(),
                step.title()
            ))
            .await?;

        match step {
            OnboardingStep::BasicInfo => {
                let name = ask(channel, input, "Full name:").await?;
                collector.set_name(&name);
                let age = ask(channel, input, "Age:").await?;
                collector.set_age(&age);
                let gender: Gender =
                    ask_choice(channel, input, "Gender:", Gender::ALL, Gender::label).await?;
                collector.set_gender(gender);
                let location = ask(channel, input, "Location (district):").await?;
                collector.set_location(&location);
                let language: Language = ask_choice(
                    channel,
                    input,
                    "Preferred language:",
                    Language::ALL,
                    Language::label,
                )
                .await?;
                collector.set_language(language);
            }
            OnboardingStep::Consent => {
                channel.send(PRIVACY_NOTICE).await?;
                let answer = ask(
                    channel,
                    input,
                    "I agree to the privacy policy and consent to data processing (yes/no):",
                )
                .await?;
                collector.set_consent(is_yes(&answer));
            }
            OnboardingStep::Domains => {
                let listing: Vec<String> = HealthDomain::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, d)| {
                        let mark = if collector.draft().domains.contains(d) { "x" } else { " " };
                        format!("  [{mark}] {}. {} {}", i + 1, d.icon(), d.label())
                    })
                    .collect();
                channel
                    .send(&format!(
                        "Select areas you're interested in:\n{}",
                        listing.join("\n")
                    ))
                    .await?;
                let answer = ask(channel, input, "Domains to toggle (numbers or names):").await?;
                for domain in parse_domain_list(&answer) {
                    collector.toggle_domain(domain);
                }
            }
            OnboardingStep::Preferences => {
                let mode: InteractionMode = ask_choice(
                    channel,
                    input,
                    "Interaction mode:",
                    InteractionMode::ALL,
                    InteractionMode::label,
                )
                .await?;
                collector.set_mode(mode);
                let medicine: MedicineType = ask_choice(
                    channel,
                    input,
                    "Medicine preference:",
                    MedicineType::ALL,
                    MedicineType::label,
                )
                .await?;
                collector.set_medicine(medicine);
            }
            OnboardingStep::Review => {
                channel.send(&collector.draft().summary()).await?;
                channel.send(REVIEW_NOTICE).await?;
                let answer = ask(channel, input, "Start chatting? (yes / back):").await?;
                if is_yes(&answer) {
                    return Ok(collector.complete()?);
                }
                collector.previous()?;
                continue;
            }
        }

        if let Err(e) = collector.next() {
            debug!(step = %step, error = %e, "Onboarding step not satisfied");
            channel.send(&format!("⚠️ {e}")).await?;
        }
    }
}

/// The chat REPL. Returns when input ends or the user quits.
pub async fn chat_loop(
    channel: Arc<dyn Channel>,
    input: &mut InputStream,
    profile: Profile,
    config: &ChatConfig,
) -> Result<()> {
    let conversation = Conversation::new(profile, ResponseMatcher::default_rules(), config);
    let display = spawn_display(channel.clone(), &conversation);

    let opening = greeting(conversation.profile());
    channel.send(conversation.profile().header_line().as_str()).await?;
    channel.show_message(&opening).await?;
    channel.send(DISCLAIMER).await?;

    let mut quit = false;
    loop {
        channel.prompt().await?;
        let Some(line) = input.next().await else {
            break;
        };

        match CommandParser::parse(&line) {
            ChatCommand::Say(text) => {
                conversation.submit(&text).await;
            }
            ChatCommand::QuickReply(n) => {
                let replies = match conversation.last_assistant().await {
                    Some(message) => message.quick_replies,
                    None => opening.quick_replies.clone(),
                };
                match replies.get(n - 1) {
                    Some(reply) => {
                        conversation.quick_reply(reply).await;
                    }
                    None => channel.send(&format!("No suggested reply #{n}")).await?,
                }
            }
            ChatCommand::Shortcut(shortcut) => {
                conversation.shortcut(shortcut).await;
            }
            ChatCommand::Show(panel) => {
                channel
                    .send(&panels::render(panel, conversation.profile()))
                    .await?;
            }
            ChatCommand::Help => channel.send(CommandParser::help()).await?,
            ChatCommand::Quit => {
                quit = true;
                break;
            }
            ChatCommand::Unknown(cmd) => {
                channel
                    .send(&format!("Unknown command: {cmd}. Type /help for commands."))
                    .await?
            }
        }
    }

    if quit {
        conversation.cancel_pending().await;
    } else {
        conversation.settle().await;
    }

    // Dropping the last handle closes the event channel so the display task drains and exits.
    drop(conversation);
    if let Err(e) = display.await {
        warn!(error = %e, "Display task failed");
    }
    Ok(())
}

/// Forward assistant replies from the log to the channel.
fn spawn_display(
    channel: Arc<dyn Channel>,
    conversation: &Arc<Conversation>,
) -> tokio::task::JoinHandle<()> {
    let mut events = conversation.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ConversationEvent::MessageAppended(message)) if message.is_assistant() => {
                    if let Err(e) = channel.show_message(&message).await {
                        warn!(error = %e, "Failed to display reply");
                    }
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "Display fell behind conversation events");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn ask(channel: &dyn Channel, input: &mut InputStream, question: &str) -> Result<String> {
    channel.send(question).await?;
    channel.prompt().await?;
    match input.next().await {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(ChannelError::InputClosed {
            name: channel.name().to_string(),
        }
        .into()),
    }
}

/// Ask until the answer names one of `options`, by number, code or label.
async fn ask_choice<T>(
    channel: &dyn Channel,
    input: &mut InputStream,
    question: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
) -> Result<T>
where
    T: Copy + FromStr<Err = OnboardingError>,
{
    let listing: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  {}. {}", i + 1, label(o)))
        .collect();
    let question = format!("{question}\n{}", listing.join("\n"));

    loop {
        let answer = ask(channel, input, &question).await?;
        if let Some(choice) = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
        {
            return Ok(*choice);
        }
        match answer.parse::<T>() {
            Ok(choice) => return Ok(choice),
            Err(e) => channel.send(&format!("⚠️ {e}")).await?,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "i agree" | "agree" | "ok"
    )
}

/// Parse "1, 3" or "cardio diabetes" into domains; unknown entries are skipped.
fn parse_domain_list(answer: &str) -> Vec<HealthDomain> {
    answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|token| match token.parse::<usize>() {
            Ok(n) => n
                .checked_sub(1)
                .and_then(|i| HealthDomain::ALL.get(i))
                .copied(),
            Err(_) => token.parse().ok(),
        })
        .collect()
}

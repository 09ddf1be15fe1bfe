//! Response matcher: maps a user utterance plus profile to one canned reply.
//!
//! Evaluation order:
//! 1. Keyword rules, in table order. First keyword found as a substring wins.
//! 2. Domain rules, in order. Fire only when the profile selected the domain.
//! 3. The generic wellness reply.
//!
//! Matching is case-insensitive on the utterance. The matcher is total: every
//! input, including an empty one, yields exactly one assistant message.

use tracing::debug;

use crate::profile::{HealthDomain, Profile};

use super::model::{Message, MessageKind};

/// Placeholder substituted with the profile location.
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// A keyword → reply entry.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Lower-case keyword searched for in the utterance.
    pub keyword: String,
    /// Reply text, may contain [`LOCATION_PLACEHOLDER`].
    pub response: String,
    pub kind: Option<MessageKind>,
    pub quick_replies: Vec<String>,
}

/// A reply gated on the profile having selected a health domain.
#[derive(Debug, Clone)]
pub struct DomainRule {
    pub domain: HealthDomain,
    /// Any of these (lower-case) triggers the rule.
    pub triggers: Vec<String>,
    pub response: String,
    pub kind: Option<MessageKind>,
    pub quick_replies: Vec<String>,
}

/// Which branch produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedRule {
    Keyword(String),
    Domain(HealthDomain),
    Fallback,
}

/// A reply plus the branch that produced it.
#[derive(Debug, Clone)]
pub struct Reply {
    pub rule: MatchedRule,
    pub message: Message,
}

/// Keyword and domain rule tables with a generic fallback.
#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    keyword_rules: Vec<KeywordRule>,
    domain_rules: Vec<DomainRule>,
    fallback: KeywordRule,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ResponseMatcher {
    /// The built-in health advice tables.
    pub fn default_rules() -> Self {
        let keyword_rules = vec![
            KeywordRule {
                keyword: "fever".into(),
                response: "For fever management:\n\
                           • Take paracetamol as directed\n\
                           • Drink plenty of fluids\n\
                           • Rest well\n\
                           • Use cold compress\n\n\
                           ⚠️ Consult a doctor if fever exceeds 102°F or persists for more than 3 days."
                    .into(),
                kind: Some(MessageKind::Warning),
                quick_replies: strings(&["More info", "Prevention tips"]),
            },
            KeywordRule {
                keyword: "cough".into(),
                response: "For cough relief:\n\
                           • Drink warm water with honey\n\
                           • Steam inhalation\n\
                           • Avoid cold drinks\n\
                           • Gargle with salt water\n\n\
                           ⚠️ See a doctor if cough persists for more than 2 weeks or has blood."
                    .into(),
                kind: Some(MessageKind::Warning),
                quick_replies: strings(&["More info", "Prevention tips"]),
            },
            KeywordRule {
                keyword: "vaccination".into(),
                response: "💉 Vaccination Schedule:\n\
                           • COVID-19: Booster every 6 months\n\
                           • Flu: Annual\n\
                           • HPV: Ages 11-26\n\
                           • Hepatitis B: 3-dose series\n\n\
                           Find nearest vaccination center at your PHC or visit cowin.gov.in"
                    .into(),
                kind: Some(MessageKind::Info),
                quick_replies: strings(&["More info", "Prevention tips"]),
            },
            KeywordRule {
                keyword: "emergency".into(),
                response: "🚨 EMERGENCY CONTACTS:\n\
                           • National Emergency: 108\n\
                           • Women Helpline: 181\n\
                           • Child Helpline: 1098\n\
                           • Mental Health: 9152987821\n\n\
                           📍 Nearest Hospital: Based on your location - {location}"
                    .into(),
                kind: Some(MessageKind::Emergency),
                quick_replies: strings(&["Find hospital", "Call ambulance"]),
            },
        ];

        let domain_rules = vec![
            DomainRule {
                domain: HealthDomain::Cardio,
                triggers: strings(&["heart", "chest"]),
                response: "❤️ Heart Health Tips:\n\
                           • Regular exercise (30 min daily)\n\
                           • Limit salt intake\n\
                           • Avoid smoking\n\
                           • Monitor blood pressure\n\
                           • Eat fruits and vegetables\n\n\
                           ⚠️ Chest pain or shortness of breath? Seek immediate medical attention!"
                    .into(),
                kind: Some(MessageKind::Warning),
                quick_replies: strings(&["Emergency help", "Diet tips", "Exercise plan"]),
            },
            DomainRule {
                domain: HealthDomain::Diabetes,
                triggers: strings(&["sugar"]),
                response: "🩸 Blood Sugar Management:\n\
                           • Monitor levels regularly\n\
                           • Follow prescribed diet\n\
                           • Take medications on time\n\
                           • Exercise regularly\n\
                           • Stay hydrated\n\n\
                           Target levels: Fasting 80-130 mg/dL, Post-meal <180 mg/dL"
                    .into(),
                kind: Some(MessageKind::Info),
                quick_replies: strings(&["Diet plan", "Exercise tips", "Monitor schedule"]),
            },
        ];

        Self {
            keyword_rules,
            domain_rules,
            fallback: default_fallback(),
        }
    }

    /// A matcher with no keyword or domain rules (for testing).
    pub fn empty() -> Self {
        Self {
            keyword_rules: Vec::new(),
            domain_rules: Vec::new(),
            fallback: default_fallback(),
        }
    }

    /// Append a keyword rule after the existing ones.
    pub fn add_keyword_rule(
        &mut self,
        keyword: &str,
        response: &str,
        kind: Option<MessageKind>,
        quick_replies: &[&str],
    ) {
        self.keyword_rules.push(KeywordRule {
            keyword: keyword.to_lowercase(),
            response: response.into(),
            kind,
            quick_replies: strings(quick_replies),
        });
    }

    /// Keywords in evaluation order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keyword_rules.iter().map(|r| r.keyword.as_str())
    }

    /// Produce the reply for `utterance`.
    pub fn evaluate(&self, utterance: &str, profile: &Profile) -> Reply {
        let lower = utterance.to_lowercase();

        if let Some(rule) = self
            .keyword_rules
            .iter()
            .find(|r| lower.contains(r.keyword.as_str()))
        {
            debug!(keyword = %rule.keyword, "Utterance matched keyword rule");
            let text = rule
                .response
                .replacen(LOCATION_PLACEHOLDER, profile.resolved_location(), 1);
            return Reply {
                rule: MatchedRule::Keyword(rule.keyword.clone()),
                message: build_message(text, rule.kind, &rule.quick_replies),
            };
        }

        if let Some(rule) = self.domain_rules.iter().find(|r| {
            profile.has_domain(r.domain) && r.triggers.iter().any(|t| lower.contains(t.as_str()))
        }) {
            debug!(domain = %rule.domain, "Utterance matched domain rule");
            return Reply {
                rule: MatchedRule::Domain(rule.domain),
                message: build_message(rule.response.clone(), rule.kind, &rule.quick_replies),
            };
        }

        debug!("No rule matched, using generic reply");
        Reply {
            rule: MatchedRule::Fallback,
            message: build_message(
                self.fallback.response.clone(),
                self.fallback.kind,
                &self.fallback.quick_replies,
            ),
        }
    }

    /// Produce just the assistant message for `utterance`.
    pub fn respond(&self, utterance: &str, profile: &Profile) -> Message {
        self.evaluate(utterance, profile).message
    }
}

impl Default for ResponseMatcher {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn default_fallback() -> KeywordRule {
    KeywordRule {
        keyword: String::new(),
        response: "I understand your concern. Here are some general health tips:\n\n\
                   • Maintain good hygiene\n\
                   • Eat balanced meals\n\
                   • Exercise regularly\n\
                   • Get adequate sleep\n\
                   • Stay hydrated\n\n\
                   For specific medical advice, please consult a healthcare professional. \
                   Would you like me to help you find a nearby health center?"
            .into(),
        kind: None,
        quick_replies: strings(&["Find doctor", "Health centers", "More tips"]),
    }
}

fn build_message(text: String, kind: Option<MessageKind>, quick_replies: &[String]) -> Message {
    let replies: Vec<&str> = quick_replies.iter().map(String::as_str).collect();
    Message::assistant(text, kind, &replies)
}

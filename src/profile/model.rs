//! User profile data models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

/// Fallback used wherever a location string is rendered into a reply.
pub const UNKNOWN_LOCATION: &str = "your area";

macro_rules! impl_display_from_str {
    ($ty:ident, $field:literal, { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants in display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Short wire code, matches the serde form.
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl FromStr for $ty {
            type Err = OnboardingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                if let Some(exact) = Self::ALL.iter().copied().find(|v| v.code() == wanted) {
                    return Ok(exact);
                }

                // Label prefixes must name exactly one variant.
                let matches: Vec<$ty> = Self::ALL
                    .iter()
                    .copied()
                    .filter(|v| !wanted.is_empty() && v.label().to_lowercase().starts_with(&wanted))
                    .collect();
                match matches.as_slice() {
                    [only] => Ok(*only),
                    [] => Err(OnboardingError::InvalidValue {
                        field: $field.to_string(),
                        message: format!("unknown value '{}'", s.trim()),
                    }),
                    several => Err(OnboardingError::InvalidValue {
                        field: $field.to_string(),
                        message: format!(
                            "'{}' is ambiguous: {}",
                            s.trim(),
                            several.iter().map(|v| v.code()).collect::<Vec<_>>().join(", ")
                        ),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male (पुरुष)",
            Self::Female => "Female (महिला)",
            Self::Other => "Other (अन्य)",
        }
    }
}

impl_display_from_str!(Gender, "gender", {
    Male => "male",
    Female => "female",
    Other => "other",
});

/// Preferred language. Only affects static labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "or")]
    Odia,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी (Hindi)",
            Self::Odia => "ଓଡ଼ିଆ (Odia)",
        }
    }
}

impl_display_from_str!(Language, "language", {
    English => "en",
    Hindi => "hi",
    Odia => "or",
});

/// A health-topic tag that gates personalized replies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthDomain {
    Cardio,
    Neuro,
    Diabetes,
    Maternal,
    Child,
    Mental,
    General,
}

impl HealthDomain {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cardio => "Cardiology (हृदय स्वास्थ्य)",
            Self::Neuro => "Neurology (न्यूरोलॉजी)",
            Self::Diabetes => "Diabetes (मधुमेह)",
            Self::Maternal => "Maternal Health (मातृ स्वास्थ्य)",
            Self::Child => "Child Health (बाल स्वास्थ्य)",
            Self::Mental => "Mental Health (मानसिक स्वास्थ्य)",
            Self::General => "General Health (सामान्य स्वास्थ्य)",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Cardio => "❤️",
            Self::Neuro => "🧠",
            Self::Diabetes => "🩸",
            Self::Maternal => "🤱",
            Self::Child => "👶",
            Self::Mental => "🧘",
            Self::General => "🏥",
        }
    }
}

impl_display_from_str!(HealthDomain, "domain", {
    Cardio => "cardio",
    Neuro => "neuro",
    Diabetes => "diabetes",
    Maternal => "maternal",
    Child => "child",
    Mental => "mental",
    General => "general",
});

/// Whether advice is tailored to the profile or general awareness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    Personal,
    Public,
}

impl InteractionMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Mode",
            Self::Public => "Public Mode",
        }
    }
}

impl_display_from_str!(InteractionMode, "mode", {
    Personal => "personal",
    Public => "public",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MedicineType {
    Scientific,
    Traditional,
}

impl MedicineType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scientific => "Scientific Medicine",
            Self::Traditional => "Traditional Medicine",
        }
    }
}

impl_display_from_str!(MedicineType, "medicine", {
    Scientific => "scientific",
    Traditional => "traditional",
});

/// Completed user profile. Built once by the collector, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub location: String,
    pub language: Language,
    pub consent: bool,
    /// Selected domains, in selection order, no duplicates.
    pub domains: Vec<HealthDomain>,
    pub mode: InteractionMode,
    pub medicine: MedicineType,
    pub completed_at: DateTime<Utc>,
}

impl Profile {
    pub fn has_domain(&self, domain: HealthDomain) -> bool {
        self.domains.contains(&domain)
    }

    /// Location for reply text, or [`UNKNOWN_LOCATION`] when unset.
    pub fn resolved_location(&self) -> &str {
        let trimmed = self.location.trim();
        if trimmed.is_empty() {
            UNKNOWN_LOCATION
        } else {
            trimmed
        }
    }

    /// Location if one was given.
    pub fn location(&self) -> Option<&str> {
        let trimmed = self.location.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// One-line header shown above the chat.
    pub fn header_line(&self) -> String {
        format!(
            "{} | {} · {} domains · {}",
            self.mode.label(),
            self.medicine.label(),
            self.domains.len(),
            self.language.code()
        )
    }
}

/// In-progress wizard input. Every field may still be missing.
///
/// Also the JSON shape accepted from a profile file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub location: String,
    pub language: Option<Language>,
    pub consent: bool,
    pub domains: Vec<HealthDomain>,
    pub mode: Option<InteractionMode>,
    pub medicine: Option<MedicineType>,
}

impl ProfileDraft {
    /// Add the domain if absent, remove it if present.
    pub fn toggle_domain(&mut self, domain: HealthDomain) {
        if let Some(pos) = self.domains.iter().position(|d| *d == domain) {
            self.domains.remove(pos);
        } else {
            self.domains.push(domain);
        }
    }

    /// Render a review summary of the draft.
    pub fn summary(&self) -> String {
        let mut parts = vec!["Your HealthChat Profile".to_string()];
        parts.push(format!("Name: {}", self.name));
        parts.push(format!("Age: {}", self.age));
        parts.push(format!("Location: {}", self.location));
        parts.push(format!(
            "Language: {}",
            self.language.map(|l| l.label()).unwrap_or("")
        ));
        parts.push(format!(
            "Health Interests: {} domains selected",
            self.domains.len()
        ));
        parts.push(format!(
            "Mode: {}",
            self.mode.map(|m| m.code()).unwrap_or("")
        ));
        parts.push(format!(
            "Medicine Type: {}",
            self.medicine.map(|m| m.code()).unwrap_or("")
        ));
        parts.join("\n")
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(location: &str, domains: &[HealthDomain]) -> Profile {
    Profile {
        name: "Asha".to_string(),
        age: 34,
        gender: Gender::Female,
        location: location.to_string(),
        language: Language::Odia,
        consent: true,
        domains: domains.to_vec(),
        mode: InteractionMode::Personal,
        medicine: MedicineType::Scientific,
        completed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hi\"");
        let odia: Language = serde_json::from_str("\"or\"").unwrap();
        assert_eq!(odia, Language::Odia);
    }

    #[test]
    fn display_matches_serde() {
        for domain in HealthDomain::ALL {
            let json = serde_json::to_string(domain).unwrap();
            assert_eq!(format!("\"{domain}\""), json);
        }
        for lang in Language::ALL {
            let json = serde_json::to_string(lang).unwrap();
            assert_eq!(format!("\"{lang}\""), json);
        }
    }

    #[test]
    fn parse_accepts_codes_and_labels() {
        assert_eq!("cardio".parse::<HealthDomain>().unwrap(), HealthDomain::Cardio);
        assert_eq!("Diabetes".parse::<HealthDomain>().unwrap(), HealthDomain::Diabetes);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!(" HI ".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("public".parse::<InteractionMode>().unwrap(), InteractionMode::Public);
        assert!("".parse::<Gender>().is_err());
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn ambiguous_label_prefix_is_rejected() {
        let err = "m".parse::<HealthDomain>().unwrap_err();
        assert!(
            err.to_string().contains("ambiguous: maternal, mental"),
            "unexpected error {err}"
        );
        assert_eq!("mat".parse::<HealthDomain>().unwrap(), HealthDomain::Maternal);
        assert_eq!("men".parse::<HealthDomain>().unwrap(), HealthDomain::Mental);
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
    }

    #[test]
    fn resolved_location_falls_back() {
        assert_eq!(sample_profile("Cuttack", &[]).resolved_location(), "Cuttack");
        assert_eq!(sample_profile("  ", &[]).resolved_location(), UNKNOWN_LOCATION);
        assert!(sample_profile("", &[]).location().is_none());
    }

    #[test]
    fn header_line_mentions_mode_medicine_and_counts() {
        let profile = sample_profile("Puri", &[HealthDomain::Cardio, HealthDomain::Mental]);
        let header = profile.header_line();
        assert!(header.contains("Personal Mode"));
        assert!(header.contains("Scientific Medicine"));
        assert!(header.contains("2 domains"));
        assert!(header.ends_with("or"));
    }

    #[test]
    fn toggle_domain_is_set_like() {
        let mut draft = ProfileDraft::default();
        draft.toggle_domain(HealthDomain::Cardio);
        draft.toggle_domain(HealthDomain::Child);
        draft.toggle_domain(HealthDomain::Cardio);
        assert_eq!(draft.domains, vec![HealthDomain::Child]);
    }

    #[test]
    fn draft_deserializes_partial_json() {
        let draft: ProfileDraft =
            serde_json::from_str(r#"{"name": "Ravi", "domains": ["diabetes"]}"#).unwrap();
        assert_eq!(draft.name, "Ravi");
        assert_eq!(draft.domains, vec![HealthDomain::Diabetes]);
        assert!(draft.language.is_none());
        assert!(!draft.consent);
    }

    #[test]
    fn summary_counts_domains() {
        let draft = ProfileDraft {
            name: "Ravi".into(),
            language: Some(Language::Hindi),
            domains: vec![HealthDomain::General, HealthDomain::Neuro],
            ..Default::default()
        };
        let summary = draft.summary();
        assert!(summary.contains("Name: Ravi"));
        assert!(summary.contains("हिंदी (Hindi)"));
        assert!(summary.contains("2 domains selected"));
    }
}

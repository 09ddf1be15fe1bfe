//! Onboarding wizard state machine: tracks which step the user is on.

use serde::{Deserialize, Serialize};

/// The five steps of the onboarding wizard.
///
/// Progresses linearly: BasicInfo → Consent → Domains → Preferences → Review.
/// Moving back one step is always allowed except from the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    BasicInfo,
    Consent,
    Domains,
    Preferences,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        Self::BasicInfo,
        Self::Consent,
        Self::Domains,
        Self::Preferences,
        Self::Review,
    ];

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: OnboardingStep) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Review)
    }

    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            BasicInfo => Some(Consent),
            Consent => Some(Domains),
            Domains => Some(Preferences),
            Preferences => Some(Review),
            Review => None,
        }
    }

    pub fn previous(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            BasicInfo => None,
            Consent => Some(BasicInfo),
            Domains => Some(Consent),
            Preferences => Some(Domains),
            Review => Some(Preferences),
        }
    }

    /// 1-based position, for the progress indicator.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Consent => "Privacy & Consent",
            Self::Domains => "Health Domains",
            Self::Preferences => "Usage Preferences",
            Self::Review => "Setup Complete!",
        }
    }

    /// Progress dots, filled up to and including this step.
    pub fn progress(&self) -> String {
        let current = self.number();
        (1..=Self::ALL.len())
            .map(|i| if i <= current { '●' } else { '○' })
            .collect()
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BasicInfo => "basic_info",
            Self::Consent => "consent",
            Self::Domains => "domains",
            Self::Preferences => "preferences",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use OnboardingStep::*;
        let forward = [
            (BasicInfo, Consent),
            (Consent, Domains),
            (Domains, Preferences),
            (Preferences, Review),
        ];
        for (from, to) in forward {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
            assert!(to.can_transition_to(from), "{to} should go back to {from}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use OnboardingStep::*;
        assert!(!BasicInfo.can_transition_to(Domains));
        assert!(!Consent.can_transition_to(Review));
        assert!(!Review.can_transition_to(BasicInfo));
        assert!(!Domains.can_transition_to(Domains));
    }

    #[test]
    fn next_walks_all_steps() {
        let mut current = OnboardingStep::default();
        let mut seen = vec![current];
        while let Some(next) = current.next() {
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, OnboardingStep::ALL.to_vec());
        assert!(current.is_last());
    }

    #[test]
    fn numbers_and_progress() {
        assert_eq!(OnboardingStep::BasicInfo.number(), 1);
        assert_eq!(OnboardingStep::Review.number(), 5);
        assert_eq!(OnboardingStep::Domains.progress(), "●●●○○");
    }

    #[test]
    fn display_matches_serde() {
        for step in OnboardingStep::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "mismatch for {step:?}");
        }
    }
}

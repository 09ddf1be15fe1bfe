//! ProfileCollector: drives the onboarding wizard and builds the final
//! [`Profile`].

use chrono::Utc;
use tracing::{debug, info};

use crate::error::OnboardingError;

use super::model::{
    Gender, HealthDomain, InteractionMode, Language, MedicineType, Profile, ProfileDraft,
};
use super::state::OnboardingStep;

/// Upper bound accepted for the age field.
const MAX_AGE: u8 = 150;

/// Collects the five groups of onboarding fields into one validated profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileCollector {
    step: OnboardingStep,
    draft: ProfileDraft,
}

impl ProfileCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.trim().to_string();
    }

    pub fn set_age(&mut self, age: &str) {
        self.draft.age = age.trim().to_string();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.draft.gender = Some(gender);
    }

    pub fn set_location(&mut self, location: &str) {
        self.draft.location = location.trim().to_string();
    }

    pub fn set_language(&mut self, language: Language) {
        self.draft.language = Some(language);
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.draft.consent = consent;
    }

    pub fn toggle_domain(&mut self, domain: HealthDomain) {
        self.draft.toggle_domain(domain);
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.draft.mode = Some(mode);
    }

    pub fn set_medicine(&mut self, medicine: MedicineType) {
        self.draft.medicine = Some(medicine);
    }

    /// Whether the current step's required fields are filled in.
    pub fn can_advance(&self) -> bool {
        !self.step.is_last() && check_step(&self.draft, self.step).is_ok()
    }

    /// Advance to the next step once the current step is satisfied.
    pub fn next(&mut self) -> Result<OnboardingStep, OnboardingError> {
        let target = self.step.next().unwrap_or(self.step);
        self.ensure_transition(target)?;
        check_step(&self.draft, self.step)?;
        debug!(from = %self.step, to = %target, "Onboarding step advanced");
        self.step = target;
        Ok(target)
    }

    /// Go back one step. Field values are kept.
    pub fn previous(&mut self) -> Result<OnboardingStep, OnboardingError> {
        let target = self.step.previous().unwrap_or(self.step);
        self.ensure_transition(target)?;
        debug!(from = %self.step, to = %target, "Onboarding step reverted");
        self.step = target;
        Ok(target)
    }

    fn ensure_transition(&self, target: OnboardingStep) -> Result<(), OnboardingError> {
        if self.step.can_transition_to(target) {
            Ok(())
        } else {
            Err(OnboardingError::InvalidTransition {
                from: self.step.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Finish onboarding from the review step.
    pub fn complete(&self) -> Result<Profile, OnboardingError> {
        if !self.step.is_last() {
            return Err(OnboardingError::InvalidTransition {
                from: self.step.to_string(),
                to: "complete".to_string(),
            });
        }
        let profile = validate(&self.draft)?;
        info!(
            domains = profile.domains.len(),
            language = %profile.language,
            mode = %profile.mode,
            "Onboarding complete"
        );
        Ok(profile)
    }
}

/// Validate a whole draft into a profile, checking every step in order.
pub fn validate(draft: &ProfileDraft) -> Result<Profile, OnboardingError> {
    for step in OnboardingStep::ALL {
        check_step(draft, step)?;
    }

    let (Some(gender), Some(language), Some(mode), Some(medicine)) =
        (draft.gender, draft.language, draft.mode, draft.medicine)
    else {
        return Err(OnboardingError::StepIncomplete {
            step: OnboardingStep::Review.to_string(),
            reason: "profile is incomplete".to_string(),
        });
    };

    Ok(Profile {
        name: draft.name.trim().to_string(),
        age: parse_age(&draft.age)?,
        gender,
        location: draft.location.trim().to_string(),
        language,
        consent: draft.consent,
        domains: dedup_domains(&draft.domains),
        mode,
        medicine,
        completed_at: Utc::now(),
    })
}

/// Drop repeated domains, keeping first-seen order.
fn dedup_domains(domains: &[HealthDomain]) -> Vec<HealthDomain> {
    let mut unique = Vec::with_capacity(domains.len());
    for domain in domains {
        if !unique.contains(domain) {
            unique.push(*domain);
        }
    }
    unique
}

/// Gate for a single step.
fn check_step(draft: &ProfileDraft, step: OnboardingStep) -> Result<(), OnboardingError> {
    let missing = |reason: &str| {
        Err(OnboardingError::StepIncomplete {
            step: step.to_string(),
            reason: reason.to_string(),
        })
    };

    match step {
        OnboardingStep::BasicInfo => {
            if draft.name.trim().is_empty() {
                return missing("name is required");
            }
            if draft.age.trim().is_empty() {
                return missing("age is required");
            }
            if draft.gender.is_none() {
                return missing("gender is required");
            }
            if draft.location.trim().is_empty() {
                return missing("location is required");
            }
            if draft.language.is_none() {
                return missing("language is required");
            }
            parse_age(&draft.age).map(|_| ())
        }
        OnboardingStep::Consent if !draft.consent => Err(OnboardingError::ConsentRequired),
        OnboardingStep::Domains if draft.domains.is_empty() => Err(OnboardingError::NoDomains),
        OnboardingStep::Preferences => {
            if draft.mode.is_none() {
                return missing("interaction mode is required");
            }
            if draft.medicine.is_none() {
                return missing("medicine preference is required");
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn parse_age(raw: &str) -> Result<u8, OnboardingError> {
    let invalid = |message: String| OnboardingError::InvalidValue {
        field: "age".to_string(),
        message,
    };
    let age: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("'{}' is not a number", raw.trim())))?;
    match u8::try_from(age) {
        Ok(age) if (1..=MAX_AGE).contains(&age) => Ok(age),
        _ => Err(invalid(format!("{age} is out of range"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_basic(c: &mut ProfileCollector) {
        c.set_name("  Asha ");
        c.set_age("34");
        c.set_gender(Gender::Female);
        c.set_location("Cuttack");
        c.set_language(Language::Odia);
    }

    fn walk_to_review(c: &mut ProfileCollector) {
        fill_basic(c);
        c.next().unwrap();
        c.set_consent(true);
        c.next().unwrap();
        c.toggle_domain(HealthDomain::Cardio);
        c.next().unwrap();
        c.set_mode(InteractionMode::Personal);
        c.set_medicine(MedicineType::Traditional);
        c.next().unwrap();
    }

    #[test]
    fn full_walk_produces_profile() {
        let mut c = ProfileCollector::new();
        walk_to_review(&mut c);
        assert_eq!(c.step(), OnboardingStep::Review);

        let profile = c.complete().unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.age, 34);
        assert_eq!(profile.location, "Cuttack");
        assert_eq!(profile.domains, vec![HealthDomain::Cardio]);
        assert_eq!(profile.medicine, MedicineType::Traditional);
        assert!(profile.consent);
    }

    #[test]
    fn basic_info_gate_blocks_missing_fields() {
        let mut c = ProfileCollector::new();
        c.set_name("Asha");
        assert!(!c.can_advance());
        let err = c.next().unwrap_err();
        assert!(matches!(err, OnboardingError::StepIncomplete { ref reason, .. } if reason.contains("age")));
        assert_eq!(c.step(), OnboardingStep::BasicInfo);
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut c = ProfileCollector::new();
        fill_basic(&mut c);
        c.set_age("thirty");
        assert!(matches!(c.next(), Err(OnboardingError::InvalidValue { .. })));
        c.set_age("0");
        assert!(matches!(c.next(), Err(OnboardingError::InvalidValue { .. })));
    }

    #[test]
    fn consent_gate() {
        let mut c = ProfileCollector::new();
        fill_basic(&mut c);
        c.next().unwrap();
        assert!(matches!(c.next(), Err(OnboardingError::ConsentRequired)));
        c.set_consent(true);
        assert_eq!(c.next().unwrap(), OnboardingStep::Domains);
    }

    #[test]
    fn domains_gate_after_toggle_off() {
        let mut c = ProfileCollector::new();
        fill_basic(&mut c);
        c.next().unwrap();
        c.set_consent(true);
        c.next().unwrap();
        c.toggle_domain(HealthDomain::Diabetes);
        c.toggle_domain(HealthDomain::Diabetes);
        assert!(matches!(c.next(), Err(OnboardingError::NoDomains)));
    }

    #[test]
    fn previous_keeps_values_and_stops_at_first_step() {
        let mut c = ProfileCollector::new();
        fill_basic(&mut c);
        c.next().unwrap();
        assert_eq!(c.previous().unwrap(), OnboardingStep::BasicInfo);
        assert_eq!(c.draft().name, "Asha");
        assert!(c.previous().is_err());
    }

    #[test]
    fn complete_requires_review_step() {
        let mut c = ProfileCollector::new();
        fill_basic(&mut c);
        assert!(matches!(
            c.complete(),
            Err(OnboardingError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn next_from_review_fails() {
        let mut c = ProfileCollector::new();
        walk_to_review(&mut c);
        assert!(!c.can_advance());
        assert!(c.next().is_err());
    }

    #[test]
    fn validate_checks_every_step() {
        let draft = ProfileDraft {
            name: "Ravi".into(),
            age: "61".into(),
            gender: Some(Gender::Male),
            location: "Puri".into(),
            language: Some(Language::Hindi),
            consent: true,
            domains: vec![],
            mode: Some(InteractionMode::Public),
            medicine: Some(MedicineType::Scientific),
        };
        assert!(matches!(validate(&draft), Err(OnboardingError::NoDomains)));

        let draft = ProfileDraft {
            domains: vec![HealthDomain::Diabetes],
            ..draft
        };
        let profile = validate(&draft).unwrap();
        assert!(profile.has_domain(HealthDomain::Diabetes));
        assert_eq!(profile.age, 61);
    }

    #[test]
    fn large_ages_are_out_of_range_not_malformed() {
        for raw in ["151", "300", "70000"] {
            let err = parse_age(raw).unwrap_err();
            assert!(
                err.to_string().contains("out of range"),
                "{raw}: unexpected error {err}"
            );
        }
        assert_eq!(parse_age("150").unwrap(), 150);
        assert!(parse_age("-4").unwrap_err().to_string().contains("not a number"));
    }

    #[test]
    fn validate_collapses_repeated_domains() {
        let draft: ProfileDraft = serde_json::from_str(
            r#"{
                "name": "Ravi", "age": "61", "gender": "male", "location": "Puri",
                "language": "hi", "consent": true,
                "domains": ["cardio", "diabetes", "cardio", "cardio"],
                "mode": "public", "medicine": "scientific"
            }"#,
        )
        .unwrap();
        let profile = validate(&draft).unwrap();
        assert_eq!(
            profile.domains,
            vec![HealthDomain::Cardio, HealthDomain::Diabetes]
        );
        assert!(profile.header_line().contains("2 domains"));
    }

    #[test]
    fn transitions_report_both_steps() {
        let mut c = ProfileCollector::new();
        let err = c.previous().unwrap_err();
        assert!(matches!(
            err,
            OnboardingError::InvalidTransition { ref from, ref to }
                if from == "basic_info" && to == "basic_info"
        ));

        walk_to_review(&mut c);
        let err = c.next().unwrap_err();
        assert!(matches!(
            err,
            OnboardingError::InvalidTransition { ref from, .. } if from == "review"
        ));
        assert_eq!(c.step(), OnboardingStep::Review);
        assert_eq!(c.previous().unwrap(), OnboardingStep::Preferences);
    }
}

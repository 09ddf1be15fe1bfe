//! Profile collection: the first-launch onboarding wizard.
//!
//! The wizard walks the user through five steps, gating each on its
//! required fields. Completing the last step yields an immutable
//! [`Profile`] that personalizes the chat and the content panels.

pub mod collector;
pub mod model;
pub mod state;

pub use collector::{ProfileCollector, validate};
pub use model::{
    Gender, HealthDomain, InteractionMode, Language, MedicineType, Profile, ProfileDraft,
    UNKNOWN_LOCATION,
};
pub use state::OnboardingStep;

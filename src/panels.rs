//! Static content panels: alerts, news, vaccine schedule, overview and
//! profile card.
//!
//! All content is fixed; the only input is the profile location.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Which panel to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Alerts,
    News,
    Vaccines,
    /// Quick stats, emergency contacts and the health tip.
    Overview,
    Profile,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VaccineStatus {
    Due,
    Upcoming,
    Scheduled,
}

impl std::fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Due => write!(f, "due"),
            Self::Upcoming => write!(f, "upcoming"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub location: String,
    pub posted: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccineEntry {
    pub vaccine: String,
    pub due_date: NaiveDate,
    pub location: String,
    pub status: VaccineStatus,
    pub priority: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmergencyContact {
    pub label: String,
    pub number: String,
}

/// Helplines shown beside the chat.
pub fn emergency_contacts() -> Vec<EmergencyContact> {
    [
        ("Emergency", "108"),
        ("Women Helpline", "181"),
        ("Mental Health", "9152987821"),
    ]
    .into_iter()
    .map(|(label, number)| EmergencyContact {
        label: label.into(),
        number: number.into(),
    })
    .collect()
}

pub const HEALTH_TIP: &str =
    "💧 Drink at least 8 glasses of water daily to stay hydrated and maintain good health.";

const HEALTH_SCORE: &str = "Good";

/// The dashboard content for one location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub location: Option<String>,
    pub alerts: Vec<Alert>,
    pub news: Vec<NewsItem>,
    pub vaccines: Vec<VaccineEntry>,
}

impl Dashboard {
    pub fn for_profile(profile: &Profile) -> Self {
        Self::for_location(profile.location())
    }

    pub fn for_location(location: Option<&str>) -> Self {
        let location = location.map(str::trim).filter(|l| !l.is_empty());

        let alerts = vec![
            Alert {
                id: "1".into(),
                title: "Dengue Outbreak Alert - Bhubaneswar".into(),
                description: "Increased dengue cases reported in Bhubaneswar area. \
                              Take preventive measures immediately."
                    .into(),
                severity: Severity::High,
                location: "Bhubaneswar, Odisha".into(),
                posted: "2 hours ago".into(),
                action: "View Prevention Guide".into(),
            },
            Alert {
                id: "2".into(),
                title: "Heatwave Warning".into(),
                description: "Extreme heat conditions expected. Stay hydrated and avoid \
                              outdoor activities between 11 AM - 4 PM."
                    .into(),
                severity: Severity::Medium,
                location: location.unwrap_or("Your area").into(),
                posted: "4 hours ago".into(),
                action: "Heat Safety Tips".into(),
            },
        ];

        let news = vec![
            NewsItem {
                id: "1".into(),
                title: "New Vaccination Drive for Children".into(),
                description: "Ministry of Health launches special vaccination campaign for \
                              children aged 5-12 years."
                    .into(),
                category: "Vaccination".into(),
                date: "Today".into(),
                source: "MoHFW".into(),
            },
            NewsItem {
                id: "2".into(),
                title: "Monsoon Health Preparedness".into(),
                description: "Essential tips to prevent water-borne diseases during monsoon season."
                    .into(),
                category: "Prevention".into(),
                date: "Yesterday".into(),
                source: "WHO India".into(),
            },
            NewsItem {
                id: "3".into(),
                title: "Heart Health Awareness Week".into(),
                description: "Free cardiac screenings available at all district hospitals \
                              from June 15-22."
                    .into(),
                category: "Screening".into(),
                date: "2 days ago".into(),
                source: "National Health Mission".into(),
            },
        ];

        let vaccines = vec![
            VaccineEntry {
                vaccine: "COVID-19 Booster".into(),
                due_date: date(2024, 1, 15),
                location: format!("PHC {}", location.unwrap_or("Local")),
                status: VaccineStatus::Due,
                priority: Severity::High,
            },
            VaccineEntry {
                vaccine: "Seasonal Flu".into(),
                due_date: date(2024, 2, 1),
                location: "District Hospital".into(),
                status: VaccineStatus::Upcoming,
                priority: Severity::Medium,
            },
            VaccineEntry {
                vaccine: "Hepatitis B (2nd dose)".into(),
                due_date: date(2024, 3, 10),
                location: "Community Health Center".into(),
                status: VaccineStatus::Scheduled,
                priority: Severity::Low,
            },
        ];

        Self {
            location: location.map(String::from),
            alerts,
            news,
            vaccines,
        }
    }

    pub fn location_badge(&self) -> String {
        format!(
            "📍 {}",
            self.location.as_deref().unwrap_or("Location not set")
        )
    }

    pub fn render_alerts(&self) -> String {
        let mut out = vec![format!("Health Updates & Alerts   {}", self.location_badge())];
        for alert in &self.alerts {
            out.push(format!(
                "[{}] {}\n    {}\n    {} • {}\n    → {}",
                alert.severity,
                alert.title,
                alert.description,
                alert.location,
                alert.posted,
                alert.action
            ));
        }
        out.join("\n")
    }

    pub fn render_news(&self) -> String {
        let mut out = vec!["Health News".to_string()];
        for item in &self.news {
            out.push(format!(
                "{} ({})\n    {}\n    {} • {}",
                item.title, item.category, item.description, item.source, item.date
            ));
        }
        out.join("\n")
    }

    pub fn active_alerts(&self) -> usize {
        self.alerts.len()
    }

    pub fn due_vaccines(&self) -> usize {
        self.vaccines
            .iter()
            .filter(|v| v.status == VaccineStatus::Due)
            .count()
    }

    /// Quick stats, emergency contacts and the tip of the day.
    pub fn render_overview(&self) -> String {
        let mut out = vec![
            "Quick Stats".to_string(),
            format!("  Active Alerts   {}", self.active_alerts()),
            format!("  Due Vaccines    {}", self.due_vaccines()),
            format!("  Health Score    {HEALTH_SCORE}"),
            String::new(),
            "Emergency Contacts".to_string(),
        ];
        for contact in emergency_contacts() {
            out.push(format!("  {:<16}{}", contact.label, contact.number));
        }
        out.push("  → Call Emergency: /emergency".to_string());
        out.push(String::new());
        out.push("Health Tip".to_string());
        out.push(format!("  {HEALTH_TIP}"));
        out.join("\n")
    }

    pub fn render_vaccines(&self) -> String {
        let mut out = vec!["Vaccination Schedule".to_string()];
        for entry in &self.vaccines {
            out.push(format!(
                "{} [{}]\n    Due: {}\n    {}",
                entry.vaccine, entry.status, entry.due_date, entry.location
            ));
        }
        out.join("\n")
    }
}

/// Profile settings card.
pub fn render_profile(profile: &Profile) -> String {
    let domains: Vec<&str> = profile.domains.iter().map(|d| d.code()).collect();
    [
        "Profile Settings".to_string(),
        format!("Name: {}", profile.name),
        format!("Age: {}", profile.age),
        format!("Location: {}", profile.location),
        format!("Language: {}", profile.language.code()),
        format!("Health Domains: {}", domains.join(", ")),
        format!("Mode: {}", profile.mode.code()),
        format!("Medicine Type: {}", profile.medicine.code()),
    ]
    .join("\n")
}

/// Render any panel for a profile.
pub fn render(panel: Panel, profile: &Profile) -> String {
    let dashboard = Dashboard::for_profile(profile);
    match panel {
        Panel::Alerts => dashboard.render_alerts(),
        Panel::News => dashboard.render_news(),
        Panel::Vaccines => dashboard.render_vaccines(),
        Panel::Overview => dashboard.render_overview(),
        Panel::Profile => render_profile(profile),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::HealthDomain;
    use crate::profile::model::sample_profile;

    #[test]
    fn location_parameterizes_heatwave_and_phc() {
        let dash = Dashboard::for_location(Some("Cuttack"));
        assert_eq!(dash.alerts[1].location, "Cuttack");
        assert_eq!(dash.vaccines[0].location, "PHC Cuttack");
        assert_eq!(dash.location_badge(), "📍 Cuttack");
        // Fixed alert keeps its own location.
        assert_eq!(dash.alerts[0].location, "Bhubaneswar, Odisha");
    }

    #[test]
    fn missing_location_uses_fallbacks() {
        for loc in [None, Some(""), Some("   ")] {
            let dash = Dashboard::for_location(loc);
            assert_eq!(dash.alerts[1].location, "Your area");
            assert_eq!(dash.vaccines[0].location, "PHC Local");
            assert_eq!(dash.location_badge(), "📍 Location not set");
        }
    }

    #[test]
    fn content_is_fixed() {
        let dash = Dashboard::for_location(Some("Puri"));
        assert_eq!(dash.alerts.len(), 2);
        assert_eq!(dash.news.len(), 3);
        assert_eq!(dash.vaccines.len(), 3);
        assert_eq!(dash.alerts[0].severity, Severity::High);
        assert_eq!(dash.vaccines[2].status, VaccineStatus::Scheduled);
        assert_eq!(dash.vaccines[1].due_date.to_string(), "2024-02-01");
    }

    #[test]
    fn rendered_panels_contain_items() {
        let profile = sample_profile("Puri", &[HealthDomain::Cardio, HealthDomain::Child]);
        let alerts = render(Panel::Alerts, &profile);
        assert!(alerts.contains("[HIGH] Dengue Outbreak Alert"));
        assert!(alerts.contains("📍 Puri"));

        let news = render(Panel::News, &profile);
        assert!(news.contains("WHO India"));

        let vaccines = render(Panel::Vaccines, &profile);
        assert!(vaccines.contains("Due: 2024-01-15"));
        assert!(vaccines.contains("PHC Puri"));

        let card = render(Panel::Profile, &profile);
        assert!(card.contains("Health Domains: cardio, child"));
        assert!(card.contains("Mode: personal"));
    }

    #[test]
    fn overview_counts_follow_dashboard() {
        let mut dash = Dashboard::for_location(Some("Cuttack"));
        assert_eq!(dash.active_alerts(), 2);
        assert_eq!(dash.due_vaccines(), 1);

        let overview = dash.render_overview();
        assert!(overview.contains("Active Alerts   2"));
        assert!(overview.contains("Due Vaccines    1"));
        assert!(overview.contains("Health Score    Good"));
        assert!(overview.contains("108"));
        assert!(overview.contains("Women Helpline  181"));
        assert!(overview.contains("9152987821"));
        assert!(overview.contains(HEALTH_TIP));

        dash.vaccines[1].status = VaccineStatus::Due;
        dash.alerts.pop();
        let overview = dash.render_overview();
        assert!(overview.contains("Active Alerts   1"));
        assert!(overview.contains("Due Vaccines    2"));
    }
}

//! Referral tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel a referral link is shared through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReferralSource {
    Facebook,
    Instagram,
    Whatsapp,
    Youtube,
    Tiktok,
    Linkedin,
    Twitter,
    Website,
    Email,
    Other,
}

impl ReferralSource {
    pub const ALL: [ReferralSource; 10] = [
        ReferralSource::Facebook,
        ReferralSource::Instagram,
        ReferralSource::Whatsapp,
        ReferralSource::Youtube,
        ReferralSource::Tiktok,
        ReferralSource::Linkedin,
        ReferralSource::Twitter,
        ReferralSource::Website,
        ReferralSource::Email,
        ReferralSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralSource::Facebook => "facebook",
            ReferralSource::Instagram => "instagram",
            ReferralSource::Whatsapp => "whatsapp",
            ReferralSource::Youtube => "youtube",
            ReferralSource::Tiktok => "tiktok",
            ReferralSource::Linkedin => "linkedin",
            ReferralSource::Twitter => "twitter",
            ReferralSource::Website => "website",
            ReferralSource::Email => "email",
            ReferralSource::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|source| source.as_str() == needle)
    }
}

impl std::fmt::Display for ReferralSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened at the end of a referral link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferralEventKind {
    Click,
    Enrollment,
}

/// A tracked referral interaction as exported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferralEvent {
    pub partner_code: String,
    pub source: String,
    #[serde(default)]
    pub post_id: Option<String>,
    pub kind: ReferralEventKind,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_is_case_insensitive() {
        assert_eq!(ReferralSource::parse("Facebook"), Some(ReferralSource::Facebook));
        assert_eq!(ReferralSource::parse(" whatsapp "), Some(ReferralSource::Whatsapp));
        assert_eq!(ReferralSource::parse("myspace"), None);
        assert_eq!(ReferralSource::parse(""), None);
    }

    #[test]
    fn test_source_serde_matches_as_str() {
        for source in ReferralSource::ALL {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }
}

//! SEO metadata record matching the static dataset shape.

use serde::{Deserialize, Serialize};

/// Metadata applied to the document head for one page and language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SeoRecord {
    pub slug: String,
    pub language: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
    #[serde(default)]
    pub og_title: String,
    #[serde(default)]
    pub og_description: String,
    #[serde(default)]
    pub og_image: String,
    #[serde(default)]
    pub twitter_title: String,
    #[serde(default)]
    pub twitter_description: String,
    #[serde(default)]
    pub twitter_image: String,
    #[serde(default)]
    pub canonical_url: String,
}

impl SeoRecord {
    /// Fixed metadata applied when a known page has no dataset entry.
    pub fn fallback(language: &str) -> Self {
        Self {
            slug: String::new(),
            language: language.to_string(),
            meta_title: "Heavy Equipment Training Institute".to_string(),
            meta_description: "Hands-on operator training for excavators, loaders, cranes and \
                               forklifts with certified instructors."
                .to_string(),
            meta_keywords: "heavy equipment training, operator course, excavator training"
                .to_string(),
            og_image: "/images/og/default.jpg".to_string(),
            ..Self::default()
        }
    }

    /// `og_title`, falling back to `meta_title`.
    pub fn effective_og_title(&self) -> &str {
        first_non_empty(&[&self.og_title, &self.meta_title])
    }

    /// `og_description`, falling back to `meta_description`.
    pub fn effective_og_description(&self) -> &str {
        first_non_empty(&[&self.og_description, &self.meta_description])
    }

    pub fn effective_twitter_title(&self) -> &str {
        first_non_empty(&[&self.twitter_title, &self.og_title, &self.meta_title])
    }

    pub fn effective_twitter_description(&self) -> &str {
        first_non_empty(&[
            &self.twitter_description,
            &self.og_description,
            &self.meta_description,
        ])
    }

    pub fn effective_twitter_image(&self) -> &str {
        first_non_empty(&[&self.twitter_image, &self.og_image])
    }
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> &'a str {
    candidates
        .iter()
        .copied()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_falls_back_to_meta_fields() {
        let record = SeoRecord {
            meta_title: "Courses".into(),
            meta_description: "All courses".into(),
            og_image: "/img/og.jpg".into(),
            ..SeoRecord::default()
        };
        assert_eq!(record.effective_og_title(), "Courses");
        assert_eq!(record.effective_og_description(), "All courses");
        assert_eq!(record.effective_twitter_title(), "Courses");
        assert_eq!(record.effective_twitter_image(), "/img/og.jpg");
    }

    #[test]
    fn test_specific_fields_win() {
        let record = SeoRecord {
            meta_title: "Courses".into(),
            og_title: "Train with us".into(),
            twitter_title: "  ".into(),
            ..SeoRecord::default()
        };
        assert_eq!(record.effective_og_title(), "Train with us");
        assert_eq!(record.effective_twitter_title(), "Train with us");
    }
}

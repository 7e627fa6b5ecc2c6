//! Static SEO dataset.

use std::path::Path;

use crate::errors::AppError;
use crate::models::SeoRecord;

const BUILTIN_DATASET: &str = include_str!("../../data/seo.json");

/// Lookup of SEO records by slug and language.
pub trait SeoSource: Send + Sync {
    fn find(&self, slug: &str, language: &str) -> Option<SeoRecord>;
}

#[derive(Debug, Clone)]
pub struct SeoDataset {
    records: Vec<SeoRecord>,
    default_language: String,
}

impl SeoDataset {
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    /// The dataset compiled into the binary.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json(BUILTIN_DATASET)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let records: Vec<SeoRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&json)?;
        tracing::info!("Loaded {} SEO records from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    pub fn from_records(records: Vec<SeoRecord>) -> Result<Self, AppError> {
        if let Some(position) = records.iter().position(|r| r.slug.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "SEO record {} has an empty slug",
                position
            )));
        }
        Ok(Self {
            records,
            default_language: Self::DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Language tried when a slug has no record in the requested one.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn lookup(&self, slug: &str, language: &str) -> Option<&SeoRecord> {
        self.records
            .iter()
            .find(|r| r.slug == slug && r.language.eq_ignore_ascii_case(language))
    }
}

impl SeoSource for SeoDataset {
    fn find(&self, slug: &str, language: &str) -> Option<SeoRecord> {
        self.lookup(slug, language)
            .or_else(|| self.lookup(slug, &self.default_language))
            .cloned()
    }
}

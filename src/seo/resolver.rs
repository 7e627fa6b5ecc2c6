//! Route to head-metadata resolution.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::cache::{CachedSeo, SeoCache};
use super::clock::{Clock, SystemClock};
use super::dataset::SeoSource;
use super::head::{DocumentHead, Selector};
use super::routes::{normalize_path, slug_for_path};
use crate::models::SeoRecord;

/// What [`SeoResolver::resolve`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeoResolution {
    /// Unknown or internal route; nothing was cached or written.
    Skipped,
    Applied {
        slug: &'static str,
        /// The fixed fallback record was used.
        fallback: bool,
        /// Served from a fresh cache entry.
        cached: bool,
    },
}

/// Resolves routes to SEO records through a TTL cache and writes them to a head.
///
/// Created once and shared; the cache lives inside the resolver instead of a
/// module global.
pub struct SeoResolver {
    source: Arc<dyn SeoSource>,
    cache: Mutex<SeoCache>,
    language: String,
    /// Public site root; fallback pages point their canonical URL here.
    site_url: String,
}

impl SeoResolver {
    pub fn new(source: Arc<dyn SeoSource>, language: impl Into<String>) -> Self {
        Self::with_cache(
            source,
            language,
            SeoCache::new(
                SeoCache::DEFAULT_TTL,
                SeoCache::DEFAULT_CAPACITY,
                Arc::new(SystemClock),
            ),
        )
    }

    pub fn with_settings(
        source: Arc<dyn SeoSource>,
        language: impl Into<String>,
        ttl: Duration,
        capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_cache(source, language, SeoCache::new(ttl, capacity, clock))
    }

    fn with_cache(
        source: Arc<dyn SeoSource>,
        language: impl Into<String>,
        cache: SeoCache,
    ) -> Self {
        Self {
            source,
            cache: Mutex::new(cache),
            language: language.into(),
            site_url: String::new(),
        }
    }

    pub fn with_site_url(mut self, site_url: &str) -> Self {
        self.site_url = site_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Canonical URL of `path` on the public site, empty without a site root.
    fn canonical_for(&self, path: &str) -> String {
        if self.site_url.is_empty() {
            return String::new();
        }
        format!("{}{}", self.site_url, normalize_path(path))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve `path` in the resolver's language and apply it to `head`.
    pub fn resolve(&self, path: &str, head: &mut dyn DocumentHead) -> SeoResolution {
        self.resolve_in(path, &self.language, head)
    }

    pub fn resolve_in(
        &self,
        path: &str,
        language: &str,
        head: &mut dyn DocumentHead,
    ) -> SeoResolution {
        let Some(slug) = slug_for_path(path) else {
            tracing::debug!(path, "No SEO metadata for route");
            return SeoResolution::Skipped;
        };

        let (entry, cached) = {
            let mut cache = self.cache.lock();
            match cache.get(slug, language) {
                Some(hit) => (hit, true),
                None => {
                    let entry = match self.source.find(slug, language) {
                        Some(record) => CachedSeo {
                            record,
                            fallback: false,
                        },
                        None => {
                            tracing::debug!(
                                slug,
                                language,
                                "SEO slug not in dataset, using fallback"
                            );
                            CachedSeo {
                                record: SeoRecord::fallback(language),
                                fallback: true,
                            }
                        }
                    };
                    cache.insert(slug, language, entry.clone());
                    (entry, false)
                }
            }
        };

        if entry.fallback {
            let mut record = entry.record;
            record.canonical_url = self.canonical_for(path);
            apply_fallback(&record, language, head);
        } else {
            apply_record(&entry.record, language, head);
        }

        SeoResolution::Applied {
            slug,
            fallback: entry.fallback,
            cached,
        }
    }

    pub fn is_cached(&self, slug: &str, language: &str) -> bool {
        self.cache.lock().contains(slug, language)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

/// Write every non-empty field of `record` to `head`.
pub fn apply_record(record: &SeoRecord, language: &str, head: &mut dyn DocumentHead) {
    write_record(record, language, head, false);
}

/// Write the default record, removing every tag it leaves empty so nothing
/// from the previous page survives.
pub fn apply_fallback(record: &SeoRecord, language: &str, head: &mut dyn DocumentHead) {
    write_record(record, language, head, true);
}

fn write_record(
    record: &SeoRecord,
    language: &str,
    head: &mut dyn DocumentHead,
    clear_empty: bool,
) {
    if !record.meta_title.trim().is_empty() {
        head.set_title(&record.meta_title);
    }

    let lang = if record.language.trim().is_empty() {
        language
    } else {
        record.language.as_str()
    };
    if !lang.trim().is_empty() {
        head.set_language(lang);
    }

    let twitter_image = record.effective_twitter_image();
    let twitter_card = if twitter_image.is_empty() {
        "summary"
    } else {
        "summary_large_image"
    };

    let fields = [
        (Selector::MetaName("description"), record.meta_description.as_str()),
        (Selector::MetaName("keywords"), record.meta_keywords.as_str()),
        (Selector::MetaProperty("og:title"), record.effective_og_title()),
        (
            Selector::MetaProperty("og:description"),
            record.effective_og_description(),
        ),
        (Selector::MetaProperty("og:image"), record.og_image.as_str()),
        (Selector::MetaProperty("og:url"), record.canonical_url.as_str()),
        (Selector::MetaName("twitter:card"), twitter_card),
        (Selector::MetaName("twitter:title"), record.effective_twitter_title()),
        (
            Selector::MetaName("twitter:description"),
            record.effective_twitter_description(),
        ),
        (Selector::MetaName("twitter:image"), twitter_image),
        (Selector::LinkRel("canonical"), record.canonical_url.as_str()),
    ];

    for (selector, value) in fields {
        let value = value.trim();
        if !value.is_empty() {
            head.upsert(selector, value);
        } else if clear_empty {
            head.remove(selector);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::seo::clock::ManualClock;
    use crate::seo::dataset::SeoDataset;
    use crate::seo::head::HeadModel;

    struct CountingSource {
        inner: SeoDataset,
        lookups: AtomicUsize,
    }

    impl SeoSource for CountingSource {
        fn find(&self, slug: &str, language: &str) -> Option<SeoRecord> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find(slug, language)
        }
    }

    fn resolver(capacity: usize) -> (Arc<CountingSource>, Arc<ManualClock>, SeoResolver) {
        let source = Arc::new(CountingSource {
            inner: SeoDataset::builtin().unwrap(),
            lookups: AtomicUsize::new(0),
        });
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap(),
        ));
        let resolver = SeoResolver::with_settings(
            source.clone(),
            "en",
            Duration::from_secs(600),
            capacity,
            clock.clone(),
        );
        (source, clock, resolver)
    }

    #[test]
    fn test_ttl_controls_dataset_lookups() {
        let (source, clock, resolver) = resolver(50);
        let mut head = HeadModel::new();

        let first = resolver.resolve("/courses", &mut head);
        assert_eq!(
            first,
            SeoResolution::Applied {
                slug: "courses",
                fallback: false,
                cached: false
            }
        );
        clock.advance(chrono::Duration::minutes(5));
        let second = resolver.resolve("/courses", &mut head);
        assert!(matches!(second, SeoResolution::Applied { cached: true, .. }));
        assert_eq!(source.lookups.load(Ordering::SeqCst), 1);

        clock.advance(chrono::Duration::minutes(6));
        resolver.resolve("/courses", &mut head);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_admin_paths_have_no_side_effects() {
        let (source, _, resolver) = resolver(50);
        let mut head = HeadModel::new();

        for path in ["/admin", "/admin/courses", "/admin/partners/4/posts"] {
            assert_eq!(resolver.resolve(path, &mut head), SeoResolution::Skipped);
        }
        assert_eq!(head.mutations(), 0);
        assert_eq!(resolver.cached_len(), 0);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_applies_fields_with_precedence() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        resolver.resolve("/courses", &mut head);

        assert_eq!(head.title(), Some("Operator Courses | HeavySkills Academy"));
        assert_eq!(head.language(), Some("en"));
        assert_eq!(
            head.get(Selector::MetaProperty("og:title")),
            Some("All Heavy Equipment Courses")
        );
        // og_description is empty in the dataset, so meta_description is used.
        assert_eq!(
            head.get(Selector::MetaProperty("og:description")),
            head.get(Selector::MetaName("description"))
        );
        assert_eq!(
            head.get(Selector::MetaName("twitter:title")),
            Some("Find your operator course")
        );
        assert_eq!(
            head.get(Selector::MetaName("twitter:card")),
            Some("summary_large_image")
        );
        assert_eq!(
            head.get(Selector::LinkRel("canonical")),
            Some("https://www.heavyskills-academy.example/courses")
        );
    }

    #[test]
    fn test_empty_fields_are_not_written() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        resolver.resolve("/courses/excavator-operator", &mut head);

        // The shared course-detail record has no canonical URL.
        assert_eq!(head.get(Selector::LinkRel("canonical")), None);
        assert_eq!(head.get(Selector::MetaProperty("og:url")), None);
        assert!(head.get(Selector::MetaProperty("og:image")).is_some());
    }

    #[test]
    fn test_navigation_never_duplicates_tags() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        for path in ["/", "/courses", "/gallery", "/", "/enroll"] {
            resolver.resolve(path, &mut head);
        }
        for tag in head.tags() {
            let selector = match tag.kind {
                crate::seo::head::TagKind::MetaName => Selector::MetaName(&tag.key),
                crate::seo::head::TagKind::MetaProperty => Selector::MetaProperty(&tag.key),
                crate::seo::head::TagKind::LinkRel => Selector::LinkRel(&tag.key),
            };
            assert_eq!(head.count(selector), 1, "{:?} duplicated", tag);
        }
    }

    #[test]
    fn test_missing_slug_applies_fallback() {
        let (_, _, resolver) = resolver(50);
        let resolver = resolver.with_site_url("https://academy.example.com/");
        let mut head = HeadModel::new();
        resolver.resolve("/courses", &mut head);
        assert_eq!(
            head.get(Selector::LinkRel("canonical")),
            Some("https://www.heavyskills-academy.example/courses")
        );

        let outcome = resolver.resolve("/terms", &mut head);
        assert!(matches!(outcome, SeoResolution::Applied { fallback: true, .. }));
        assert_eq!(head.title(), Some("Heavy Equipment Training Institute"));
        assert_eq!(
            head.get(Selector::MetaName("description")),
            Some(SeoRecord::fallback("en").meta_description.as_str())
        );
        assert_eq!(
            head.get(Selector::LinkRel("canonical")),
            Some("https://academy.example.com/terms")
        );
        assert_eq!(
            head.get(Selector::MetaProperty("og:url")),
            Some("https://academy.example.com/terms")
        );
        assert_eq!(
            head.get(Selector::MetaProperty("og:title")),
            Some("Heavy Equipment Training Institute")
        );
        assert!(resolver.is_cached("terms", "en"));

        // A cached fallback still gets the canonical URL of its own page.
        resolver.resolve("/privacy-policy", &mut head);
        assert_eq!(
            head.get(Selector::LinkRel("canonical")),
            Some("https://academy.example.com/privacy-policy")
        );
    }

    #[test]
    fn test_fallback_without_site_url_clears_stale_tags() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        resolver.resolve("/courses", &mut head);
        assert!(head.get(Selector::MetaName("twitter:title")).is_some());

        resolver.resolve("/terms", &mut head);
        assert_eq!(head.get(Selector::LinkRel("canonical")), None);
        assert_eq!(head.get(Selector::MetaProperty("og:url")), None);
        assert_eq!(
            head.get(Selector::MetaName("twitter:title")),
            Some("Heavy Equipment Training Institute")
        );
        for tag in head.tags() {
            assert!(!tag.value.contains("/courses"), "{:?} left over", tag);
        }
    }

    #[test]
    fn test_unknown_route_is_skipped() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        assert_eq!(resolver.resolve("/careers", &mut head), SeoResolution::Skipped);
        assert_eq!(head.mutations(), 0);
    }

    #[test]
    fn test_language_specific_resolution() {
        let (_, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        resolver.resolve_in("/", "hi", &mut head);
        assert_eq!(head.language(), Some("hi"));
        assert!(resolver.is_cached("home", "hi"));
        assert!(!resolver.is_cached("home", "en"));
    }

    #[test]
    fn test_clear_cache_forces_lookup() {
        let (source, _, resolver) = resolver(50);
        let mut head = HeadModel::new();
        resolver.resolve("/gallery", &mut head);
        resolver.clear_cache();
        resolver.resolve("/gallery", &mut head);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
    }
}

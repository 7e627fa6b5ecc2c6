//! Client core for the heavy-equipment training institute site.
//!
//! Optimistic list stores for the admin dashboard's orderable resources,
//! referral link composition and analytics, and cached SEO resolution for
//! public routes. All persistence and business rules live in the REST
//! backend; this crate only keeps local view state consistent with it.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod referral;
pub mod seo;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use api::HttpResourceClient;
use config::Config;
use errors::AppError;
use models::Orderable;
use referral::ReferralDraft;
use seo::{SeoDataset, SeoResolver, SystemClock};
use store::{ListStore, ReconciliationPolicy};

/// Everything a page or command needs, built once at start-up and passed down.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<Config>,
    http: reqwest::Client,
    seo: Arc<SeoResolver>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("equiptrain/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let dataset = match &config.seo_dataset_path {
            Some(path) => SeoDataset::from_file(path)?,
            None => SeoDataset::builtin()?,
        };
        tracing::debug!("SEO dataset ready with {} records", dataset.len());

        let seo = Arc::new(
            SeoResolver::with_settings(
                Arc::new(dataset),
                config.default_language.clone(),
                config.seo_ttl,
                config.seo_cache_size,
                Arc::new(SystemClock),
            )
            .with_site_url(&config.site_base_url),
        );

        Ok(Self {
            config: Arc::new(config),
            http,
            seo,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client<T: Orderable>(&self) -> HttpResourceClient<T> {
        HttpResourceClient::new(
            self.http.clone(),
            self.config.api_base_url.clone(),
            self.config.api_token.clone(),
        )
    }

    /// A fresh store owned by the caller; stores are never shared between pages.
    pub fn store<T: Orderable>(&self) -> ListStore<T, HttpResourceClient<T>> {
        ListStore::new(self.client())
    }

    pub fn store_with_policy<T: Orderable>(
        &self,
        policy: ReconciliationPolicy,
    ) -> ListStore<T, HttpResourceClient<T>> {
        ListStore::with_policy(self.client(), policy)
    }

    pub fn seo(&self) -> Arc<SeoResolver> {
        self.seo.clone()
    }

    pub fn referral_draft(&self) -> ReferralDraft {
        ReferralDraft::new(self.config.site_base_url.clone())
    }

    pub fn referral_link(&self, source: &str, partner_code: &str, post_id: Option<&str>) -> String {
        referral::compose(&self.config.site_base_url, source, partner_code, post_id)
    }
}

//! Referral link composition.

use url::form_urlencoded;

use crate::models::{Partner, ReferralSource};

/// Build `{base}/ref?source=..&code=..[&post=..]`.
///
/// Returns an empty string while `source` or `partner_code` is blank; that is
/// a "not ready yet" state, not an error. A blank `post_id` is omitted.
pub fn compose(base: &str, source: &str, partner_code: &str, post_id: Option<&str>) -> String {
    let source = source.trim();
    let code = partner_code.trim();
    if source.is_empty() || code.is_empty() {
        return String::new();
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("source", source);
    query.append_pair("code", code);
    if let Some(post) = post_id.map(str::trim).filter(|post| !post.is_empty()) {
        query.append_pair("post", post);
    }

    format!("{}/ref?{}", base.trim_end_matches('/'), query.finish())
}

/// Inputs of the link builder form on the partner screen.
///
/// `link()` is derived from the current inputs on every call, so changing any
/// input is immediately reflected without invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferralDraft {
    base: String,
    source: Option<ReferralSource>,
    partner_code: String,
    post_id: Option<String>,
}

impl ReferralDraft {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    pub fn for_partner(base: impl Into<String>, partner: &Partner) -> Self {
        let mut draft = Self::new(base);
        draft.set_partner_code(partner.referral_code.clone());
        draft
    }

    pub fn set_source(&mut self, source: Option<ReferralSource>) -> &mut Self {
        self.source = source;
        self
    }

    pub fn set_partner_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.partner_code = code.into();
        self
    }

    pub fn set_post_id(&mut self, post_id: Option<String>) -> &mut Self {
        self.post_id = post_id;
        self
    }

    pub fn source(&self) -> Option<ReferralSource> {
        self.source
    }

    pub fn partner_code(&self) -> &str {
        &self.partner_code
    }

    /// Both required inputs are present.
    pub fn is_activatable(&self) -> bool {
        self.source.is_some() && !self.partner_code.trim().is_empty()
    }

    pub fn link(&self) -> String {
        let source = self.source.map(|s| s.as_str()).unwrap_or("");
        compose(
            &self.base,
            source,
            &self.partner_code,
            self.post_id.as_deref(),
        )
    }
}

//! Promotional referral links and their analytics.

mod analytics;
mod compose;

pub use analytics::*;
pub use compose::*;

//! Data models for the training institute client.
//!
//! These models mirror the JSON the backend returns for each resource.

mod course;
mod gallery;
mod orderable;
mod partner;
mod referral;
mod seo;

pub use course::*;
pub use gallery::*;
pub use orderable::*;
pub use partner::*;
pub use referral::*;
pub use seo::*;

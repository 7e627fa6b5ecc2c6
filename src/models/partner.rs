//! Promotional partner model.

use serde::{Deserialize, Serialize};

use super::{EntityId, Orderable};

/// A promotional partner who shares referral links for commission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    pub id: EntityId,
    pub name: String,
    /// Code embedded in the partner's referral links
    pub referral_code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Commission percentage paid per enrollment
    #[serde(default)]
    pub commission_rate: Option<f64>,
    pub display_order: i32,
    pub is_active: bool,
}

/// Request body for creating or updating a partner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartnerDraft {
    pub name: String,
    pub referral_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
}

impl Orderable for Partner {
    type Draft = PartnerDraft;

    const RESOURCE: &'static str = "partners";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

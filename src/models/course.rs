//! Course model matching the backend course resource.

use serde::{Deserialize, Serialize};

use super::{EntityId, Orderable};

/// Equipment category a course trains for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Excavator,
    Loader,
    Crane,
    Forklift,
    Grader,
    Roller,
    Bulldozer,
    Other,
}

/// A course listed on the public site and managed from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<EquipmentCategory>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body for creating or updating a course.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CourseDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EquipmentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Orderable for Course {
    type Draft = CourseDraft;

    const RESOURCE: &'static str = "courses";

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

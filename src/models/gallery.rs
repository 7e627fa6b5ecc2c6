//! Gallery item model.

use serde::{Deserialize, Serialize};

use super::{EntityId, Orderable};

/// A photo or video shown in the public gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryItem {
    pub id: EntityId,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

/// Request body for creating or updating a gallery item.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GalleryDraft {
    pub title: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Orderable for GalleryItem {
    type Draft = GalleryDraft;

    const RESOURCE: &'static str = "gallery";

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

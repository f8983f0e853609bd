use serde::{Deserialize, Serialize};

use super::tour::Difficulty;

/// Partial update to a tour record.
///
/// Every field is optional; `None` means "this field was not part of the
/// request" and the stored value is left untouched. Presence of
/// `cover_image` / `gallery_images` is what the update protocol uses to
/// decide whether existing image files are candidates for cleanup, so the
/// distinction between an absent field and an empty gallery is load-bearing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_group_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<Vec<String>>,
}

impl TourUpdate {
    /// True if at least one field is present.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.duration_days.is_some()
            || self.max_group_size.is_some()
            || self.difficulty.is_some()
            || self.price.is_some()
            || self.summary.is_some()
            || self.description.is_some()
            || self.cover_image.is_some()
            || self.gallery_images.is_some()
    }

    /// True if the request carried a new cover or gallery.
    pub fn touches_images(&self) -> bool {
        self.cover_image.is_some() || self.gallery_images.is_some()
    }
}

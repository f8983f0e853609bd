use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TourId;

/// Difficulty rating for a tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "difficult",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "difficult" => Some(Difficulty::Difficult),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tour record as stored in the database and returned by the API.
///
/// `cover_image` and `gallery_images` hold bare filenames, never paths. The
/// record store is the single source of truth for which filenames are live;
/// resolution to a location on disk happens in the image store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub duration_days: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub price: f64,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cover_image: String,
    pub gallery_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The image-reference projection of a tour record.
///
/// This is the "before" snapshot the update protocol reads ahead of an
/// update so it can compute which files the record no longer references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourImageRefs {
    pub cover_image: String,
    pub gallery_images: Vec<String>,
}

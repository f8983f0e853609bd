use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed ID for tours
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TourId(pub Uuid);

impl Default for TourId {
    fn default() -> Self {
        Self::new()
    }
}

impl TourId {
    pub fn new() -> Self {
        TourId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for TourId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TourId {
    fn from(id: Uuid) -> Self {
        TourId(id)
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

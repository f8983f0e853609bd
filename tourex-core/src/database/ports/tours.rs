use async_trait::async_trait;

use tourex_model::{Tour, TourId, TourImageRefs, TourUpdate};

use crate::Result;

/// Repository port for tour records.
///
/// The port is the durability boundary of the update protocol: once
/// `update_tour` returns `Ok`, the returned record is authoritative and the
/// filenames it no longer references are safe to delete. Adapters must make
/// the update atomic per record and enforce their own validation, surfacing
/// rejections as [`TourError::UpdateFailed`](crate::TourError::UpdateFailed).
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Fetch a full tour record.
    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>>;

    /// Fetch only the image-reference fields of a tour record.
    ///
    /// This is the "before" snapshot read by the update protocol; it avoids
    /// dragging the whole record across the wire just to learn two fields.
    async fn tour_image_refs(&self, id: TourId) -> Result<Option<TourImageRefs>>;

    /// Apply a partial update and return the updated record.
    ///
    /// Fields absent from `update` are left unchanged. Returns
    /// `TourError::UpdateFailed` when the store rejects the write, including
    /// the case where the record vanished between snapshot and update.
    async fn update_tour(&self, id: TourId, update: &TourUpdate) -> Result<Tour>;
}

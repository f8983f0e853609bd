use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use tourex_model::{Tour, TourId, TourUpdate};

use crate::{
    database::ports::tours::TourRepository,
    error::{Result, TourError},
    image::{
        store::ImageStore,
        transcode::{self, ImageRole, UploadedImage},
    },
};

/// The accepted files of one update request, keyed by role.
#[derive(Debug, Default)]
pub struct TourUploads {
    pub cover: Option<UploadedImage>,
    pub gallery: Vec<UploadedImage>,
}

impl TourUploads {
    pub fn is_empty(&self) -> bool {
        self.cover.is_none() && self.gallery.is_empty()
    }
}

/// Filenames produced by one transcode-and-store pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredImages {
    pub cover_image: Option<String>,
    pub gallery_images: Option<Vec<String>>,
}

/// Coordinates the tour image lifecycle around record updates.
///
/// The ordering guarantee this service exists for: new files are durably on
/// disk before the record is updated, and old files are deleted only after
/// the record stopped referencing them. At every observable instant the
/// record points at files that exist; the worst crash outcome is an
/// orphaned file, never a dangling reference.
pub struct TourImageService {
    tours: Arc<dyn TourRepository>,
    store: ImageStore,
}

impl std::fmt::Debug for TourImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourImageService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl TourImageService {
    pub fn new(tours: Arc<dyn TourRepository>, store: ImageStore) -> Self {
        Self { tours, store }
    }

    pub fn image_store(&self) -> &ImageStore {
        &self.store
    }

    pub fn tours(&self) -> &dyn TourRepository {
        self.tours.as_ref()
    }

    /// Transcode and durably store every uploaded file.
    ///
    /// `stamp_millis` is captured once per request by the caller so every
    /// file written for the request shares one time component. Cover and
    /// gallery proceed concurrently, as do the gallery files among
    /// themselves; the returned gallery order matches upload order. Fails
    /// as a whole if any file fails: nothing from a partial batch is ever
    /// handed to the record store (files already written stay behind as
    /// unreferenced orphans).
    pub async fn process_uploads(
        &self,
        tour_id: TourId,
        uploads: TourUploads,
        stamp_millis: i64,
    ) -> Result<StoredImages> {
        let TourUploads { cover, gallery } = uploads;

        let cover_task = async {
            match cover {
                Some(upload) => {
                    let filename =
                        transcode::image_filename(tour_id, stamp_millis, ImageRole::Cover);
                    self.transcode_and_store(upload, filename).await.map(Some)
                }
                None => Ok(None),
            }
        };

        let gallery_task = async {
            if gallery.is_empty() {
                return Ok(None);
            }
            let tasks = gallery.into_iter().enumerate().map(|(i, upload)| {
                let filename = transcode::image_filename(
                    tour_id,
                    stamp_millis,
                    ImageRole::Gallery(i as u32 + 1),
                );
                self.transcode_and_store(upload, filename)
            });
            try_join_all(tasks).await.map(Some)
        };

        let (cover_image, gallery_images) = tokio::try_join!(cover_task, gallery_task)?;

        if cover_image.is_some() || gallery_images.is_some() {
            info!(
                tour_id = %tour_id,
                cover = cover_image.is_some(),
                gallery = gallery_images.as_ref().map_or(0, Vec::len),
                "stored transcoded tour images"
            );
        }

        Ok(StoredImages {
            cover_image,
            gallery_images,
        })
    }

    async fn transcode_and_store(
        &self,
        upload: UploadedImage,
        filename: String,
    ) -> Result<String> {
        let encoded = transcode::transcode_jpeg(upload.bytes).await?;
        self.store.write(&filename, &encoded).await.map_err(|e| {
            TourError::ImageProcessing(format!("failed to store {}: {}", filename, e))
        })?;
        Ok(filename)
    }

    /// Apply `update` to the tour record, then clean up orphaned files.
    ///
    /// Protocol, in order:
    ///
    /// 1. snapshot the record's current image references (`NotFound` if the
    ///    record is absent);
    /// 2. apply the update - the durability boundary; on rejection nothing
    ///    is deleted and the before-files stay valid;
    /// 3. compute the deletion set - the before-cover only if the request
    ///    carried a differing cover, every before-gallery file not present
    ///    in the new gallery list;
    /// 4. attempt all deletions concurrently, collecting every outcome: a
    ///    missing file already counts as deleted, anything else is logged
    ///    and swallowed so cleanup can never fail the request.
    ///
    /// Known limitation: two concurrent updates to the same record can both
    /// read the same before-snapshot and each delete what the other just
    /// wrote. The record store update itself is atomic per record, but the
    /// snapshot/update pair is not; callers that need stronger guarantees
    /// must serialize updates per tour.
    pub async fn update_tour_images(
        &self,
        tour_id: TourId,
        update: TourUpdate,
    ) -> Result<Tour> {
        let before = self
            .tours
            .tour_image_refs(tour_id)
            .await?
            .ok_or_else(|| TourError::NotFound(tour_id.to_string()))?;

        let updated = self.tours.update_tour(tour_id, &update).await?;

        let mut doomed: Vec<&str> = Vec::new();
        if let Some(new_cover) = update.cover_image.as_deref() {
            if new_cover != before.cover_image {
                doomed.push(&before.cover_image);
            }
        }
        if let Some(new_gallery) = update.gallery_images.as_deref() {
            for old in &before.gallery_images {
                // A resubmitted identical name stays live.
                if !new_gallery.iter().any(|new| new == old) {
                    doomed.push(old);
                }
            }
        }

        let attempts = join_all(doomed.iter().map(|name| self.store.delete(name))).await;
        for (name, outcome) in doomed.iter().zip(attempts) {
            match outcome {
                Ok(true) => debug!(file = %name, "deleted orphaned tour image"),
                Ok(false) => debug!(file = %name, "orphaned tour image already gone"),
                Err(e) => {
                    warn!(file = %name, error = %e, "failed to delete orphaned tour image")
                }
            }
        }

        Ok(updated)
    }
}

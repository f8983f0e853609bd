//! Shared fixtures for tourex-core integration tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use tourex_core::{Result, TourError, TourRepository};
use tourex_model::{Difficulty, Tour, TourId, TourImageRefs, TourUpdate};

/// In-memory record store standing in for PostgreSQL.
///
/// `fail_updates` makes every `update_tour` report a store rejection so the
/// no-deletion-on-failure property can be observed; `update_calls` and
/// `snapshot_calls` let tests assert on protocol ordering.
#[derive(Default)]
pub struct InMemoryTourRepository {
    tours: Mutex<HashMap<TourId, Tour>>,
    pub fail_updates: AtomicBool,
    pub snapshot_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl InMemoryTourRepository {
    pub fn with_tour(tour: Tour) -> Self {
        let repo = Self::default();
        repo.tours.lock().unwrap().insert(tour.id, tour);
        repo
    }

    pub fn get(&self, id: TourId) -> Option<Tour> {
        self.tours.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>> {
        Ok(self.tours.lock().unwrap().get(&id).cloned())
    }

    async fn tour_image_refs(&self, id: TourId) -> Result<Option<TourImageRefs>> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tours.lock().unwrap().get(&id).map(|t| TourImageRefs {
            cover_image: t.cover_image.clone(),
            gallery_images: t.gallery_images.clone(),
        }))
    }

    async fn update_tour(&self, id: TourId, update: &TourUpdate) -> Result<Tour> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(TourError::UpdateFailed("validation failed".to_string()));
        }

        let mut tours = self.tours.lock().unwrap();
        let tour = tours
            .get_mut(&id)
            .ok_or_else(|| TourError::UpdateFailed(format!("tour {} no longer exists", id)))?;

        if let Some(name) = &update.name {
            tour.name = name.clone();
        }
        if let Some(duration) = update.duration_days {
            tour.duration_days = duration;
        }
        if let Some(size) = update.max_group_size {
            tour.max_group_size = size;
        }
        if let Some(difficulty) = update.difficulty {
            tour.difficulty = difficulty;
        }
        if let Some(price) = update.price {
            tour.price = price;
        }
        if let Some(summary) = &update.summary {
            tour.summary = summary.clone();
        }
        if let Some(description) = &update.description {
            tour.description = Some(description.clone());
        }
        if let Some(cover) = &update.cover_image {
            tour.cover_image = cover.clone();
        }
        if let Some(gallery) = &update.gallery_images {
            tour.gallery_images = gallery.clone();
        }
        tour.updated_at = Utc::now();

        Ok(tour.clone())
    }
}

pub fn fixture_tour(id: TourId, cover: &str, gallery: &[&str]) -> Tour {
    Tour {
        id,
        name: "The Forest Hiker".to_string(),
        duration_days: 5,
        max_group_size: 25,
        difficulty: Difficulty::Easy,
        price: 397.0,
        summary: "Breathtaking hike through the Canadian Banff National Park".to_string(),
        description: None,
        cover_image: cover.to_string(),
        gallery_images: gallery.iter().map(|s| s.to_string()).collect(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A decodable upload; the solid color keeps each file distinguishable.
pub fn png_upload(r: u8, g: u8, b: u8) -> tourex_core::UploadedImage {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([r, g, b, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    tourex_core::UploadedImage {
        bytes: out.into_inner(),
        content_type: "image/png".to_string(),
    }
}

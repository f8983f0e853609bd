//! Test fixtures: an in-memory tour repository and a ready-to-drive app.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use tourex_core::{
    ImageStore, Result, TourError, TourImageService, TourRepository,
};
use tourex_model::{Difficulty, Tour, TourId, TourImageRefs, TourUpdate};
use tourex_server::{AppState, infra::config::Config};

#[derive(Default)]
pub struct InMemoryTours {
    tours: Mutex<HashMap<TourId, Tour>>,
    pub reject_updates: AtomicBool,
    pub update_calls: AtomicUsize,
}

impl InMemoryTours {
    pub fn get(&self, id: TourId) -> Option<Tour> {
        self.tours.lock().unwrap().get(&id).cloned()
    }

    pub fn insert(&self, tour: Tour) {
        self.tours.lock().unwrap().insert(tour.id, tour);
    }
}

#[async_trait]
impl TourRepository for InMemoryTours {
    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>> {
        Ok(self.get(id))
    }

    async fn tour_image_refs(&self, id: TourId) -> Result<Option<TourImageRefs>> {
        Ok(self.get(id).map(|t| TourImageRefs {
            cover_image: t.cover_image,
            gallery_images: t.gallery_images,
        }))
    }

    async fn update_tour(&self, id: TourId, update: &TourUpdate) -> Result<Tour> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(TourError::UpdateFailed("price must be positive".into()));
        }

        let mut tours = self.tours.lock().unwrap();
        let tour = tours
            .get_mut(&id)
            .ok_or_else(|| TourError::UpdateFailed(format!("tour {} no longer exists", id)))?;

        if let Some(v) = &update.name {
            tour.name = v.clone();
        }
        if let Some(v) = update.duration_days {
            tour.duration_days = v;
        }
        if let Some(v) = update.max_group_size {
            tour.max_group_size = v;
        }
        if let Some(v) = update.difficulty {
            tour.difficulty = v;
        }
        if let Some(v) = update.price {
            tour.price = v;
        }
        if let Some(v) = &update.summary {
            tour.summary = v.clone();
        }
        if let Some(v) = &update.description {
            tour.description = Some(v.clone());
        }
        if let Some(v) = &update.cover_image {
            tour.cover_image = v.clone();
        }
        if let Some(v) = &update.gallery_images {
            tour.gallery_images = v.clone();
        }
        tour.updated_at = Utc::now();
        Ok(tour.clone())
    }
}

pub struct TestApp {
    pub repo: Arc<InMemoryTours>,
    pub state: AppState,
    // Kept alive for the duration of the test; the store roots here.
    pub image_dir: tempfile::TempDir,
}

pub fn test_app() -> TestApp {
    let image_dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryTours::default());

    let config = Arc::new(Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: None,
        tour_image_dir: image_dir.path().to_path_buf(),
        max_upload_bytes: 20 * 1024 * 1024,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        dev_mode: true,
    });

    let tours: Arc<dyn TourRepository> = repo.clone();
    let store = ImageStore::new(image_dir.path());
    let tour_images = Arc::new(TourImageService::new(Arc::clone(&tours), store));
    let state = AppState::new(config, tours, tour_images);

    TestApp {
        repo,
        state,
        image_dir,
    }
}

pub fn sample_tour(cover: &str, gallery: &[&str]) -> Tour {
    Tour {
        id: TourId(Uuid::new_v4()),
        name: "The Sea Explorer".to_string(),
        duration_days: 7,
        max_group_size: 15,
        difficulty: Difficulty::Medium,
        price: 497.0,
        summary: "Exploring the jaw-dropping US east coast by foot and by boat".to_string(),
        description: None,
        cover_image: cover.to_string(),
        gallery_images: gallery.iter().map(|s| s.to_string()).collect(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([90, 120, 200, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

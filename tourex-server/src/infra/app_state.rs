use std::{fmt, sync::Arc};

use crate::infra::config::Config;
use tourex_core::TourImageService;
use tourex_core::database::TourRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tours: Arc<dyn TourRepository>,
    pub tour_images: Arc<TourImageService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        tours: Arc<dyn TourRepository>,
        tour_images: Arc<TourImageService>,
    ) -> Self {
        Self {
            config,
            tours,
            tour_images,
        }
    }
}

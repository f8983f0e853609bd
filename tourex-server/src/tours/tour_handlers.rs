use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use tourex_model::{Tour, TourId};

use crate::{
    AppState,
    api::ApiResponse,
    errors::AppResult,
    tours::upload::{self, UpdateRequest},
};

/// Update a tour, replacing its images when the request carries uploads.
///
/// New files are transcoded and durably stored before the record update,
/// and the files the record stops referencing are cleaned up afterwards,
/// so the record never points at a missing image.
pub async fn update_tour_handler(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Tour>>> {
    let tour_id = TourId(tour_id);
    let UpdateRequest {
        mut update,
        uploads,
    } = upload::parse_update_request(multipart).await?;

    if !uploads.is_empty() {
        // One timestamp per request; every file written below shares it.
        let stamp_millis = Utc::now().timestamp_millis();
        let stored = state
            .tour_images
            .process_uploads(tour_id, uploads, stamp_millis)
            .await?;
        if let Some(cover) = stored.cover_image {
            update.cover_image = Some(cover);
        }
        if let Some(gallery) = stored.gallery_images {
            update.gallery_images = Some(gallery);
        }
    }

    let tour = state.tour_images.update_tour_images(tour_id, update).await?;

    info!(tour_id = %tour_id, "tour updated");
    Ok(Json(ApiResponse::success(tour)))
}

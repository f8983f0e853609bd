use axum::extract::multipart::{Field, Multipart};
use std::str::FromStr;
use tracing::debug;

use tourex_core::image::{TourUploads, UploadedImage, is_image_content_type};
use tourex_model::{Difficulty, TourUpdate};

use crate::errors::{AppError, AppResult};

/// Multipart field carrying the cover image file.
pub const COVER_FIELD: &str = "coverImage";
/// Multipart field carrying gallery image files, up to [`MAX_GALLERY_FILES`].
pub const GALLERY_FIELD: &str = "images";
pub const MAX_GALLERY_FILES: usize = 3;

/// A fully parsed update request: the typed field updates plus any uploaded
/// files, still in memory.
#[derive(Debug, Default)]
pub struct UpdateRequest {
    pub update: TourUpdate,
    pub uploads: TourUploads,
}

/// Walk the multipart body, lifting file fields into buffers and text
/// fields into the typed update.
///
/// Rejection is whole-request: a single non-image file, an over-limit file
/// count, or a malformed typed value aborts with a 400 before anything is
/// transcoded or written.
pub async fn parse_update_request(mut multipart: Multipart) -> AppResult<UpdateRequest> {
    let mut request = UpdateRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request(format!("malformed multipart body: {}", e))
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            debug!("skipping unnamed multipart field");
            continue;
        };

        match name.as_str() {
            COVER_FIELD => {
                let upload = read_image_field(field, COVER_FIELD).await?;
                if request.uploads.cover.replace(upload).is_some() {
                    return Err(AppError::bad_request(
                        "at most one cover image per request",
                    ));
                }
            }
            GALLERY_FIELD => {
                if request.uploads.gallery.len() >= MAX_GALLERY_FILES {
                    return Err(AppError::bad_request(format!(
                        "at most {} gallery images per request",
                        MAX_GALLERY_FILES
                    )));
                }
                let upload = read_image_field(field, GALLERY_FIELD).await?;
                request.uploads.gallery.push(upload);
            }
            other => apply_text_field(&mut request.update, other, field).await?,
        }
    }

    Ok(request)
}

async fn read_image_field(
    field: Field<'_>,
    field_name: &str,
) -> AppResult<UploadedImage> {
    let content_type = field.content_type().map(str::to_string).unwrap_or_default();

    // Gate on the declared type before buffering a single byte.
    if !is_image_content_type(&content_type) {
        return Err(AppError::bad_request(format!(
            "unsupported media type for {}: expected an image, got {:?}",
            field_name, content_type
        )));
    }

    let bytes = field.bytes().await.map_err(|e| {
        AppError::bad_request(format!("failed to read {} upload: {}", field_name, e))
    })?;

    Ok(UploadedImage {
        bytes: bytes.to_vec(),
        content_type,
    })
}

async fn apply_text_field(
    update: &mut TourUpdate,
    name: &str,
    field: Field<'_>,
) -> AppResult<()> {
    let value = field.text().await.map_err(|e| {
        AppError::bad_request(format!("failed to read field {}: {}", name, e))
    })?;

    match name {
        "name" => update.name = Some(value),
        "duration" => update.duration_days = Some(parse_value(name, &value)?),
        "maxGroupSize" => update.max_group_size = Some(parse_value(name, &value)?),
        "difficulty" => {
            update.difficulty = Some(Difficulty::parse(&value).ok_or_else(|| {
                AppError::bad_request(format!("unknown difficulty: {}", value))
            })?)
        }
        "price" => update.price = Some(parse_value(name, &value)?),
        "summary" => update.summary = Some(value),
        "description" => update.description = Some(value),
        other => debug!(field = other, "ignoring unknown update field"),
    }

    Ok(())
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid value for {}: {}", name, value)))
}

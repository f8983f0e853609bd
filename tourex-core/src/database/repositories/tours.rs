use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::warn;

use tourex_model::{Difficulty, Tour, TourId, TourImageRefs, TourUpdate};

use crate::{
    database::ports::tours::TourRepository,
    error::{Result, TourError},
};

const TOUR_COLUMNS: &str = "id, name, duration_days, max_group_size, difficulty, \
     price, summary, description, cover_image, gallery_images, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PostgresTourRepository {
    pool: PgPool,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_tour_row(row: PgRow) -> Result<Tour> {
        let difficulty: String = row.try_get("difficulty").map_err(db_err)?;
        let difficulty = Difficulty::parse(&difficulty).ok_or_else(|| {
            TourError::Internal(format!("unknown difficulty in store: {}", difficulty))
        })?;

        Ok(Tour {
            id: TourId(row.try_get("id").map_err(db_err)?),
            name: row.try_get("name").map_err(db_err)?,
            duration_days: row.try_get("duration_days").map_err(db_err)?,
            max_group_size: row.try_get("max_group_size").map_err(db_err)?,
            difficulty,
            price: row.try_get("price").map_err(db_err)?,
            summary: row.try_get("summary").map_err(db_err)?,
            description: row.try_get("description").map_err(db_err)?,
            cover_image: row.try_get("cover_image").map_err(db_err)?,
            gallery_images: row.try_get("gallery_images").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }
}

fn db_err(e: sqlx::Error) -> TourError {
    TourError::Internal(format!("database error: {}", e))
}

#[async_trait]
impl TourRepository for PostgresTourRepository {
    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>> {
        let row = sqlx::query(&format!(
            "SELECT {TOUR_COLUMNS} FROM tours WHERE id = $1"
        ))
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Self::map_tour_row).transpose()
    }

    async fn tour_image_refs(&self, id: TourId) -> Result<Option<TourImageRefs>> {
        let row = sqlx::query(
            "SELECT cover_image, gallery_images FROM tours WHERE id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|r| {
            Ok(TourImageRefs {
                cover_image: r.try_get("cover_image").map_err(db_err)?,
                gallery_images: r.try_get("gallery_images").map_err(db_err)?,
            })
        })
        .transpose()
    }

    async fn update_tour(&self, id: TourId, update: &TourUpdate) -> Result<Tour> {
        // COALESCE keeps absent fields untouched; NULL binds never overwrite.
        let row = sqlx::query(&format!(
            r#"
            UPDATE tours
            SET name = COALESCE($2, name),
                duration_days = COALESCE($3, duration_days),
                max_group_size = COALESCE($4, max_group_size),
                difficulty = COALESCE($5, difficulty),
                price = COALESCE($6, price),
                summary = COALESCE($7, summary),
                description = COALESCE($8, description),
                cover_image = COALESCE($9, cover_image),
                gallery_images = COALESCE($10, gallery_images),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TOUR_COLUMNS}
            "#
        ))
        .bind(id.to_uuid())
        .bind(update.name.as_deref())
        .bind(update.duration_days)
        .bind(update.max_group_size)
        .bind(update.difficulty.map(|d| d.as_str()))
        .bind(update.price)
        .bind(update.summary.as_deref())
        .bind(update.description.as_deref())
        .bind(update.cover_image.as_deref())
        .bind(update.gallery_images.clone())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) => {
                warn!(tour_id = %id, error = %db, "tour update rejected by database");
                TourError::UpdateFailed(db.to_string())
            }
            other => db_err(other),
        })?;

        match row {
            Some(row) => Self::map_tour_row(row),
            // Record vanished between snapshot and update; the write was
            // rejected, so nothing downstream may delete files.
            None => Err(TourError::UpdateFailed(format!(
                "tour {} no longer exists",
                id
            ))),
        }
    }
}

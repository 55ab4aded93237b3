use crate::domain::models::{event::Event, location::Location};
use crate::domain::ports::EventRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event, location: Option<&Location>) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if let Some(location) = location {
            sqlx::query(
                "INSERT INTO locations (id, name, address, city, postal_code, country, latitude, longitude)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&location.id)
            .bind(&location.name)
            .bind(&location.address)
            .bind(&location.city)
            .bind(&location.postal_code)
            .bind(&location.country)
            .bind(location.latitude)
            .bind(location.longitude)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        let created = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, start_time, end_time, max_attendees,
                                 organizer_id, category_id, location_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(&event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.max_attendees)
        .bind(&event.organizer_id)
        .bind(&event.category_id)
        .bind(location.map(|l| l.id.clone()).or_else(|| event.location_id.clone()))
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE organizer_id = $1 ORDER BY start_time ASC",
        )
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_max_attendees(
        &self,
        id: &str,
        max_attendees: Option<i32>,
    ) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET max_attendees = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(max_attendees)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Event not found with id: {id}")))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Event not found with id: {id}")));
        }
        Ok(())
    }
}

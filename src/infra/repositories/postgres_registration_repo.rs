use crate::domain::models::registration::{AdmissionOutcome, Registration, RegistrationStatus};
use crate::domain::ports::RegistrationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn admit(
        &self,
        registration: &Registration,
        max_attendees: Option<i32>,
    ) -> Result<AdmissionOutcome, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row-lock the event so concurrent admissions for the same event
        // evaluate the checks one at a time.
        sqlx::query("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(&registration.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let exists = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE user_id = $1 AND event_id = $2) AS present",
        )
        .bind(&registration.user_id)
        .bind(&registration.event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .get::<bool, _>("present");

        if exists {
            return Ok(AdmissionOutcome::Duplicate);
        }

        if let Some(limit) = max_attendees {
            let count = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE event_id = $1")
                .bind(&registration.event_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?
                .get::<i64, _>("count");

            if count >= i64::from(limit) {
                return Ok(AdmissionOutcome::Full);
            }
        }

        let inserted = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, user_id, event_id, registration_time, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&registration.id)
        .bind(&registration.user_id)
        .bind(&registration.event_id)
        .bind(registration.registration_time)
        .bind(&registration.status)
        .bind(&registration.notes)
        .fetch_one(&mut *tx)
        .await;

        let created = match inserted {
            Ok(created) => created,
            Err(err) if AppError::is_unique_violation(&err) => {
                return Ok(AdmissionOutcome::Duplicate)
            }
            Err(err) => return Err(AppError::Database(err)),
        };

        tx.commit().await.map_err(AppError::Database)?;
        Ok(AdmissionOutcome::Admitted(created))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn exists(&self, user_id: &str, event_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE user_id = $1 AND event_id = $2) AS present",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(row.get::<bool, _>("present"))
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = $1 ORDER BY registration_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = $1 ORDER BY registration_time DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_event_and_status(
        &self,
        event_id: &str,
        status: RegistrationStatus,
    ) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "UPDATE registrations SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

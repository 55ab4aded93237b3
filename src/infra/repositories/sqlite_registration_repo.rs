use crate::domain::models::registration::{AdmissionOutcome, Registration, RegistrationStatus};
use crate::domain::ports::RegistrationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn admit(
        &self,
        registration: &Registration,
        max_attendees: Option<i32>,
    ) -> Result<AdmissionOutcome, AppError> {
        // SQLite serializes writers, so a single conditional insert evaluates
        // the uniqueness rule, the capacity rule and the insert atomically.
        let inserted = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, user_id, event_id, registration_time, status, notes)
             SELECT ?, ?, ?, ?, ?, ?
             WHERE NOT EXISTS (SELECT 1 FROM registrations WHERE user_id = ? AND event_id = ?)
               AND (? IS NULL OR
                    (SELECT COUNT(*) FROM registrations WHERE event_id = ?) < ?)
             RETURNING *",
        )
        .bind(&registration.id)
        .bind(&registration.user_id)
        .bind(&registration.event_id)
        .bind(registration.registration_time)
        .bind(&registration.status)
        .bind(&registration.notes)
        .bind(&registration.user_id)
        .bind(&registration.event_id)
        .bind(max_attendees)
        .bind(&registration.event_id)
        .bind(max_attendees)
        .fetch_optional(&self.pool)
        .await;

        match inserted {
            Ok(Some(created)) => Ok(AdmissionOutcome::Admitted(created)),
            Ok(None) => {
                // Zero rows: decide which rule blocked the insert.
                if self
                    .exists(&registration.user_id, &registration.event_id)
                    .await?
                {
                    Ok(AdmissionOutcome::Duplicate)
                } else {
                    Ok(AdmissionOutcome::Full)
                }
            }
            Err(err) if AppError::is_unique_violation(&err) => Ok(AdmissionOutcome::Duplicate),
            Err(err) => Err(AppError::Database(err)),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = ?")
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
            "SELECT * FROM registrations WHERE user_id = ? AND event_id = ?",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn exists(&self, user_id: &str, event_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE user_id = ? AND event_id = ?) AS present",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(row.get::<bool, _>("present"))
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = ? ORDER BY registration_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = ? ORDER BY registration_time DESC",
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
            "SELECT * FROM registrations WHERE event_id = ? AND status = ?",
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
            "UPDATE registrations SET status = ? WHERE id = ? RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

#![allow(dead_code)]

use eventory_backend::{
    config::Config,
    domain::models::event::{Event, NewEventParams},
    domain::models::user::User,
    domain::ports::ConfirmationNotifier,
    domain::services::registration_service::RegistrationService,
    error::AppError,
    infra::repositories::{
        sqlite_category_repo::SqliteCategoryRepo, sqlite_event_repo::SqliteEventRepo,
        sqlite_registration_repo::SqliteRegistrationRepo, sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SentConfirmation {
    pub recipient: String,
    pub username: String,
    pub event_title: String,
    pub event_start_time: DateTime<Utc>,
}

/// Records every confirmation instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SentConfirmation>>,
}

#[async_trait]
impl ConfirmationNotifier for RecordingNotifier {
    async fn send_registration_confirmation(
        &self,
        recipient_email: &str,
        username: &str,
        event_title: &str,
        event_start_time: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentConfirmation {
            recipient: recipient_email.to_string(),
            username: username.to_string(),
            event_title: event_title.to_string(),
            event_start_time,
        });
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl ConfirmationNotifier for FailingNotifier {
    async fn send_registration_confirmation(
        &self,
        _recipient_email: &str,
        _username: &str,
        _event_title: &str,
        _event_start_time: DateTime<Utc>,
    ) -> Result<(), AppError> {
        Err(AppError::Notification("mail relay unreachable".to_string()))
    }
}

pub struct TestApp {
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub recorder: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(false).await
    }

    pub async fn with_failing_notifier() -> Self {
        Self::build(true).await
    }

    async fn build(failing_notifier: bool) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            mail_from: "no-reply@eventory.local".to_string(),
        };

        let recorder = Arc::new(RecordingNotifier::default());
        let notifier: Arc<dyn ConfirmationNotifier> = if failing_notifier {
            Arc::new(FailingNotifier)
        } else {
            recorder.clone()
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let registration_repo = Arc::new(SqliteRegistrationRepo::new(pool.clone()));
        let registration_service = Arc::new(RegistrationService::new(
            user_repo.clone(),
            event_repo.clone(),
            registration_repo.clone(),
            notifier.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            user_repo,
            category_repo: Arc::new(SqliteCategoryRepo::new(pool.clone())),
            event_repo,
            registration_repo,
            notifier,
            registration_service,
        });

        Self {
            pool,
            db_filename,
            state,
            recorder,
        }
    }

    pub fn service(&self) -> Arc<RegistrationService> {
        self.state.registration_service.clone()
    }

    pub async fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hashed-password".to_string(),
        );
        self.state.user_repo.create(&user).await.unwrap()
    }

    pub async fn seed_event(&self, organizer: &User, max_attendees: Option<i32>) -> Event {
        let start = Utc::now() + Duration::days(7);
        let event = Event::new(NewEventParams {
            title: "Rust Meetup".to_string(),
            description: Some("Monthly gathering".to_string()),
            start_time: start,
            end_time: start + Duration::hours(2),
            max_attendees,
            organizer_id: organizer.id.clone(),
            category_id: None,
            location_id: None,
        })
        .unwrap();
        self.state.event_repo.create(&event, None).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

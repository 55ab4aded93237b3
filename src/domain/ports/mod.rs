use crate::domain::models::{
    category::Category,
    event::Event,
    location::Location,
    registration::{AdmissionOutcome, Registration, RegistrationStatus},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<Category, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, AppError>;
    async fn list(&self) -> Result<Vec<Category>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persists the event together with its owned location, if any,
    /// in a single transaction.
    async fn create(&self, event: &Event, location: Option<&Location>) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError>;
    async fn update_max_attendees(
        &self,
        id: &str,
        max_attendees: Option<i32>,
    ) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// The admission decision: evaluates the (user, event) uniqueness rule
    /// and the capacity rule and inserts the row as one atomic unit with
    /// respect to concurrent admissions for the same event or pair.
    async fn admit(
        &self,
        registration: &Registration,
        max_attendees: Option<i32>,
    ) -> Result<AdmissionOutcome, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError>;
    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Registration>, AppError>;
    async fn exists(&self, user_id: &str, event_id: &str) -> Result<bool, AppError>;
    /// Counts every registration row for the event, cancelled ones included.
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn list_by_event_and_status(
        &self,
        event_id: &str,
        status: RegistrationStatus,
    ) -> Result<Vec<Registration>, AppError>;
    async fn update_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, AppError>;
}

#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn send_registration_confirmation(
        &self,
        recipient_email: &str,
        username: &str,
        event_title: &str,
        event_start_time: DateTime<Utc>,
    ) -> Result<(), AppError>;
}

use crate::domain::models::event::Event;
use crate::domain::models::registration::{AdmissionOutcome, Registration, RegistrationStatus};
use crate::domain::models::user::User;
use crate::domain::ports::{
    ConfirmationNotifier, EventRepository, RegistrationRepository, UserRepository,
};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

/// Gates the creation of registrations against the capacity and uniqueness
/// rules and manages the status lifecycle afterwards.
pub struct RegistrationService {
    user_repo: Arc<dyn UserRepository>,
    event_repo: Arc<dyn EventRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl RegistrationService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        event_repo: Arc<dyn EventRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
        notifier: Arc<dyn ConfirmationNotifier>,
    ) -> Self {
        Self {
            user_repo,
            event_repo,
            registration_repo,
            notifier,
        }
    }

    async fn require_user(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with id: {user_id}")))
    }

    async fn require_event(&self, event_id: &str) -> Result<Event, AppError> {
        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event not found with id: {event_id}")))
    }

    /// Admits a user to an event.
    ///
    /// The uniqueness check, the capacity check and the insert are delegated
    /// to the store as one atomic unit, so two racing admissions can never
    /// both pass the checks. The confirmation notification is fired after
    /// the row is durable and never affects the admission result.
    pub async fn register_for_event(
        &self,
        user_id: &str,
        event_id: &str,
        notes: Option<String>,
    ) -> Result<Registration, AppError> {
        let user = self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;

        let registration = Registration::new(user.id.clone(), event.id.clone(), notes);

        let created = match self
            .registration_repo
            .admit(&registration, event.max_attendees)
            .await?
        {
            AdmissionOutcome::Admitted(created) => created,
            AdmissionOutcome::Duplicate => {
                return Err(AppError::AlreadyExists(
                    "User is already registered for this event".to_string(),
                ))
            }
            AdmissionOutcome::Full => {
                return Err(AppError::CapacityExceeded(
                    "Event has reached maximum capacity".to_string(),
                ))
            }
        };

        info!(
            registration_id = %created.id,
            user_id = %user.id,
            event_id = %event.id,
            "registration admitted"
        );

        if let Err(err) = self
            .notifier
            .send_registration_confirmation(
                &user.email,
                &user.username,
                &event.title,
                event.start_time,
            )
            .await
        {
            warn!(
                registration_id = %created.id,
                "confirmation notification failed: {err}"
            );
        }

        Ok(created)
    }

    pub async fn get_registration(&self, id: &str) -> Result<Registration, AppError> {
        self.registration_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration not found with id: {id}")))
    }

    pub async fn get_registration_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Registration, AppError> {
        let user = self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;

        self.registration_repo
            .find_by_user_and_event(&user.id, &event.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Registration not found for user and event".to_string())
            })
    }

    /// Registrations of a user, newest first.
    pub async fn list_user_registrations(
        &self,
        user_id: &str,
    ) -> Result<Vec<Registration>, AppError> {
        let user = self.require_user(user_id).await?;
        self.registration_repo.list_by_user(&user.id).await
    }

    /// Registrations of an event, newest first.
    pub async fn list_event_registrations(
        &self,
        event_id: &str,
    ) -> Result<Vec<Registration>, AppError> {
        let event = self.require_event(event_id).await?;
        self.registration_repo.list_by_event(&event.id).await
    }

    /// Deliberately performs no existence check: an unknown event yields
    /// an empty list.
    pub async fn list_by_event_and_status(
        &self,
        event_id: &str,
        status: RegistrationStatus,
    ) -> Result<Vec<Registration>, AppError> {
        self.registration_repo
            .list_by_event_and_status(event_id, status)
            .await
    }

    /// Any status may be written over any other; callers are trusted
    /// (they sit behind an authorization-gated boundary).
    pub async fn update_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Registration, AppError> {
        self.registration_repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration not found with id: {id}")))
    }

    /// Cancellation is a status change, never a delete; repeating it simply
    /// re-writes CANCELLED.
    pub async fn cancel_registration(&self, id: &str) -> Result<(), AppError> {
        self.registration_repo
            .update_status(id, RegistrationStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration not found with id: {id}")))?;
        info!(registration_id = %id, "registration cancelled");
        Ok(())
    }

    pub async fn is_user_registered(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<bool, AppError> {
        let user = self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;
        self.registration_repo.exists(&user.id, &event.id).await
    }

    /// Total registration rows for the event, cancelled ones included.
    pub async fn count_event_registrations(&self, event_id: &str) -> Result<i64, AppError> {
        let event = self.require_event(event_id).await?;
        self.registration_repo.count_by_event(&event.id).await
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Lifecycle stage of a registration. Persisted as its uppercase name.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Attended,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "PENDING",
            RegistrationStatus::Confirmed => "CONFIRMED",
            RegistrationStatus::Cancelled => "CANCELLED",
            RegistrationStatus::Attended => "ATTENDED",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(RegistrationStatus::Pending),
            "CONFIRMED" => Ok(RegistrationStatus::Confirmed),
            "CANCELLED" => Ok(RegistrationStatus::Cancelled),
            "ATTENDED" => Ok(RegistrationStatus::Attended),
            other => Err(AppError::Validation(format!(
                "Unknown registration status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub registration_time: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

impl Registration {
    /// Registrations are admitted directly as CONFIRMED; the timestamp is
    /// fixed here, at construction time, not by a storage-layer hook.
    pub fn new(user_id: String, event_id: String, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            registration_time: Utc::now(),
            status: RegistrationStatus::Confirmed.as_str().to_string(),
            notes,
        }
    }

    pub fn status(&self) -> Result<RegistrationStatus, AppError> {
        self.status.parse()
    }
}

/// Result of the atomic guarded insert performed by a registration store.
#[derive(Debug)]
pub enum AdmissionOutcome {
    Admitted(Registration),
    /// A registration already exists for the (user, event) pair,
    /// whatever its status.
    Duplicate,
    /// The event's registration count has reached its declared maximum.
    Full,
}

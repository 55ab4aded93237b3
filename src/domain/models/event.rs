use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// NULL means the event accepts unboundedly many registrations.
    pub max_attendees: Option<i32>,
    pub organizer_id: String,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_attendees: Option<i32>,
    pub organizer_id: String,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Result<Self, AppError> {
        if params.start_time >= params.end_time {
            return Err(AppError::Validation(
                "Event start time must be before end time".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            start_time: params.start_time,
            end_time: params.end_time,
            max_attendees: params.max_attendees,
            organizer_id: params.organizer_id,
            category_id: params.category_id,
            location_id: params.location_id,
            created_at: now,
            updated_at: now,
        })
    }
}

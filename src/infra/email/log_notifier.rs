use crate::domain::ports::ConfirmationNotifier;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tera::{Context, Tera};
use tracing::info;

/// Renders the confirmation message and hands it to the log instead of a
/// mail relay. Real transport lives outside this crate; swapping it in is a
/// matter of providing another `ConfirmationNotifier`.
pub struct LogNotifier {
    templates: Tera,
    from: String,
}

impl LogNotifier {
    pub fn new(from: String) -> Self {
        let mut templates = Tera::default();
        templates
            .add_raw_template(
                "registration_confirmation.txt",
                include_str!("../../templates/registration_confirmation.txt"),
            )
            .expect("Failed to load confirmation template");
        Self { templates, from }
    }
}

#[async_trait]
impl ConfirmationNotifier for LogNotifier {
    async fn send_registration_confirmation(
        &self,
        recipient_email: &str,
        username: &str,
        event_title: &str,
        event_start_time: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut context = Context::new();
        context.insert("username", username);
        context.insert("event_title", event_title);
        context.insert(
            "event_start_time",
            &event_start_time.format("%Y-%m-%d %H:%M").to_string(),
        );

        let body = self
            .templates
            .render("registration_confirmation.txt", &context)
            .map_err(|err| AppError::Notification(err.to_string()))?;

        info!(
            from = %self.from,
            to = %recipient_email,
            subject = %format!("Event Registration Confirmation: {event_title}"),
            "confirmation message:\n{body}"
        );
        Ok(())
    }
}

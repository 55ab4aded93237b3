use crate::config::Config;
use crate::domain::ports::{
    CategoryRepository, ConfirmationNotifier, EventRepository, RegistrationRepository,
    UserRepository,
};
use crate::domain::services::registration_service::RegistrationService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub notifier: Arc<dyn ConfirmationNotifier>,
    pub registration_service: Arc<RegistrationService>,
}

pub mod category;
pub mod event;
pub mod location;
pub mod registration;
pub mod user;

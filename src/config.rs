use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@eventory.local".to_string()),
        }
    }
}

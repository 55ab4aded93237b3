use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Clone)]
pub struct NewLocationParams {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    pub fn new(params: NewLocationParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            address: params.address,
            city: params.city,
            postal_code: params.postal_code,
            country: params.country,
            latitude: params.latitude,
            longitude: params.longitude,
        }
    }
}

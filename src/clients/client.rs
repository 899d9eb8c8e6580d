use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueueError;
use crate::model::Model;

/// Longest car model description accepted, in characters.
pub const MAX_CAR_MODEL_LEN: usize = 30;

/// A car-wash customer, identified by the plate of their car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub plate: String,
    pub car_model: String,
    pub created_at: DateTime<Utc>,
}

impl Model for Client {
    const COLLECTION: &'static str = "clients";

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("plate", self.plate.clone())]
    }
}

impl Client {
    /// Build a new client with a fresh id.
    pub fn new(fields: ClientFields) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), fields)
    }

    pub fn with_id(id: String, fields: ClientFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            plate: fields.plate,
            car_model: fields.car_model,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the contact details and car model. Plate and id are kept.
    pub fn apply_details(&mut self, fields: &ClientFields) {
        self.name = fields.name.clone();
        self.phone = fields.phone.clone();
        self.car_model = fields.car_model.clone();
    }

    /// Case-insensitive substring match on name, plate, phone or car model.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.plate, &self.phone, &self.car_model]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Editable client fields, as sent by the front desk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub car_model: String,
}

impl ClientFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        plate: impl Into<String>,
        car_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            plate: plate.into(),
            car_model: car_model.into(),
        }
    }

    pub fn validate(&self) -> Result<(), QueueError> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require("plate", &self.plate)?;
        if self.car_model.chars().count() > MAX_CAR_MODEL_LEN {
            return Err(QueueError::validation(
                "carModel",
                format!("must be at most {} characters", MAX_CAR_MODEL_LEN),
            ));
        }
        Ok(())
    }
}

/// Payload for creating a client directly. The id is generated if omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: ClientFields,
}

fn require(field: &'static str, value: &str) -> Result<(), QueueError> {
    if value.trim().is_empty() {
        return Err(QueueError::validation(field, "is required"));
    }
    Ok(())
}

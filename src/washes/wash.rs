use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueueError;
use crate::model::Model;

/// Lifecycle state of a wash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WashStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl WashStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WashStatus::Pending => "pending",
            WashStatus::Completed => "completed",
            WashStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WashStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WashStatus {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(WashStatus::Pending),
            "completed" => Ok(WashStatus::Completed),
            "cancelled" => Ok(WashStatus::Cancelled),
            other => Err(QueueError::validation(
                "status",
                format!(
                    "'{}' is not one of pending, completed, cancelled",
                    other
                ),
            )),
        }
    }
}

/// One car-wash job, from intake to a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wash {
    pub id: String,
    /// `Client::id` of the owner.
    pub client_id: String,
    pub plate: String,
    pub car_model: String,
    pub price: Decimal,
    pub entry_time: DateTime<Utc>,
    pub delivery_time: DateTime<Utc>,
    pub status: WashStatus,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl Model for Wash {
    const COLLECTION: &'static str = "washes";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Wash {
    /// A pending wash entering the queue now.
    pub fn pending(
        client_id: String,
        plate: String,
        car_model: String,
        price: Decimal,
        delivery_time: DateTime<Utc>,
        payment_method: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            plate,
            car_model,
            price,
            entry_time: now,
            delivery_time,
            status: WashStatus::Pending,
            payment_method,
            created_at: now,
        }
    }

    /// Pending and promised before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == WashStatus::Pending && self.delivery_time < now
    }
}

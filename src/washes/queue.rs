use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::filter::QueueFilter;
use super::price::parse_price;
use super::time::parse_delivery_time;
use super::{Wash, WashStatus};
use crate::clients::{Client, ClientFields, ClientRegistry};
use crate::error::QueueError;
use crate::lock::{InMemoryLockManager, LockGuard, LockManager};
use crate::model::{ModelStore, ModelsExt};

/// A service registration as submitted at the front desk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(flatten)]
    pub client: ClientFields,
    #[serde(default)]
    pub wash_price: Option<String>,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub payment_method: String,
}

/// A registration request with every field parsed and validated.
#[derive(Debug, Clone)]
struct ValidService {
    client: ClientFields,
    price: Decimal,
    delivery_time: DateTime<Utc>,
    payment_method: String,
}

impl ServiceRequest {
    fn validate(self) -> Result<ValidService, QueueError> {
        self.client.validate()?;
        let price = parse_price(self.wash_price.as_deref())?;
        let delivery_time = parse_delivery_time(self.delivery_time.as_deref().unwrap_or_default())?;
        Ok(ValidService {
            client: self.client,
            price,
            delivery_time,
            payment_method: self.payment_method,
        })
    }
}

/// The client and wash produced by one registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub client: Client,
    pub wash: Wash,
}

/// One row of the service queue: a wash joined with its client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub plate: String,
    pub car_model: String,
    pub price: Decimal,
    pub entry_time: DateTime<Utc>,
    pub delivery_time: DateTime<Utc>,
    pub status: WashStatus,
    pub payment_method: String,
    pub client_name: String,
    pub client_phone: String,
}

impl QueueEntry {
    fn join(wash: Wash, client: &Client) -> Self {
        Self {
            id: wash.id,
            plate: wash.plate,
            car_model: wash.car_model,
            price: wash.price,
            entry_time: wash.entry_time,
            delivery_time: wash.delivery_time,
            status: wash.status,
            payment_method: wash.payment_method,
            client_name: client.name.clone(),
            client_phone: client.phone.clone(),
        }
    }
}

/// The wash queue: registration, listing and status changes.
///
/// Registrations for the same plate are serialized through `L`, so the
/// pending-wash check and the insert behind it see a consistent store.
pub struct WashQueue<S, L = InMemoryLockManager> {
    store: S,
    clients: ClientRegistry<S>,
    plate_locks: L,
}

impl<S: ModelStore + Clone> WashQueue<S, InMemoryLockManager> {
    pub fn new(store: S) -> Self {
        Self::with_locks(store, InMemoryLockManager::new())
    }
}

impl<S: ModelStore + Clone, L: LockManager> WashQueue<S, L> {
    pub fn with_locks(store: S, plate_locks: L) -> Self {
        Self {
            clients: ClientRegistry::new(store.clone()),
            store,
            plate_locks,
        }
    }

    pub fn clients(&self) -> &ClientRegistry<S> {
        &self.clients
    }

    /// Register a wash for the request's plate, creating or refreshing the
    /// client. Fails with a conflict while the plate has a pending wash.
    pub fn register_service(&self, request: ServiceRequest) -> Result<Registration, QueueError> {
        let service = request.validate()?;
        let plate = service.client.plate.clone();

        let _guard = LockGuard::acquire(&self.plate_locks, &plate)?;

        if let Some(pending) = self.pending_for_plate(&plate)? {
            warn!(plate = %plate, wash_id = %pending.id, "registration rejected, wash already pending");
            return Err(QueueError::Conflict(format!(
                "plate {} already has a pending wash",
                plate
            )));
        }

        let client = self.clients.upsert_by_plate(&service.client)?;

        let wash = Wash::pending(
            client.id.clone(),
            plate,
            service.client.car_model,
            service.price,
            service.delivery_time,
            service.payment_method,
        );
        let wash = self.store.models::<Wash>().insert(&wash)?;

        info!(
            wash_id = %wash.id,
            client_id = %client.id,
            plate = %wash.plate,
            price = %wash.price,
            delivery_time = %wash.delivery_time,
            "wash registered"
        );
        Ok(Registration { client, wash })
    }

    pub fn pending_for_plate(&self, plate: &str) -> Result<Option<Wash>, QueueError> {
        Ok(self
            .store
            .models::<Wash>()
            .find_one(&|w| w.plate == plate && w.status == WashStatus::Pending)?)
    }

    /// Complete every pending wash promised before `now`.
    pub fn sweep_overdue(&self, now: DateTime<Utc>) -> Result<usize, QueueError> {
        let swept = self
            .store
            .models::<Wash>()
            .update_where(&|w| w.is_overdue(now), &|w| w.status = WashStatus::Completed)?;
        if swept > 0 {
            info!(swept, "overdue washes marked completed");
        }
        Ok(swept)
    }

    /// The service queue: sweep, filter, join to clients, soonest delivery
    /// first. Washes whose client no longer resolves are left out.
    pub fn list_queue(&self, filter: &QueueFilter) -> Result<Vec<QueueEntry>, QueueError> {
        self.sweep_overdue(Utc::now())?;

        let washes = self.store.models::<Wash>().find(&|w| filter.matches(w))?;

        let wanted: HashSet<&str> = washes.iter().map(|w| w.client_id.as_str()).collect();
        let clients: HashMap<String, Client> = self
            .store
            .models::<Client>()
            .find(&|c| wanted.contains(c.id.as_str()))?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut entries: Vec<QueueEntry> = washes
            .into_iter()
            .filter_map(|wash| {
                let client = clients.get(&wash.client_id)?;
                Some(QueueEntry::join(wash, client))
            })
            .collect();
        entries.sort_by_key(|entry| entry.delivery_time);

        debug!(?filter, entries = entries.len(), "queue listed");
        Ok(entries)
    }

    /// Set the status of the wash with `id`.
    pub fn update_status(&self, id: &str, status: WashStatus) -> Result<Wash, QueueError> {
        let mut wash = self
            .store
            .models::<Wash>()
            .get(id)?
            .ok_or_else(|| QueueError::NotFound(format!("wash {} not found", id)))?;

        let previous = wash.status;
        wash.status = status;
        let wash = self.store.models::<Wash>().update(&wash)?;

        info!(wash_id = %wash.id, from = %previous, to = %wash.status, "wash status changed");
        Ok(wash)
    }
}

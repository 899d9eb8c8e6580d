use tracing::{debug, info};

use super::{Client, ClientFields, NewClient};
use crate::error::QueueError;
use crate::model::{ModelStore, ModelsExt};

/// Client registry over a document store.
///
/// Plate uniqueness is enforced by the store; every operation here is a
/// short sequence of independent store calls.
#[derive(Clone)]
pub struct ClientRegistry<S> {
    store: S,
}

impl<S: ModelStore> ClientRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn find_by_plate(&self, plate: &str) -> Result<Option<Client>, QueueError> {
        debug!(plate, "looking up client by plate");
        Ok(self
            .store
            .models::<Client>()
            .find_one(&|c| c.plate == plate)?)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Client>, QueueError> {
        Ok(self.store.models::<Client>().get(id)?)
    }

    /// Update the client owning `fields.plate`, or create one if none exists.
    pub fn upsert_by_plate(&self, fields: &ClientFields) -> Result<Client, QueueError> {
        fields.validate()?;

        match self.find_by_plate(&fields.plate)? {
            Some(mut client) => {
                client.apply_details(fields);
                let client = self.store.models::<Client>().update(&client)?;
                info!(client_id = %client.id, plate = %client.plate, "client updated");
                Ok(client)
            }
            None => {
                let client = self
                    .store
                    .models::<Client>()
                    .insert(&Client::new(fields.clone()))?;
                info!(client_id = %client.id, plate = %client.plate, "client created");
                Ok(client)
            }
        }
    }

    /// Insert a client as given. Fails if the plate is already registered.
    pub fn create(&self, input: NewClient) -> Result<Client, QueueError> {
        input.fields.validate()?;

        let client = match input.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => Client::with_id(id, input.fields),
            None => Client::new(input.fields),
        };
        let client = self.store.models::<Client>().insert(&client)?;
        info!(client_id = %client.id, plate = %client.plate, "client created");
        Ok(client)
    }

    /// All clients, most recently created first.
    pub fn list(&self) -> Result<Vec<Client>, QueueError> {
        let mut clients = self.store.models::<Client>().find(&|_| true)?;
        newest_first(&mut clients);
        Ok(clients)
    }

    /// Clients whose name, plate, phone or car model contains `query`,
    /// ignoring case. An empty query matches every client.
    pub fn search(&self, query: &str) -> Result<Vec<Client>, QueueError> {
        let needle = query.trim().to_lowercase();
        let mut clients = self
            .store
            .models::<Client>()
            .find(&|c| c.matches(&needle))?;
        newest_first(&mut clients);
        debug!(query, matches = clients.len(), "client search");
        Ok(clients)
    }

    /// Overwrite name, phone, plate and car model of the client with `id`.
    pub fn update_by_id(&self, id: &str, fields: ClientFields) -> Result<Client, QueueError> {
        fields.validate()?;

        let mut client = self
            .find_by_id(id)?
            .ok_or_else(|| QueueError::NotFound(format!("client {} not found", id)))?;

        client.apply_details(&fields);
        client.plate = fields.plate;

        let client = self.store.models::<Client>().update(&client)?;
        info!(client_id = %client.id, plate = %client.plate, "client edited");
        Ok(client)
    }
}

fn newest_first(clients: &mut [Client]) {
    clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

//! Shared fixtures for queue tests.

use chrono::{DateTime, Duration, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use carwash_queue::{ClientFields, InMemoryModelStore, ServiceRequest, WashQueue};

pub fn queue() -> (WashQueue<InMemoryModelStore>, InMemoryModelStore) {
    let store = InMemoryModelStore::new();
    (WashQueue::new(store.clone()), store)
}

pub fn request(name: &str, plate: &str, delivery: DateTime<Utc>) -> ServiceRequest {
    ServiceRequest {
        client: ClientFields::new(name, "11 95555-4444", plate, "Corolla"),
        wash_price: Some("R$ 60,00".into()),
        delivery_time: Some(delivery.to_rfc3339_opts(SecondsFormat::Millis, true)),
        payment_method: "card".into(),
    }
}

pub fn in_hours(hours: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(hours)
}

/// `hour:minute` local time on `date`, as UTC.
pub fn local_at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    Local
        .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

/// A local calendar day safely in the future.
pub fn future_day(days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days)
}

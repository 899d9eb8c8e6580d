//! Wash queue: service registration, the swept and joined queue listing,
//! and status changes.

mod filter;
mod price;
mod queue;
mod time;
mod wash;

pub use filter::{QueueFilter, QueueQuery, StatusFilter};
pub use price::parse_price;
pub use queue::{QueueEntry, Registration, ServiceRequest, WashQueue};
pub use time::{parse_date, parse_delivery_time, DayWindow};
pub use wash::{Wash, WashStatus};

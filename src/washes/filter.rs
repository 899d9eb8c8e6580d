use serde::Deserialize;

use super::time::{parse_date, DayWindow};
use super::{Wash, WashStatus};
use crate::error::QueueError;

/// Which statuses a queue listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Everything except cancelled washes.
    #[default]
    Active,
    /// No status restriction.
    All,
    /// Exactly one status.
    Only(WashStatus),
}

impl StatusFilter {
    /// `None`, blank -> `Active`; `"all"` -> `All`; otherwise a known status.
    pub fn parse(value: Option<&str>) -> Result<Self, QueueError> {
        match value.map(str::trim) {
            None | Some("") => Ok(StatusFilter::Active),
            Some("all") => Ok(StatusFilter::All),
            Some(status) => Ok(StatusFilter::Only(status.parse()?)),
        }
    }

    pub fn matches(&self, status: WashStatus) -> bool {
        match self {
            StatusFilter::Active => status != WashStatus::Cancelled,
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == *wanted,
        }
    }
}

/// Raw query parameters of a queue listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
    pub date: Option<String>,
}

/// Parsed queue listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFilter {
    pub status: StatusFilter,
    pub delivery_day: Option<DayWindow>,
}

impl QueueFilter {
    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn delivered_on(mut self, window: DayWindow) -> Self {
        self.delivery_day = Some(window);
        self
    }

    pub fn from_query(query: &QueueQuery) -> Result<Self, QueueError> {
        let status = StatusFilter::parse(query.status.as_deref())?;
        let delivery_day = match query.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(date) => Some(DayWindow::local(parse_date(date)?)?),
        };
        Ok(Self {
            status,
            delivery_day,
        })
    }

    pub fn matches(&self, wash: &Wash) -> bool {
        self.status.matches(wash.status)
            && self
                .delivery_day
                .map_or(true, |window| window.contains(wash.delivery_time))
    }
}

//! Delivery-time parsing and local calendar-day windows.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeZone, Utc};

use crate::error::QueueError;

/// Local date-time layouts accepted besides RFC 3339, as produced by
/// `datetime-local` form inputs.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a promised delivery time.
///
/// Timestamps with an offset are taken as-is. Timestamps without one are
/// local time. A bare date is midnight UTC. Precision is cut to whole
/// milliseconds, the resolution of [`DayWindow`].
pub fn parse_delivery_time(text: &str) -> Result<DateTime<Utc>, QueueError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(QueueError::validation("deliveryTime", "is required"));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(3))
                .ok_or_else(|| {
                    QueueError::validation("deliveryTime", format!("'{}' does not exist locally", text))
                });
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    Err(QueueError::validation(
        "deliveryTime",
        format!("'{}' is not a recognised timestamp", text),
    ))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, QueueError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| QueueError::validation("date", format!("'{}' is not a YYYY-MM-DD date", text)))
}

/// Inclusive window covering one local calendar day,
/// 00:00:00.000 through 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn local(date: NaiveDate) -> Result<Self, QueueError> {
        Self::in_zone(date, &Local)
    }

    pub fn in_zone<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<Self, QueueError> {
        let bound = |time: Option<NaiveDateTime>,
                     earliest: bool|
         -> Result<DateTime<Utc>, QueueError> {
            let naive = time.ok_or_else(|| QueueError::validation("date", "out of range"))?;
            let local = tz.from_local_datetime(&naive);
            let ts = if earliest { local.earliest() } else { local.latest() };
            ts.map(|ts| ts.with_timezone(&Utc)).ok_or_else(|| {
                QueueError::validation("date", format!("{} has no local {}", date, naive.time()))
            })
        };

        Ok(Self {
            start: bound(date.and_hms_milli_opt(0, 0, 0, 0), true)?,
            end: bound(date.and_hms_milli_opt(23, 59, 59, 999), false)?,
        })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

use super::{time_of_day, AvailabilityStatus, ExtraFields};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// One contiguous range of operating hours within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(rename = "from", with = "time_of_day")]
    pub from_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub to: NaiveTime,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl OpeningHours {
    pub fn new(from_time: NaiveTime, to: NaiveTime) -> Self {
        Self {
            from_time,
            to,
            extra: ExtraFields::new(),
        }
    }
}

/// Day-level availability summary returned by the calendar endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCalendarItem {
    pub local_date: NaiveDate,
    pub available: bool,
    pub status: AvailabilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancies: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<OpeningHours>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A bookable slot or day.
///
/// `id` is opaque: send it back unchanged when booking and never build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: String,
    pub local_date_time_start: DateTime<FixedOffset>,
    pub local_date_time_end: DateTime<FixedOffset>,
    pub all_day: bool,
    pub available: bool,
    pub status: AvailabilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancies: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_units: Option<u32>,
    /// Last moment the slot can be booked.
    pub utc_cutoff_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<OpeningHours>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

strict_fields!(OpeningHours {});
strict_fields!(AvailabilityCalendarItem {
    status => "status",
    opening_hours => "openingHours",
});
strict_fields!(Availability {
    status => "status",
    opening_hours => "openingHours",
});

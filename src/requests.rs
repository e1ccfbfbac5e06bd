//! Outbound payloads and query filters.
//!
//! Each payload serializes with camelCase keys, omits unset optional fields and
//! merges its `extra` map at the top level so callers can pass
//! supplier-specific fields. Date filters are checked locally before anything
//! is sent.

use crate::model::{BookingContact, CancelReason, ExtraFields};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Generates a fresh idempotency key for a booking.
pub fn new_booking_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Checks a start/end pair and reports whether a range was given.
fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<bool> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(Error::invalid_request(format!(
            "localDateStart {} is after localDateEnd {}",
            start, end
        ))),
        (Some(_), Some(_)) => Ok(true),
        (None, None) => Ok(false),
        _ => Err(Error::invalid_request(
            "localDateStart and localDateEnd must be supplied together",
        )),
    }
}

/// Requested quantity of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitQuantity {
    pub id: String,
    pub quantity: u32,
}

impl UnitQuantity {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Body of an availability check.
///
/// Give exactly one of a single date ([`on`](Self::on)) or a range
/// ([`between`](Self::between)), or instead the availability ids to re-check.
///
/// # Examples
///
/// ```
/// use octo_client::requests::{AvailabilityRequest, UnitQuantity};
/// use chrono::NaiveDate;
///
/// let request = AvailabilityRequest::new("product-1", "DEFAULT")
///     .between(
///         NaiveDate::from_ymd_opt(2022, 6, 25).unwrap(),
///         NaiveDate::from_ymd_opt(2022, 6, 30).unwrap(),
///     )
///     .units(vec![UnitQuantity::new("adult", 2)]);
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub product_id: String,
    pub option_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitQuantity>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl AvailabilityRequest {
    pub fn new(product_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            option_id: option_id.into(),
            local_date: None,
            local_date_start: None,
            local_date_end: None,
            availability_ids: None,
            units: None,
            extra: ExtraFields::new(),
        }
    }

    /// Asks for a single day.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.local_date = Some(date);
        self
    }

    /// Asks for an inclusive date range.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.local_date_start = Some(start);
        self.local_date_end = Some(end);
        self
    }

    pub fn availability_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn units(mut self, units: Vec<UnitQuantity>) -> Self {
        self.units = Some(units);
        self
    }

    /// Checks the date filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if only one end of the range is set,
    /// the range is reversed, a date is combined with a range, or no date,
    /// range or availability id is given at all.
    pub fn validate(&self) -> Result<()> {
        let has_range = validate_range(self.local_date_start, self.local_date_end)?;
        let has_ids = self
            .availability_ids
            .as_ref()
            .is_some_and(|ids| !ids.is_empty());

        match (self.local_date.is_some(), has_range) {
            (true, true) => Err(Error::invalid_request(
                "localDate cannot be combined with localDateStart/localDateEnd",
            )),
            (false, false) if !has_ids => Err(Error::invalid_request(
                "one of localDate, localDateStart/localDateEnd or availabilityIds is required",
            )),
            _ => Ok(()),
        }
    }
}

/// Body of a calendar request. Both ends of the range are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    pub product_id: String,
    pub option_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitQuantity>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CalendarRequest {
    pub fn new(
        product_id: impl Into<String>,
        option_id: impl Into<String>,
        local_date_start: NaiveDate,
        local_date_end: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            option_id: option_id.into(),
            local_date_start: Some(local_date_start),
            local_date_end: Some(local_date_end),
            units: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn units(mut self, units: Vec<UnitQuantity>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if validate_range(self.local_date_start, self.local_date_end)? {
            Ok(())
        } else {
            Err(Error::invalid_request(
                "localDateStart and localDateEnd are required",
            ))
        }
    }
}

/// One participant in a booking or confirmation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub unit_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<BookingContact>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl UnitItem {
    pub fn new(unit_id: impl Into<String>) -> Self {
        Self {
            uuid: None,
            unit_id: unit_id.into(),
            reseller_reference: None,
            contact: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}

/// Body of a booking creation.
///
/// `uuid` is the idempotency key: resending the same payload with the same
/// uuid must not create a second booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub uuid: String,
    pub product_id: String,
    pub option_id: String,
    /// Opaque id from an availability response, echoed verbatim.
    pub availability_id: String,
    pub unit_items: Vec<UnitItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<BookingContact>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl BookingRequest {
    pub fn new(
        uuid: impl Into<String>,
        product_id: impl Into<String>,
        option_id: impl Into<String>,
        availability_id: impl Into<String>,
        unit_items: Vec<UnitItem>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            product_id: product_id.into(),
            option_id: option_id.into(),
            availability_id: availability_id.into(),
            unit_items,
            notes: None,
            reseller_reference: None,
            expiration_minutes: None,
            contact: None,
            extra: ExtraFields::new(),
        }
    }
}

/// Body of a booking confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub contact: BookingContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_items: Option<Vec<UnitItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_receipt: Option<bool>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ConfirmationRequest {
    pub fn new(contact: BookingContact) -> Self {
        Self {
            contact,
            ..Self::default()
        }
    }
}

/// Body of a booking cancellation. `reasonDetails` is always sent, as `null`
/// when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    pub reason: CancelReason,
    pub reason_details: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CancellationRequest {
    pub fn new(reason: CancelReason, reason_details: Option<String>) -> Self {
        Self {
            reason,
            reason_details,
            extra: ExtraFields::new(),
        }
    }
}

/// Partial booking update: only the fields that are set are sent, and the
/// supplier leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<BookingContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_items: Option<Vec<UnitItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_minutes: Option<u32>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Filters for listing bookings.
///
/// At least one of the references, a date or a date range is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingListQuery {
    pub reseller_reference: Option<String>,
    pub supplier_reference: Option<String>,
    pub local_date: Option<NaiveDate>,
    pub local_date_start: Option<NaiveDate>,
    pub local_date_end: Option<NaiveDate>,
    pub product_id: Option<String>,
    pub option_id: Option<String>,
}

impl BookingListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reseller_reference(mut self, reference: impl Into<String>) -> Self {
        self.reseller_reference = Some(reference.into());
        self
    }

    pub fn supplier_reference(mut self, reference: impl Into<String>) -> Self {
        self.supplier_reference = Some(reference.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.local_date = Some(date);
        self
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.local_date_start = Some(start);
        self.local_date_end = Some(end);
        self
    }

    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn option_id(mut self, option_id: impl Into<String>) -> Self {
        self.option_id = Some(option_id.into());
        self
    }

    /// Validates the filters and renders them as camelCase query parameters.
    pub fn to_query_params(&self) -> Result<Vec<(String, String)>> {
        let has_range = validate_range(self.local_date_start, self.local_date_end)?;
        if has_range && self.local_date.is_some() {
            return Err(Error::invalid_request(
                "localDate cannot be combined with localDateStart/localDateEnd",
            ));
        }
        if !has_range
            && self.local_date.is_none()
            && self.reseller_reference.is_none()
            && self.supplier_reference.is_none()
        {
            return Err(Error::invalid_request(
                "one of resellerReference, supplierReference, localDate or localDateStart/localDateEnd is required",
            ));
        }

        let params = [
            ("resellerReference", self.reseller_reference.clone()),
            ("supplierReference", self.supplier_reference.clone()),
            ("localDate", self.local_date.map(|d| d.to_string())),
            ("localDateStart", self.local_date_start.map(|d| d.to_string())),
            ("localDateEnd", self.local_date_end.map(|d| d.to_string())),
            ("productId", self.product_id.clone()),
            ("optionId", self.option_id.clone()),
        ];
        Ok(params
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .collect())
    }
}

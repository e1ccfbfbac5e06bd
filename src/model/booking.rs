use super::{
    BookingStatus, DeliveryFormat, DeliveryMethod, ExtraFields, OpeningHours, Product,
    ProductOption, RedemptionMethod, Refund, Unit,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A reservation and its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// Caller-chosen idempotency key.
    pub uuid: String,
    pub test_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_reference: Option<String>,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_updated_at: Option<DateTime<Utc>>,
    /// When the hold lapses if the booking is not confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_redeemed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_confirmed_at: Option<DateTime<Utc>>,
    pub product_id: String,
    pub product: Product,
    pub option_id: String,
    pub option: ProductOption,
    pub cancellable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<Cancellation>,
    pub freesale: bool,
    pub availability_id: String,
    pub availability: BookingAvailability,
    pub contact: BookingContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_methods: Option<Vec<DeliveryMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher: Option<Ticket>,
    #[serde(default)]
    pub unit_items: Vec<BookingUnitItem>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Booking {
    /// Returns `true` if the hold has lapsed at `now`.
    ///
    /// Only meaningful while the booking is on hold; the supplier remains the
    /// authority and reports `EXPIRED` on confirmation.
    pub fn hold_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::OnHold
            && self.utc_expires_at.is_some_and(|expires| expires <= now)
    }
}

/// Snapshot of the availability a booking holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAvailability {
    pub id: String,
    pub local_date_time_start: DateTime<FixedOffset>,
    pub local_date_time_end: DateTime<FixedOffset>,
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<OpeningHours>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Contact details of the lead traveller or of a single unit item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One booked participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUnitItem {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_reference: Option<String>,
    pub unit_id: String,
    pub unit: Unit,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_redeemed_at: Option<DateTime<Utc>>,
    pub contact: BookingContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Redemption artifact of a booking or unit item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub redemption_method: RedemptionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_redeemed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_options: Option<Vec<DeliveryOption>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub delivery_format: DeliveryFormat,
    pub delivery_value: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Cancellation record attached to a cancelled booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    pub refund: Refund,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_cancelled_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

strict_fields!(Booking {
    status => "status",
    product => "product",
    option => "option",
    cancellation => "cancellation",
    availability => "availability",
    contact => "contact",
    delivery_methods => "deliveryMethods",
    voucher => "voucher",
    unit_items => "unitItems",
});
strict_fields!(BookingAvailability {
    opening_hours => "openingHours",
});
strict_fields!(BookingContact {});
strict_fields!(BookingUnitItem {
    unit => "unit",
    status => "status",
    contact => "contact",
    ticket => "ticket",
});
strict_fields!(Ticket {
    redemption_method => "redemptionMethod",
    delivery_options => "deliveryOptions",
});
strict_fields!(DeliveryOption {
    delivery_format => "deliveryFormat",
});
strict_fields!(Cancellation { refund => "refund" });

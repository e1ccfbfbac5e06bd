//! Enumerations used across OCTo payloads.
//!
//! [`UnitType`] and [`DeliveryFormat`] are open: suppliers routinely send values
//! outside the published list, so those decode to `Unknown(raw)`. The rest are
//! closed and reject unknown literals.

open_enum! {
    /// Participant category of a unit.
    ///
    /// A literal outside this list decodes to `Unknown(raw)`, never to
    /// `Other`; `OTHER` is only produced by the supplier sending it.
    UnitType {
        Adult => "ADULT",
        Youth => "YOUTH",
        Child => "CHILD",
        Infant => "INFANT",
        Family => "FAMILY",
        Senior => "SENIOR",
        Student => "STUDENT",
        Military => "MILITARY",
        Other => "OTHER",
    }
}

open_enum! {
    /// How a ticket or voucher value should be rendered.
    ///
    /// Unlisted formats decode to `Unknown(raw)`, not `Other`.
    DeliveryFormat {
        PdfUrl => "PDF_URL",
        QrCode => "QRCODE",
        Code128 => "CODE128",
        Other => "OTHER",
    }
}

closed_enum! {
    /// Contact fields a supplier requires before confirming a booking.
    RequiredContactField {
        FirstName => "firstName",
        LastName => "lastName",
        FullName => "fullName",
        EmailAddress => "emailAddress",
        PhoneNumber => "phoneNumber",
        Country => "country",
        Notes => "notes",
        Locales => "locales",
    }
}

closed_enum! {
    CancellationCutoffUnit {
        Hour => "hour",
        Minute => "minute",
        Day => "day",
    }
}

closed_enum! {
    /// Whether a product sells fixed departures or a whole day.
    AvailabilityType {
        StartTime => "START_TIME",
        OpeningHours => "OPENING_HOURS",
    }
}

closed_enum! {
    DeliveryMethod {
        Voucher => "VOUCHER",
        Ticket => "TICKET",
    }
}

closed_enum! {
    RedemptionMethod {
        Digital => "DIGITAL",
        Print => "PRINT",
        Manifest => "MANIFEST",
    }
}

closed_enum! {
    /// Sale state of a date or slot.
    AvailabilityStatus {
        /// Fixed capacity with places left.
        Available => "AVAILABLE",
        /// Always available, no capacity limit.
        Freesale => "FREESALE",
        SoldOut => "SOLD_OUT",
        /// Fixed capacity that may sell out soon.
        Limited => "LIMITED",
        /// Temporarily not for sale, not sold out.
        Closed => "CLOSED",
    }
}

closed_enum! {
    /// Lifecycle state of a booking.
    ///
    /// `PENDING -> ON_HOLD -> {CONFIRMED, EXPIRED, CANCELLED}`,
    /// `CONFIRMED -> {CANCELLED, REDEEMED}`, and any non-terminal state may
    /// become `REJECTED`.
    BookingStatus {
        Pending => "PENDING",
        OnHold => "ON_HOLD",
        Confirmed => "CONFIRMED",
        Expired => "EXPIRED",
        Cancelled => "CANCELLED",
        Redeemed => "REDEEMED",
        Rejected => "REJECTED",
    }
}

impl BookingStatus {
    /// Returns `true` once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Expired
                | BookingStatus::Cancelled
                | BookingStatus::Rejected
                | BookingStatus::Redeemed
        )
    }

    /// Returns `true` if a supplier may move a booking from `self` to `next`.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, Rejected) => true,
            (Pending, OnHold) => true,
            (OnHold, Confirmed | Expired | Cancelled) => true,
            (Confirmed, Cancelled | Redeemed) => true,
            _ => false,
        }
    }
}

closed_enum! {
    Refund {
        Full => "FULL",
        Partial => "PARTIAL",
        None => "NONE",
    }
}

closed_enum! {
    /// Who asked for a cancellation.
    CancelReason {
        /// The customer requested it.
        Customer => "CUSTOMER",
        /// The supplier requested it (weather, closures).
        Supplier => "SUPPLIER",
        /// The reseller determined the booking was fraudulent.
        Fraud => "FRAUD",
        Other => "OTHER",
    }
}

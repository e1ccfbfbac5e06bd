//! Domain model for OCTo payloads.
//!
//! Every model derives `serde` traits with camelCase keys and carries an
//! `extra` map that collects keys it does not declare. Decoding goes through
//! [`decode`]: in lenient mode unknown keys land in `extra` and unknown values
//! of open enums become their `Unknown(raw)` variant; in strict mode either of
//! those fails the whole decode. [`encode`] writes declared fields, omits absent
//! optional ones and merges `extra` back at the top level of each object.

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Declares which fields of a model need a strict-mode walk.
///
/// Only fields holding nested models or enums are listed; scalars are already
/// fully checked by serde.
macro_rules! strict_fields {
    ($ty:ty { $($field:ident => $key:literal),* $(,)? }) => {
        impl $crate::model::Strict for $ty {
            fn check_strict(&self, path: &str) -> Result<(), $crate::error::DecodeError> {
                $crate::model::check_extra(&self.extra, path)?;
                $(
                    $crate::model::Strict::check_strict(
                        &self.$field,
                        &format!("{}.{}", path, $key),
                    )?;
                )*
                Ok(())
            }
        }
    };
}

/// Enum with a fixed set of literals; anything else is a decode error.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every literal this enum knows.
            pub const VARIANTS: &'static [&'static str] = &[$($lit),+];

            /// Returns the wire literal.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                match raw.as_str() {
                    $($lit => Ok($name::$variant),)+
                    other => Err(<D::Error as serde::de::Error>::unknown_variant(
                        other,
                        Self::VARIANTS,
                    )),
                }
            }
        }

        impl $crate::model::Strict for $name {
            fn check_strict(&self, _path: &str) -> Result<(), $crate::error::DecodeError> {
                Ok(())
            }
        }
    };
}

/// Enum that tolerates new literals by decoding them into `Unknown(raw)`.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A literal this client does not know; the raw value is kept.
            Unknown(String),
        }

        impl $name {
            /// Every literal this enum knows.
            pub const VARIANTS: &'static [&'static str] = &[$($lit),+];

            /// Returns the wire literal.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $lit,)+
                    $name::Unknown(raw) => raw,
                }
            }

            /// Returns `true` for the fallback variant.
            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(match raw.as_str() {
                    $($lit => $name::$variant,)+
                    _ => $name::Unknown(raw),
                })
            }
        }

        impl $crate::model::Strict for $name {
            fn check_strict(&self, path: &str) -> Result<(), $crate::error::DecodeError> {
                match self {
                    $name::Unknown(raw) => Err($crate::error::DecodeError::UnrecognizedValue {
                        path: path.to_string(),
                        value: raw.clone(),
                    }),
                    _ => Ok(()),
                }
            }
        }
    };
}

mod availability;
mod booking;
mod enums;
mod product;
mod supplier;
pub(crate) mod time_of_day;

pub use availability::{Availability, AvailabilityCalendarItem, OpeningHours};
pub use booking::{
    Booking, BookingAvailability, BookingContact, BookingUnitItem, Cancellation, DeliveryOption,
    Ticket,
};
pub use enums::{
    AvailabilityStatus, AvailabilityType, BookingStatus, CancelReason, CancellationCutoffUnit,
    DeliveryFormat, DeliveryMethod, RedemptionMethod, Refund, RequiredContactField, UnitType,
};
pub use product::{Capability, OptionRestrictions, Product, ProductOption, Unit, UnitRestrictions};
pub use supplier::{Supplier, SupplierContact};

/// Unknown top-level keys of a model, in the order they were received.
pub type ExtraFields = Map<String, Value>;

/// Walks a decoded value looking for anything strict mode forbids.
pub trait Strict {
    /// Fails on the first undeclared key or unresolved enum value under `path`.
    fn check_strict(&self, path: &str) -> Result<(), DecodeError>;
}

impl<T: Strict> Strict for Vec<T> {
    fn check_strict(&self, path: &str) -> Result<(), DecodeError> {
        for (index, item) in self.iter().enumerate() {
            item.check_strict(&format!("{}[{}]", path, index))?;
        }
        Ok(())
    }
}

impl<T: Strict> Strict for Option<T> {
    fn check_strict(&self, path: &str) -> Result<(), DecodeError> {
        match self {
            Some(value) => value.check_strict(path),
            None => Ok(()),
        }
    }
}

pub(crate) fn check_extra(extra: &ExtraFields, path: &str) -> Result<(), DecodeError> {
    match extra.keys().next() {
        Some(key) => Err(DecodeError::UnrecognizedField {
            path: format!("{}.{}", path, key),
        }),
        None => Ok(()),
    }
}

/// Decodes a JSON value into a model (or a `Vec` of models).
///
/// # Examples
///
/// ```
/// use octo_client::model::{decode, Unit, UnitType};
/// use serde_json::json;
///
/// let raw = json!({
///     "id": "child",
///     "internalName": "Child",
///     "type": "CHILDREN",
///     "restrictions": {"minAge": 3, "maxAge": 12, "idRequired": false, "paxCount": 1}
/// });
///
/// let unit: Unit = decode(raw.clone(), false).unwrap();
/// assert_eq!(unit.kind, UnitType::Unknown("CHILDREN".to_string()));
///
/// assert!(decode::<Unit>(raw, true).is_err());
/// ```
pub fn decode<T>(value: Value, strict: bool) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Strict,
{
    let decoded: T = serde_json::from_value(value)?;
    if strict {
        decoded.check_strict("$")?;
    }
    Ok(decoded)
}

/// Encodes a model back into JSON, re-emitting its extra fields.
pub fn encode<T: Serialize>(entity: &T) -> Result<Value, DecodeError> {
    Ok(serde_json::to_value(entity)?)
}

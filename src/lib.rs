//! # octo-client - A typed client for OCTo supplier APIs
//!
//! OCTo (Open Connection for Tourism) is a common API that tour and activity
//! suppliers expose to resellers. This crate wraps it in a typed, async client
//! built on top of `reqwest`: supplier routing, auth and locale headers, typed
//! errors, lenient or strict decoding, and request logging with sensitive
//! fields masked.
//!
//! ## Quick Start
//!
//! ```no_run
//! use octo_client::{
//!     model::BookingContact,
//!     requests::{new_booking_uuid, AvailabilityRequest, BookingRequest, ConfirmationRequest, UnitItem},
//!     Client,
//! };
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), octo_client::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com/octo")?
//!         .token("secret-token")
//!         .build()?;
//!
//!     let products = client.get_products("0001").await?;
//!     let product = &products[0];
//!     let option = product.default_option().unwrap();
//!
//!     let request = AvailabilityRequest::new(&product.id, &option.id)
//!         .on(NaiveDate::from_ymd_opt(2022, 6, 25).unwrap());
//!     let slots = client.availability_check("0001", &request).await?;
//!
//!     let booking = client
//!         .create_booking(
//!             "0001",
//!             &BookingRequest::new(
//!                 new_booking_uuid(),
//!                 &product.id,
//!                 &option.id,
//!                 &slots[0].id,
//!                 vec![UnitItem::new(&option.units[0].id)],
//!             ),
//!         )
//!         .await?;
//!
//!     let contact = BookingContact {
//!         full_name: Some("Ada Lovelace".to_string()),
//!         email_address: Some("ada@example.com".to_string()),
//!         ..BookingContact::default()
//!     };
//!     let booking = client
//!         .confirm_booking("0001", &booking.uuid, &ConfirmationRequest::new(contact))
//!         .await?;
//!     println!("Booking {} is {}", booking.uuid, booking.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Supplier routing
//!
//! Every supplier serves its API from its own base URL. Supplier-scoped calls
//! look the supplier up in the client's [`registry::SupplierRegistry`]; an unknown
//! id triggers one `GET /suppliers` refresh, and if the id is still missing the
//! call fails with [`Error::InvalidRequest`] without contacting any supplier.
//!
//! ## Error Handling
//!
//! ```no_run
//! use octo_client::{Client, Error, ErrorKind};
//!
//! # async fn example(client: Client) -> Result<(), Error> {
//! match client.get_product("0001", "missing").await {
//!     Ok(product) => println!("{}", product.internal_name),
//!     Err(e) if e.kind() == ErrorKind::ApiError => {
//!         eprintln!("API error (status {:?}): {:?}", e.status(), e.raw_response());
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Strict mode
//!
//! By default unknown fields are kept in each model's `extra` map and unknown
//! unit types or delivery formats decode to `Unknown(raw)`. With
//! [`ClientBuilder::strict`] either one fails the call with [`Error::Decode`].

pub mod logging;

mod api;
mod client;
mod error;
pub mod metadata;
pub mod model;
pub mod redact;
pub mod registry;
pub mod requests;
mod response;

pub use client::{Client, ClientBuilder};
pub use error::{DecodeError, Error, ErrorKind, Result};
pub use response::Response;

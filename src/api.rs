//! Typed OCTo operations.
//!
//! Every operation builds a [`RequestMetadata`], runs it through
//! [`Client::call`] and decodes the body with the client's strictness setting.
//! Supplier-scoped operations resolve the supplier endpoint first, which may
//! cost one extra `GET /suppliers` call.

use crate::{
    metadata::RequestMetadata,
    model::{Availability, AvailabilityCalendarItem, Booking, Capability, Product, Supplier},
    requests::{
        AvailabilityRequest, BookingListQuery, BookingRequest, BookingUpdateRequest,
        CalendarRequest, CancellationRequest, ConfirmationRequest,
    },
    Client, Error, Result,
};
use http::Method;
use serde::Serialize;
use serde_json::{json, Value};

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| Error::SerializationFailed(e.to_string()))
}

impl Client {
    /// Lists all suppliers and rebuilds the supplier registry from the result.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        self.refresh_suppliers().await
    }

    /// Fetches one supplier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the id is not in the supplier
    /// directory.
    pub async fn get_supplier(&self, supplier_id: &str) -> Result<Supplier> {
        self.supplier_endpoint(supplier_id).await?;

        let metadata = RequestMetadata::new(Method::GET, format!("/suppliers/{}", supplier_id));
        let response = self.call(metadata).await?;
        self.decode(response)
    }

    /// Lists the optional API capabilities a supplier implements.
    ///
    /// Capabilities listed here can be requested with
    /// [`ClientBuilder::capabilities`](crate::ClientBuilder::capabilities).
    pub async fn get_capabilities(&self, supplier_id: &str) -> Result<Vec<Capability>> {
        let metadata = RequestMetadata::new(Method::GET, "/capabilities").for_supplier(supplier_id);
        let response = self.call(metadata).await?;
        self.decode(response)
    }

    /// Lists the products a supplier sells.
    pub async fn get_products(&self, supplier_id: &str) -> Result<Vec<Product>> {
        let metadata = RequestMetadata::new(Method::GET, "/products").for_supplier(supplier_id);
        let response = self.call(metadata).await?;
        let products: Vec<Product> = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            count = products.len(),
            "Found products"
        );
        Ok(products)
    }

    /// Fetches one product. An unknown product id surfaces as
    /// [`Error::ApiError`] with status 404.
    pub async fn get_product(&self, supplier_id: &str, product_id: &str) -> Result<Product> {
        let metadata = RequestMetadata::new(Method::GET, format!("/products/{}", product_id))
            .for_supplier(supplier_id);
        let response = self.call(metadata).await?;
        self.decode(response)
    }

    /// Checks availability for a date, a date range or a set of availability ids.
    ///
    /// Dates without availability are not returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] before any network call if the request
    /// fails [`AvailabilityRequest::validate`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use octo_client::{requests::AvailabilityRequest, Client};
    /// use chrono::NaiveDate;
    ///
    /// # async fn example(client: Client) -> Result<(), octo_client::Error> {
    /// let request = AvailabilityRequest::new("product-1", "DEFAULT").between(
    ///     NaiveDate::from_ymd_opt(2022, 6, 25).unwrap(),
    ///     NaiveDate::from_ymd_opt(2022, 6, 30).unwrap(),
    /// );
    ///
    /// for slot in client.availability_check("0001", &request).await? {
    ///     println!("{} {:?} vacancies={:?}", slot.id, slot.status, slot.vacancies);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn availability_check(
        &self,
        supplier_id: &str,
        request: &AvailabilityRequest,
    ) -> Result<Vec<Availability>> {
        request.validate()?;

        let metadata = RequestMetadata::new(Method::POST, "/availability")
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        let availability: Vec<Availability> = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            product_id = %request.product_id,
            count = availability.len(),
            "Found availability"
        );
        Ok(availability)
    }

    /// Fetches the availability calendar for a date range.
    pub async fn get_calendar(
        &self,
        supplier_id: &str,
        request: &CalendarRequest,
    ) -> Result<Vec<AvailabilityCalendarItem>> {
        request.validate()?;

        let metadata = RequestMetadata::new(Method::POST, "/availability/calendar")
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        let calendar: Vec<AvailabilityCalendarItem> = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            product_id = %request.product_id,
            days = calendar.len(),
            "Found calendar"
        );
        Ok(calendar)
    }

    /// Reserves availability. The booking comes back `ON_HOLD`, or `CONFIRMED`
    /// for instant-confirmation products.
    ///
    /// Repeating the call with the same `uuid` and payload returns the same
    /// booking; a different payload under a used `uuid` is rejected by the
    /// supplier, usually as [`Error::InvalidRequest`].
    pub async fn create_booking(
        &self,
        supplier_id: &str,
        request: &BookingRequest,
    ) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::POST, "/bookings")
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        let booking: Booking = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            uuid = %booking.uuid,
            status = %booking.status,
            "Booking created"
        );
        Ok(booking)
    }

    /// Confirms a booking on hold. A lapsed hold comes back as `EXPIRED`.
    pub async fn confirm_booking(
        &self,
        supplier_id: &str,
        uuid: &str,
        request: &ConfirmationRequest,
    ) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::POST, format!("/bookings/{}/confirm", uuid))
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        let booking: Booking = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            uuid = uuid,
            status = %booking.status,
            "Booking confirmed"
        );
        Ok(booking)
    }

    /// Extends the hold of a booking by `expiration_minutes`.
    pub async fn extend_booking(
        &self,
        supplier_id: &str,
        uuid: &str,
        expiration_minutes: u32,
    ) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::POST, format!("/bookings/{}/extend", uuid))
            .for_supplier(supplier_id)
            .with_body(json!({ "expirationMinutes": expiration_minutes }));
        let response = self.call(metadata).await?;
        self.decode(response)
    }

    /// Cancels a booking.
    pub async fn cancel_booking(
        &self,
        supplier_id: &str,
        uuid: &str,
        request: &CancellationRequest,
    ) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::DELETE, format!("/bookings/{}", uuid))
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        let booking: Booking = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            uuid = uuid,
            reason = %request.reason,
            "Booking cancelled"
        );
        Ok(booking)
    }

    /// Fetches the current state of a booking.
    pub async fn get_booking(&self, supplier_id: &str, uuid: &str) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::GET, format!("/bookings/{}", uuid))
            .for_supplier(supplier_id);
        let response = self.call(metadata).await?;
        self.decode(response)
    }

    /// Lists bookings matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] before any network call if no filter
    /// is set or the date filters are inconsistent.
    pub async fn list_bookings(
        &self,
        supplier_id: &str,
        query: &BookingListQuery,
    ) -> Result<Vec<Booking>> {
        let params = query.to_query_params()?;

        let metadata = RequestMetadata::new(Method::GET, "/bookings")
            .for_supplier(supplier_id)
            .with_query_params(params);
        let response = self.call(metadata).await?;
        let bookings: Vec<Booking> = self.decode(response)?;

        tracing::info!(
            supplier_id = supplier_id,
            count = bookings.len(),
            "Found bookings"
        );
        Ok(bookings)
    }

    /// Changes the fields set on `request`; the supplier keeps the others.
    pub async fn update_booking(
        &self,
        supplier_id: &str,
        uuid: &str,
        request: &BookingUpdateRequest,
    ) -> Result<Booking> {
        let metadata = RequestMetadata::new(Method::PATCH, format!("/bookings/{}", uuid))
            .for_supplier(supplier_id)
            .with_body(to_body(request)?);
        let response = self.call(metadata).await?;
        self.decode(response)
    }
}


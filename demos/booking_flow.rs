//! End-to-end booking flow against an OCTo supplier.
//!
//! This example shows how to:
//! - Create a client and discover suppliers
//! - Browse products and check availability
//! - Hold, confirm and cancel a booking
//!
//! Run with:
//! `OCTO_BASE_URL=https://api.example.com/octo OCTO_TOKEN=... cargo run --example booking_flow`

use chrono::{Duration, Utc};
use octo_client::model::{BookingContact, CancelReason};
use octo_client::requests::{
    new_booking_uuid, AvailabilityRequest, BookingRequest, CancellationRequest,
    ConfirmationRequest, UnitItem,
};
use octo_client::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("octo_client=debug,booking_flow=info")
        .init();

    let base_url = std::env::var("OCTO_BASE_URL")
        .unwrap_or_else(|_| "https://api.example.com/octo".to_string());
    let token = std::env::var("OCTO_TOKEN").unwrap_or_default();

    let client = Client::builder()
        .base_url(base_url)?
        .token(token)
        .language("en-GB")
        .log_responses(true)
        .build()?;

    println!("=== Suppliers ===");
    let suppliers = client.list_suppliers().await?;
    for supplier in &suppliers {
        println!("{}: {} ({})", supplier.id, supplier.name, supplier.endpoint);
    }
    let Some(supplier) = suppliers.first() else {
        println!("No suppliers available");
        return Ok(());
    };
    println!();

    println!("=== Products ===");
    let products = client.get_products(&supplier.id).await?;
    for product in &products {
        println!(
            "{}: {} [{}]",
            product.id, product.internal_name, product.availability_type
        );
    }
    let Some((product, option)) = products
        .iter()
        .find_map(|product| product.default_option().map(|option| (product, option)))
    else {
        println!("No bookable product found");
        return Ok(());
    };
    let Some(unit) = option.units.first() else {
        println!("Option {} has no units", option.id);
        return Ok(());
    };
    println!();

    println!("=== Availability ===");
    let today = Utc::now().date_naive();
    let request = AvailabilityRequest::new(&product.id, &option.id)
        .between(today, today + Duration::days(7));
    let availability = client.availability_check(&supplier.id, &request).await?;
    for slot in &availability {
        println!(
            "{} {} vacancies={:?}",
            slot.local_date_time_start, slot.status, slot.vacancies
        );
    }
    let Some(slot) = availability.iter().find(|slot| slot.available) else {
        println!("Nothing available this week");
        return Ok(());
    };
    println!();

    println!("=== Booking ===");
    let booking = client
        .create_booking(
            &supplier.id,
            &BookingRequest::new(
                new_booking_uuid(),
                &product.id,
                &option.id,
                &slot.id,
                vec![UnitItem::new(&unit.id)],
            ),
        )
        .await?;
    println!("Held {} until {:?}", booking.uuid, booking.utc_expires_at);

    let contact = BookingContact {
        full_name: Some("Ada Lovelace".to_string()),
        email_address: Some("ada@example.com".to_string()),
        ..BookingContact::default()
    };
    let booking = client
        .confirm_booking(&supplier.id, &booking.uuid, &ConfirmationRequest::new(contact))
        .await?;
    println!("Booking {} is {}", booking.uuid, booking.status);

    let booking = client
        .cancel_booking(
            &supplier.id,
            &booking.uuid,
            &CancellationRequest::new(CancelReason::Customer, Some("Demo run".to_string())),
        )
        .await?;
    println!("Booking {} is {}", booking.uuid, booking.status);

    Ok(())
}

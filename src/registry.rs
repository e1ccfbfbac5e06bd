//! Supplier id to endpoint routing.
//!
//! Each supplier may serve its API from its own base URL. The registry keeps the
//! mapping learned from the last supplier directory call; the client refreshes
//! it whenever an id is missing.
//!
//! A refresh replaces the whole mapping. Clones of a client share one registry,
//! and concurrent refreshes are applied in arrival order, so a slower, older
//! response can overwrite a newer one. A client instance resolves suppliers
//! sequentially; concurrent use across threads requires the caller to serialize
//! calls or use one client per thread.

use crate::model::Supplier;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory map of supplier id to normalized endpoint.
#[derive(Debug, Default)]
pub struct SupplierRegistry {
    endpoints: RwLock<HashMap<String, String>>,
}

impl SupplierRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the endpoint registered for `supplier_id`.
    pub fn endpoint(&self, supplier_id: &str) -> Option<String> {
        self.endpoints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(supplier_id)
            .cloned()
    }

    /// Rebuilds the mapping from a supplier directory listing.
    pub fn replace(&self, suppliers: &[Supplier]) {
        let endpoints = suppliers
            .iter()
            .map(|supplier| {
                (
                    supplier.id.clone(),
                    normalize_endpoint(&supplier.endpoint).to_string(),
                )
            })
            .collect();
        *self
            .endpoints
            .write()
            .unwrap_or_else(PoisonError::into_inner) = endpoints;
    }

    /// Returns a copy of the current mapping.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.endpoints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

/// Appends an API path to a base endpoint.
///
/// Trailing slashes on the endpoint are dropped. If the endpoint already ends
/// with the first segment of `path`, that segment is not repeated.
///
/// # Examples
///
/// ```
/// use octo_client::registry::join_endpoint;
///
/// assert_eq!(
///     join_endpoint("https://api.example.com/v1/", "/products"),
///     "https://api.example.com/v1/products"
/// );
/// assert_eq!(
///     join_endpoint("https://api.example.com/v1/bookings", "/bookings/abc/confirm"),
///     "https://api.example.com/v1/bookings/abc/confirm"
/// );
/// ```
pub fn join_endpoint(endpoint: &str, path: &str) -> String {
    let base = normalize_endpoint(endpoint);
    let path = path.trim_start_matches('/');
    let first_segment = path.split('/').next().unwrap_or_default();

    if !first_segment.is_empty() && base.ends_with(&format!("/{}", first_segment)) {
        let rest = &path[first_segment.len()..];
        return format!("{}{}", base, rest);
    }
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SupplierContact;

    fn supplier(id: &str, endpoint: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {}", id),
            endpoint: endpoint.to_string(),
            contact: SupplierContact::default(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_replace_normalizes_endpoints() {
        let registry = SupplierRegistry::new();
        registry.replace(&[supplier("0001", "https://api.example.com/v1/")]);

        assert_eq!(
            registry.endpoint("0001").as_deref(),
            Some("https://api.example.com/v1")
        );
        assert_eq!(registry.endpoint("0002"), None);
    }

    #[test]
    fn test_replace_discards_previous_mapping() {
        let registry = SupplierRegistry::new();
        registry.replace(&[supplier("0001", "https://a.example.com")]);
        registry.replace(&[supplier("0002", "https://b.example.com")]);

        assert_eq!(registry.snapshot().len(), 1);
        assert_eq!(registry.endpoint("0001"), None);
        assert!(registry.endpoint("0002").is_some());
    }

    #[test]
    fn test_join_plain_paths() {
        assert_eq!(
            join_endpoint("https://api.example.com", "products/1"),
            "https://api.example.com/products/1"
        );
        assert_eq!(
            join_endpoint("https://api.example.com//", "/availability/calendar"),
            "https://api.example.com/availability/calendar"
        );
    }

    #[test]
    fn test_join_does_not_duplicate_embedded_segment() {
        assert_eq!(
            join_endpoint("https://api.example.com/octo/products", "/products"),
            "https://api.example.com/octo/products"
        );
        assert_eq!(
            join_endpoint("https://api.example.com/octo/products", "/products/42"),
            "https://api.example.com/octo/products/42"
        );
    }

    #[test]
    fn test_join_requires_whole_segment_match() {
        assert_eq!(
            join_endpoint("https://api.example.com/myproducts", "/products"),
            "https://api.example.com/myproducts/products"
        );
    }
}

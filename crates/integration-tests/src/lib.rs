//! Integration tests for Jacaranda.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jacaranda-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - End-to-end cart operation sequences over an in-memory slot
//! - `cart_persistence` - Slot durability across store sessions on disk
//!
//! This crate's library provides the shared test doubles: a scriptable
//! catalog fake and a notifier that records every notice it receives.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;

use jacaranda_cart::catalog::{Catalog, CatalogError};
use jacaranda_cart::notify::{Notice, Notifier};
use jacaranda_cart::types::{CartItem, CatalogProduct, Stock};
use jacaranda_core::ProductId;

// =============================================================================
// Catalog Fake
// =============================================================================

/// In-memory catalog scripted with product and stock records.
///
/// `stock_fetches` counts every stock lookup, so tests can assert that
/// availability is re-checked on each mutating call.
#[derive(Default)]
pub struct FakeCatalog {
    products: HashMap<i32, CatalogProduct>,
    stock: HashMap<i32, u32>,
    stock_unreachable: bool,
    stock_fetches: AtomicU32,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a product with the given price and stock level.
    #[must_use]
    pub fn with_product(mut self, id: i32, title: &str, price: Decimal, stock: u32) -> Self {
        self.products.insert(
            id,
            CatalogProduct {
                id: ProductId::new(id),
                title: title.to_string(),
                price,
                image: Some(format!("https://cdn.example.com/products/{id}.jpg")),
            },
        );
        self.stock.insert(id, stock);
        self
    }

    /// Make every stock lookup fail as if the service were down.
    #[must_use]
    pub fn with_unreachable_stock(mut self) -> Self {
        self.stock_unreachable = true;
        self
    }

    /// Number of stock lookups served so far.
    pub fn stock_fetch_count(&self) -> u32 {
        self.stock_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.products
            .get(&id.as_i32())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_fetches.fetch_add(1, Ordering::SeqCst);
        if self.stock_unreachable {
            return Err(CatalogError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: String::new(),
            });
        }
        self.stock
            .get(&id.as_i32())
            .map(|&amount| Stock { id, amount })
            .ok_or_else(|| CatalogError::NotFound(format!("Stock not found: {id}")))
    }
}

// =============================================================================
// Recording Notifier
// =============================================================================

/// Notifier that records every notice it receives, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Build a cart line item for seeding slots and asserting contents.
#[must_use]
pub fn line_item(id: i32, title: &str, price: Decimal, amount: u32) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        title: title.to_string(),
        price,
        image: Some(format!("https://cdn.example.com/products/{id}.jpg")),
        amount,
    }
}

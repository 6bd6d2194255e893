//! Domain types for the cart component.
//!
//! These types mirror the catalog service's JSON records and the shape the
//! persistence slot stores, separate from any transport concerns.

use jacaranda_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record from the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Catalog identifier, unique per item.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price (JSON number on the wire).
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL for display.
    pub image: Option<String>,
}

/// Availability record from the remote stock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Matches the product identifier.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}

/// A line item in the cart: the catalog display fields plus the quantity
/// currently in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog identifier, unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL for display.
    pub image: Option<String>,
    /// Quantity in the cart. Always >= 1 once a mutation commits.
    pub amount: u32,
}

impl CartItem {
    /// Wrap a catalog record as a line item with no quantity yet.
    ///
    /// The add operation increments the amount only after the stock check
    /// passes, so a zero-amount item is never committed.
    #[must_use]
    pub fn from_catalog(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 0,
        }
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

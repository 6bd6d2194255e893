//! Cache types for catalog service responses.

use jacaranda_core::ProductId;

use crate::types::CatalogProduct;

/// Cache key for product reads. Stock is never cached.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<CatalogProduct>),
    Products(Vec<CatalogProduct>),
}

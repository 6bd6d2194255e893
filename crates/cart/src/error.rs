//! Cart operation errors.
//!
//! Every failing cart operation emits one user-facing [`Notice`] and returns
//! one of these typed errors with state unchanged, so callers can branch on
//! the cause without parsing messages.
//!
//! [`Notice`]: crate::notify::Notice

use thiserror::Error;

use jacaranda_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The catalog has no record for this product.
    #[error("product {0} is not available in the catalog")]
    ProductUnavailable(ProductId),

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The requested quantity exceeds the available stock.
    #[error("requested quantity for product {0} exceeds available stock")]
    OutOfStock(ProductId),

    /// Remote catalog/stock call failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::ProductUnavailable(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not available in the catalog");

        let err = CartError::NotInCart(ProductId::new(4));
        assert_eq!(err.to_string(), "product 4 is not in the cart");

        let err = CartError::OutOfStock(ProductId::new(1));
        assert_eq!(
            err.to_string(),
            "requested quantity for product 1 exceeds available stock"
        );
    }
}

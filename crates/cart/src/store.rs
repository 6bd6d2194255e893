//! Cart state management.
//!
//! [`CartStore`] holds the ordered cart in memory, validates mutations against
//! the remote stock service, and mirrors every successful mutation wholesale
//! into the persistence slot. Collaborators are injected explicitly; there is
//! no ambient state.
//!
//! Every mutation works on a cloned working copy and commits it only after the
//! slot write succeeds, so observers never see a partial update: either the
//! full new cart becomes visible, or nothing changes.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use jacaranda_core::ProductId;

use crate::catalog::{Catalog, CatalogError};
use crate::error::CartError;
use crate::notify::{Notice, Notifier};
use crate::storage::{CartSlot, StorageError};
use crate::types::CartItem;

/// The cart store.
///
/// Constructed with [`CartStore::open`], which reads the persisted cart from
/// the slot exactly once. Mutated only through [`add_product`],
/// [`remove_product`] and [`update_product_amount`].
///
/// [`add_product`]: CartStore::add_product
/// [`remove_product`]: CartStore::remove_product
/// [`update_product_amount`]: CartStore::update_product_amount
pub struct CartStore {
    cart: Vec<CartItem>,
    catalog: Arc<dyn Catalog>,
    slot: Box<dyn CartSlot>,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Open the store, reading the persisted cart from the slot.
    ///
    /// An absent slot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` when the slot holds unparsable
    /// content; the cart is not silently defaulted.
    pub fn open(
        catalog: Arc<dyn Catalog>,
        slot: Box<dyn CartSlot>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let cart = slot.load()?.unwrap_or_default();
        Ok(Self {
            cart,
            catalog,
            slot,
            notifier,
        })
    }

    /// Current cart contents, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total item count (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.iter().map(|item| item.amount).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart is looked up in the catalog and inserted
    /// at the end; a product already in the cart has its quantity
    /// incremented. The increment is committed only if current stock allows
    /// it.
    ///
    /// # Errors
    ///
    /// - `CartError::ProductUnavailable` - the catalog has no such product
    /// - `CartError::OutOfStock` - the cart already holds all available units
    /// - `CartError::Catalog` / `CartError::Storage` - remote call or slot
    ///   write failed
    ///
    /// Every error path emits the matching user notice and leaves the cart
    /// unchanged.
    #[instrument(skip(self), fields(id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut working = self.cart.clone();

        if !working.iter().any(|item| item.id == product_id) {
            let product = match self.catalog.fetch_product(product_id).await {
                Ok(product) => product,
                Err(CatalogError::NotFound(_)) => {
                    return Err(self.fail(
                        Notice::CouldNotAddProduct,
                        CartError::ProductUnavailable(product_id),
                    ));
                }
                Err(e) => return Err(self.fail(Notice::CouldNotAddProduct, e.into())),
            };
            working.push(CartItem::from_catalog(product));
        }

        let stock = match self.catalog.fetch_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return Err(self.fail(Notice::CouldNotAddProduct, e.into())),
        };

        if let Some(item) = working.iter_mut().find(|item| item.id == product_id) {
            if item.amount >= stock.amount {
                return Err(self.fail(Notice::OutOfStock, CartError::OutOfStock(product_id)));
            }
            item.amount += 1;
        }

        self.commit(working, Notice::CouldNotAddProduct)
    }

    /// Remove a product from the cart entirely.
    ///
    /// # Errors
    ///
    /// - `CartError::NotInCart` - the product was not in the cart
    /// - `CartError::Storage` - the slot write failed
    ///
    /// Every error path emits the matching user notice and leaves the cart
    /// unchanged.
    #[instrument(skip(self), fields(id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let working: Vec<CartItem> = self
            .cart
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        if working.len() == self.cart.len() {
            return Err(self.fail(
                Notice::CouldNotRemoveProduct,
                CartError::NotInCart(product_id),
            ));
        }

        self.commit(working, Notice::CouldNotRemoveProduct)
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// Silently does nothing when `amount` is zero or negative, and when the
    /// product is not in the cart - no notice, no error, no state change.
    /// The new quantity is committed only if current stock covers it.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` - `amount` exceeds available stock
    /// - `CartError::Catalog` / `CartError::Storage` - remote call or slot
    ///   write failed
    ///
    /// Every error path emits the matching user notice and leaves the cart
    /// unchanged.
    #[instrument(skip(self), fields(id = %product_id))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i32,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            return Ok(());
        }
        let Ok(requested) = u32::try_from(amount) else {
            return Ok(());
        };

        // Stock is checked before cart membership; a request for an absent
        // product still validates against availability first.
        let stock = match self.catalog.fetch_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return Err(self.fail(Notice::CouldNotUpdateAmount, e.into())),
        };

        if requested > stock.amount {
            return Err(self.fail(Notice::OutOfStock, CartError::OutOfStock(product_id)));
        }

        let mut working = self.cart.clone();
        let Some(item) = working.iter_mut().find(|item| item.id == product_id) else {
            return Ok(());
        };
        item.amount = requested;

        self.commit(working, Notice::CouldNotUpdateAmount)
    }

    /// Persist the working copy, then make it the visible cart.
    fn commit(&mut self, working: Vec<CartItem>, failure_notice: Notice) -> Result<(), CartError> {
        if let Err(e) = self.slot.save(&working) {
            return Err(self.fail(failure_notice, e.into()));
        }
        self.cart = working;
        Ok(())
    }

    /// Emit the user notice for a failed operation and pass the error through.
    fn fail(&self, notice: Notice, error: CartError) -> CartError {
        tracing::warn!(error = %error, "cart operation failed");
        self.notifier.notify(notice);
        error
    }
}

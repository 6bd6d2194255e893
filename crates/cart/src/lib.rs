//! Jacaranda Cart - client-side cart state management.
//!
//! Holds the ordered cart in memory, validates quantity changes against the
//! remote stock service before committing, and mirrors every successful
//! mutation wholesale into a persistence slot.
//!
//! # Architecture
//!
//! - [`CartStore`] applies the three mutations (add product, remove product,
//!   update amount) with commit-after-persist semantics: either the full new
//!   cart becomes visible, or nothing changes
//! - [`catalog`] - reqwest client for the catalog/stock service; product reads
//!   are cached with `moka` (5-minute TTL), stock reads never are
//! - [`storage`] - the persistence slot, read once at open and overwritten
//!   wholesale after each successful mutation
//! - [`notify`] - fire-and-forget user-facing failure messages; there are no
//!   success messages
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use jacaranda_cart::{CartConfig, CartStore, CatalogClient, JsonFileSlot, LogNotifier};
//! use jacaranda_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = Arc::new(CatalogClient::new(&config.catalog));
//! let slot = Box::new(JsonFileSlot::new(&config.cart_path));
//! let mut store = CartStore::open(catalog, slot, Arc::new(LogNotifier))?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;
pub mod types;

pub use catalog::{Catalog, CatalogClient, CatalogError};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::CartError;
pub use notify::{LogNotifier, Notice, Notifier};
pub use storage::{CartSlot, JsonFileSlot, MemorySlot, StorageError};
pub use store::CartStore;
pub use types::{CartItem, CatalogProduct, Stock};

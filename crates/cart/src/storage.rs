//! Cart persistence slot.
//!
//! A single named slot holds the serialized cart. It is read once when the
//! store opens and overwritten wholesale after each successful mutation - no
//! partial writes, no versioning.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::types::CartItem;

/// Errors that can occur reading or writing the slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot holds content that does not parse as a cart.
    #[error("corrupt slot content: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A durable slot holding the serialized cart.
pub trait CartSlot: Send + Sync {
    /// Read the persisted cart.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` when the slot holds unparsable content;
    /// it is not silently defaulted to an empty cart.
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError>;

    /// Overwrite the slot with the full cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the write fails; the previous slot
    /// content must remain intact in that case.
    fn save(&self, cart: &[CartItem]) -> Result<(), StorageError>;
}

impl<S: CartSlot + ?Sized> CartSlot for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        (**self).load()
    }

    fn save(&self, cart: &[CartItem]) -> Result<(), StorageError> {
        (**self).save(cart)
    }
}

/// File-backed slot storing the cart as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    /// Create a slot at the given path. The file is not touched until the
    /// first `save`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartSlot for JsonFileSlot {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn save(&self, cart: &[CartItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;

        // Write a sibling temp file and rename it over the slot so a torn
        // write never leaves the slot unparsable.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory slot for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with raw content, as if a previous session
    /// had written it.
    #[must_use]
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(raw.into())),
        }
    }

    /// Raw slot content, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartSlot for MemorySlot {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        let guard = self.contents.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &[CartItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jacaranda_core::ProductId;
    use rust_decimal::Decimal;

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Produto {id}"),
            price: Decimal::new(9990, 2),
            image: None,
            amount,
        }
    }

    #[test]
    fn test_file_slot_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = JsonFileSlot::new(dir.path().join("cart.json"));
        assert!(slot.load().unwrap().is_none());
    }

    #[test]
    fn test_file_slot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = JsonFileSlot::new(dir.path().join("cart.json"));

        let cart = vec![item(1, 2), item(5, 1)];
        slot.save(&cart).unwrap();

        assert_eq!(slot.load().unwrap(), Some(cart));
    }

    #[test]
    fn test_file_slot_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let slot = JsonFileSlot::new(dir.path().join("cart.json"));

        slot.save(&[item(1, 2), item(5, 1)]).unwrap();
        slot.save(&[item(5, 1)]).unwrap();

        assert_eq!(slot.load().unwrap(), Some(vec![item(5, 1)]));
    }

    #[test]
    fn test_file_slot_corrupt_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json at all").unwrap();

        let slot = JsonFileSlot::new(path);
        assert!(matches!(slot.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_memory_slot_roundtrip() {
        let slot = MemorySlot::new();
        assert!(slot.load().unwrap().is_none());

        slot.save(&[item(2, 3)]).unwrap();
        assert_eq!(slot.load().unwrap(), Some(vec![item(2, 3)]));
        assert!(slot.raw().is_some());
    }

    #[test]
    fn test_memory_slot_seeded_corrupt_content_is_an_error() {
        let slot = MemorySlot::with_contents("{broken");
        assert!(matches!(slot.load(), Err(StorageError::Corrupt(_))));
    }
}

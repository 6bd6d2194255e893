//! Slot durability across store sessions on disk.
//!
//! The cart must survive a process restart: a store opened against the same
//! slot file sees exactly what the previous session committed.

use std::fs;
use std::sync::Arc;

use rust_decimal::Decimal;

use jacaranda_cart::catalog::Catalog;
use jacaranda_cart::notify::Notifier;
use jacaranda_cart::storage::{JsonFileSlot, StorageError};
use jacaranda_cart::store::CartStore;
use jacaranda_cart::types::CartItem;
use jacaranda_core::ProductId;

use jacaranda_integration_tests::{FakeCatalog, RecordingNotifier};

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn catalog() -> Arc<FakeCatalog> {
    Arc::new(
        FakeCatalog::new()
            .with_product(1, "Tênis de Caminhada", price(17990), 5)
            .with_product(2, "Tênis VR Caminhada", price(13990), 5),
    )
}

fn open(catalog: &Arc<FakeCatalog>, slot: JsonFileSlot) -> CartStore {
    CartStore::open(
        Arc::clone(catalog) as Arc<dyn Catalog>,
        Box::new(slot),
        Arc::new(RecordingNotifier::new()) as Arc<dyn Notifier>,
    )
    .expect("open store")
}

#[tokio::test]
async fn test_cart_survives_store_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    let catalog = catalog();

    // First session: build up a cart.
    {
        let mut store = open(&catalog, JsonFileSlot::new(&path));
        store.add_product(ProductId::new(1)).await.unwrap();
        store.add_product(ProductId::new(2)).await.unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
    }

    // Second session: the committed cart is all there.
    let store = open(&catalog, JsonFileSlot::new(&path));
    assert_eq!(store.cart().len(), 2);
    assert_eq!(store.item_count(), 3);
    assert_eq!(store.cart()[0].id, ProductId::new(1));
    assert_eq!(store.cart()[0].amount, 2);
    assert_eq!(store.cart()[1].id, ProductId::new(2));
    assert_eq!(store.cart()[1].amount, 1);
}

#[tokio::test]
async fn test_slot_file_parses_to_the_in_memory_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    let catalog = catalog();

    let mut store = open(&catalog, JsonFileSlot::new(&path));
    store.add_product(ProductId::new(1)).await.unwrap();
    store
        .update_product_amount(ProductId::new(1), 4)
        .await
        .unwrap();

    let on_disk: Vec<CartItem> =
        serde_json::from_str(&fs::read_to_string(&path).expect("read slot")).expect("parse slot");
    assert_eq!(on_disk, store.cart());
}

#[tokio::test]
async fn test_removing_the_last_item_persists_an_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    let catalog = catalog();

    let mut store = open(&catalog, JsonFileSlot::new(&path));
    store.add_product(ProductId::new(1)).await.unwrap();
    store.remove_product(ProductId::new(1)).unwrap();

    assert!(store.is_empty());
    let on_disk: Vec<CartItem> =
        serde_json::from_str(&fs::read_to_string(&path).expect("read slot")).expect("parse slot");
    assert!(on_disk.is_empty());
}

#[test]
fn test_absent_slot_file_opens_an_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let slot = JsonFileSlot::new(dir.path().join("never-written.json"));

    let store = CartStore::open(
        Arc::new(FakeCatalog::new()) as Arc<dyn Catalog>,
        Box::new(slot),
        Arc::new(RecordingNotifier::new()) as Arc<dyn Notifier>,
    )
    .expect("open store");

    assert!(store.is_empty());
}

#[test]
fn test_corrupt_slot_file_fails_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    fs::write(&path, "definitely not a cart").expect("write garbage");

    let result = CartStore::open(
        Arc::new(FakeCatalog::new()) as Arc<dyn Catalog>,
        Box::new(JsonFileSlot::new(&path)),
        Arc::new(RecordingNotifier::new()) as Arc<dyn Notifier>,
    );

    assert!(matches!(result, Err(StorageError::Corrupt(_))));
}

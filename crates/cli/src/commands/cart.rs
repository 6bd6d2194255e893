//! Cart subcommands.
//!
//! Each subcommand opens the store against the configured slot, applies one
//! operation and prints the resulting cart. Failed operations surface their
//! user-facing notice through the log notifier before the command exits
//! non-zero.

use std::sync::Arc;

use jacaranda_cart::{CartConfig, CartStore, CatalogClient, JsonFileSlot, LogNotifier};
use jacaranda_core::{CurrencyCode, Price, ProductId};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn open_store() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let catalog = Arc::new(CatalogClient::new(&config.catalog));
    let slot = Box::new(JsonFileSlot::new(&config.cart_path));
    let store = CartStore::open(catalog, slot, Arc::new(LogNotifier))?;
    Ok(store)
}

fn print_cart(store: &CartStore) {
    if store.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in store.cart() {
        let unit = Price::new(item.price, CurrencyCode::BRL);
        let line = Price::new(item.line_total(), CurrencyCode::BRL);
        println!(
            "{:>3} x {:<45} {:>12} {:>12}",
            item.amount,
            item.title,
            unit.display(),
            line.display()
        );
    }

    let subtotal = Price::new(store.subtotal(), CurrencyCode::BRL);
    println!("{} item(s), subtotal {}", store.item_count(), subtotal.display());
}

/// Show the cart contents.
pub fn show() -> CommandResult {
    let store = open_store()?;
    print_cart(&store);
    Ok(())
}

/// Add one unit of a product to the cart.
pub async fn add(id: i32) -> CommandResult {
    let mut store = open_store()?;
    store.add_product(ProductId::new(id)).await?;
    print_cart(&store);
    Ok(())
}

/// Remove a product from the cart entirely.
pub fn remove(id: i32) -> CommandResult {
    let mut store = open_store()?;
    store.remove_product(ProductId::new(id))?;
    print_cart(&store);
    Ok(())
}

/// Set a product's quantity.
pub async fn set(id: i32, amount: i32) -> CommandResult {
    let mut store = open_store()?;
    store
        .update_product_amount(ProductId::new(id), amount)
        .await?;
    print_cart(&store);
    Ok(())
}

//! Catalog subcommands.

use jacaranda_cart::{CartConfig, CatalogClient};
use jacaranda_core::{CurrencyCode, Price};

/// List all catalog products.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let catalog = CatalogClient::new(&config.catalog);

    let products = catalog.list_products().await?;
    if products.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }

    for product in products {
        let price = Price::new(product.price, CurrencyCode::BRL);
        println!("{:>4}  {:<45} {:>12}", product.id, product.title, price.display());
    }
    Ok(())
}

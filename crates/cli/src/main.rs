//! Jacaranda CLI - cart and catalog management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! jaca cart show
//!
//! # Add one unit of product 1
//! jaca cart add 1
//!
//! # Remove product 1 entirely
//! jaca cart remove 1
//!
//! # Set product 1 to 3 units
//! jaca cart set 1 3
//!
//! # List catalog products
//! jaca products
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and mutate the persisted cart
//! - `products` - Browse the remote catalog

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI output belongs on stdout
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jaca")]
#[command(author, version, about = "Jacaranda cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List catalog products
    Products,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        id: i32,
    },
    /// Remove a product from the cart entirely
    Remove {
        /// Catalog product ID
        id: i32,
    },
    /// Set a product's quantity
    Set {
        /// Catalog product ID
        id: i32,

        /// New quantity (zero or negative leaves the cart untouched)
        amount: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id } => commands::cart::add(id).await?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::Set { id, amount } => commands::cart::set(id, amount).await?,
        },
        Commands::Products => commands::products::list().await?,
    }
    Ok(())
}

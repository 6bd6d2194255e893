//! Jacaranda Core - Shared types library.
//!
//! This crate provides common types used across all Jacaranda components:
//! - `cart` - Cart state management against the catalog service
//! - `cli` - Command-line consumer of the cart component
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! FashionReels Core - Shared types library.
//!
//! This crate provides common types used across all FashionReels components:
//! - `storefront` - Shopper-facing video-commerce service
//! - `admin` - Internal user-management panel
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money, categories, the cart model,
//!   emails, and shipping fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

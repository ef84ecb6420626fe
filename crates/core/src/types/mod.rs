//! Core types for FashionReels.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod money;
pub mod shipping;
pub mod status;

pub use cart::{Cart, CartLine};
pub use category::{Category, CategoryError, Size, SizeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CartTotals, TAX_RATE, format_amount, to_minor_units};
pub use shipping::{Phone, PhoneError, Pincode, PincodeError, ShippingAddress};
pub use status::OrderStatus;

//! Shipping address field types.
//!
//! Pincode and phone carry the fixed digit-length rules the checkout form
//! enforces; parsing is the only way to construct them, so a
//! [`ShippingAddress`] is valid by construction.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::email::Email;

/// A 6-digit Indian postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pincode(String);

/// Error parsing a [`Pincode`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("pincode must be exactly 6 digits")]
pub struct PincodeError;

impl Pincode {
    /// Parse a pincode, requiring exactly six ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`PincodeError`] for any other input.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        if s.len() == 6 && s.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PincodeError)
        }
    }

    /// The digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 10-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

/// Error parsing a [`Phone`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("phone must be exactly 10 digits")]
pub struct PhoneError;

impl Phone {
    /// Parse a phone number, requiring exactly ten ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] for any other input.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.len() == 10 && s.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError)
        }
    }

    /// The digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated shipping address as the backend expects it.
///
/// Field names follow the backend's JSON contract (`street`, not `address`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient's full name.
    pub name: String,
    /// Contact email.
    pub email: Email,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// 6-digit postal code.
    pub pincode: Pincode,
    /// 10-digit contact phone.
    pub phone: Phone,
}

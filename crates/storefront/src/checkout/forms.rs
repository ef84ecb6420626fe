//! Shipping form validation.
//!
//! Validation is purely local: a form that fails here never causes a
//! network call. Errors are keyed by field so the client can render them
//! inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fashion_reels_core::{Email, Phone, Pincode, ShippingAddress};

/// Raw shipping form as submitted by the shopper.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "Online Payment".to_owned()
}

/// Field-keyed validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_owned(), message.to_owned());
    }

    /// Whether any field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl ShippingForm {
    /// Run all field validators and build the validated address.
    ///
    /// # Errors
    ///
    /// Returns every failed field with its message; the caller transitions
    /// back to form editing without touching the network.
    pub fn validate(&self) -> Result<ShippingAddress, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", "Full Name is required");
        }

        let email = if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
            None
        } else {
            match Email::parse(self.email.trim()) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.insert("email", "Valid email address required");
                    None
                }
            }
        };

        if self.address.trim().is_empty() {
            errors.insert("address", "Address is required");
        }

        let pincode = match Pincode::parse(self.pincode.trim()) {
            Ok(pincode) => Some(pincode),
            Err(_) => {
                errors.insert("pincode", "Valid 6-digit Pincode required");
                None
            }
        };

        if self.city.trim().is_empty() {
            errors.insert("city", "City is required");
        }

        let phone = match Phone::parse(self.phone.trim()) {
            Ok(phone) => Some(phone),
            Err(_) => {
                errors.insert("phone", "Valid 10-digit Phone required");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // The Options are all Some once errors is empty.
        match (email, pincode, phone) {
            (Some(email), Some(pincode), Some(phone)) => Ok(ShippingAddress {
                name: self.name.trim().to_owned(),
                email,
                street: self.address.trim().to_owned(),
                city: self.city.trim().to_owned(),
                pincode,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ShippingForm {
        ShippingForm {
            name: "Asha Rao".to_owned(),
            email: "asha@example.com".to_owned(),
            address: "12 MG Road".to_owned(),
            pincode: "560001".to_owned(),
            city: "Bengaluru".to_owned(),
            phone: "9876543210".to_owned(),
            payment_method: "Online Payment".to_owned(),
        }
    }

    #[test]
    fn a_valid_form_builds_the_address() {
        let address = valid_form().validate().unwrap();
        assert_eq!(address.street, "12 MG Road");
        assert_eq!(address.pincode.as_str(), "560001");
    }

    #[test]
    fn a_short_pincode_fails_only_the_pincode_field() {
        let form = ShippingForm {
            pincode: "1234".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("pincode"), Some("Valid 6-digit Pincode required"));
    }

    #[test]
    fn every_empty_field_is_reported_at_once() {
        let form = ShippingForm {
            name: String::new(),
            email: String::new(),
            address: String::new(),
            pincode: String::new(),
            city: String::new(),
            phone: String::new(),
            payment_method: default_payment_method(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("name"), Some("Full Name is required"));
        assert_eq!(errors.get("phone"), Some("Valid 10-digit Phone required"));
    }

    #[test]
    fn a_structurally_invalid_email_is_rejected() {
        let form = ShippingForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Valid email address required"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let form = ShippingForm {
            pincode: " 560001 ".to_owned(),
            ..valid_form()
        };
        let address = form.validate().unwrap();
        assert_eq!(address.pincode.as_str(), "560001");
    }
}

//! Contact candidates supplied by the external contact service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Phone address slots a contact entry may carry, in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneField {
    Mobile,
    WorkMobile,
    Home,
    Work,
    Other,
    Phone,
}

impl PhoneField {
    /// Fixed selection order for call/SMS addressing. First present wins.
    pub const PRIORITY: [PhoneField; 6] = [
        PhoneField::Mobile,
        PhoneField::WorkMobile,
        PhoneField::Home,
        PhoneField::Work,
        PhoneField::Other,
        PhoneField::Phone,
    ];

    /// The wire key the contact service uses for this slot.
    pub fn key(&self) -> &'static str {
        match self {
            PhoneField::Mobile => "mobile",
            PhoneField::WorkMobile => "work mobile",
            PhoneField::Home => "home",
            PhoneField::Work => "work",
            PhoneField::Other => "other",
            PhoneField::Phone => "phone",
        }
    }
}

/// One contact returned by the external lookup: a display name plus a
/// mapping of address-type keys to concrete addresses.
///
/// Candidates arrive ordered; when several contacts match a spoken
/// name, the first is chosen deterministically. Disambiguating between
/// them is an acknowledged product gap, not resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub name: String,
    pub addresses: HashMap<String, String>,
}

impl ContactCandidate {
    /// Creates a candidate with no addresses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addresses: HashMap::new(),
        }
    }

    /// Adds an address under the given wire key.
    pub fn with_address(mut self, key: impl Into<String>, address: impl Into<String>) -> Self {
        self.addresses.insert(key.into(), address.into());
        self
    }

    /// Picks the contact's phone number by the fixed priority order.
    pub fn phone_by_priority(&self) -> Option<&str> {
        PhoneField::PRIORITY
            .iter()
            .find_map(|field| self.addresses.get(field.key()))
            .map(String::as_str)
    }

    /// The contact's email address, if any.
    pub fn email(&self) -> Option<&str> {
        self.addresses.get("email").map(String::as_str)
    }
}

//! Compiled-in place catalog

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named location with a provider-recognized code (postal code)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub name: String,
    pub code: String,
}

impl Place {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

const BUILTIN_PLACES: [(&str, &str); 4] = [
    ("Palo Alto", "94303"),
    ("San Jose", "94088"),
    ("Santa Cruz", "95062"),
    ("Honolulu", "96803"),
];

/// Read-only ordered list of places
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaceCatalog {
    places: Vec<Place>,
}

impl PlaceCatalog {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// The places shipped with the binary
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_PLACES
                .iter()
                .map(|(name, code)| Place::new(*name, *code))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Place> {
        self.places.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    /// Button labels, in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.places.iter().map(|p| p.name.as_str()).collect()
    }
}

impl Default for PlaceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

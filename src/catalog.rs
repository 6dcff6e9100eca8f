use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Descriptive and pricing attributes of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Product Description")]
    pub description: String,
    #[serde(rename = "Rate/ft (PKR)")]
    pub unit_price_per_length: f64,
    #[serde(rename = "Rate/19 ft Length (PKR)")]
    pub price_per_rod: f64,
}

/// Resolves a product code offered by a vendor. Implementations are read-only.
pub trait Catalog {
    fn resolve(&self, code: &str, vendor: &str) -> Option<&Product>;
}

/// vendor -> window type -> category -> products
pub type CatalogData = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<Product>>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    vendors: CatalogData,
}

impl ProductCatalog {
    pub fn new(vendors: CatalogData) -> Self {
        Self { vendors }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn list(&self) -> &CatalogData {
        &self.vendors
    }

    pub fn product_count(&self) -> usize {
        self.vendors
            .values()
            .flat_map(|types| types.values())
            .flat_map(|categories| categories.values())
            .map(Vec::len)
            .sum()
    }
}

impl Catalog for ProductCatalog {
    /// Window types and categories are searched in key order; the first match wins.
    fn resolve(&self, code: &str, vendor: &str) -> Option<&Product> {
        self.vendors
            .get(vendor)?
            .values()
            .flat_map(|categories| categories.values())
            .flatten()
            .find(|p| p.code == code)
    }
}

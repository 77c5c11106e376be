//! Facet options (brand / category dropdown choices) and list totals.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Brand,
    Category,
}

impl Facet {
    /// Prefix used for option keys (`"brand_Acme"`, `"family_Audio"`).
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Facet::Brand => "brand",
            Facet::Category => "family",
        }
    }

    fn value_of(self, product: &Product) -> Option<&str> {
        match self {
            Facet::Brand => product.brand.as_deref(),
            Facet::Category => product.category.as_deref(),
        }
    }
}

/// One selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub value: String,
    pub key: String,
    pub selected: bool,
}

/// Distinct, non-empty values of `facet` across `products`, sorted
/// case-insensitively, flagged when present in `selected`.
pub fn facet_options(
    products: &[Product],
    facet: Facet,
    selected: &BTreeSet<String>,
) -> Vec<FacetOption> {
    let mut seen = HashSet::new();
    let mut values: Vec<&str> = products
        .iter()
        .filter_map(|p| facet.value_of(p))
        .filter(|v| seen.insert(*v))
        .collect();
    values.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

    values
        .into_iter()
        .map(|value| FacetOption {
            label: value.to_string(),
            value: value.to_string(),
            key: format!("{}_{}", facet.key_prefix(), value),
            selected: selected.contains(value),
        })
        .collect()
}

/// Sum of stock across `products`.
pub fn total_stock(products: &[Product]) -> u64 {
    products.iter().map(|p| p.stock).sum()
}

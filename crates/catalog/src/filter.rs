//! Filter predicate: free-text search plus category/brand selections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use shelfview_core::ValueObject;

use crate::product::Product;

/// User filter selections. Empty term or empty sets impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_categories: BTreeSet<String>,
    pub selected_brands: BTreeSet<String>,
}

impl ValueObject for FilterCriteria {}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any of the three constraints is enabled.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || !self.selected_categories.is_empty()
            || !self.selected_brands.is_empty()
    }
}

/// Does `product` pass every enabled constraint in `criteria`?
///
/// The search term matches case-insensitively as a substring of name,
/// description, brand or category; a product with none of those fails any
/// non-empty search.
pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    if !criteria.search_term.is_empty() && !matches_search(product, &criteria.search_term) {
        return false;
    }

    if !criteria.selected_categories.is_empty()
        && !is_member(product.category.as_deref(), &criteria.selected_categories)
    {
        return false;
    }

    if !criteria.selected_brands.is_empty()
        && !is_member(product.brand.as_deref(), &criteria.selected_brands)
    {
        return false;
    }

    true
}

fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    [
        product.name.as_deref(),
        product.description.as_deref(),
        product.brand.as_deref(),
        product.category.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn is_member(value: Option<&str>, selected: &BTreeSet<String>) -> bool {
    value.is_some_and(|v| selected.contains(v))
}

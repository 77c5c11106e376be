//! Pipeline composition: cap → filter → sort.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterCriteria, matches};
use crate::product::Product;
use crate::rules::{BusinessRules, CappingPolicy, apply_capping};
use crate::sort::{SortSpec, sort_products};

/// Everything that determines the displayed list besides the products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub rules: BusinessRules,
    pub capping: CappingPolicy,
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
}

impl CatalogQuery {
    pub fn new(rules: BusinessRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_capping(mut self, capping: CappingPolicy) -> Self {
        self.capping = capping;
        self
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

/// Derive the displayed list from `products`.
///
/// Caps (per category unless the query says otherwise), then filters, then
/// stably sorts. Nothing is cached: call again whenever the products or the
/// query change.
pub fn evaluate(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let mut shown = apply_capping(products, &query.rules, query.capping);
    let capped = shown.len();

    shown.retain(|p| matches(p, &query.criteria));
    sort_products(&mut shown, &query.sort);

    tracing::debug!(
        input = products.len(),
        capped,
        shown = shown.len(),
        sort = %query.sort,
        "catalog pipeline evaluated"
    );
    shown
}

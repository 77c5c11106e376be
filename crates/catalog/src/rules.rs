//! Business-rule capping: greedy, price-descending selection within limits.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shelfview_core::ValueObject;

use crate::product::Product;

/// Limits applied to a product selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessRules {
    pub max_count: usize,
    pub max_total_price: f64,
}

impl ValueObject for BusinessRules {}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            max_count: 100,
            max_total_price: 10_000.0,
        }
    }
}

impl BusinessRules {
    pub fn new(max_count: usize, max_total_price: f64) -> Self {
        Self {
            max_count,
            max_total_price,
        }
    }
}

/// Whether limits apply per category or to the whole list at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CappingPolicy {
    #[default]
    Category,
    Flat,
}

/// Products sharing one category value (`None` groups uncategorized products).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Option<&'a str>,
    pub products: Vec<&'a Product>,
}

/// Partition `products` by category.
///
/// Groups appear in first-seen order and keep source order within a group.
/// Every product lands in exactly one group.
pub fn partition_by_category(products: &[Product]) -> Vec<CategoryGroup<'_>> {
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for product in products {
        let category = product.category.as_deref();
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push(CategoryGroup {
                category,
                products: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].products.push(product);
    }

    groups
}

/// Greedy cap over a single list.
///
/// Candidates are stably sorted by price, highest first, then accepted in one
/// pass while the count stays under `max_count` and the running total stays
/// within `max_total_price`. A rejected product is never retried, so the
/// result can under-fill the budget; that is the expected outcome.
pub fn cap(products: &[Product], rules: &BusinessRules) -> Vec<Product> {
    select(products.iter().collect(), rules)
        .into_iter()
        .cloned()
        .collect()
}

/// Cap each category independently with the same rules and concatenate.
///
/// Limits hold per category; the combined result may exceed them.
pub fn cap_by_category(products: &[Product], rules: &BusinessRules) -> Vec<Product> {
    partition_by_category(products)
        .into_iter()
        .flat_map(|group| select(group.products, rules))
        .cloned()
        .collect()
}

/// Same selection as [`cap_by_category`]: the "global" pass partitions the
/// whole catalog by category and caps every partition.
pub fn cap_globally(products: &[Product], rules: &BusinessRules) -> Vec<Product> {
    cap_by_category(products, rules)
}

/// Apply `rules` according to `policy`.
pub fn apply_capping(
    products: &[Product],
    rules: &BusinessRules,
    policy: CappingPolicy,
) -> Vec<Product> {
    match policy {
        CappingPolicy::Category => cap_by_category(products, rules),
        CappingPolicy::Flat => cap(products, rules),
    }
}

fn select<'a>(mut candidates: Vec<&'a Product>, rules: &BusinessRules) -> Vec<&'a Product> {
    candidates.sort_by(|a, b| price_desc(a, b));

    let mut selected = Vec::with_capacity(rules.max_count.min(candidates.len()));
    let mut total = 0.0;
    for product in candidates {
        if selected.len() >= rules.max_count {
            break;
        }
        if total + product.unit_price > rules.max_total_price {
            continue;
        }
        total += product.unit_price;
        selected.push(product);
    }
    selected
}

fn price_desc(a: &Product, b: &Product) -> Ordering {
    b.unit_price
        .partial_cmp(&a.unit_price)
        .unwrap_or(Ordering::Equal)
}

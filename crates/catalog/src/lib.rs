//! Catalog domain module: product filtering, sorting and business-rule capping.
//!
//! This crate contains the data-shaping rules of the catalog browser,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Every function here is total over normalized products and safe to call
//! concurrently.

pub mod facets;
pub mod filter;
pub mod pipeline;
pub mod product;
pub mod rules;
pub mod sort;

pub use facets::{Facet, FacetOption, facet_options, total_stock};
pub use filter::{FilterCriteria, matches};
pub use pipeline::{CatalogQuery, evaluate};
pub use product::{FieldValue, Product, ProductId, RawProduct, normalize_all};
pub use rules::{
    BusinessRules, CappingPolicy, CategoryGroup, apply_capping, cap, cap_by_category,
    cap_globally, partition_by_category,
};
pub use sort::{SortDirection, SortField, SortOption, SortSpec, compare, sort_products};

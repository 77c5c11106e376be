//! Derived view: everything the host renders, recomputed from state.

use serde::{Deserialize, Serialize};

use shelfview_catalog::{
    BusinessRules, CappingPolicy, CatalogQuery, Facet, FacetOption, SortOption, SortSpec,
    evaluate, facet_options, total_stock,
};

use crate::row::ProductRow;
use crate::state::BrowserState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserView {
    pub rows: Vec<ProductRow>,
    /// Stock summed over the displayed rows.
    pub total_stock: u64,
    pub brand_options: Vec<FacetOption>,
    pub category_options: Vec<FacetOption>,
    pub sort_options: Vec<SortOption>,
    pub sort_value: String,
    pub is_loading: bool,
    pub is_filter_active: bool,
    /// Nothing stored and no filter set: prompt for a sync.
    pub show_sync_message: bool,
    /// Products exist but the filters hide all of them.
    pub show_no_filtered_products_message: bool,
    pub error: Option<String>,
}

/// Run the catalog pipeline over `state` and build display rows.
pub fn derive_view(
    state: &BrowserState,
    rules: &BusinessRules,
    capping: CappingPolicy,
) -> BrowserView {
    let query = CatalogQuery::new(*rules)
        .with_capping(capping)
        .with_criteria(state.criteria.clone())
        .with_sort(state.sort.clone());
    let shown = evaluate(&state.products, &query);

    let rows: Vec<ProductRow> = shown
        .iter()
        .map(|p| ProductRow::from_product(p, state.expanded.as_ref(), &state.carousel))
        .collect();

    let is_filter_active = state.criteria.is_active();
    BrowserView {
        total_stock: total_stock(&shown),
        brand_options: facet_options(&state.products, Facet::Brand, &state.criteria.selected_brands),
        category_options: facet_options(
            &state.products,
            Facet::Category,
            &state.criteria.selected_categories,
        ),
        sort_options: SortSpec::options(),
        sort_value: state.sort.to_string(),
        is_loading: state.loading,
        is_filter_active,
        show_sync_message: state.products.is_empty() && !is_filter_active,
        show_no_filtered_products_message: !state.products.is_empty() && rows.is_empty(),
        error: state.error.clone(),
        rows,
    }
}

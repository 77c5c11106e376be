//! Browser view state and its reducer.
//!
//! State is never patched in place: `reduce` takes the current state and an
//! action and returns the next state plus the side effects the host should
//! run (notices, a sync, a refresh). The displayed list is re-derived from
//! the new state by [`crate::view::derive_view`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use shelfview_catalog::{Facet, FilterCriteria, Product, ProductId, SortSpec};
use shelfview_core::dedup_by_id;

use crate::picklist::SelectionChanged;
use crate::types::Notice;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    /// Last product list supplied by the source (deduplicated by id).
    pub products: Arc<[Product]>,
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    /// At most one expanded row.
    pub expanded: Option<ProductId>,
    /// Carousel position per product; absent means the first image.
    pub carousel: BTreeMap<ProductId, usize>,
    pub loading: bool,
    pub sync_started: bool,
    pub error: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl BrowserState {
    pub fn new(sort: SortSpec) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ProductsLoaded(Vec<Product>),
    LoadFailed(String),
    /// Result of the "needs sync?" check.
    SyncNeeded(bool),
    /// The "needs sync?" check itself failed; loaded products stay.
    SyncCheckFailed(String),

    SearchChanged(String),
    CategoriesChanged(Vec<String>),
    BrandsChanged(Vec<String>),
    SortChanged(SortSpec),
    ResetFilters,

    RowToggled(ProductId),
    ImageStepped { product_id: ProductId, step: isize },

    SyncStarted,
    SyncSucceeded { message: String, at: DateTime<Utc> },
    SyncFailed(String),
    DeleteStarted,
    AllDeleted,
    DeleteFailed(String),
}

impl Action {
    /// Map a dropdown selection change onto the matching filter action.
    pub fn facet_selection(facet: Facet, change: &SelectionChanged) -> Self {
        let values = change.values();
        match facet {
            Facet::Brand => Action::BrandsChanged(values),
            Facet::Category => Action::CategoriesChanged(values),
        }
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    StartSync,
    /// Re-fetch products from the source.
    Refresh,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: BrowserState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: BrowserState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Compute the next state for `action`.
pub fn reduce(state: &BrowserState, action: Action) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::ProductsLoaded(products) => {
            next.products = dedup_by_id(products).into();
            next.error = None;
            if next.products.is_empty() && !next.sync_started && !next.criteria.is_active() {
                effects.push(Effect::StartSync);
            }
        }
        Action::LoadFailed(message) => {
            next.products = Arc::from(Vec::new());
            effects.push(Effect::Notify(Notice::error(message.clone())));
            next.error = Some(message);
        }
        Action::SyncNeeded(needed) => {
            if needed && !next.sync_started {
                effects.push(Effect::Notify(Notice::info(
                    "No products found. Starting automatic sync...",
                )));
                effects.push(Effect::StartSync);
            }
        }
        Action::SyncCheckFailed(message) => {
            effects.push(Effect::Notify(Notice::error(message.clone())));
            next.error = Some(message);
        }

        Action::SearchChanged(term) => next.criteria.search_term = term,
        Action::CategoriesChanged(values) => {
            next.criteria.selected_categories = values.into_iter().collect();
        }
        Action::BrandsChanged(values) => {
            next.criteria.selected_brands = values.into_iter().collect();
        }
        Action::SortChanged(sort) => next.sort = sort,
        Action::ResetFilters => next.criteria = FilterCriteria::default(),

        Action::RowToggled(id) => {
            if next.expanded.as_ref() == Some(&id) {
                next.expanded = None;
                next.carousel.clear();
            } else {
                next.expanded = Some(id);
            }
        }
        Action::ImageStepped { product_id, step } => {
            let count = next.product(&product_id).map_or(0, |p| p.images.len());
            if count <= 1 {
                return Transition::quiet(next);
            }
            let current = next.carousel.get(&product_id).copied().unwrap_or(0);
            let position = (current as isize + step).rem_euclid(count as isize) as usize;
            next.carousel.insert(product_id, position);
        }

        Action::SyncStarted => {
            next.loading = true;
            next.sync_started = true;
        }
        Action::SyncSucceeded { message, at } => {
            next.loading = false;
            next.error = None;
            next.last_synced_at = Some(at);
            next.criteria = FilterCriteria::default();
            effects.push(Effect::Notify(Notice::success(message)));
            effects.push(Effect::Refresh);
        }
        Action::SyncFailed(message) => {
            next.loading = false;
            effects.push(Effect::Notify(Notice::error(message.clone())));
            next.error = Some(message);
        }
        Action::DeleteStarted => next.loading = true,
        Action::AllDeleted => {
            next.loading = false;
            next.products = Arc::from(Vec::new());
            next.expanded = None;
            next.carousel.clear();
            next.criteria = FilterCriteria::default();
            next.sync_started = false;
            effects.push(Effect::Notify(Notice::success(
                "All products deleted successfully",
            )));
            effects.push(Effect::Refresh);
        }
        Action::DeleteFailed(message) => {
            next.loading = false;
            effects.push(Effect::Notify(Notice::error(message.clone())));
            next.error = Some(message);
        }
    }

    Transition {
        state: next,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picklist::PicklistOption;
    use crate::types::NoticeVariant;

    fn with_products(products: Vec<Product>) -> BrowserState {
        reduce(&BrowserState::default(), Action::ProductsLoaded(products)).state
    }

    fn gallery() -> Product {
        Product::new("p-1").with_images(["a.png", "b.png", "c.png"])
    }

    #[test]
    fn empty_load_requests_auto_sync() {
        let t = reduce(&BrowserState::default(), Action::ProductsLoaded(vec![]));
        assert_eq!(t.effects, vec![Effect::StartSync]);
    }

    #[test]
    fn empty_load_with_active_filter_does_not_sync() {
        let state = reduce(&BrowserState::default(), Action::SearchChanged("lamp".into())).state;
        let t = reduce(&state, Action::ProductsLoaded(vec![]));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn empty_load_after_sync_started_does_not_sync_again() {
        let state = reduce(&BrowserState::default(), Action::SyncStarted).state;
        let t = reduce(&state, Action::ProductsLoaded(vec![]));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn load_dedups_and_clears_error() {
        let mut state = BrowserState::default();
        state.error = Some("boom".into());
        let t = reduce(
            &state,
            Action::ProductsLoaded(vec![
                Product::new("a").with_name("first"),
                Product::new("a").with_name("second"),
            ]),
        );
        assert_eq!(t.state.products.len(), 1);
        assert_eq!(t.state.products[0].name.as_deref(), Some("first"));
        assert!(t.state.error.is_none());
    }

    #[test]
    fn load_failure_clears_products_and_notifies() {
        let state = with_products(vec![Product::new("a")]);
        let t = reduce(&state, Action::LoadFailed("offline".into()));
        assert!(t.state.products.is_empty());
        assert_eq!(t.state.error.as_deref(), Some("offline"));
        assert!(matches!(
            &t.effects[..],
            [Effect::Notify(Notice { variant: NoticeVariant::Error, .. })]
        ));
    }

    #[test]
    fn sync_check_failure_keeps_products() {
        let state = with_products(vec![Product::new("a")]);
        let t = reduce(&state, Action::SyncCheckFailed("status down".into()));
        assert_eq!(t.state.products.len(), 1);
        assert_eq!(t.state.error.as_deref(), Some("status down"));
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error("status down"))]);
    }

    #[test]
    fn sync_needed_starts_sync_once() {
        let t = reduce(&BrowserState::default(), Action::SyncNeeded(true));
        assert_eq!(t.effects.len(), 2);
        assert_eq!(t.effects[1], Effect::StartSync);

        let started = reduce(&BrowserState::default(), Action::SyncStarted).state;
        assert!(reduce(&started, Action::SyncNeeded(true)).effects.is_empty());
        assert!(reduce(&BrowserState::default(), Action::SyncNeeded(false)).effects.is_empty());
    }

    #[test]
    fn filter_actions_update_criteria_without_touching_products() {
        let state = with_products(vec![Product::new("a")]);
        let state = reduce(&state, Action::CategoriesChanged(vec!["Audio".into()])).state;
        let state = reduce(&state, Action::BrandsChanged(vec!["Acme".into(), "Sono".into()])).state;
        let state = reduce(&state, Action::SearchChanged("spk".into())).state;

        assert_eq!(state.criteria.selected_categories.len(), 1);
        assert_eq!(state.criteria.selected_brands.len(), 2);
        assert_eq!(state.criteria.search_term, "spk");
        assert_eq!(state.products.len(), 1);

        let reset = reduce(&state, Action::ResetFilters).state;
        assert!(!reset.criteria.is_active());
    }

    #[test]
    fn facet_selection_maps_to_filter_action() {
        let change = SelectionChanged {
            name: "brands".into(),
            selected: vec![PicklistOption::new("Acme", "Acme").selected(true)],
        };
        assert_eq!(
            Action::facet_selection(Facet::Brand, &change),
            Action::BrandsChanged(vec!["Acme".into()])
        );
        assert_eq!(
            Action::facet_selection(Facet::Category, &change),
            Action::CategoriesChanged(vec!["Acme".into()])
        );
    }

    #[test]
    fn toggling_rows_expands_one_and_collapse_resets_carousels() {
        let state = with_products(vec![gallery(), Product::new("p-2")]);
        let id = ProductId::from("p-1");

        let state = reduce(&state, Action::RowToggled(id.clone())).state;
        assert_eq!(state.expanded.as_ref(), Some(&id));

        let state = reduce(&state, Action::ImageStepped { product_id: id.clone(), step: 1 }).state;
        assert_eq!(state.carousel.get(&id), Some(&1));

        let state = reduce(&state, Action::RowToggled(ProductId::from("p-2"))).state;
        assert_eq!(state.expanded, Some(ProductId::from("p-2")));
        assert_eq!(state.carousel.get(&id), Some(&1));

        let state = reduce(&state, Action::RowToggled(ProductId::from("p-2"))).state;
        assert!(state.expanded.is_none());
        assert!(state.carousel.is_empty());
    }

    #[test]
    fn image_steps_wrap_around() {
        let state = with_products(vec![gallery()]);
        let id = ProductId::from("p-1");

        let back = reduce(&state, Action::ImageStepped { product_id: id.clone(), step: -1 }).state;
        assert_eq!(back.carousel.get(&id), Some(&2));

        let forward = reduce(&back, Action::ImageStepped { product_id: id.clone(), step: 1 }).state;
        assert_eq!(forward.carousel.get(&id), Some(&0));
    }

    #[test]
    fn image_steps_ignore_single_image_and_unknown_products() {
        let state = with_products(vec![Product::new("solo").with_images(["only.png"])]);
        let t = reduce(&state, Action::ImageStepped { product_id: "solo".into(), step: 1 });
        assert!(t.state.carousel.is_empty());

        let t = reduce(&state, Action::ImageStepped { product_id: "ghost".into(), step: 1 });
        assert_eq!(t.state, state);
    }

    #[test]
    fn sync_success_resets_filters_and_refreshes() {
        let state = reduce(&BrowserState::default(), Action::SearchChanged("x".into())).state;
        let state = reduce(&state, Action::SyncStarted).state;
        assert!(state.loading);

        let at = Utc::now();
        let t = reduce(&state, Action::SyncSucceeded { message: "Synced 3".into(), at });
        assert!(!t.state.loading);
        assert!(t.state.sync_started);
        assert!(!t.state.criteria.is_active());
        assert_eq!(t.state.last_synced_at, Some(at));
        assert_eq!(t.effects, vec![Effect::Notify(Notice::success("Synced 3")), Effect::Refresh]);
    }

    #[test]
    fn delete_resets_data_and_refreshes() {
        let state = with_products(vec![gallery()]);
        let state = reduce(&state, Action::RowToggled("p-1".into())).state;
        let state = reduce(&state, Action::SyncStarted).state;
        let state = reduce(&state, Action::DeleteStarted).state;

        let t = reduce(&state, Action::AllDeleted);
        assert!(t.state.products.is_empty());
        assert!(t.state.expanded.is_none());
        assert!(!t.state.sync_started);
        assert!(!t.state.loading);
        assert_eq!(t.effects.last(), Some(&Effect::Refresh));
    }

    #[test]
    fn failures_stop_loading_and_record_error() {
        let state = reduce(&BrowserState::default(), Action::SyncStarted).state;
        let t = reduce(&state, Action::SyncFailed("timeout".into()));
        assert!(!t.state.loading);
        assert_eq!(t.state.error.as_deref(), Some("timeout"));

        let state = reduce(&BrowserState::default(), Action::DeleteStarted).state;
        let t = reduce(&state, Action::DeleteFailed("denied".into()));
        assert!(!t.state.loading);
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error("denied"))]);
    }

    #[test]
    fn reduce_leaves_previous_state_untouched() {
        let state = with_products(vec![gallery()]);
        let before = state.clone();
        let _ = reduce(&state, Action::AllDeleted);
        assert_eq!(state, before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: carousel positions stay inside the image list.
            #[test]
            fn carousel_stays_in_bounds(
                image_count in 2usize..8,
                steps in proptest::collection::vec(-3isize..=3, 0..30)
            ) {
                let images: Vec<String> = (0..image_count).map(|i| format!("{i}.png")).collect();
                let mut state = with_products(vec![Product::new("p").with_images(images)]);
                let id = ProductId::from("p");
                let mut expected: isize = 0;

                for step in steps {
                    state = reduce(&state, Action::ImageStepped { product_id: id.clone(), step }).state;
                    expected = (expected + step).rem_euclid(image_count as isize);
                    let position = state.carousel.get(&id).copied().unwrap_or(0);
                    prop_assert!(position < image_count);
                    prop_assert_eq!(position as isize, expected);
                }
            }
        }
    }
}

//! Controller: runs reducer effects against a product source.

use std::collections::VecDeque;

use chrono::Utc;

use shelfview_catalog::normalize_all;

use crate::config::BrowserConfig;
use crate::source::ProductSource;
use crate::state::{Action, BrowserState, Effect, reduce};
use crate::types::Notice;
use crate::view::{BrowserView, derive_view};

/// Catalog browser bound to one product source.
///
/// Every public operation returns the notices produced while handling it,
/// including those of follow-up effects (auto-sync, refresh).
#[derive(Debug)]
pub struct CatalogBrowser<S> {
    source: S,
    config: BrowserConfig,
    state: BrowserState,
}

impl<S: ProductSource> CatalogBrowser<S> {
    pub fn new(source: S, config: BrowserConfig) -> Self {
        let state = BrowserState::new(config.default_sort.clone());
        Self {
            source,
            config,
            state,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> BrowserView {
        derive_view(&self.state, &self.config.rules, self.config.capping)
    }

    /// Apply a user action and run whatever it triggers.
    pub fn dispatch(&mut self, action: Action) -> Vec<Notice> {
        self.run(action)
    }

    /// Fetch products from the source.
    pub fn load(&mut self) -> Vec<Notice> {
        let action = self.fetch();
        self.run(action)
    }

    /// Ask the source whether a sync is due; start one if so.
    pub fn check_needs_sync(&mut self) -> Vec<Notice> {
        match self.source.needs_sync() {
            Ok(needed) => self.run(Action::SyncNeeded(needed)),
            Err(e) => {
                tracing::warn!(error = %e, "needs-sync check failed");
                self.run(Action::SyncCheckFailed(format!("Error checking sync status: {e}")))
            }
        }
    }

    pub fn sync(&mut self) -> Vec<Notice> {
        self.run_effects(VecDeque::from([Effect::StartSync]))
    }

    pub fn delete_all(&mut self) -> Vec<Notice> {
        self.apply(Action::DeleteStarted);
        let outcome = match self.source.delete_all() {
            Ok(()) => {
                tracing::info!("all products deleted");
                Action::AllDeleted
            }
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                Action::DeleteFailed(format!("Error deleting products: {e}"))
            }
        };
        self.run(outcome)
    }

    fn fetch(&self) -> Action {
        match self.source.fetch_all() {
            Ok(raw) => {
                let products = normalize_all(raw);
                tracing::info!(count = products.len(), "products loaded");
                Action::ProductsLoaded(products)
            }
            Err(e) => {
                tracing::warn!(error = %e, "product fetch failed");
                Action::LoadFailed(format!("Error loading products: {e}"))
            }
        }
    }

    fn sync_now(&mut self) -> Action {
        self.apply(Action::SyncStarted);
        match self.source.sync() {
            Ok(message) => {
                tracing::info!(%message, "product sync finished");
                Action::SyncSucceeded {
                    message,
                    at: Utc::now(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "product sync failed");
                Action::SyncFailed(format!("Error syncing products: {e}"))
            }
        }
    }

    fn apply(&mut self, action: Action) -> Vec<Effect> {
        let transition = reduce(&self.state, action);
        self.state = transition.state;
        transition.effects
    }

    fn run(&mut self, action: Action) -> Vec<Notice> {
        let effects = self.apply(action);
        self.run_effects(effects.into())
    }

    fn run_effects(&mut self, mut queue: VecDeque<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                Effect::Notify(notice) => {
                    notices.push(notice);
                    continue;
                }
                // Auto-sync is requested from several places; one in flight is enough.
                Effect::StartSync if self.state.loading => continue,
                Effect::StartSync => self.sync_now(),
                Effect::Refresh => self.fetch(),
            };
            queue.extend(self.apply(follow_up));
        }
        notices
    }
}

//! `shelfview-browser`
//!
//! **Responsibility:** catalog browser state around the catalog pipeline.
//!
//! This crate provides:
//! - Immutable view state with a pure reducer (`state`)
//! - Derived view: display rows, facet options, message flags (`view`, `row`)
//! - Multi-select dropdown state (`picklist`)
//! - The remote product source seam (`source`) and a controller driving it
//! - Environment configuration (`config`)
//!
//! The remote catalog stays the authority; this crate never edits product
//! records, it only re-derives what to show from whatever was last fetched.

pub mod config;
pub mod controller;
pub mod picklist;
pub mod row;
pub mod source;
pub mod state;
pub mod types;
pub mod view;

pub use config::{BrowserConfig, ConfigError};
pub use controller::CatalogBrowser;
pub use picklist::{ItemToggle, Picklist, PicklistOption, SelectionChanged};
pub use row::ProductRow;
pub use source::{InMemoryProductSource, JsonFileSource, ProductSource, SourceError};
pub use state::{Action, BrowserState, Effect, Transition, reduce};
pub use types::{Notice, NoticeVariant};
pub use view::{BrowserView, derive_view};

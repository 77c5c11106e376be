//! `shelfview-core` — domain building blocks shared by the catalog crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod value_object;

pub use entity::{Entity, dedup_by_id};
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;

//! Value object trait: equality by value, not identity.
//!
//! Filter criteria, sort specs and business rules are value objects: two
//! criteria with the same search term and selections describe the same view.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values; the catalog view re-derives its list
/// from the new value instead of patching the old one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct BusinessRules {
///     max_count: usize,
///     max_total_price: f64,
/// }
///
/// impl ValueObject for BusinessRules {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

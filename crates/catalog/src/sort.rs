//! Comparator and sort order.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use shelfview_core::{DomainError, ValueObject};

use crate::product::Product;

/// Field a product list is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Price,
    Stock,
    /// Any other product field, compared generically.
    Other(String),
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Stock => "stock",
            SortField::Other(field) => field,
        }
    }
}

impl From<&str> for SortField {
    fn from(value: &str) -> Self {
        match value {
            "name" => SortField::Name,
            "price" => SortField::Price,
            "stock" => SortField::Stock,
            other => SortField::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Field + direction. Renders and parses as `"{field}_{direction}"`,
/// e.g. `"price_desc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ValueObject for SortSpec {}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::Name, SortDirection::Asc)
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// The sort choices offered by the catalog view.
    pub fn options() -> Vec<SortOption> {
        [
            ("Name (A-Z)", SortField::Name, SortDirection::Asc),
            ("Name (Z-A)", SortField::Name, SortDirection::Desc),
            ("Price (Low to High)", SortField::Price, SortDirection::Asc),
            ("Price (High to Low)", SortField::Price, SortDirection::Desc),
            ("Stock (Low to High)", SortField::Stock, SortDirection::Asc),
            ("Stock (High to Low)", SortField::Stock, SortDirection::Desc),
        ]
        .into_iter()
        .map(|(label, field, direction)| SortOption {
            label: label.to_string(),
            value: SortSpec::new(field, direction).to_string(),
        })
        .collect()
    }
}

impl core::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .rsplit_once('_')
            .ok_or_else(|| DomainError::validation(format!("sort option '{s}' has no direction")))?;
        if field.is_empty() {
            return Err(DomainError::validation(format!("sort option '{s}' has no field")));
        }
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(DomainError::validation(format!(
                    "unknown sort direction '{other}'"
                )));
            }
        };
        Ok(Self::new(SortField::from(field), direction))
    }
}

/// A selectable sort choice (label + `SortSpec` string value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub label: String,
    pub value: String,
}

/// Order two products by `field` in `direction`.
///
/// Names compare case-insensitively; price and stock numerically; any other
/// field compares its raw value loosely (absent sorts as empty text).
pub fn compare(a: &Product, b: &Product, field: &SortField, direction: SortDirection) -> Ordering {
    let natural = match field {
        SortField::Name => {
            let name_a = a.name.as_deref().unwrap_or_default().to_lowercase();
            let name_b = b.name.as_deref().unwrap_or_default().to_lowercase();
            name_a.cmp(&name_b)
        }
        SortField::Price => a
            .unit_price
            .partial_cmp(&b.unit_price)
            .unwrap_or(Ordering::Equal),
        SortField::Stock => a.stock.cmp(&b.stock),
        SortField::Other(name) => a.field_value(name).loose_cmp(&b.field_value(name)),
    };
    direction.apply(natural)
}

/// Stable in-place sort by `spec`.
pub fn sort_products(products: &mut [Product], spec: &SortSpec) {
    products.sort_by(|a, b| compare(a, b, &spec.field, spec.direction));
}

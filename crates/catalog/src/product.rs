use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use shelfview_core::{DomainError, DomainResult, Entity, dedup_by_id};

/// Product identifier as issued by the remote catalog (opaque).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Product record as the remote catalog sends it.
///
/// Every field is optional; unknown fields are kept in `extra` so they stay
/// available as generic sort keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub family: Option<String>,
    pub unit_price: Option<f64>,
    pub stock: Option<f64>,
    /// Comma-separated image URLs.
    pub images: Option<String>,
    pub display_url: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Normalized product.
///
/// All defaulting happens in [`RawProduct::normalize`]; downstream code can
/// rely on `unit_price` and `stock` being populated and on text fields being
/// either `None` or non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    /// Category, a.k.a. "family".
    pub category: Option<String>,
    pub unit_price: f64,
    pub stock: u64,
    pub images: Vec<String>,
    pub display_url: Option<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Product {
    /// Minimal product with the given id; remaining fields at their defaults.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: None,
            description: None,
            brand: None,
            category: None,
            unit_price: 0.0,
            stock: 0,
            images: Vec::new(),
            display_url: None,
            tags: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(Some(name.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(Some(description.into()));
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = non_empty(Some(brand.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(Some(category.into()));
        self
    }

    pub fn with_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up a field by name for generic sorting.
    ///
    /// Known fields match case-insensitively (`"Family"` and `"category"` are
    /// the same field); anything else is read from the extension fields.
    pub fn field_value(&self, field: &str) -> FieldValue {
        let text = |v: &Option<String>| match v {
            Some(s) => FieldValue::Text(s.clone()),
            None => FieldValue::Absent,
        };
        match field.to_ascii_lowercase().as_str() {
            "id" => FieldValue::Text(self.id.0.clone()),
            "name" => text(&self.name),
            "description" => text(&self.description),
            "brand" => text(&self.brand),
            "category" | "family" => text(&self.category),
            "price" | "unitprice" | "unit_price" => FieldValue::Number(self.unit_price),
            "stock" => FieldValue::Number(self.stock as f64),
            "displayurl" | "display_url" => text(&self.display_url),
            _ => self
                .extra
                .get(field)
                .map(FieldValue::from_json)
                .unwrap_or(FieldValue::Absent),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A field value as seen by the generic comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Number(f64),
}

impl FieldValue {
    fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Absent,
            JsonValue::String(s) => FieldValue::Text(s.clone()),
            JsonValue::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Total, loose ordering.
    ///
    /// When either side is a number, the other side is read as a number too
    /// (numeric text parses, absent and blank count as 0) and the pair
    /// compares numerically. Otherwise both compare by their text rendering,
    /// absent rendering as "".
    pub fn loose_cmp(&self, other: &Self) -> Ordering {
        let numeric = match (self, other) {
            (FieldValue::Number(a), rhs) => rhs.as_number().map(|b| (*a, b)),
            (lhs, FieldValue::Number(b)) => lhs.as_number().map(|a| (a, *b)),
            _ => None,
        };
        match numeric {
            Some((a, b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            None => self.render().cmp(&other.render()),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Absent => Some(0.0),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) if s.trim().is_empty() => Some(0.0),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    fn render(&self) -> String {
        match self {
            FieldValue::Absent => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl RawProduct {
    /// Apply defaults and validate the record.
    ///
    /// - a missing or blank `Id` is rejected
    /// - missing or non-finite price becomes 0; negative prices are kept
    /// - missing, non-finite or negative stock becomes 0; fractions truncate
    /// - empty text fields become `None`
    /// - `Images` and `Tags` are split on commas, trimmed, empties dropped
    pub fn normalize(self) -> DomainResult<Product> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => ProductId(id),
            _ => return Err(DomainError::invalid_id("product record has no Id")),
        };

        let unit_price = match self.unit_price {
            Some(p) if p.is_finite() => {
                if p < 0.0 {
                    tracing::warn!(product_id = %id, price = p, "negative unit price kept as-is");
                }
                p
            }
            Some(p) => {
                tracing::warn!(product_id = %id, price = p, "non-finite unit price defaulted to 0");
                0.0
            }
            None => 0.0,
        };

        let stock = match self.stock {
            Some(s) if s.is_finite() && s >= 0.0 => s.trunc() as u64,
            Some(s) => {
                tracing::warn!(product_id = %id, stock = s, "invalid stock defaulted to 0");
                0
            }
            None => 0,
        };

        Ok(Product {
            id,
            name: non_empty(self.name),
            description: non_empty(self.description),
            brand: non_empty(self.brand),
            category: non_empty(self.family),
            unit_price,
            stock,
            images: split_list(self.images.as_deref()),
            display_url: non_empty(self.display_url),
            tags: split_list(self.tags.as_deref()),
            extra: self.extra,
        })
    }
}

/// Normalize a batch of raw records.
///
/// Records without an id are skipped (logged); duplicate ids keep their first
/// occurrence.
pub fn normalize_all(raw: impl IntoIterator<Item = RawProduct>) -> Vec<Product> {
    let normalized = raw.into_iter().enumerate().filter_map(|(index, record)| {
        match record.normalize() {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping product record");
                None
            }
        }
    });
    dedup_by_id(normalized)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

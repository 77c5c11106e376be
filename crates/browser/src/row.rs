//! Display rows: per-product fields the view needs beyond the record itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shelfview_catalog::{Product, ProductId};

/// Brand label shown when a product has none.
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: String,
    pub unit_price: f64,
    pub stock: u64,
    pub is_expanded: bool,
    pub expanded_key: String,
    pub image_count: usize,
    pub has_images: bool,
    pub has_multiple_images: bool,
    /// Carousel image, falling back to the display URL.
    pub current_image: Option<String>,
    /// 1-based position of `current_image` in the carousel.
    pub image_index: usize,
    pub tags: Vec<String>,
}

impl ProductRow {
    pub fn from_product(
        product: &Product,
        expanded: Option<&ProductId>,
        carousel: &BTreeMap<ProductId, usize>,
    ) -> Self {
        let position = carousel.get(&product.id).copied().unwrap_or(0);
        let current_image = product
            .images
            .get(position)
            .or(product.display_url.as_ref())
            .cloned();

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            brand: product
                .brand
                .clone()
                .unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            unit_price: product.unit_price,
            stock: product.stock,
            is_expanded: expanded == Some(&product.id),
            expanded_key: format!("{}-expanded", product.id),
            image_count: product.images.len(),
            has_images: !product.images.is_empty(),
            has_multiple_images: product.images.len() > 1,
            current_image,
            image_index: position + 1,
            tags: product.tags.clone(),
        }
    }
}

//! The product catalog and its two filter surfaces.

use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, Product, ProductId};

/// A category with the number of catalog products in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
}

/// Filters products for the sales grid.
///
/// `category_id` is either the literal `"all"` or a category id; an unknown id
/// matches nothing rather than everything. The search matches name, category
/// label, or description, case-insensitively, and an empty search matches
/// every product.
pub fn filter_catalog<'a>(
    products: &'a [Product],
    category_id: &str,
    search_text: &str,
) -> Vec<&'a Product> {
    let needle = search_text.to_lowercase();
    let category = Category::from_id(category_id);
    products
        .iter()
        .filter(|product| {
            let matches_category = match category {
                _ if category_id == "all" => true,
                Some(wanted) => product.category == wanted,
                None => false,
            };
            let matches_search = product.name.to_lowercase().contains(&needle)
                || product.category.label().to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);
            matches_category && matches_search
        })
        .collect()
}

/// Filters products for the gift box picker.
///
/// Same category convention as [`filter_catalog`], but only in-stock products
/// qualify and the search matches name or category label instead of the
/// description.
pub fn pickable_chocolates<'a>(
    products: &'a [Product],
    category_id: &str,
    search_text: &str,
) -> Vec<&'a Product> {
    let needle = search_text.to_lowercase();
    let category = Category::from_id(category_id);
    products
        .iter()
        .filter(|product| {
            if !product.in_stock {
                return false;
            }
            let matches_category = match category {
                _ if category_id == "all" => true,
                Some(wanted) => product.category == wanted,
                None => false,
            };
            let matches_search = product.name.to_lowercase().contains(&needle)
                || product.category.label().to_lowercase().contains(&needle);
            matches_category && matches_search
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn filter(&self, category_id: &str, search_text: &str) -> Vec<&Product> {
        filter_catalog(&self.products, category_id, search_text)
    }

    pub fn pickable(&self, category_id: &str, search_text: &str) -> Vec<&Product> {
        pickable_chocolates(&self.products, category_id, search_text)
    }

    /// Product counts per category, in the declared category order. Counts
    /// include out-of-stock products.
    pub fn category_counts(&self) -> Vec<CategorySummary> {
        Category::ALL
            .iter()
            .map(|&category| CategorySummary {
                category,
                count: self.products.iter().filter(|product| product.category == category).count(),
            })
            .collect()
    }
}

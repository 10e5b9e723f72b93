//! Products, the catalog and the shopping list.
//!
//! A product's `location` is only meaningful after the grid builder has
//! placed it on a shelf. Anything read back from persisted JSON is treated
//! as untrusted: the location is parsed leniently and later replaced.

use std::collections::HashMap;

use log::warn;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::point::GridCoord;
use crate::error::CatalogError;

/// A catalog product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category (e.g. "Dairy")
    pub category: String,
    /// Unit price
    #[serde(default)]
    pub price: f64,
    /// Aisle label
    #[serde(default)]
    pub aisle: String,
    /// Shelf cell, authoritative only once placed on the grid
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<GridCoord>,
}

impl Product {
    /// Create a product with no location
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            aisle: String::new(),
            location: None,
        }
    }

    /// Set the aisle label
    pub fn with_aisle(mut self, aisle: impl Into<String>) -> Self {
        self.aisle = aisle.into();
        self
    }

    /// Set a location
    pub fn with_location(mut self, location: GridCoord) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Coord { x: i32, y: i32 },
    Other(IgnoredAny),
}

/// Accept any JSON for `location`; anything but integer `{x, y}` becomes `None`.
fn lenient_location<'de, D>(deserializer: D) -> Result<Option<GridCoord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLocation>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawLocation::Coord { x, y }) => Some(GridCoord::new(x, y)),
        Some(RawLocation::Other(_)) | None => None,
    })
}

/// One shopping list entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// The product
    pub product: Product,
    /// Quantity to collect
    pub quantity: u32,
}

/// Ordered shopping list; order is the waypoint visiting order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list of single-quantity items
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            items: products
                .into_iter()
                .map(|product| ShoppingItem {
                    product,
                    quantity: 1,
                })
                .collect(),
        }
    }

    /// Parse the persisted JSON form: `[{"product": {...}, "quantity": n}]`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<ShoppingItem> = serde_json::from_str(json)?;
        Ok(Self { items })
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Entries in visiting order
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Mutable entries (used to write back shelf placements)
    pub(crate) fn items_mut(&mut self) -> &mut [ShoppingItem] {
        &mut self.items
    }

    /// Products in visiting order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.items.iter().map(|item| &item.product)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Is a product id on the list?
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.product.id == id)
    }

    /// Shopping list entry whose product sits at `coord`
    pub fn item_at(&self, coord: GridCoord) -> Option<&ShoppingItem> {
        self.items
            .iter()
            .find(|item| item.product.location == Some(coord))
    }

    /// Add one unit of a product: bumps the quantity if listed, else appends
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(ShoppingItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Total quantity across entries
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total price across entries
    pub fn total_price(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }
}

/// Static product registry keyed by id
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog; later duplicates of an id are ignored
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        let mut unique = Vec::with_capacity(products.len());
        for product in products {
            if index.contains_key(&product.id) {
                warn!("[Catalog] duplicate product id '{}' ignored", product.id);
                continue;
            }
            index.insert(product.id.clone(), unique.len());
            unique.push(product);
        }
        Self {
            products: unique,
            index,
        }
    }

    /// Parse a JSON array of products
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Look up a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// All products in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Is the catalog empty?
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace every listed product with its canonical catalog entry.
    ///
    /// Entries whose id is unknown are kept as-is (their location still gets
    /// overwritten by shelf placement).
    pub fn canonicalize(&self, list: &ShoppingList) -> ShoppingList {
        let items = list
            .items()
            .iter()
            .map(|item| match self.get(&item.product.id) {
                Some(canonical) => ShoppingItem {
                    product: canonical.clone(),
                    quantity: item.quantity,
                },
                None => {
                    warn!(
                        "[Catalog] product '{}' not in catalog, keeping persisted entry",
                        item.product.id
                    );
                    item.clone()
                }
            })
            .collect();
        ShoppingList { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Product {
        Product::new("1", "Milk", "Dairy", 3.99).with_location(GridCoord::new(2, 2))
    }

    #[test]
    fn test_lenient_location() {
        let json = r#"[
            {"product": {"id": "1", "name": "Milk", "category": "Dairy", "price": 3.99,
                         "location": {"x": 2, "y": 2}}, "quantity": 1},
            {"product": {"id": "2", "name": "Cheese", "category": "Dairy", "price": 4.99,
                         "location": {"x": "two", "y": 2}}, "quantity": 2},
            {"product": {"id": "3", "name": "Yogurt", "category": "Dairy", "price": 2.99},
             "quantity": 1},
            {"product": {"id": "4", "name": "Butter", "category": "Dairy", "price": 3.49,
                         "location": null, "image": "x"}, "quantity": 1}
        ]"#;
        let list = ShoppingList::from_json(json).unwrap();
        let locations: Vec<_> = list.products().map(|p| p.location).collect();
        assert_eq!(
            locations,
            vec![Some(GridCoord::new(2, 2)), None, None, None]
        );
        assert_eq!(list.total_quantity(), 5);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            ShoppingList::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_add_increments_quantity() {
        let mut list = ShoppingList::new();
        list.add(milk());
        list.add(milk());
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].quantity, 2);
        assert!((list.total_price() - 7.98).abs() < 1e-9);
    }

    #[test]
    fn test_canonicalize_replaces_persisted_product() {
        let catalog = Catalog::new(vec![milk()]);
        let stale = Product::new("1", "Old Milk", "Stale", 0.0).with_location(GridCoord::new(99, 99));
        let list = ShoppingList::from_products([stale, Product::new("x", "Unknown", "Misc", 1.0)]);

        let canonical = catalog.canonicalize(&list);
        assert_eq!(canonical.items()[0].product, milk());
        assert_eq!(canonical.items()[1].product.id, "x");
    }

    #[test]
    fn test_catalog_ignores_duplicates() {
        let catalog = Catalog::new(vec![milk(), Product::new("1", "Dup", "Dairy", 1.0)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("1").map(|p| p.name.as_str()), Some("Milk"));
    }
}

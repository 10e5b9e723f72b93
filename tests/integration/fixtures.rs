//! Shared test data.

use marga_nav::{Catalog, Grid, GridMapBuilder, MargaConfig, Product};

/// A small grocery catalog. Locations are where the store map shows each
/// product; shelf placement for the shopping list is separate.
pub fn catalog() -> Catalog {
    Catalog::from_json(
        r#"[
        {"id": "1", "name": "Whole Milk", "category": "Dairy", "price": 3.99,
         "aisle": "A1", "location": {"x": 1, "y": 2}},
        {"id": "2", "name": "Sourdough Bread", "category": "Bakery", "price": 4.49,
         "aisle": "A1", "location": {"x": 4, "y": 2}},
        {"id": "3", "name": "Cheddar Cheese", "category": "Dairy", "price": 5.49,
         "aisle": "A1", "location": {"x": 1, "y": 3}},
        {"id": "4", "name": "Strawberry Jam", "category": "Pantry", "price": 3.29,
         "aisle": "A2", "location": {"x": 5, "y": 2}},
        {"id": "5", "name": "Penne Pasta", "category": "Pantry", "price": 1.99,
         "aisle": "A2", "location": {"x": 8, "y": 2}},
        {"id": "6", "name": "Free Range Eggs", "category": "Dairy", "price": 4.19,
         "aisle": "A3", "location": {"x": 9, "y": 2}},
        {"id": "7", "name": "Basmati Rice", "category": "Grains", "price": 6.99,
         "aisle": "A4", "location": {"x": 13, "y": 2}},
        {"id": "8", "name": "Chicken Breast", "category": "Meat", "price": 8.99,
         "aisle": "A4", "location": {"x": 16, "y": 2}}
    ]"#,
    )
    .unwrap()
}

/// Catalog products by id, in the given order
pub fn products(catalog: &Catalog, ids: &[&str]) -> Vec<Product> {
    ids.iter()
        .map(|id| catalog.get(id).cloned().unwrap())
        .collect()
}

/// Config with traffic off so sessions are deterministic
pub fn quiet_config() -> MargaConfig {
    let mut config = MargaConfig::default();
    config.traffic.enabled = false;
    config
}

/// The default store with nothing placed
pub fn empty_store() -> Grid {
    GridMapBuilder::with_defaults()
        .unwrap()
        .build(&mut [])
        .unwrap()
}

/// `n` distinct products
pub fn numbered_products(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| Product::new(format!("p{i}"), format!("Product {i}"), "General", 1.0))
        .collect()
}

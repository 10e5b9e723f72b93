//! Store layout and shelf placement.

use std::collections::HashSet;

use marga_nav::{CellKind, GridCoord, GridMapBuilder, LayoutError, StoreLayout};

use crate::fixtures::numbered_products;

#[test]
fn build_is_deterministic() {
    let builder = GridMapBuilder::with_defaults().unwrap();
    let mut first = numbered_products(40);
    let mut second = numbered_products(40);

    let a = builder.build(&mut first).unwrap();
    let b = builder.build(&mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(first, second);
}

#[test]
fn every_product_gets_its_own_shelf() {
    let builder = GridMapBuilder::with_defaults().unwrap();
    let mut products = numbered_products(builder.capacity());
    let grid = builder.build(&mut products).unwrap();

    let locations: HashSet<GridCoord> = products.iter().map(|p| p.location.unwrap()).collect();
    assert_eq!(locations.len(), products.len());
    for product in &products {
        let cell = grid.get(product.location.unwrap()).unwrap();
        assert_eq!(cell.kind, CellKind::Product);
        assert_eq!(cell.product.as_ref().map(|p| p.id.as_str()), Some(product.id.as_str()));
    }
}

#[test]
fn capacity_overflow_is_reported() {
    let builder = GridMapBuilder::with_defaults().unwrap();
    assert_eq!(builder.capacity(), 136);

    let mut products = numbered_products(137);
    let err = builder.build(&mut products).unwrap_err();

    assert_eq!(
        err,
        LayoutError::CapacityExceeded {
            requested: 137,
            available: 136
        }
    );
    assert!(products.iter().all(|p| p.location.is_none()));
}

#[test]
fn default_store_shape() {
    let grid = GridMapBuilder::with_defaults()
        .unwrap()
        .build(&mut [])
        .unwrap();

    assert_eq!((grid.width(), grid.height()), (18, 24));
    assert_eq!(grid.entrance(), Some(GridCoord::new(9, 23)));
    assert_eq!(grid.checkout(), Some(GridCoord::new(9, 0)));

    // Border is walled except for the two doors
    for cell in grid.cells() {
        let GridCoord { x, y } = cell.coord;
        let border = x == 0 || y == 0 || x == 17 || y == 23;
        if border && !matches!(cell.kind, CellKind::Entrance | CellKind::Checkout) {
            assert_eq!(cell.kind, CellKind::Wall, "border cell {}", cell.coord);
        }
    }

    // Cross-aisle rows are open end to end inside the walls
    for y in [1, 6, 12, 18, 22] {
        for x in 1..17 {
            assert_eq!(grid.kind(GridCoord::new(x, y)), Some(CellKind::Aisle));
        }
    }
}

#[test]
fn oversized_aisle_layout_fails_fast() {
    let layout = StoreLayout {
        aisle_count: 5,
        ..Default::default()
    };
    assert!(matches!(
        GridMapBuilder::new(layout),
        Err(LayoutError::AisleOutOfBounds { aisle: 4, .. })
    ));

    let layout = StoreLayout {
        cross_aisles: vec![1, 23],
        ..Default::default()
    };
    assert!(matches!(
        GridMapBuilder::new(layout),
        Err(LayoutError::CrossAisleOutOfBounds { y: 23, .. })
    ));
}

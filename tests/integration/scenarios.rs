//! End-to-end scenarios over fixed stores.

use std::collections::HashSet;

use marga_nav::events::{EventGenerator, VoiceKind};
use marga_nav::{Grid, GridCoord, GridMapBuilder, RoutePlanner, ShoppingList};

use crate::fixtures::{catalog, products};

/// 18x24 store, open floor inside the walls, two shelves on column 3
fn two_shelf_store() -> Grid {
    let mut rows: Vec<String> = Vec::new();
    rows.push("#".repeat(18));
    for y in 1..23 {
        let mut row: Vec<char> = std::iter::once('#')
            .chain(std::iter::repeat_n('=', 16))
            .chain(std::iter::once('#'))
            .collect();
        if y == 5 || y == 11 {
            row[3] = 'P';
        }
        rows.push(row.into_iter().collect());
    }
    rows.push(format!("{}E{}", "#".repeat(9), "#".repeat(8)));

    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    Grid::from_ascii(&refs).unwrap()
}

#[test]
fn two_product_route_is_shortest() {
    let grid = two_shelf_store();
    let a = GridCoord::new(3, 5);
    let b = GridCoord::new(3, 11);
    let start = GridCoord::new(9, 23);

    let route = RoutePlanner::with_defaults(&grid)
        .plan(start, &[a, b], &HashSet::new())
        .unwrap();

    let expected = start.manhattan_distance(&a) + a.manhattan_distance(&b);
    assert_eq!(route.len(), expected as usize);
    assert_eq!(route.len(), 30);

    let at_a = route.index_of(a).unwrap();
    let at_b = route.index_of(b).unwrap();
    assert!(at_a < at_b);
    assert_eq!(route.waypoint_steps(), &[Some(23), Some(29)]);
    assert_eq!(route.end(), b);
}

#[test]
fn suggestions_exclude_list_and_declines() {
    let catalog = catalog();
    let builder = GridMapBuilder::with_defaults().unwrap();
    let mut list = ShoppingList::from_products(products(&catalog, &["1", "2"]));
    let grid = builder.build_for(&mut list).unwrap();
    let placed: Vec<_> = list.products().cloned().collect();
    let route = RoutePlanner::with_defaults(&grid)
        .plan_products(grid.entrance().unwrap(), &placed, &HashSet::new())
        .unwrap();

    let mut generator = EventGenerator::with_defaults();
    let mut offered = Vec::new();
    for index in 0..route.len() {
        let events = generator.on_step(&route, index, &list, &catalog);
        let Some(arrival) = events.arrival else {
            assert!(events.suggestions.is_empty());
            continue;
        };
        for suggestion in &events.suggestions {
            assert!(!list.contains(&suggestion.product.id));
            assert_ne!(suggestion.product.id, arrival.product.id);
            assert!(!generator.is_declined(&suggestion.product.id));
            assert_eq!(suggestion.source_id, arrival.product.id);
        }
        assert!(events.suggestions.windows(2).all(|w| w[0].distance <= w[1].distance));
        offered.push(
            events
                .suggestions
                .iter()
                .map(|s| s.product.id.clone())
                .collect::<Vec<_>>(),
        );

        // Turn down whatever came first
        if let Some(first) = events.suggestions.first() {
            generator.decline(first.product.id.clone());
        }
    }

    // Milk: cheese then eggs by distance. Bread: jam (cheese was declined)
    assert_eq!(offered, vec![vec!["3", "6"], vec!["4"]]);
}

#[test]
fn voice_stream_for_a_walk() {
    let catalog = catalog();
    let builder = GridMapBuilder::with_defaults().unwrap();
    let mut list = ShoppingList::from_products(products(&catalog, &["7"]));
    let grid = builder.build_for(&mut list).unwrap();
    let placed: Vec<_> = list.products().cloned().collect();
    let route = RoutePlanner::with_defaults(&grid)
        .plan_products(grid.entrance().unwrap(), &placed, &HashSet::new())
        .unwrap();

    let mut generator = EventGenerator::with_defaults();
    let voice: Vec<_> = (0..route.len())
        .flat_map(|i| generator.on_step(&route, i, &list, &catalog).voice)
        .collect();

    let directions = voice.iter().filter(|v| v.kind == VoiceKind::Direction).count();
    assert_eq!(directions, route.len());

    let progress_steps: Vec<usize> = voice
        .iter()
        .filter(|v| v.kind == VoiceKind::Progress)
        .filter_map(|v| v.step)
        .collect();
    assert!(progress_steps.iter().all(|s| s % 3 == 0 && *s > 0));
    assert_eq!(progress_steps.len(), (route.len() - 1) / 3);

    let arrivals: Vec<_> = voice.iter().filter(|v| v.kind == VoiceKind::Arrival).collect();
    assert_eq!(arrivals.len(), 1);
    assert_eq!(arrivals[0].product_id.as_deref(), Some("7"));

    let completions: Vec<&str> = voice
        .iter()
        .filter(|v| v.kind == VoiceKind::Completion)
        .map(|v| v.message.as_str())
        .collect();
    assert_eq!(
        completions,
        vec!["All items collected! Proceed to checkout.", "Navigation complete"]
    );
}

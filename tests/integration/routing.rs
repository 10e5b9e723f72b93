//! Route planning over store grids.

use std::collections::HashSet;

use marga_nav::core::CellKind;
use marga_nav::pathfinding::{Direction, PlannerConfig};
use marga_nav::{Grid, GridCoord, GridMapBuilder, PlanError, RoutePlanner};

use crate::fixtures::{catalog, empty_store, products};

fn assert_walkable(grid: &Grid, route: &marga_nav::Route) {
    for step in route.steps() {
        let kind = grid.kind(step.coord).unwrap();
        assert_ne!(kind, CellKind::Wall, "route steps onto wall at {}", step.coord);
    }
}

#[test]
fn routes_are_connected_and_ordered() {
    let grid = empty_store();
    let planner = RoutePlanner::with_defaults(&grid);
    let waypoints = [
        GridCoord::new(5, 14),
        GridCoord::new(12, 3),
        GridCoord::new(1, 20),
    ];

    let route = planner
        .plan(GridCoord::new(9, 23), &waypoints, &HashSet::new())
        .unwrap();

    assert!(route.is_connected());
    let mut previous = None;
    for (i, waypoint) in waypoints.iter().enumerate() {
        let step = route.waypoint_steps()[i].unwrap();
        assert_eq!(route.steps()[step].coord, *waypoint);
        assert!(previous.is_none_or(|p| step > p));
        previous = Some(step);
    }
    assert_eq!(route.end(), GridCoord::new(1, 20));
    assert_walkable(&grid, &route);
}

#[test]
fn shelves_are_never_walked_through() {
    let grid = empty_store();
    let planner = RoutePlanner::with_defaults(&grid);
    let waypoints = [GridCoord::new(4, 9), GridCoord::new(13, 15)];

    let route = planner
        .plan(GridCoord::new(9, 23), &waypoints, &HashSet::new())
        .unwrap();

    for step in route.steps() {
        if grid.kind(step.coord) == Some(CellKind::Product) {
            assert!(
                waypoints.contains(&step.coord),
                "walked through shelf {}",
                step.coord
            );
        }
    }
}

#[test]
fn forbidden_cells_are_avoided_when_possible() {
    let grid = empty_store();
    let planner = RoutePlanner::with_defaults(&grid);
    let start = GridCoord::new(9, 23);
    let goal = GridCoord::new(2, 9);

    let direct = planner.plan(start, &[goal], &HashSet::new()).unwrap();
    // Leave the entrance exit open; it is the only way out
    let forbidden: HashSet<GridCoord> = direct
        .coords()
        .skip(2)
        .take(direct.len() / 2)
        .collect();

    let detour = planner.plan(start, &[goal], &forbidden).unwrap();

    assert!(detour.is_connected());
    assert!(detour.coords().all(|c| !forbidden.contains(&c)));
    assert!(detour.len() >= direct.len());
}

#[test]
fn fully_blocking_forbidden_set_falls_back() {
    let grid = Grid::from_ascii(&[
        "#####",
        "#E==#",
        "###=#",
        "#P==#",
        "#####",
    ])
    .unwrap();
    let planner = RoutePlanner::with_defaults(&grid);
    let forbidden: HashSet<GridCoord> = [GridCoord::new(3, 2)].into();

    let route = planner
        .plan(GridCoord::new(1, 1), &[GridCoord::new(1, 3)], &forbidden)
        .unwrap();

    assert!(route.is_connected());
    assert!(route.coords().any(|c| c == GridCoord::new(3, 2)));
    assert_eq!(route.end(), GridCoord::new(1, 3));
}

#[test]
fn wall_waypoint_is_unreachable() {
    let grid = empty_store();
    let planner = RoutePlanner::with_defaults(&grid);

    let err = planner
        .plan(
            GridCoord::new(9, 23),
            &[GridCoord::new(2, 5), GridCoord::new(0, 5)],
            &HashSet::new(),
        )
        .unwrap_err();

    assert_eq!(
        err,
        PlanError::Unreachable {
            waypoint_index: 1,
            target: GridCoord::new(0, 5)
        }
    );
}

#[test]
fn product_route_ends_at_checkout() {
    let catalog = catalog();
    let builder = GridMapBuilder::with_defaults().unwrap();
    let mut list = products(&catalog, &["5", "1", "8"]);
    let grid = builder.build(&mut list).unwrap();

    let route = RoutePlanner::with_defaults(&grid)
        .plan_products(GridCoord::new(9, 23), &list, &HashSet::new())
        .unwrap();

    assert_eq!(route.waypoints().len(), 4);
    assert_eq!(route.end(), GridCoord::new(9, 0));
    assert_walkable(&grid, &route);

    let config = PlannerConfig {
        route_to_checkout: false,
        ..Default::default()
    };
    let route = RoutePlanner::new(&grid, config)
        .plan_products(GridCoord::new(9, 23), &list, &HashSet::new())
        .unwrap();
    assert_eq!(route.end(), list[2].location.unwrap());
}

#[test]
fn unplaced_product_is_rejected() {
    let catalog = catalog();
    let grid = empty_store();
    let mut list = products(&catalog, &["1"]);
    list[0].location = None;

    let err = RoutePlanner::with_defaults(&grid)
        .plan_products(GridCoord::new(9, 23), &list, &HashSet::new())
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidLocation { ref product_id, .. } if product_id == "1"));
}

#[test]
fn steps_carry_directions_and_distances() {
    let grid = empty_store();
    let route = RoutePlanner::with_defaults(&grid)
        .plan(GridCoord::new(10, 22), &[GridCoord::new(10, 17)], &HashSet::new())
        .unwrap();

    assert_eq!(route.len(), 5);
    assert!(route.steps().iter().all(|s| s.direction == Direction::Up));
    assert_eq!(route.total_distance(), 10);
    assert_eq!(route.remaining_distance(0), 8);
    assert_eq!(route.eta_minutes(0), 2);
}

//! Shopper motion along planned routes.

use std::collections::HashSet;
use std::f32::consts::PI;
use std::sync::Arc;

use approx::assert_relative_eq;
use marga_nav::motion::{AdvancePolicy, MotionConfig, MotionPhase};
use marga_nav::{GridCoord, MovementSimulator, RoutePlanner};

use crate::fixtures::empty_store;

fn store_route() -> Arc<marga_nav::Route> {
    let grid = empty_store();
    let route = RoutePlanner::with_defaults(&grid)
        .plan(
            GridCoord::new(9, 23),
            &[GridCoord::new(4, 9), GridCoord::new(13, 15), GridCoord::new(9, 0)],
            &HashSet::new(),
        )
        .unwrap();
    Arc::new(route)
}

#[test]
fn kinematics_stay_in_bounds_for_whole_walk() {
    let route = store_route();
    let config = MotionConfig::default();
    let max_speed = config.max_speed;
    let mut sim = MovementSimulator::new(config);
    sim.reset(Arc::clone(&route));

    let mut advances = 0;
    let mut last_cursor = 0;
    for _ in 0..200_000 {
        if let Some(advance) = sim.tick(1.0 / 60.0) {
            assert_eq!(advance.from + 1, advance.to);
            assert!(advance.to > last_cursor);
            last_cursor = advance.to;
            advances += 1;
        }
        let state = sim.state();
        assert!(state.speed >= 0.0 && state.speed <= max_speed);
        assert!(state.heading > -PI && state.heading <= PI);
        if sim.phase() == MotionPhase::Arrived {
            break;
        }
    }

    assert_eq!(sim.phase(), MotionPhase::Arrived);
    assert_eq!(advances, route.len() - 1);
    let end = route.end().to_world();
    assert_relative_eq!(sim.state().position.x, end.x, epsilon = 1e-4);
    assert_relative_eq!(sim.state().position.y, end.y, epsilon = 1e-4);
    assert!(!sim.state().moving);
}

#[test]
fn coarse_ticks_advance_one_step_at_a_time() {
    let route = store_route();
    let mut sim = MovementSimulator::with_defaults();
    sim.reset(Arc::clone(&route));

    let mut visited = vec![route.steps()[0].coord];
    for _ in 0..5_000 {
        if let Some(advance) = sim.tick(0.5) {
            assert_eq!(advance.to, visited.len());
            visited.push(advance.coord);
        }
        if sim.phase() == MotionPhase::Arrived {
            break;
        }
    }

    assert_eq!(sim.phase(), MotionPhase::Arrived);
    assert!(visited.iter().copied().eq(route.coords()));
}

#[test]
fn interval_policy_steps_only_on_advance() {
    let route = store_route();
    let mut sim = MovementSimulator::new(MotionConfig {
        advance_policy: AdvancePolicy::Interval,
        ..Default::default()
    });
    sim.reset(Arc::clone(&route));

    for _ in 0..600 {
        assert!(sim.tick(1.0 / 60.0).is_none());
    }
    assert_eq!(sim.cursor(), 0);

    let advance = sim.advance().unwrap();
    assert_eq!(advance.to, 1);
    // Shopper walks toward the new step instead of jumping
    let before = sim.state().position;
    for _ in 0..600 {
        sim.tick(1.0 / 60.0);
    }
    let target = route.steps()[1].coord.to_world();
    assert!(sim.state().position.distance(&target) < before.distance(&target));
}

#[test]
fn retreat_snaps_back() {
    let route = store_route();
    let mut sim = MovementSimulator::with_defaults();
    sim.reset(Arc::clone(&route));
    sim.advance();
    sim.advance();

    assert_eq!(sim.retreat(), Some(1));
    assert_eq!(sim.state().position, route.steps()[1].coord.to_world());
    assert_eq!(sim.state().speed, 0.0);
}

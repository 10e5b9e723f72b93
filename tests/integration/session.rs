//! Full navigation sessions through the engine.

use std::path::Path;

use marga_nav::events::{TrafficLevel, VoiceKind};
use marga_nav::motion::AdvancePolicy;
use marga_nav::{
    EngineError, GridCoord, MargaConfig, NavigationEngine, NavigationStatus, ShoppingList,
    VoiceIntent,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::fixtures::{catalog, products, quiet_config};

fn engine_with(config: MargaConfig, ids: &[&str]) -> NavigationEngine {
    let catalog = catalog();
    let list = ShoppingList::from_products(products(&catalog, ids));
    let mut engine = NavigationEngine::new(config, catalog).unwrap();
    engine.set_shopping_list(list).unwrap();
    engine
}

fn tick_until_done(engine: &mut NavigationEngine, dt: f32, max_ticks: usize) {
    for _ in 0..max_ticks {
        if engine.status() != NavigationStatus::Navigating {
            return;
        }
        engine.tick(dt);
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let config = MargaConfig::load(Path::new("configs/marga.yaml")).unwrap();
    assert_eq!(config, MargaConfig::default());
}

#[test]
fn session_visits_every_product() {
    let mut engine = engine_with(quiet_config(), &["5", "1", "8"]);
    engine.start().unwrap();

    tick_until_done(&mut engine, 1.0 / 60.0, 200_000);

    assert_eq!(engine.status(), NavigationStatus::Complete);
    let progress = engine.progress();
    assert_eq!(progress.items_collected, 3);
    assert_eq!(progress.total_items, 3);
    assert_eq!(progress.remaining_distance, 0);
    assert_eq!(progress.eta_minutes, 0);
    assert_eq!(engine.movement().cell(), GridCoord::new(9, 0));

    // Final grid marks every product reached and the shopper at checkout
    let grid = engine.grid();
    for product in engine.shopping_list().products() {
        let cell = grid.get(product.location.unwrap()).unwrap();
        assert!(cell.annotations.reached);
    }
    let current: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.annotations.is_current)
        .map(|c| c.coord)
        .collect();
    assert_eq!(current, vec![GridCoord::new(9, 0)]);
}

#[test]
fn interval_session_completes_on_timer() {
    let mut config = quiet_config();
    config.motion.advance_policy = AdvancePolicy::Interval;
    config.motion.step_interval_secs = 0.5;
    let mut engine = engine_with(config, &["1"]);
    engine.start().unwrap();

    let steps = engine.route().len();
    // One advance per half second, plus slack
    tick_until_done(&mut engine, 0.1, steps * 5 + 10);

    assert_eq!(engine.status(), NavigationStatus::Complete);
    assert_eq!(engine.current_step(), steps - 1);
}

#[test]
fn restart_replans_from_entrance() {
    let mut engine = engine_with(quiet_config(), &["1", "2"]);
    engine.start().unwrap();
    for _ in 0..10 {
        engine.advance_step().unwrap();
    }
    let first = engine.route();

    engine.start().unwrap();

    assert_eq!(engine.current_step(), 0);
    assert_eq!(*engine.route(), *first);
    assert!(engine.visited_products().is_empty());
    assert_eq!(engine.visited_cells().len(), 1);
}

#[test]
fn accepting_mid_route_keeps_walked_prefix() {
    let mut engine = engine_with(quiet_config(), &["1", "2"]);
    engine.start().unwrap();
    let milk_step = engine.route().waypoint_steps()[0].unwrap();
    while engine.current_step() < milk_step {
        engine.advance_step().unwrap();
    }
    let before = engine.route();
    let cursor = engine.current_step();
    let position = engine.movement().position;

    engine.accept_suggestion("6").unwrap();

    let after = engine.route();
    assert_eq!(&after.steps()[..=cursor], &before.steps()[..=cursor]);
    assert!(after.is_connected());
    assert_eq!(engine.current_step(), cursor);
    assert_eq!(engine.movement().position, position);

    // Eggs got the next free shelf and the new route reaches it before checkout
    let eggs = engine
        .shopping_list()
        .products()
        .find(|p| p.id == "6")
        .and_then(|p| p.location)
        .unwrap();
    assert_eq!(eggs, GridCoord::new(1, 3));
    let eggs_step = after.index_of(eggs).unwrap();
    assert!(eggs_step > cursor);
    assert_eq!(after.end(), GridCoord::new(9, 0));

    tick_until_done(&mut engine, 1.0 / 60.0, 200_000);
    assert_eq!(engine.status(), NavigationStatus::Complete);
    assert_eq!(engine.visited_products().len(), 3);
}

#[test]
fn accepting_after_completion_resumes() {
    let mut engine = engine_with(quiet_config(), &["1"]);
    engine.start().unwrap();
    tick_until_done(&mut engine, 1.0 / 60.0, 200_000);
    assert_eq!(engine.status(), NavigationStatus::Complete);
    engine.drain_voice();

    engine.accept_suggestion("3").unwrap();
    assert_eq!(engine.status(), NavigationStatus::Navigating);
    tick_until_done(&mut engine, 1.0 / 60.0, 200_000);

    assert_eq!(engine.status(), NavigationStatus::Complete);
    let completions = engine
        .drain_voice()
        .into_iter()
        .filter(|v| v.kind == VoiceKind::Completion)
        .count();
    // "All items collected" again, then "Navigation complete"
    assert_eq!(completions, 2);
}

#[test]
fn lifecycle_errors() {
    let mut engine = NavigationEngine::new(quiet_config(), catalog()).unwrap();
    assert_eq!(engine.start(), Err(EngineError::EmptyShoppingList));
    assert_eq!(engine.pause(), Err(EngineError::NotNavigating));
    assert_eq!(engine.resume(), Err(EngineError::NotNavigating));
    assert_eq!(engine.advance_step(), Err(EngineError::NotNavigating));

    let too_many = ShoppingList::from_products(
        (0..137).map(|i| marga_nav::Product::new(format!("x{i}"), "Thing", "Misc", 1.0)),
    );
    let err = engine.set_shopping_list(too_many).unwrap_err();
    assert_eq!(err.code(), "CAPACITY_EXCEEDED");
    assert!(engine.shopping_list().is_empty());
}

#[test]
fn spoken_requests_drive_the_session() {
    let mut engine = engine_with(quiet_config(), &["1", "2"]);
    engine.start().unwrap();

    let answer = engine.respond_to(VoiceIntent::parse("how far is it, what's the distance?"));
    assert_eq!(
        answer.message,
        format!("{}m remaining.", engine.route().remaining_distance(0))
    );

    let answer = engine.respond_to(VoiceIntent::parse("please pause"));
    assert_eq!(answer.message, "Navigation paused.");
    assert_eq!(engine.status(), NavigationStatus::Paused);

    let answer = engine.respond_to(VoiceIntent::parse("what's the traffic like"));
    assert!(answer.message.starts_with("Traffic is "));

    let queued = engine.drain_voice();
    assert_eq!(queued.last().map(|v| v.kind), Some(VoiceKind::Info));
}

#[test]
fn seeded_traffic_is_reproducible() {
    let run = || {
        let mut config = MargaConfig::default();
        config.traffic.interval_secs = 2.0;
        config.traffic.heavy_alert_probability = 1.0;
        let catalog = catalog();
        let list = ShoppingList::from_products(products(&catalog, &["8"]));
        let mut engine =
            NavigationEngine::with_traffic_rng(config, catalog, SmallRng::seed_from_u64(7))
                .unwrap();
        engine.set_shopping_list(list).unwrap();
        engine.start().unwrap();

        let mut levels = Vec::new();
        for _ in 0..40 {
            engine.tick(1.0);
            levels.push(engine.traffic_level());
        }
        (levels, engine.drain_alerts())
    };

    let (levels_a, alerts_a) = run();
    let (levels_b, alerts_b) = run();
    assert_eq!(levels_a, levels_b);
    assert_eq!(alerts_a, alerts_b);
    for alert in &alerts_a {
        assert_eq!(alert.level, TrafficLevel::Heavy);
        assert!((1..=4).contains(&alert.aisle));
        assert!((1..=5).contains(&alert.delay_minutes));
    }
}

#[test]
fn suggestions_for_last_product_are_shown_on_completion() {
    let mut config = quiet_config();
    config.planner.route_to_checkout = false;
    let mut engine = engine_with(config, &["1"]);
    engine.start().unwrap();

    tick_until_done(&mut engine, 1.0 / 60.0, 200_000);

    assert_eq!(engine.status(), NavigationStatus::Complete);
    assert_eq!(engine.route().end(), GridCoord::new(1, 2));
    // Cheese sits next to the milk shelf, so it is offered first
    assert_eq!(
        engine.offered_suggestion().map(|s| s.product.id.as_str()),
        Some("3")
    );
    let shown = engine.drain_suggestions();
    assert!(!shown.is_empty());
    assert!(shown.iter().all(|s| s.source_id == "1"));
    assert!(
        engine
            .drain_voice()
            .iter()
            .any(|v| v.kind == VoiceKind::Suggestion)
    );
}

#[test]
fn back_to_back_arrivals_keep_earlier_suggestions() {
    let mut engine = engine_with(quiet_config(), &["1", "2"]);
    engine.start().unwrap();
    let bread_step = engine.route().waypoint_steps()[1].unwrap();
    // Stepping by hand outruns the display delay after milk
    while engine.current_step() < bread_step {
        engine.advance_step().unwrap();
    }
    for _ in 0..200 {
        engine.tick(1.0 / 60.0);
    }

    let mut sources: Vec<String> = engine
        .drain_suggestions()
        .into_iter()
        .map(|s| s.source_id)
        .collect();
    sources.dedup();
    assert_eq!(sources, vec!["1", "2"]);
}

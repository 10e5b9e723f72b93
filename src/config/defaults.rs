//! Default value functions for serde deserialization.

pub fn enabled() -> bool {
    true
}

pub fn grid_width() -> i32 {
    18
}

pub fn grid_height() -> i32 {
    24
}

pub fn aisle_count() -> usize {
    4
}

pub fn aisle_width() -> i32 {
    2
}

pub fn aisle_spacing() -> i32 {
    2
}

pub fn first_aisle_x() -> i32 {
    2
}

pub fn cross_aisles() -> Vec<i32> {
    vec![1, 6, 12, 18, 22]
}

pub fn max_iterations() -> usize {
    100_000
}

pub fn tick_hz() -> f32 {
    60.0
}

pub fn arrival_threshold() -> f32 {
    0.1
}

pub fn heading_ease() -> f32 {
    0.25
}

pub fn alignment_threshold() -> f32 {
    0.3
}

pub fn max_speed() -> f32 {
    2.0
}

pub fn acceleration() -> f32 {
    1.0
}

pub fn deceleration() -> f32 {
    3.0
}

pub fn step_interval_secs() -> f32 {
    1.5
}

pub fn progress_every() -> usize {
    3
}

pub fn max_suggestions() -> usize {
    3
}

pub fn suggestion_delay_secs() -> f32 {
    1.5
}

pub fn traffic_interval_secs() -> f32 {
    15.0
}

pub fn heavy_alert_probability() -> f64 {
    0.3
}

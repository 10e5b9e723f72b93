//! Integration tests for marga-nav
//!
//! Exercise the public API end to end: store layout, route planning,
//! shopper motion, event derivation and full engine sessions.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! ```

mod fixtures;
mod layout;
mod motion;
mod routing;
mod scenarios;
mod session;

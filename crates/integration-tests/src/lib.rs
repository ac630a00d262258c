//! Integration tests for IAP Lookup.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the relay
//! cargo run -p iap-lookup-relay
//!
//! # Run integration tests against it
//! cargo test -p iap-lookup-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `relay_lookup` - Relay HTTP interface tests (require a running relay)
//! - `resolver_live` - Resolver tests against the live public catalog
//!
//! Tests that need a running relay or outbound network access are
//! `#[ignore]`d so `cargo test` stays hermetic by default. Point
//! `RELAY_BASE_URL` at a non-default relay to test a deployed instance.

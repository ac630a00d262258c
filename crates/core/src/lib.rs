//! IAP Lookup Core - Shared types library.
//!
//! This crate provides common types used across all IAP Lookup components:
//! - `resolver` - Query classification and catalog resolution
//! - `relay` - Catalog relay service
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - App identifiers, summaries, candidates, and resolution outcomes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

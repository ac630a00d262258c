//! IAP Lookup Resolver - query classification and catalog resolution.
//!
//! This crate turns a raw user query (numeric app ID, App Store URL, bundle
//! identifier, or free-text name) into an application's metadata and its
//! in-app-purchase product identifiers.
//!
//! # Architecture
//!
//! - [`classify`] decides which kind of query the raw input is, without any
//!   network access.
//! - [`catalog::CatalogBackend`] is the seam to the upstream catalog: product
//!   lookup goes through the relay service, bundle lookup and free-text
//!   search go to the public catalog API. [`catalog::HttpCatalog`] is the
//!   `reqwest`-backed implementation.
//! - [`resolve::Resolver`] drives the call sequence for each query kind and
//!   produces a [`iap_lookup_core::Resolution`].
//! - [`render::RenderSink`] is the contract a front end implements to display
//!   outcomes; the resolver never touches a UI directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use iap_lookup_resolver::{HttpCatalog, Resolver, ResolverConfig};
//!
//! let catalog = HttpCatalog::new("https://relay.example.dev");
//! let resolver = Resolver::new(catalog, ResolverConfig::default());
//!
//! match resolver.resolve("com.example.app").await? {
//!     Resolution::Resolved { app, products } => { /* render */ }
//!     Resolution::NeedsDisambiguation(candidates) => { /* pick one */ }
//!     Resolution::NotFound => { /* no such app */ }
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod classify;
pub mod error;
pub mod render;
pub mod resolve;

pub use catalog::{CatalogBackend, CatalogError, HttpCatalog};
pub use classify::QueryKind;
pub use error::ResolveError;
pub use render::{RenderSink, render_error, render_resolution};
pub use resolve::{DEFAULT_HEALTH_TIMEOUT, Resolver, ResolverConfig};

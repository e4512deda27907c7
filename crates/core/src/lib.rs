//! ClothKart Core - Shared types library.
//!
//! This crate provides the common types used across the ClothKart workspace:
//! - `storefront` - the public-facing shop binary
//! - `integration-tests` - end-to-end tests driving the storefront in-process
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

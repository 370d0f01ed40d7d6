//! Mealfinder Core - Shared value types.
//!
//! This crate provides the value types used across Mealfinder components:
//! - `site` - The server-rendered recipe search site
//! - `integration-tests` - End-to-end tests against a mocked recipe API
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for recipe identifiers and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Mealfinder site library.
//!
//! Server-rendered recipe search backed by TheMealDB. This crate provides
//! the site as a library, allowing it to be tested and reused; the binary
//! only adds configuration, telemetry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cards;
pub mod config;
pub mod controllers;
pub mod error;
pub mod filters;
pub mod mealdb;
pub mod merge;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;

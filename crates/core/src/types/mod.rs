//! Core types for Mealfinder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod username;

pub use id::{RecipeId, RecipeIdError};
pub use username::{Username, UsernameError};

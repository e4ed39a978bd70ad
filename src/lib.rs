//! Cotejo library
//!
//! Review grid for collating expected vs. actual question lists.

pub mod app;
pub mod compare;
pub mod config;
pub mod constant;
pub mod grid;
pub mod loader;
pub mod style;

//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains a reusable state-space search engine under
//! [`utils::search`] and puzzle solutions organized by year that drive it.
//! Each solution uses the `AutoRegisterSolver` derive macro for automatic
//! plugin registration with the solver framework.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

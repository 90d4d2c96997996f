//! Advent of Code Solver Library
//!
//! A small, type-safe framework for running Advent of Code solutions.
//!
//! - [`AocParser`] turns raw input into shared data.
//! - [`PartSolver<N>`] solves part `N` from that shared data.
//! - [`Solver`] dispatches a runtime part number; `#[derive(AocSolver)]`
//!   writes it for you from the `PartSolver` impls.
//! - [`SolverRegistry`] maps (year, day) to factories; `#[derive(AutoRegisterSolver)]`
//!   submits a [`SolverPlugin`] so the registry can discover solvers at link time.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 1)]
//! struct Sum;
//!
//! impl AocParser for Sum {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split_whitespace()
//!             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sum {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sum>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1 2 3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Timing};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-exported for the AutoRegisterSolver derive
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

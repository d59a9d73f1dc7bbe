//! Shared test fixtures for LocalForge crates.
//!
//! - [`nqueens`] - N-Queens solution, variable accessors and score calculators
//! - [`shifts`] - shift assignment with a hard/soft score
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! localforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use localforge_test::nqueens::{create_nqueens_director, NQueensSolution};
//! ```

pub mod nqueens;
pub mod shifts;

pub use nqueens::{NQueensSolution, Queen};
pub use shifts::{Shift, ShiftSolution};

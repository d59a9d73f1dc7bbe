//! LocalForge Core - score types and solution traits
//!
//! This crate provides the fundamental abstractions shared by the solver:
//! - Score types for representing solution quality
//! - The [`PlanningSolution`] trait implemented by working solutions
//! - The error type used across the workspace

pub mod domain;
pub mod error;
pub mod score;

pub use domain::PlanningSolution;
pub use error::{LocalForgeError, Result};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreParseError, SimpleScore};

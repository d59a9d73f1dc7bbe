//! Move system for modifying planning solutions.
//!
//! Moves are the fundamental operations that modify planning variables
//! during local search. Each move knows how to create its own undo move
//! from the state it is about to overwrite.
//!
//! # Move Types
//!
//! - [`ChangeMove`]: assigns a value to one entity
//! - [`SwapMove`]: exchanges the values of two entities
//! - [`EitherMove`]: either of the above, produced by union selectors

mod change;
mod either;
mod swap;
mod traits;

#[cfg(test)]
mod tests;

pub use change::ChangeMove;
pub use either::EitherMove;
pub use swap::SwapMove;
pub use traits::{value_key, Move};

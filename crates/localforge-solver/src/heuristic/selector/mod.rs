//! Selectors that produce the moves a step evaluates.
//!
//! Selectors are pull-based: the decider asks for the next move until the
//! selector runs out, so random selectors can be never ending.

mod accessor;
mod change;
mod either;
mod list;
mod swap;
mod traits;
mod union;

#[cfg(test)]
mod tests;

pub use accessor::VariableAccessor;
pub use change::ChangeMoveSelector;
pub use either::EitherMoveSelector;
pub use list::ListMoveSelector;
pub use localforge_config::SelectionOrder;
pub use swap::SwapMoveSelector;
pub use traits::MoveSelector;
pub use union::UnionMoveSelector;

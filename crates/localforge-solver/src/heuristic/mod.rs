//! Heuristic building blocks: moves and move selectors.

pub mod r#move;
pub mod selector;

pub use r#move::{ChangeMove, EitherMove, Move, SwapMove};
pub use selector::{
    ChangeMoveSelector, EitherMoveSelector, ListMoveSelector, MoveSelector, SelectionOrder,
    SwapMoveSelector, UnionMoveSelector, VariableAccessor,
};

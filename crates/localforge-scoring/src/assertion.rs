//! Score corruption assertions.
//!
//! These checks recompute or compare scores and are only enabled in the
//! asserting environment modes. Each returns a
//! [`LocalForgeError::ScoreCorruption`] naming the action and both scores.

use std::fmt::Debug;

use localforge_core::{LocalForgeError, PlanningSolution, Result};
use tracing::error;

use crate::director::ScoreDirector;

/// Verifies that `working_score` equals the score recomputed from scratch.
pub fn assert_working_score_from_scratch<S, D>(
    score_director: &D,
    working_score: S::Score,
    completed_action: &dyn Debug,
) -> Result<()>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    let uncorrupted_score = score_director.calculate_score_from_scratch();
    if working_score != uncorrupted_score {
        error!(
            working_score = %working_score,
            uncorrupted_score = %uncorrupted_score,
            "Score corruption detected"
        );
        return Err(LocalForgeError::ScoreCorruption(format!(
            "the working score ({}) is not the uncorrupted score ({}) after completed action ({:?})",
            working_score, uncorrupted_score, completed_action
        )));
    }
    Ok(())
}

/// Verifies that undoing a move restored the score it started from.
///
/// `undo_score` is the score the director calculated right after the undo.
pub fn assert_expected_undo_score<S, D>(
    score_director: &D,
    before_move_score: S::Score,
    undo_score: S::Score,
    undo_move: &dyn Debug,
) -> Result<()>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    if undo_score != before_move_score {
        let uncorrupted_score = score_director.calculate_score_from_scratch();
        return Err(LocalForgeError::ScoreCorruption(format!(
            "undo move corruption: the before move score ({}) is not the undo score ({}) \
             which is the uncorrupted score ({}) of the working solution after undo move ({:?}). \
             Enable the full assert environment mode to find the cause",
            before_move_score, undo_score, uncorrupted_score, undo_move
        )));
    }
    Ok(())
}

/// Verifies that the score after an action is the score it was predicted to be.
pub fn assert_expected_working_score<S: PlanningSolution>(
    expected_working_score: S::Score,
    working_score: S::Score,
    completed_action: &dyn Debug,
) -> Result<()> {
    if expected_working_score != working_score {
        return Err(LocalForgeError::ScoreCorruption(format!(
            "the expected working score ({}) is not the working score ({}) after completed action ({:?})",
            expected_working_score, working_score, completed_action
        )));
    }
    Ok(())
}

//! Two-level score for problems with hard and soft constraints.

use std::cmp::Ordering;
use std::fmt;

use super::traits::Score;

/// Hard level first, soft level as the tie-break.
///
/// Feasible means no hard constraint is broken, so any feasible score
/// beats every infeasible one whatever their soft levels are.
///
/// ```
/// use localforge_core::{HardSoftScore, Score};
///
/// let broken = HardSoftScore::of(-1, 0);
/// let costly = HardSoftScore::of(0, -900);
/// assert!(costly > broken);
/// assert!(costly.is_feasible() && !broken.is_feasible());
/// assert_eq!(costly.to_string(), "0hard/-900soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    pub const fn of(hard: i64, soft: i64) -> Self {
        Self { hard, soft }
    }

    pub const fn hard(&self) -> i64 {
        self.hard
    }

    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    fn zero() -> Self {
        Self::of(0, 0)
    }

    fn levels_count() -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        match levels {
            [hard, soft] => Self::of(*hard, *soft),
            _ => panic!("a hard/soft score has 2 levels, got {}", levels.len()),
        }
    }

    impl_score_scale!(HardSoftScore { hard, soft } => of);
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hard, self.soft).cmp(&(other.hard, other.soft))
    }
}

impl_score_ops!(HardSoftScore { hard, soft } => of);

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({self})")
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of);

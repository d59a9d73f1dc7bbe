//! N-Queens problem test fixtures.
//!
//! Queens sit in fixed columns; the planning variable is the row. The score
//! is the negated number of attacking pairs (same row or same diagonal).
//!
//! # Example
//!
//! ```
//! use localforge_scoring::ScoreDirector;
//! use localforge_test::nqueens::create_nqueens_director;
//!
//! let mut director = create_nqueens_director(&[0, 2, 1, 3]);
//! let score = director.calculate_score();
//! assert_eq!(score.score(), -2);
//! ```

use std::collections::HashMap;

use localforge_core::{PlanningSolution, SimpleScore};
use localforge_scoring::{IncrementalScoreCalculator, IncrementalScoreDirector, SimpleScoreDirector};

/// A queen entity: `column` is a problem fact, `row` the planning variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Queen {
    pub id: i64,
    pub column: i64,
    pub row: Option<i64>,
}

impl Queen {
    pub fn new(id: i64, column: i64, row: Option<i64>) -> Self {
        Self { id, column, row }
    }
}

/// N-Queens problem solution.
#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub queens: Vec<Queen>,
    pub rows: Vec<i64>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    /// Creates a board with queens at the given rows, one per column.
    pub fn with_rows(rows: &[i64]) -> Self {
        let queens = rows
            .iter()
            .enumerate()
            .map(|(i, &row)| Queen::new(i as i64, i as i64, Some(row)))
            .collect();
        Self {
            queens,
            rows: (0..rows.len() as i64).collect(),
            score: None,
        }
    }

    /// Creates an n x n board with every queen on row 0.
    pub fn all_on_first_row(n: usize) -> Self {
        Self::with_rows(&vec![0; n])
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.queens.iter().all(|q| q.row.is_some())
    }
}

/// Typed getter for the row variable.
pub fn get_queen_row(s: &NQueensSolution, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

/// Typed setter for the row variable.
pub fn set_queen_row(s: &mut NQueensSolution, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

/// Number of queens.
pub fn queen_count(s: &NQueensSolution) -> usize {
    s.queens.len()
}

/// Value range of the row variable.
pub fn row_range(s: &NQueensSolution) -> &[i64] {
    &s.rows
}

/// Counts attacking pairs and returns the negated count.
pub fn calculate_conflicts(solution: &NQueensSolution) -> SimpleScore {
    let mut conflicts = 0i64;
    let queens = &solution.queens;

    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            if let (Some(row_i), Some(row_j)) = (queens[i].row, queens[j].row) {
                if row_i == row_j {
                    conflicts += 1;
                }
                let col_diff = (queens[j].column - queens[i].column).abs();
                if (row_i - row_j).abs() == col_diff {
                    conflicts += 1;
                }
            }
        }
    }

    SimpleScore::of(-conflicts)
}

/// Incremental N-Queens calculator keyed on rows and both diagonals.
///
/// With `forget_retract` set, it skips retracting a queen before a change,
/// which corrupts the incremental score on the first move.
#[derive(Clone, Debug, Default)]
pub struct NQueensIncrementalCalculator {
    row_counts: HashMap<i64, i64>,
    ascending_counts: HashMap<i64, i64>,
    descending_counts: HashMap<i64, i64>,
    conflicts: i64,
    forget_retract: bool,
}

impl NQueensIncrementalCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A deliberately broken calculator for corruption detection tests.
    pub fn corrupted() -> Self {
        Self {
            forget_retract: true,
            ..Self::default()
        }
    }

    fn insert(&mut self, queen: &Queen) {
        if let Some(row) = queen.row {
            for (counts, key) in [
                (&mut self.row_counts, row),
                (&mut self.ascending_counts, row - queen.column),
                (&mut self.descending_counts, row + queen.column),
            ] {
                let count = counts.entry(key).or_insert(0);
                self.conflicts += *count;
                *count += 1;
            }
        }
    }

    fn retract(&mut self, queen: &Queen) {
        if let Some(row) = queen.row {
            for (counts, key) in [
                (&mut self.row_counts, row),
                (&mut self.ascending_counts, row - queen.column),
                (&mut self.descending_counts, row + queen.column),
            ] {
                let count = counts.entry(key).or_insert(1);
                *count -= 1;
                self.conflicts -= *count;
            }
        }
    }
}

impl IncrementalScoreCalculator<NQueensSolution> for NQueensIncrementalCalculator {
    fn reset_working_solution(&mut self, solution: &NQueensSolution) {
        self.row_counts.clear();
        self.ascending_counts.clear();
        self.descending_counts.clear();
        self.conflicts = 0;
        for queen in &solution.queens {
            self.insert(queen);
        }
    }

    fn before_variable_changed(&mut self, solution: &NQueensSolution, entity_index: usize) {
        if self.forget_retract {
            return;
        }
        if let Some(queen) = solution.queens.get(entity_index) {
            self.retract(queen);
        }
    }

    fn after_variable_changed(&mut self, solution: &NQueensSolution, entity_index: usize) {
        if let Some(queen) = solution.queens.get(entity_index) {
            self.insert(queen);
        }
    }

    fn calculate_score(&self) -> SimpleScore {
        SimpleScore::of(-self.conflicts)
    }
}

/// Director type returned by [`create_nqueens_director`].
pub type NQueensDirector =
    SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;

/// Director type returned by [`create_incremental_nqueens_director`].
pub type NQueensIncrementalDirector =
    IncrementalScoreDirector<NQueensSolution, NQueensIncrementalCalculator>;

/// Creates a full-recalculation director over queens at the given rows.
pub fn create_nqueens_director(rows: &[i64]) -> NQueensDirector {
    SimpleScoreDirector::new(
        NQueensSolution::with_rows(rows),
        calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
    )
}

/// Creates an incremental director over queens at the given rows.
pub fn create_incremental_nqueens_director(rows: &[i64]) -> NQueensIncrementalDirector {
    IncrementalScoreDirector::new(
        NQueensSolution::with_rows(rows),
        NQueensIncrementalCalculator::new(),
    )
}

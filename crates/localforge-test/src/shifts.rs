//! Shift assignment test fixtures with a hard/soft score.
//!
//! Every shift needs one employee. Two shifts on the same day with the same
//! employee break a hard constraint; every assignment costs the employee's
//! id on the soft level, so lower ids are preferred.
//!
//! # Example
//!
//! ```
//! use localforge_core::HardSoftScore;
//! use localforge_test::shifts::{calculate_shift_score, ShiftSolution};
//!
//! let solution = ShiftSolution::with_employees(&[0, 0, 1], &[2, 2, 3]);
//! assert_eq!(calculate_shift_score(&solution), HardSoftScore::of(-1, -7));
//! ```

use localforge_core::{HardSoftScore, PlanningSolution};
use localforge_scoring::SimpleScoreDirector;

/// A shift entity: `day` is a problem fact, `employee` the planning variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Shift {
    pub day: i64,
    pub employee: Option<i64>,
}

/// Shift assignment solution.
#[derive(Clone, Debug)]
pub struct ShiftSolution {
    pub shifts: Vec<Shift>,
    pub employees: Vec<i64>,
    pub score: Option<HardSoftScore>,
}

impl ShiftSolution {
    /// Creates one shift per entry of `days`, assigned to `employees`.
    /// The employee range is `0..=max(employees)`.
    pub fn with_employees(days: &[i64], employees: &[i64]) -> Self {
        let shifts = days
            .iter()
            .zip(employees)
            .map(|(&day, &employee)| Shift {
                day,
                employee: Some(employee),
            })
            .collect();
        let employee_count = employees.iter().max().map_or(0, |max| max + 1);
        Self {
            shifts,
            employees: (0..employee_count).collect(),
            score: None,
        }
    }
}

impl PlanningSolution for ShiftSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.shifts.iter().all(|s| s.employee.is_some())
    }
}

pub fn get_shift_employee(s: &ShiftSolution, idx: usize) -> Option<i64> {
    s.shifts.get(idx).and_then(|shift| shift.employee)
}

pub fn set_shift_employee(s: &mut ShiftSolution, idx: usize, v: Option<i64>) {
    if let Some(shift) = s.shifts.get_mut(idx) {
        shift.employee = v;
    }
}

pub fn shift_count(s: &ShiftSolution) -> usize {
    s.shifts.len()
}

pub fn employee_range(s: &ShiftSolution) -> &[i64] {
    &s.employees
}

/// Hard: double bookings on one day. Soft: the sum of assigned employee ids.
pub fn calculate_shift_score(solution: &ShiftSolution) -> HardSoftScore {
    let shifts = &solution.shifts;
    let mut hard = 0i64;
    for (i, a) in shifts.iter().enumerate() {
        for b in &shifts[i + 1..] {
            if a.day == b.day && a.employee.is_some() && a.employee == b.employee {
                hard += 1;
            }
        }
    }
    let soft: i64 = shifts.iter().filter_map(|s| s.employee).sum();
    HardSoftScore::of(-hard, -soft)
}

/// Director type returned by [`create_shift_director`].
pub type ShiftDirector = SimpleScoreDirector<ShiftSolution, fn(&ShiftSolution) -> HardSoftScore>;

pub fn create_shift_director(days: &[i64], employees: &[i64]) -> ShiftDirector {
    SimpleScoreDirector::new(
        ShiftSolution::with_employees(days, employees),
        calculate_shift_score as fn(&ShiftSolution) -> HardSoftScore,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_booking_is_hard() {
        let clash = ShiftSolution::with_employees(&[0, 0, 0], &[1, 1, 1]);
        assert_eq!(calculate_shift_score(&clash), HardSoftScore::of(-3, -3));

        let spread = ShiftSolution::with_employees(&[0, 1, 2], &[1, 1, 1]);
        assert_eq!(calculate_shift_score(&spread), HardSoftScore::of(0, -3));
        assert_eq!(spread.employees, vec![0, 1]);
    }
}

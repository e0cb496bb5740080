//! # Grade Calculation
//!
//! Overall percentage across graded assignments, plus the letter grade on
//! the usual 90/80/70/60 cutoffs.
//!
//! Rows are free text; a row is skipped unless its score parses as a
//! number and its max score parses as a positive number. Ungraded rows
//! therefore do not pull the average down.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Letter grade from a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

impl Letter {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Letter::A
        } else if percentage >= 80.0 {
            Letter::B
        } else if percentage >= 70.0 {
            Letter::C
        } else if percentage >= 60.0 {
            Letter::D
        } else {
            Letter::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::F => "F",
        }
    }
}

/// One assignment row as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub max_score: String,
}

impl Assignment {
    pub fn new(name: impl Into<String>, score: impl Into<String>, max_score: impl Into<String>) -> Self {
        Assignment {
            id: Uuid::new_v4(),
            name: name.into(),
            score: score.into(),
            max_score: max_score.into(),
        }
    }

    /// (score, max) if the row counts toward the total
    pub fn scored(&self) -> Option<(f64, f64)> {
        let max = self.max_score.trim().parse::<f64>().ok()?;
        if !max.is_finite() || max <= 0.0 {
            return None;
        }
        let score = self.score.trim().parse::<f64>().ok().filter(|s| s.is_finite())?;
        Some((score, max))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentField {
    Name,
    Score,
    MaxScore,
}

/// Editable list of assignment rows; never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSheet {
    pub assignments: Vec<Assignment>,
}

impl GradeSheet {
    pub fn new() -> Self {
        GradeSheet {
            assignments: vec![Assignment::new("", "", "")],
        }
    }

    pub fn add_assignment(&mut self) -> Uuid {
        let row = Assignment::new("", "", "");
        let id = row.id;
        self.assignments.push(row);
        id
    }

    pub fn update_assignment(&mut self, id: Uuid, field: AssignmentField, value: impl Into<String>) -> bool {
        let Some(row) = self.assignments.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        let value = value.into();
        match field {
            AssignmentField::Name => row.name = value,
            AssignmentField::Score => row.score = value,
            AssignmentField::MaxScore => row.max_score = value,
        }
        true
    }

    /// Remove a row; the last one stays
    pub fn remove_assignment(&mut self, id: Uuid) -> Option<Assignment> {
        if self.assignments.len() <= 1 {
            return None;
        }
        let index = self.assignments.iter().position(|a| a.id == id)?;
        Some(self.assignments.remove(index))
    }

    pub fn to_input(&self) -> GradeInput {
        GradeInput {
            assignments: self.assignments.clone(),
        }
    }
}

impl Default for GradeSheet {
    fn default() -> Self {
        GradeSheet::new()
    }
}

/// ## JSON Example
///
/// ```json
/// { "assignments": [ { "name": "Quiz 1", "score": "18", "max_score": "20" } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeInput {
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub total_score: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub letter: Letter,
    pub counted_assignments: usize,
}

/// Calculate an overall grade.
///
/// ```rust
/// use calc_core::calculations::grade::{calculate, Assignment, GradeInput, Letter};
///
/// let input = GradeInput { assignments: vec![Assignment::new("Essay", "85", "100")] };
/// let result = calculate(&input).unwrap();
/// assert_eq!(result.percentage, 85.0);
/// assert_eq!(result.letter, Letter::B);
/// ```
pub fn calculate(input: &GradeInput) -> CalcResult<GradeResult> {
    let mut total_score = 0.0;
    let mut total_max = 0.0;
    let mut counted = 0;

    for (score, max) in input.assignments.iter().filter_map(Assignment::scored) {
        total_score += score;
        total_max += max;
        counted += 1;
    }

    if counted == 0 {
        return Err(CalcError::calculation_failed(
            "grade",
            "Enter at least one assignment with a score and max score",
        ));
    }

    let percentage = total_score / total_max * 100.0;
    Ok(GradeResult {
        total_score,
        total_max,
        percentage,
        letter: Letter::from_percentage(percentage),
        counted_assignments: counted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_cutoffs() {
        assert_eq!(Letter::from_percentage(90.0), Letter::A);
        assert_eq!(Letter::from_percentage(89.99), Letter::B);
        assert_eq!(Letter::from_percentage(70.0), Letter::C);
        assert_eq!(Letter::from_percentage(60.0), Letter::D);
        assert_eq!(Letter::from_percentage(59.9), Letter::F);
    }

    #[test]
    fn test_totals_across_rows() {
        let input = GradeInput {
            assignments: vec![
                Assignment::new("Quiz", "18", "20"),
                Assignment::new("Exam", "72", "80"),
                Assignment::new("Skipped", "5", "0"),
                Assignment::new("Blank", "", ""),
            ],
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_score, 90.0);
        assert_eq!(result.total_max, 100.0);
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.letter, Letter::A);
        assert_eq!(result.counted_assignments, 2);
    }

    #[test]
    fn test_ungraded_rows_skipped() {
        let input = GradeInput {
            assignments: vec![
                Assignment::new("Midterm", "90", "100"),
                Assignment::new("Final", "", "100"),
                Assignment::new("Project", "pending", "100"),
            ],
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.letter, Letter::A);
        assert_eq!(result.counted_assignments, 1);
    }

    #[test]
    fn test_zero_score_still_counts() {
        let input = GradeInput {
            assignments: vec![Assignment::new("A", "50", "50"), Assignment::new("B", "0", "50")],
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.letter, Letter::F);
    }

    #[test]
    fn test_nothing_gradable() {
        let err = calculate(&GradeSheet::new().to_input()).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_sheet_keeps_last_row() {
        let mut sheet = GradeSheet::new();
        let only = sheet.assignments[0].id;
        assert!(sheet.remove_assignment(only).is_none());
        let extra = sheet.add_assignment();
        assert!(sheet.update_assignment(extra, AssignmentField::MaxScore, "10"));
        assert!(sheet.update_assignment(extra, AssignmentField::Score, "7"));
        assert!(sheet.remove_assignment(only).is_some());
        assert_eq!(calculate(&sheet.to_input()).unwrap().letter, Letter::C);
    }
}

//! # GPA Calculation
//!
//! Credit-weighted grade point average on the 4.0 scale.
//!
//! Courses are entered as free text (the way a form holds them), so a row
//! with an unknown grade or unparseable credits is skipped rather than
//! failing the whole sheet. [`GpaSheet`] keeps the editable list of rows.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Letter grade on the 4.0 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 12] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Grade points (A+ and A both earn 4.0)
    pub fn points(&self) -> f64 {
        match self {
            LetterGrade::APlus | LetterGrade::A => 4.0,
            LetterGrade::AMinus => 3.7,
            LetterGrade::BPlus => 3.3,
            LetterGrade::B => 3.0,
            LetterGrade::BMinus => 2.7,
            LetterGrade::CPlus => 2.3,
            LetterGrade::C => 2.0,
            LetterGrade::CMinus => 1.7,
            LetterGrade::DPlus => 1.3,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }
}

impl FromStr for LetterGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_uppercase();
        LetterGrade::ALL
            .iter()
            .copied()
            .find(|g| g.label() == needle)
            .ok_or_else(|| CalcError::invalid_input("grade", s.trim(), "Unknown letter grade"))
    }
}

/// One course row as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub credits: String,
}

impl Course {
    pub fn new(grade: impl Into<String>, credits: impl Into<String>) -> Self {
        Course {
            id: Uuid::new_v4(),
            grade: grade.into(),
            credits: credits.into(),
        }
    }

    /// Grade and credits, if the row is complete and valid
    pub fn graded(&self) -> Option<(LetterGrade, f64)> {
        let grade = self.grade.parse::<LetterGrade>().ok()?;
        let credits = self.credits.trim().parse::<f64>().ok()?;
        (credits.is_finite() && credits >= 0.0).then_some((grade, credits))
    }
}

/// Which course field an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Grade,
    Credits,
}

/// Editable list of course rows; never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaSheet {
    pub courses: Vec<Course>,
}

impl GpaSheet {
    /// Sheet with one blank row
    pub fn new() -> Self {
        GpaSheet {
            courses: vec![Course::new("", "")],
        }
    }

    /// Append a blank row, returning its id
    pub fn add_course(&mut self) -> Uuid {
        let course = Course::new("", "");
        let id = course.id;
        self.courses.push(course);
        id
    }

    /// Update one field of a row. Returns false if no row has that id.
    pub fn update_course(&mut self, id: Uuid, field: CourseField, value: impl Into<String>) -> bool {
        match self.courses.iter_mut().find(|c| c.id == id) {
            Some(course) => {
                match field {
                    CourseField::Grade => course.grade = value.into(),
                    CourseField::Credits => course.credits = value.into(),
                }
                true
            }
            None => false,
        }
    }

    /// Remove a row. The last remaining row is kept.
    pub fn remove_course(&mut self, id: Uuid) -> Option<Course> {
        if self.courses.len() <= 1 {
            return None;
        }
        let index = self.courses.iter().position(|c| c.id == id)?;
        Some(self.courses.remove(index))
    }

    pub fn to_input(&self) -> GpaInput {
        GpaInput {
            courses: self.courses.clone(),
        }
    }
}

impl Default for GpaSheet {
    fn default() -> Self {
        GpaSheet::new()
    }
}

/// ## JSON Example
///
/// ```json
/// { "courses": [ { "grade": "A", "credits": "3" }, { "grade": "B+", "credits": "4" } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaInput {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaResult {
    /// GPA rounded to two decimals
    pub gpa: f64,
    pub total_credits: f64,
    pub total_points: f64,
    /// Rows that contributed
    pub counted_courses: usize,
    /// Rows skipped for a missing/unknown grade or bad credits
    pub skipped_courses: usize,
}

/// Calculate a GPA.
///
/// ```rust
/// use calc_core::calculations::gpa::{calculate, Course, GpaInput};
///
/// let input = GpaInput { courses: vec![Course::new("A", "3"), Course::new("B", "3")] };
/// assert_eq!(calculate(&input).unwrap().gpa, 3.5);
/// ```
pub fn calculate(input: &GpaInput) -> CalcResult<GpaResult> {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;
    let mut counted = 0;

    for (grade, credits) in input.courses.iter().filter_map(Course::graded) {
        total_points += grade.points() * credits;
        total_credits += credits;
        counted += 1;
    }

    if total_credits <= 0.0 {
        return Err(CalcError::calculation_failed(
            "gpa",
            "Enter at least one course with a grade and credits",
        ));
    }

    let gpa = (total_points / total_credits * 100.0).round() / 100.0;
    Ok(GpaResult {
        gpa,
        total_credits,
        total_points,
        counted_courses: counted,
        skipped_courses: input.courses.len() - counted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_gpa() {
        let input = GpaInput {
            courses: vec![Course::new("A", "4"), Course::new("B+", "3"), Course::new("C", "2")],
        };
        let result = calculate(&input).unwrap();
        // (16 + 9.9 + 4) / 9 = 3.322...
        assert_eq!(result.gpa, 3.32);
        assert_eq!(result.total_credits, 9.0);
        assert_eq!(result.counted_courses, 3);
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let input = GpaInput {
            courses: vec![
                Course::new("A", "3"),
                Course::new("Z", "3"),
                Course::new("B", "abc"),
                Course::new("", ""),
            ],
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.gpa, 4.0);
        assert_eq!(result.skipped_courses, 3);
    }

    #[test]
    fn test_no_credits_rejected() {
        let err = calculate(&GpaSheet::new().to_input()).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("a-".parse::<LetterGrade>().unwrap(), LetterGrade::AMinus);
        assert_eq!(" F ".parse::<LetterGrade>().unwrap().points(), 0.0);
        assert!("E".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_sheet_editing() {
        let mut sheet = GpaSheet::new();
        let first = sheet.courses[0].id;
        // Last row cannot be removed
        assert!(sheet.remove_course(first).is_none());

        let second = sheet.add_course();
        assert!(sheet.update_course(first, CourseField::Grade, "A"));
        assert!(sheet.update_course(first, CourseField::Credits, "3"));
        assert!(!sheet.update_course(Uuid::new_v4(), CourseField::Grade, "B"));
        assert!(sheet.remove_course(second).is_some());
        assert_eq!(sheet.courses.len(), 1);

        assert_eq!(calculate(&sheet.to_input()).unwrap().gpa, 4.0);
    }

    #[test]
    fn test_json_rows_without_ids() {
        let input: GpaInput =
            serde_json::from_str(r#"{"courses":[{"grade":"A-","credits":"3"}]}"#).unwrap();
        assert_eq!(calculate(&input).unwrap().gpa, 3.7);
    }
}

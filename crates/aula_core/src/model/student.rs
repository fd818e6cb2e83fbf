//! Student record model and form-input validation.
//!
//! # Responsibility
//! - Define the canonical roster row and its creation/update lifecycle.
//! - Coerce raw form fields into validated values through one explicit,
//!   total boundary.
//!
//! # Invariants
//! - `id` is stable, unique, and never reused for another record.
//! - `created_at` is set once at creation and preserved across updates.
//! - `scale` is recomputed from `grade` on every write.
//! - Validation reports every offending field at once, not just the first.

use crate::model::scale::{classify, Scale};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every roster record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = Uuid;

/// Minimum length for `name` and `subject` after trimming.
pub const MIN_TEXT_CHARS: usize = 2;

/// Inclusive grade domain.
pub const GRADE_MIN: f64 = 1.0;
/// Inclusive grade domain.
pub const GRADE_MAX: f64 = 7.0;

/// One row of the roster.
///
/// Serde field names follow the external payload schema. Payloads whose
/// field values do not match these types fail to parse and load as an empty
/// roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable global ID assigned at creation.
    pub id: StudentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "asignatura")]
    pub subject: String,
    /// Grade in [1.0, 7.0], kept at one fractional digit.
    #[serde(rename = "promedio")]
    pub grade: f64,
    /// Always derived from `grade`, never set by callers.
    #[serde(rename = "escala")]
    pub scale: Scale,
    /// Creation stamp; `None` for rows rehydrated from payloads that lack it.
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<NaiveDate>,
}

impl StudentRecord {
    /// Creates a new record with a generated stable ID and today's date.
    pub fn new(name: String, subject: String, grade: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            subject,
            grade,
            scale: classify(grade),
            created_at: Some(Local::now().date_naive()),
        }
    }

    /// Replaces the mutable fields and rederives the scale.
    ///
    /// `id` and `created_at` are untouched.
    pub fn update(&mut self, name: String, subject: String, grade: f64) {
        self.name = name;
        self.subject = subject;
        self.grade = grade;
        self.scale = classify(grade);
    }
}

/// Raw form fields as supplied by the UI layer.
///
/// All fields arrive as text; `validate` is the single coercion boundary
/// between user input and the typed domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub subject: String,
    pub grade: String,
}

/// Validated form values ready to enter the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStudent {
    pub name: String,
    pub subject: String,
    pub grade: f64,
}

/// Form field a validation issue is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Subject,
    Grade,
}

/// One field-scoped validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// Field is empty after trimming.
    Missing(Field),
    /// Text field is shorter than `MIN_TEXT_CHARS`.
    TooShort(Field),
    /// Grade does not parse as a finite number.
    NotANumber,
    /// Grade parses but lies outside [`GRADE_MIN`, `GRADE_MAX`].
    OutOfRange,
}

impl FieldIssue {
    /// Returns the field this issue is scoped to.
    pub fn field(self) -> Field {
        match self {
            Self::Missing(field) | Self::TooShort(field) => field,
            Self::NotANumber | Self::OutOfRange => Field::Grade,
        }
    }
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::Missing(Field::Name) => "El nombre es obligatorio",
            Self::Missing(Field::Subject) => "La asignatura es obligatoria",
            Self::Missing(Field::Grade) => "El promedio es obligatorio",
            Self::TooShort(Field::Name) => "El nombre debe tener al menos 2 caracteres",
            Self::TooShort(Field::Subject) => {
                "La asignatura debe tener al menos 2 caracteres"
            }
            Self::TooShort(Field::Grade) | Self::NotANumber => {
                "El promedio debe ser un número válido"
            }
            Self::OutOfRange => "El promedio debe estar entre 1.0 y 7.0",
        };
        f.write_str(message)
    }
}

/// Aggregate of every field issue found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// All issues, in field order (name, subject, grade).
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// First issue scoped to `field`, if any.
    pub fn issue_for(&self, field: Field) -> Option<FieldIssue> {
        self.issues
            .iter()
            .copied()
            .find(|issue| issue.field() == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

impl StudentInput {
    /// Validates all fields and coerces the grade.
    ///
    /// # Contract
    /// - Text fields are trimmed; the trimmed values are returned.
    /// - The grade is range-checked on the parsed value, then rounded to one
    ///   decimal (half away from zero).
    /// - Every offending field is reported; a failed pass performs no work
    ///   beyond building the error.
    pub fn validate(&self) -> Result<ValidStudent, ValidationError> {
        let mut issues = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            issues.push(FieldIssue::Missing(Field::Name));
        } else if name.chars().count() < MIN_TEXT_CHARS {
            issues.push(FieldIssue::TooShort(Field::Name));
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            issues.push(FieldIssue::Missing(Field::Subject));
        } else if subject.chars().count() < MIN_TEXT_CHARS {
            issues.push(FieldIssue::TooShort(Field::Subject));
        }

        let grade = match parse_grade(&self.grade) {
            Ok(value) => Some(value),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(ValidStudent {
            name: name.to_string(),
            subject: subject.to_string(),
            grade: grade.unwrap_or(GRADE_MIN),
        })
    }
}

/// Parses and range-checks a raw grade field.
///
/// Total over arbitrary text: empty, non-numeric, non-finite and
/// out-of-range inputs each map to a named issue instead of panicking or
/// silently coercing.
pub fn parse_grade(raw: &str) -> Result<f64, FieldIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldIssue::Missing(Field::Grade));
    }

    let value: f64 = trimmed.parse().map_err(|_| FieldIssue::NotANumber)?;
    if !value.is_finite() {
        return Err(FieldIssue::NotANumber);
    }
    if !(GRADE_MIN..=GRADE_MAX).contains(&value) {
        return Err(FieldIssue::OutOfRange);
    }

    Ok(round_to_tenth(value))
}

/// Rounds to one fractional digit, half away from zero.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

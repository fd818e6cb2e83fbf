//! Appreciation scale classification.
//!
//! # Responsibility
//! - Map a numeric grade to its qualitative appreciation bucket.
//! - Keep threshold boundaries in one place.
//!
//! # Invariants
//! - `classify` is pure and total: malformed input (NaN, out-of-range values)
//!   lands in `FueraDeRango` instead of erroring.
//! - Serialized labels match the external payload schema verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Qualitative appreciation bucket derived from a grade.
///
/// Variant order follows band order so ordered collections iterate from the
/// lowest band upward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Scale {
    /// 1.0 ..= 3.9
    Deficiente,
    /// 4.0 ..= 5.5
    #[serde(rename = "Con mejora")]
    ConMejora,
    /// 5.6 ..= 6.4
    #[serde(rename = "Buen trabajo")]
    BuenTrabajo,
    /// 6.5 ..= 7.0
    Destacado,
    /// Anything else, including NaN and values outside [1.0, 7.0].
    #[serde(rename = "Fuera de rango")]
    FueraDeRango,
}

impl Scale {
    /// Returns the human-facing label for this bucket.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deficiente => "Deficiente",
            Self::ConMejora => "Con mejora",
            Self::BuenTrabajo => "Buen trabajo",
            Self::Destacado => "Destacado",
            Self::FueraDeRango => "Fuera de rango",
        }
    }
}

impl Display for Scale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a grade into its appreciation bucket.
///
/// Boundaries are inclusive and evaluated in band order, first match wins.
/// Grades between bands (e.g. 3.95 before rounding) and non-finite values
/// fall to `FueraDeRango`; callers may therefore classify before full
/// validation without risking a panic.
pub fn classify(grade: f64) -> Scale {
    if (1.0..=3.9).contains(&grade) {
        Scale::Deficiente
    } else if (4.0..=5.5).contains(&grade) {
        Scale::ConMejora
    } else if (5.6..=6.4).contains(&grade) {
        Scale::BuenTrabajo
    } else if (6.5..=7.0).contains(&grade) {
        Scale::Destacado
    } else {
        Scale::FueraDeRango
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Scale};

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(classify(1.0), Scale::Deficiente);
        assert_eq!(classify(3.9), Scale::Deficiente);
        assert_eq!(classify(4.0), Scale::ConMejora);
        assert_eq!(classify(5.5), Scale::ConMejora);
        assert_eq!(classify(5.6), Scale::BuenTrabajo);
        assert_eq!(classify(6.4), Scale::BuenTrabajo);
        assert_eq!(classify(6.5), Scale::Destacado);
        assert_eq!(classify(7.0), Scale::Destacado);
    }

    #[test]
    fn malformed_input_falls_to_default_bucket() {
        assert_eq!(classify(f64::NAN), Scale::FueraDeRango);
        assert_eq!(classify(0.9), Scale::FueraDeRango);
        assert_eq!(classify(7.1), Scale::FueraDeRango);
        // Gap between bands, reachable only before one-decimal rounding.
        assert_eq!(classify(3.95), Scale::FueraDeRango);
    }

    #[test]
    fn labels_match_external_schema() {
        assert_eq!(Scale::ConMejora.label(), "Con mejora");
        assert_eq!(Scale::FueraDeRango.to_string(), "Fuera de rango");
    }
}

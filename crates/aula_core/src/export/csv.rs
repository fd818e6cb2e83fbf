//! CSV rendering of the roster.
//!
//! # Responsibility
//! - Produce the downloadable CSV text; delivering it as a file is the
//!   caller's concern.
//!
//! # Invariants
//! - Rows follow roster order; every field is double-quote wrapped.
//! - Fields are emitted verbatim, without escaping embedded quotes or
//!   commas, matching the established payload format.

use crate::model::student::StudentRecord;

/// Fixed header row, in column order.
pub const CSV_HEADERS: [&str; 5] = [
    "Nombre",
    "Asignatura",
    "Promedio",
    "Escala de Apreciación",
    "Fecha de Registro",
];

/// Rendered for records whose creation date is unknown.
pub const MISSING_DATE_LABEL: &str = "No especificada";

/// Renders the roster as CSV text.
///
/// One header line plus one line per record, lines joined by `\n` with no
/// trailing newline. Grades are formatted with one decimal.
pub fn to_csv(records: &[StudentRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(quote_row(CSV_HEADERS.iter().map(|header| header.to_string())));

    for record in records {
        let date = record
            .created_at
            .map(|date| date.to_string())
            .unwrap_or_else(|| MISSING_DATE_LABEL.to_string());
        lines.push(quote_row(
            [
                record.name.clone(),
                record.subject.clone(),
                format!("{:.1}", record.grade),
                record.scale.label().to_string(),
                date,
            ]
            .into_iter(),
        ));
    }

    lines.join("\n")
}

fn quote_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(",")
}

//! Domain model for the evaluation roster.
//!
//! # Responsibility
//! - Define the canonical student record shared by store and export layers.
//! - Own the appreciation-scale classification thresholds.
//! - Keep form-input coercion explicit and field-scoped.
//!
//! # Invariants
//! - Every record is identified by a stable `StudentId`.
//! - `scale` is always derived from `grade`, never set by callers.

pub mod scale;
pub mod student;

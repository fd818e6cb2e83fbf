//! Roster store layer.
//!
//! # Responsibility
//! - Own the authoritative in-memory roster and its mutation entry points.
//! - Keep durable storage synchronized after every successful mutation.
//!
//! # Invariants
//! - Every mutation passes through validation and scale classification.
//! - Persistence failures never roll back an applied in-memory mutation.

pub mod roster;

//! Export surfaces for roster data.

pub mod csv;

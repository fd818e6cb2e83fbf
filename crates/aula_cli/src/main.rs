//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `aula_core` wiring end to end.
//! - Keep output deterministic for quick local sanity checks.

use aula_core::{MemoryStorage, RosterStore, StudentInput};

fn main() {
    println!("aula_core version={}", aula_core::core_version());

    let mut roster = RosterStore::load(MemoryStorage::new());
    let input = StudentInput {
        name: "Ana Pérez".to_string(),
        subject: "Matemáticas".to_string(),
        grade: "6.8".to_string(),
    };

    match roster.add_or_update(&input, None) {
        Ok(outcome) => {
            println!(
                "registered name={} scale={}",
                outcome.record.name, outcome.record.scale
            );
            let stats = roster.stats();
            println!(
                "stats total={} mean={}",
                stats.total,
                stats.mean.map_or_else(|| "-".to_string(), |m| m.to_string())
            );
        }
        Err(err) => println!("validation failed: {err}"),
    }
}

use aula_core::{
    Field, KeyValueStorage, MemoryStorage, PersistError, RosterStore, Scale, StorageError,
    StorageResult, StudentInput, ROSTER_STORAGE_KEY,
};
use std::collections::HashSet;

fn input(name: &str, subject: &str, grade: &str) -> StudentInput {
    StudentInput {
        name: name.to_string(),
        subject: subject.to_string(),
        grade: grade.to_string(),
    }
}

#[test]
fn end_to_end_register_stats_and_remove() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    assert!(roster.list().is_empty());

    let outcome = roster
        .add_or_update(&input("Ana Pérez", "Matemáticas", "6.8"), None)
        .unwrap();
    assert!(outcome.persist_warning.is_none());
    assert_eq!(outcome.record.scale, Scale::Destacado);
    assert!(outcome.record.created_at.is_some());

    let stats = roster.stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.mean, Some(6.8));
    assert_eq!(stats.per_scale.get(&Scale::Destacado), Some(&1));
    assert_eq!(stats.per_scale.len(), 1);

    let removed = roster.remove(outcome.record.id);
    assert!(removed.removed);
    assert!(removed.persist_warning.is_none());
    assert!(roster.list().is_empty());
    assert_eq!(roster.stats().mean, None);
}

#[test]
fn update_preserves_id_and_creation_date() {
    let mut roster = RosterStore::load(MemoryStorage::new());

    let created = roster
        .add_or_update(&input("Ana", "Arte", "5.0"), None)
        .unwrap()
        .record;

    let mut last = created.clone();
    for grade in ["6.2", "3.1", "7.0"] {
        last = roster
            .add_or_update(&input("Ana María", "Historia", grade), Some(created.id))
            .unwrap()
            .record;
    }

    assert_eq!(last.id, created.id);
    assert_eq!(last.created_at, created.created_at);
    assert_eq!(last.grade, 7.0);
    assert_eq!(last.scale, Scale::Destacado);
    assert_eq!(roster.list().len(), 1);
}

#[test]
fn unmatched_target_creates_a_new_record() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    let first = roster
        .add_or_update(&input("Ana", "Arte", "5.0"), None)
        .unwrap()
        .record;

    let ghost = uuid::Uuid::new_v4();
    let second = roster
        .add_or_update(&input("Berta", "Arte", "4.0"), Some(ghost))
        .unwrap()
        .record;

    assert_ne!(second.id, first.id);
    assert_ne!(second.id, ghost);
    assert_eq!(roster.list().len(), 2);
}

#[test]
fn sequential_creates_yield_distinct_ids_in_insertion_order() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    let mut ids = Vec::new();

    for index in 0..20 {
        let record = roster
            .add_or_update(&input(&format!("Alumno {index}"), "Física", "4.5"), None)
            .unwrap()
            .record;
        ids.push(record.id);
    }

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    let listed: Vec<_> = roster.list().iter().map(|record| record.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn validation_failure_leaves_roster_unchanged() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    roster
        .add_or_update(&input("Ana", "Arte", "5.0"), None)
        .unwrap();
    let before: Vec<_> = roster.list().to_vec();

    let name_err = roster
        .add_or_update(&input("A", "Math", "5"), None)
        .unwrap_err();
    assert!(name_err.issue_for(Field::Name).is_some());
    assert!(name_err.issue_for(Field::Grade).is_none());

    let grade_err = roster
        .add_or_update(&input("Ana", "Math", "9"), None)
        .unwrap_err();
    assert!(grade_err.issue_for(Field::Grade).is_some());

    assert_eq!(roster.list(), before.as_slice());
}

#[test]
fn stats_mean_rounds_to_one_decimal() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    for grade in ["6.0", "6.1", "6.1"] {
        roster
            .add_or_update(&input("Alumno", "Química", grade), None)
            .unwrap();
    }

    // (6.0 + 6.1 + 6.1) / 3 = 6.0666... -> 6.1
    assert_eq!(roster.stats().mean, Some(6.1));
}

#[test]
fn stats_counts_only_present_buckets() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    for (name, grade) in [("Ana", "2.0"), ("Berta", "3.5"), ("Carla", "6.6")] {
        roster
            .add_or_update(&input(name, "Lenguaje", grade), None)
            .unwrap();
    }

    let stats = roster.stats();
    assert_eq!(stats.per_scale.get(&Scale::Deficiente), Some(&2));
    assert_eq!(stats.per_scale.get(&Scale::Destacado), Some(&1));
    assert!(!stats.per_scale.contains_key(&Scale::ConMejora));
    assert!(!stats.per_scale.contains_key(&Scale::BuenTrabajo));
}

#[test]
fn remove_of_unknown_id_reports_false() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    let outcome = roster.remove(uuid::Uuid::new_v4());
    assert!(!outcome.removed);
    assert!(outcome.persist_warning.is_none());
}

/// Storage that accepts reads but fails every write.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn put(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("disk full".to_string()))
    }
}

#[test]
fn write_failure_keeps_in_memory_mutation_and_warns() {
    let mut roster = RosterStore::load(ReadOnlyStorage);

    let outcome = roster
        .add_or_update(&input("Ana", "Arte", "5.0"), None)
        .unwrap();
    assert!(matches!(
        outcome.persist_warning,
        Some(PersistError::Storage(StorageError::Backend(_)))
    ));
    assert_eq!(roster.list().len(), 1);

    let removed = roster.remove(outcome.record.id);
    assert!(removed.removed);
    assert!(removed.persist_warning.is_some());
    assert!(roster.list().is_empty());
}

#[test]
fn persisted_payload_lives_under_the_fixed_key() {
    let mut roster = RosterStore::load(MemoryStorage::new());
    roster
        .add_or_update(&input("Ana", "Arte", "5.0"), None)
        .unwrap();

    let storage = roster.into_storage();
    assert!(!storage.is_empty());
    assert_eq!(storage.len(), 1);
    let payload = storage.get(ROSTER_STORAGE_KEY).unwrap().unwrap();
    assert!(payload.contains("\"nombre\":\"Ana\""));
    assert!(payload.contains("\"escala\":\"Con mejora\""));
}

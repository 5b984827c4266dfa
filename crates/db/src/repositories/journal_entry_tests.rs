//! Unit tests for the journal entry repository against a mocked database.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use super::{
    entry_no_prefix, journal_entries, journal_entry_lines, next_sequence, JournalEntryError,
    JournalEntryInput, JournalEntryRepository, JournalLine, JournalType, WorkflowError,
};
use tallybook_core::workflow::EntryStatus;

fn entry_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
}

fn entry_model(status: EntryStatus) -> journal_entries::Model {
    let now = Utc::now();
    journal_entries::Model {
        id: Uuid::from_u128(1),
        entry_no: "JE-202608-0001".to_string(),
        journal_type: "general".to_string(),
        entry_date: entry_date(),
        description: Some("Office supplies".to_string()),
        reference: None,
        status: status.as_str().to_string(),
        is_reversed: false,
        reversing_entry_id: None,
        source_type: None,
        source_id: None,
        created_by: Uuid::from_u128(9),
        created_at: now,
        updated_at: now,
    }
}

fn line_model(line_no: i32, debit: Decimal, credit: Decimal) -> journal_entry_lines::Model {
    journal_entry_lines::Model {
        id: Uuid::from_u128(u128::try_from(line_no).unwrap() + 100),
        entry_id: Uuid::from_u128(1),
        line_no,
        account_id: Uuid::from_u128(u128::try_from(line_no).unwrap() + 200),
        description: String::new(),
        debit,
        credit,
        currency_code: "SGD".to_string(),
        exchange_rate: Decimal::ONE,
        tax_code: None,
        tax_amount: Decimal::ZERO,
    }
}

fn input_line(debit: Decimal, credit: Decimal) -> JournalLine {
    JournalLine {
        account_id: Uuid::from_u128(201),
        description: String::new(),
        debit,
        credit,
        currency_code: "SGD".to_string(),
        exchange_rate: Decimal::ONE,
        tax_code: None,
        tax_amount: Decimal::ZERO,
    }
}

fn unbalanced_input() -> JournalEntryInput {
    JournalEntryInput {
        entry_date: entry_date(),
        journal_type: JournalType::General,
        description: None,
        reference: None,
        created_by: Uuid::from_u128(9),
        lines: vec![
            input_line(dec!(100), Decimal::ZERO),
            input_line(Decimal::ZERO, dec!(90)),
        ],
        source: None,
    }
}

fn balanced_input() -> JournalEntryInput {
    JournalEntryInput {
        lines: vec![
            input_line(dec!(100), Decimal::ZERO),
            input_line(Decimal::ZERO, dec!(100)),
        ],
        ..unbalanced_input()
    }
}

#[test]
fn test_entry_no_prefix_uses_year_month() {
    assert_eq!(entry_no_prefix(entry_date()), "JE-202608-");
    assert_eq!(
        entry_no_prefix(NaiveDate::from_ymd_opt(2027, 1, 2).unwrap()),
        "JE-202701-"
    );
}

#[test]
fn test_next_sequence_increments_numeric_max() {
    assert_eq!(next_sequence(std::iter::empty::<&str>()), 1);
    assert_eq!(next_sequence(["JE-202608-0007"]), 8);
    assert_eq!(next_sequence(["JE-202608-0099", "JE-202608-0007"]), 100);
    // Unparseable suffixes restart the sequence rather than failing.
    assert_eq!(next_sequence(["garbage"]), 1);
}

#[test]
fn test_next_sequence_counts_past_five_digits() {
    // "10000" sorts below "9999" as text; the comparison is numeric.
    assert_eq!(
        next_sequence(["JE-202608-9999", "JE-202608-10000"]),
        10001
    );
}

#[tokio::test]
async fn test_create_rejects_unbalanced_input_before_any_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = JournalEntryRepository::new(db);

    let err = repo.create(&unbalanced_input()).await.unwrap_err();
    match err {
        JournalEntryError::Validation(messages) => assert!(!messages.is_empty()),
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn test_update_rejects_posted_entry() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry_model(EntryStatus::Posted)]])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let err = repo
        .update(Uuid::from_u128(1), &balanced_input())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JournalEntryError::Workflow(WorkflowError::NotDraft)
    ));
}

#[tokio::test]
async fn test_update_draft_replaces_lines() {
    let mut updated = entry_model(EntryStatus::Draft);
    updated.description = Some("Stationery".to_string());

    // One result set per statement: find header, update header
    // (returning), then one insert per replacement line after the old
    // lines are deleted.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry_model(EntryStatus::Draft)], vec![updated]])
        .append_query_results([vec![line_model(1, dec!(100), Decimal::ZERO)]])
        .append_query_results([vec![line_model(2, Decimal::ZERO, dec!(100))]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let mut input = balanced_input();
    input.description = Some("Stationery".to_string());

    let model = repo.update(Uuid::from_u128(1), &input).await.unwrap();
    assert_eq!(model.description.as_deref(), Some("Stationery"));
    assert_eq!(model.status, "draft");
}

#[tokio::test]
async fn test_post_rejects_already_posted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry_model(EntryStatus::Posted)]])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let err = repo
        .post(Uuid::from_u128(1), Uuid::from_u128(9))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JournalEntryError::Workflow(WorkflowError::CannotPost)
    ));
}

#[tokio::test]
async fn test_post_transitions_draft() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![entry_model(EntryStatus::Draft)],
            vec![entry_model(EntryStatus::Posted)],
        ])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let posted = repo
        .post(Uuid::from_u128(1), Uuid::from_u128(9))
        .await
        .unwrap();
    assert_eq!(posted.status, "posted");
}

#[tokio::test]
async fn test_get_for_editor_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry_model(EntryStatus::Draft)]])
        .append_query_results([vec![
            line_model(1, dec!(100), Decimal::ZERO),
            line_model(2, Decimal::ZERO, dec!(100)),
        ]])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let entry = repo.get_for_editor(Uuid::from_u128(1)).await.unwrap();
    assert_eq!(entry.entry_no, "JE-202608-0001");
    assert_eq!(entry.journal_type, JournalType::General);
    assert_eq!(entry.status, EntryStatus::Draft);
    assert_eq!(entry.lines.len(), 2);
    assert_eq!(entry.total(), dec!(100));
}

#[tokio::test]
async fn test_get_for_editor_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<journal_entries::Model>::new()])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let err = repo.get_for_editor(Uuid::from_u128(42)).await.unwrap_err();
    assert!(matches!(err, JournalEntryError::NotFound(_)));
}

#[tokio::test]
async fn test_reverse_rejects_draft() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry_model(EntryStatus::Draft)]])
        .append_query_results([vec![line_model(1, dec!(100), Decimal::ZERO)]])
        .into_connection();
    let repo = JournalEntryRepository::new(db);

    let err = repo
        .reverse(
            Uuid::from_u128(1),
            entry_date(),
            None,
            Uuid::from_u128(9),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JournalEntryError::Workflow(WorkflowError::NotPosted)
    ));
}

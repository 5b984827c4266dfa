//! Property tests for the entry editor grid.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::editor::EntryEditor;
use super::tax::{compute_line_tax, TaxCode, TaxKind};

/// Cents-denominated non-negative amounts keep the tests in the range
/// the grid's spin boxes accept.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_00).prop_map(|cents| Decimal::new(cents, 2))
}

#[derive(Debug, Clone)]
enum Edit {
    Debit(Decimal),
    Credit(Decimal),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        amount_strategy().prop_map(Edit::Debit),
        amount_strategy().prop_map(Edit::Credit),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After any sequence of debit/credit edits, a row never carries
    /// amounts on both sides.
    #[test]
    fn prop_row_never_carries_both_sides(edits in prop::collection::vec(edit_strategy(), 1..20)) {
        let mut editor = EntryEditor::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            "SGD",
        );
        for edit in edits {
            match edit {
                Edit::Debit(amount) => editor.set_debit(0, amount),
                Edit::Credit(amount) => editor.set_credit(0, amount),
            }
            let row = &editor.rows()[0];
            prop_assert!(
                row.amount.debit().is_zero() || row.amount.credit().is_zero(),
                "row holds both debit {} and credit {}",
                row.amount.debit(),
                row.amount.credit()
            );
        }
    }

    /// Totals always equal the sum of the visible row amounts.
    #[test]
    fn prop_totals_match_rows(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let mut editor = EntryEditor::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            "SGD",
        );
        while editor.rows().len() < amounts.len() {
            editor.add_row();
        }
        for (row, amount) in amounts.iter().enumerate() {
            if row % 2 == 0 {
                editor.set_debit(row, *amount);
            } else {
                editor.set_credit(row, *amount);
            }
        }

        let totals = editor.totals();
        let expected_debits: Decimal = editor.rows().iter().map(|r| r.amount.debit()).sum();
        let expected_credits: Decimal = editor.rows().iter().map(|r| r.amount.credit()).sum();
        prop_assert_eq!(totals.debits, expected_debits);
        prop_assert_eq!(totals.credits, expected_credits);
    }

    /// A mirrored debit/credit pair always collects successfully and
    /// survives save validation.
    #[test]
    fn prop_mirrored_pair_is_savable(amount in amount_strategy()) {
        prop_assume!(!amount.is_zero());

        let mut editor = EntryEditor::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            "SGD",
        );
        editor.set_account(0, Some(Uuid::new_v4()));
        editor.set_debit(0, amount);
        editor.set_account(1, Some(Uuid::new_v4()));
        editor.set_credit(1, amount);

        let input = editor.collect(Uuid::new_v4());
        prop_assert!(input.is_ok());
        let input = input.unwrap();
        prop_assert_eq!(input.lines.len(), 2);
    }

    /// Percentage tax is never negative for non-negative bases and is
    /// always rounded to at most 2 decimal places.
    #[test]
    fn prop_tax_non_negative_and_rounded(
        base in amount_strategy(),
        rate_tenths in 0u32..3000,
    ) {
        let tax_code = TaxCode {
            code: "SR".to_string(),
            description: String::new(),
            kind: TaxKind::Percentage,
            rate: Decimal::new(i64::from(rate_tenths), 1),
        };
        let tax = compute_line_tax(base, Some(&tax_code));
        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax.scale() <= 2, "tax {} has scale {}", tax, tax.scale());
    }
}

//! Algebraic properties of the engine's operations.

use proptest::prelude::*;

use cleangraph::table::{ColumnType, Table};
use cleangraph::{Operation, TableEngine};

/// Cell text drawn from a small pool so duplicates and gaps are common.
fn cell_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("NA".to_string()),
        (0i32..5).prop_map(|n| n.to_string()),
        prop::sample::select(vec!["ann", "bob", "cy"]).prop_map(str::to_string),
    ]
}

fn number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        3 => (-100i32..100).prop_map(|n| n.to_string()),
    ]
}

/// Tables with 1..5 columns named `c0..` and up to 12 rows.
fn table_strategy() -> impl Strategy<Value = Table> {
    (1usize..5).prop_flat_map(|width| {
        prop::collection::vec(prop::collection::vec(cell_strategy(), width), 0..12).prop_map(
            move |rows| {
                let headers: Vec<String> = (0..width).map(|i| format!("c{}", i)).collect();
                Table::from_text_records(headers, rows)
            },
        )
    })
}

/// Single numeric column `v` (possibly with gaps) next to a text column.
fn numeric_table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::vec(number_strategy(), 1..15).prop_map(|values| {
        let rows: Vec<Vec<String>> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| vec![format!("r{}", i), v])
            .collect();
        Table::from_text_records(vec!["k".to_string(), "v".to_string()], rows)
    })
}

/// `%Y-%m-%d` dates, sometimes missing.
fn date_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        3 => (2000i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d)),
    ]
}

/// Single date column `d` held as text next to a key column.
fn date_table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::vec(date_strategy(), 1..15).prop_map(|values| {
        let rows: Vec<Vec<String>> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| vec![format!("r{}", i), v])
            .collect();
        Table::from_text_records(vec!["k".to_string(), "d".to_string()], rows)
    })
}

fn apply(table: &Table, op: Operation) -> Table {
    let mut engine = TableEngine::with_table(table.clone());
    engine.apply(&op);
    engine.into_table().expect("table stays loaded")
}

proptest! {
    /// Rename keeps unmapped names and the column count.
    #[test]
    fn rename_keeps_unmapped_names(table in table_strategy(), pick in 0usize..5) {
        let names: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
        let target = &names[pick % names.len()];
        let out = apply(&table, Operation::RenameColumns {
            mapping: vec![(target.clone(), "renamed".to_string())],
        });
        prop_assert_eq!(out.column_count(), table.column_count());
        for (before, after) in names.iter().zip(out.column_names()) {
            if before != target {
                prop_assert_eq!(before.as_str(), after);
            }
        }
    }

    /// Drop never adds columns; dropping an unknown name changes nothing.
    #[test]
    fn drop_never_increases_columns(table in table_strategy(), pick in 0usize..5) {
        let name = format!("c{}", pick);
        let out = apply(&table, Operation::DropColumns { columns: vec![name] });
        prop_assert!(out.column_count() <= table.column_count());

        let untouched = apply(&table, Operation::DropColumns {
            columns: vec!["not_a_column".to_string()],
        });
        prop_assert_eq!(untouched, table);
    }

    /// A second remove_duplicates removes nothing.
    #[test]
    fn remove_duplicates_is_idempotent(table in table_strategy()) {
        let once = apply(&table, Operation::RemoveDuplicates { subset: None });
        let mut engine = TableEngine::with_table(once.clone());
        let msg = engine.apply(&Operation::RemoveDuplicates { subset: None });
        prop_assert_eq!(msg, "Removed 0 duplicate rows");
        prop_assert_eq!(engine.into_table(), Some(once));
    }

    /// Converting a numeric column to numeric only sets the tag.
    #[test]
    fn numeric_conversion_changes_only_the_tag(table in numeric_table_strategy()) {
        prop_assume!(table.columns()[1].kind == ColumnType::Numeric);
        let out = apply(&table, Operation::ConvertColumnType {
            column: "v".to_string(),
            target_type: "numeric".to_string(),
        });
        prop_assert_eq!(out.rows(), table.rows());
        prop_assert_eq!(out.columns()[1].kind, ColumnType::Numeric);
    }

    /// Converting an already-datetime column to datetime again changes nothing.
    #[test]
    fn datetime_conversion_of_dates_changes_only_the_tag(table in date_table_strategy()) {
        let to_datetime = || Operation::ConvertColumnType {
            column: "d".to_string(),
            target_type: "datetime".to_string(),
        };
        let once = apply(&table, to_datetime());
        prop_assert_eq!(once.columns()[1].kind, ColumnType::Datetime);
        prop_assert_eq!(once.missing_count(1), table.missing_count(1));
        let twice = apply(&once, to_datetime());
        prop_assert_eq!(twice.rows(), once.rows());
        prop_assert_eq!(twice.columns()[1].kind, ColumnType::Datetime);
    }

    /// mean/median fill only missing entries and leave none behind.
    #[test]
    fn mean_and_median_touch_only_missing(
        table in numeric_table_strategy(),
        median in any::<bool>(),
    ) {
        prop_assume!(table.columns()[1].kind == ColumnType::Numeric);
        prop_assume!(table.missing_count(1) < table.row_count());
        let strategy = if median { "median" } else { "mean" };
        let out = apply(&table, Operation::HandleMissingValues {
            column: "v".to_string(),
            strategy: strategy.to_string(),
        });
        prop_assert_eq!(out.missing_count(1), 0);
        prop_assert_eq!(out.row_count(), table.row_count());
        for (before, after) in table.rows().iter().zip(out.rows()) {
            if before[1].is_some() {
                prop_assert_eq!(&before[1], &after[1]);
            }
            prop_assert_eq!(&before[0], &after[0]);
        }
    }

    /// drop and mode strategies leave zero missing entries.
    #[test]
    fn drop_and_mode_leave_no_missing(table in numeric_table_strategy(), mode in any::<bool>()) {
        prop_assume!(table.missing_count(1) < table.row_count());
        let strategy = if mode { "mode" } else { "drop" };
        let out = apply(&table, Operation::HandleMissingValues {
            column: "v".to_string(),
            strategy: strategy.to_string(),
        });
        prop_assert_eq!(out.missing_count(1), 0);
    }

    /// ffill leaves at most the leading gap.
    #[test]
    fn ffill_leaves_only_leading_gaps(table in numeric_table_strategy()) {
        let leading = table.rows().iter().take_while(|r| r[1].is_none()).count();
        let out = apply(&table, Operation::HandleMissingValues {
            column: "v".to_string(),
            strategy: "ffill".to_string(),
        });
        prop_assert_eq!(out.missing_count(1), leading);
    }
}

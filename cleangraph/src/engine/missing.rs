//! Missing-value resolution for one column.

use std::collections::HashMap;
use std::str::FromStr;

use super::inspect::{mean, numbers, quantile};
use crate::table::{cell_key, Cell, ColumnType, Table, Value, ValueKey};

/// How `handle_missing_values` resolves absent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingStrategy {
    Drop,
    Mean,
    Median,
    Mode,
    ForwardFill,
    BackwardFill,
}

impl FromStr for MissingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "mode" => Ok(Self::Mode),
            "ffill" | "forward_fill" => Ok(Self::ForwardFill),
            "bfill" | "backward_fill" => Ok(Self::BackwardFill),
            other => Err(format!("invalid strategy: {}", other)),
        }
    }
}

impl MissingStrategy {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::ForwardFill => "ffill",
            Self::BackwardFill => "bfill",
        }
    }
}

/// First-encountered most frequent present value of the column.
fn mode(table: &Table, idx: usize) -> Option<Value> {
    let mut counts: HashMap<ValueKey, usize> = HashMap::new();
    let mut order: Vec<(ValueKey, &Value)> = Vec::new();
    for cell in table.column_cells(idx) {
        let (Some(key), Some(value)) = (cell_key(cell), cell.as_ref()) else {
            continue;
        };
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push((key, value));
        }
        *count += 1;
    }
    let mut best: Option<(&Value, usize)> = None;
    for (key, value) in order {
        let count = counts.get(&key).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.clone())
}

fn fill_with(table: &mut Table, idx: usize, value: &Value) {
    for row in table.rows.iter_mut() {
        if row[idx].is_none() {
            row[idx] = Some(value.clone());
        }
    }
}

/// Carries the last seen value downward (or upward when `reverse`). Returns how
/// many cells were filled.
fn propagate(table: &mut Table, idx: usize, reverse: bool) -> usize {
    let mut last: Option<Value> = None;
    let mut filled = 0;
    let mut visit = |row: &mut Vec<Cell>| {
        if row[idx].is_some() {
            last = row[idx].clone();
        } else if let Some(v) = &last {
            row[idx] = Some(v.clone());
            filled += 1;
        }
    };
    if reverse {
        table.rows.iter_mut().rev().for_each(&mut visit);
    } else {
        table.rows.iter_mut().for_each(&mut visit);
    }
    filled
}

/// Resolves absent cells of `column` with `strategy`.
pub(crate) fn handle_missing_values(table: &mut Table, column: &str, strategy: &str) -> String {
    let Some(idx) = table.column_index(column) else {
        return format!("Column '{}' not found in table", column);
    };
    let missing = table.missing_count(idx);
    if missing == 0 {
        return format!("No missing values found in column '{}'", column);
    }
    let strategy = match strategy.parse::<MissingStrategy>() {
        Ok(s) => s,
        Err(_) => {
            return format!(
                "Invalid strategy '{}' for column '{}'. No changes made.",
                strategy, column
            )
        }
    };

    let kind = table.columns[idx].kind;
    if matches!(strategy, MissingStrategy::Mean | MissingStrategy::Median)
        && kind != ColumnType::Numeric
    {
        return format!(
            "Strategy '{}' requires a numeric column, but '{}' is {}. No changes made.",
            strategy.as_str(),
            column,
            kind
        );
    }

    match strategy {
        MissingStrategy::Drop => {
            table.rows.retain(|row| row[idx].is_some());
            format!(
                "Dropped {} rows with missing values in column '{}'",
                missing, column
            )
        }
        MissingStrategy::Mean | MissingStrategy::Median => {
            let mut values = numbers(table, idx);
            let fill = if strategy == MissingStrategy::Mean {
                mean(&values)
            } else {
                values.sort_by(|a, b| a.total_cmp(b));
                quantile(&values, 0.5)
            };
            let Some(fill) = fill else {
                return format!(
                    "Column '{}' has no non-missing values to compute the {}. No changes made.",
                    column,
                    strategy.as_str()
                );
            };
            fill_with(table, idx, &Value::Number(fill));
            format!(
                "Filled {} missing values in column '{}' with {}: {:.2}",
                missing,
                column,
                strategy.as_str(),
                fill
            )
        }
        MissingStrategy::Mode => {
            let Some(fill) = mode(table, idx) else {
                return format!("No mode available for column '{}'. No changes made.", column);
            };
            fill_with(table, idx, &fill);
            format!(
                "Filled {} missing values in column '{}' with mode: {}",
                missing, column, fill
            )
        }
        MissingStrategy::ForwardFill => {
            let filled = propagate(table, idx, false);
            format!("Forward filled {} missing values in column '{}'", filled, column)
        }
        MissingStrategy::BackwardFill => {
            let filled = propagate(table, idx, true);
            format!("Backward filled {} missing values in column '{}'", filled, column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages() -> Table {
        Table::from_text_records(
            ["name", "age"],
            [["ann", ""], ["bob", "30"], ["cy", ""], ["di", "50"], ["ed", ""]],
        )
    }

    fn age_column(t: &Table) -> Vec<Option<f64>> {
        t.column_cells(1)
            .map(|c| c.as_ref().and_then(|v| v.as_number()))
            .collect()
    }

    #[test]
    fn mean_fills_only_missing_cells() {
        let mut t = ages();
        let msg = handle_missing_values(&mut t, "age", "mean");
        assert_eq!(msg, "Filled 3 missing values in column 'age' with mean: 40.00");
        assert_eq!(
            age_column(&t),
            vec![Some(40.0), Some(30.0), Some(40.0), Some(50.0), Some(40.0)]
        );
    }

    #[test]
    fn median_uses_the_middle_of_present_values() {
        let mut t = Table::from_text_records(["v"], [["1"], [""], ["2"], ["10"]]);
        let msg = handle_missing_values(&mut t, "v", "median");
        assert_eq!(msg, "Filled 1 missing values in column 'v' with median: 2.00");
        assert_eq!(t.missing_count(0), 0);
    }

    #[test]
    fn drop_removes_rows_with_missing_cells() {
        let mut t = ages();
        let msg = handle_missing_values(&mut t, "age", "drop");
        assert_eq!(msg, "Dropped 3 rows with missing values in column 'age'");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.missing_count(1), 0);
    }

    #[test]
    fn mode_picks_first_encountered_most_frequent_value() {
        let mut t = Table::from_text_records(
            ["c"],
            [["b"], ["a"], [""], ["a"], ["b"]],
        );
        let msg = handle_missing_values(&mut t, "c", "mode");
        assert_eq!(msg, "Filled 1 missing values in column 'c' with mode: b");
        assert_eq!(t.rows()[2][0], Some(Value::Text("b".into())));
    }

    #[test]
    fn ffill_leaves_leading_gaps_and_reports_filled_count() {
        let mut t = ages();
        let msg = handle_missing_values(&mut t, "age", "ffill");
        assert_eq!(msg, "Forward filled 2 missing values in column 'age'");
        assert_eq!(
            age_column(&t),
            vec![None, Some(30.0), Some(30.0), Some(50.0), Some(50.0)]
        );
    }

    #[test]
    fn backward_fill_alias_leaves_trailing_gaps() {
        let mut t = ages();
        let msg = handle_missing_values(&mut t, "age", "backward_fill");
        assert_eq!(msg, "Backward filled 2 missing values in column 'age'");
        assert_eq!(
            age_column(&t),
            vec![Some(30.0), Some(30.0), Some(50.0), Some(50.0), None]
        );
    }

    #[test]
    fn mean_on_text_column_is_a_reported_no_op() {
        let mut t = Table::from_text_records(["c"], [["x"], [""]]);
        let before = t.clone();
        let msg = handle_missing_values(&mut t, "c", "mean");
        assert!(msg.contains("requires a numeric column"), "{}", msg);
        assert_eq!(t, before);
    }

    #[test]
    fn all_missing_column_cannot_be_mean_filled() {
        let mut t = Table::from_text_records(["a", "b"], [["1", ""], ["2", ""]]);
        let before = t.clone();
        let msg = handle_missing_values(&mut t, "b", "mean");
        assert!(msg.contains("no non-missing values"), "{}", msg);
        assert_eq!(t, before);
    }

    #[test]
    fn zero_missing_is_reported_before_strategy_is_checked() {
        let mut t = Table::from_text_records(["a"], [["1"]]);
        assert_eq!(
            handle_missing_values(&mut t, "a", "bogus"),
            "No missing values found in column 'a'"
        );
    }

    #[test]
    fn invalid_strategy_and_unknown_column_do_not_mutate() {
        let mut t = ages();
        let before = t.clone();
        assert_eq!(
            handle_missing_values(&mut t, "age", "interpolate"),
            "Invalid strategy 'interpolate' for column 'age'. No changes made."
        );
        assert_eq!(
            handle_missing_values(&mut t, "height", "mean"),
            "Column 'height' not found in table"
        );
        assert_eq!(t, before);
    }
}

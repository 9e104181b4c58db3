//! Read-only operations: head, tail, info, describe.
//!
//! Results are pretty-printed JSON so the decision-maker can read them directly.

use serde_json::{json, Map, Value as Json};

use crate::table::{number_to_json, ColumnType, Table};

fn records(table: &Table, rows: impl Iterator<Item = usize>) -> String {
    let records: Vec<Json> = rows
        .map(|r| {
            let mut record = Map::new();
            for (idx, col) in table.columns().iter().enumerate() {
                let value = table.rows()[r][idx]
                    .as_ref()
                    .map(|v| v.to_json())
                    .unwrap_or(Json::Null);
                record.insert(col.name.clone(), value);
            }
            Json::Object(record)
        })
        .collect();
    to_pretty(&Json::Array(records))
}

fn to_pretty(value: &Json) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("Failed to serialize result: {}", e))
}

/// First `n` rows as JSON records.
pub(crate) fn head(table: &Table, n: usize) -> String {
    let end = n.min(table.row_count());
    records(table, 0..end)
}

/// Last `n` rows as JSON records.
pub(crate) fn tail(table: &Table, n: usize) -> String {
    let count = table.row_count();
    let start = count.saturating_sub(n);
    records(table, start..count)
}

/// Column tags, column list, shape and per-column missing counts.
pub(crate) fn info(table: &Table) -> String {
    let mut dtypes = Map::new();
    let mut null_counts = Map::new();
    for (idx, col) in table.columns().iter().enumerate() {
        dtypes.insert(col.name.clone(), Json::String(col.kind.to_string()));
        null_counts.insert(col.name.clone(), json!(table.missing_count(idx)));
    }
    let info = json!({
        "dtypes": dtypes,
        "columns": table.column_names(),
        "shape": { "rows": table.row_count(), "columns": table.column_count() },
        "null_counts": null_counts,
    });
    to_pretty(&info)
}

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub(crate) fn of(values: &[f64]) -> Self {
        let count = values.len();
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mean = mean(values);
        let std = match mean {
            Some(m) if count > 1 => {
                let ss: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
                Some((ss / (count - 1) as f64).sqrt())
            }
            _ => None,
        };
        Self {
            count,
            mean,
            std,
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }

    fn to_json(&self) -> Json {
        let num = |v: Option<f64>| v.map(number_to_json).unwrap_or(Json::Null);
        json!({
            "count": self.count,
            "mean": num(self.mean),
            "std": num(self.std),
            "min": num(self.min),
            "25%": num(self.q1),
            "50%": num(self.median),
            "75%": num(self.q3),
            "max": num(self.max),
        })
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Linear-interpolated quantile of already sorted values.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Present numbers of the column at `idx`.
pub(crate) fn numbers(table: &Table, idx: usize) -> Vec<f64> {
    table
        .column_cells(idx)
        .filter_map(|c| c.as_ref().and_then(|v| v.as_number()))
        .collect()
}

/// Per-numeric-column count, mean, std, min, quartiles and max.
pub(crate) fn describe(table: &Table) -> String {
    let mut out = Map::new();
    for (idx, col) in table.columns().iter().enumerate() {
        if col.kind != ColumnType::Numeric {
            continue;
        }
        let summary = NumericSummary::of(&numbers(table, idx));
        out.insert(col.name.clone(), summary.to_json());
    }
    if out.is_empty() {
        return "No numeric columns to describe".to_string();
    }
    to_pretty(&Json::Object(out))
}

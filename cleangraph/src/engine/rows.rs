//! Row-level operations: duplicate removal.

use std::collections::HashSet;

use crate::table::{cell_key, Table, ValueKey};

/// Removes rows that repeat an earlier row on `subset` (all columns when `None`
/// or empty), keeping the first occurrence.
pub(crate) fn remove_duplicates(table: &mut Table, subset: Option<&[String]>) -> String {
    let indices: Vec<usize> = match subset {
        Some(names) if !names.is_empty() => {
            let missing: Vec<&String> = names
                .iter()
                .filter(|n| table.column_index(n).is_none())
                .collect();
            if !missing.is_empty() {
                return format!(
                    "Column(s) not found in table: {:?}. No changes made.",
                    missing
                );
            }
            names.iter().filter_map(|n| table.column_index(n)).collect()
        }
        _ => (0..table.column_count()).collect(),
    };

    let before = table.row_count();
    let mut seen: HashSet<Vec<Option<ValueKey>>> = HashSet::with_capacity(before);
    table.rows.retain(|row| {
        let key: Vec<Option<ValueKey>> = indices.iter().map(|&i| cell_key(&row[i])).collect();
        seen.insert(key)
    });
    let removed = before - table.row_count();
    format!("Removed {} duplicate rows", removed)
}

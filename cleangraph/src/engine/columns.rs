//! Column-level operations: rename and drop.

use std::collections::HashSet;

use crate::table::Table;

/// Renames columns per `mapping` (old → new). Names absent from the table are ignored.
///
/// A mapping that would leave two columns with the same name is rejected and the
/// table is not modified.
pub(crate) fn rename_columns(table: &mut Table, mapping: &[(String, String)]) -> String {
    let mut renamed = Vec::new();
    let mut ignored = Vec::new();
    let mut new_names: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();

    for (old, new) in mapping {
        match table.column_index(old) {
            Some(idx) => {
                new_names[idx] = new.clone();
                renamed.push(format!("'{}' -> '{}'", old, new));
            }
            None => ignored.push(old.clone()),
        }
    }

    if renamed.is_empty() {
        return format!("No matching columns to rename: {:?}", ignored);
    }

    let mut seen = HashSet::new();
    let mut collisions: Vec<String> = Vec::new();
    for name in &new_names {
        if !seen.insert(name.as_str()) && !collisions.contains(name) {
            collisions.push(name.clone());
        }
    }
    if !collisions.is_empty() {
        return format!(
            "Rename would produce duplicate column names {:?}. No changes made.",
            collisions
        );
    }

    for (col, name) in table.columns.iter_mut().zip(new_names) {
        col.name = name;
    }

    let mut msg = format!("Renamed columns: {}", renamed.join(", "));
    if !ignored.is_empty() {
        msg.push_str(&format!(" (not found, ignored: {:?})", ignored));
    }
    msg
}

/// Drops the named columns that exist; names not in the table are ignored.
pub(crate) fn drop_columns(table: &mut Table, columns: &[String]) -> String {
    let mut valid: Vec<String> = Vec::new();
    for name in columns {
        if table.column_index(name).is_some() && !valid.contains(name) {
            valid.push(name.clone());
        }
    }
    if valid.is_empty() {
        return "No valid columns to drop".to_string();
    }

    let keep: Vec<bool> = table
        .columns
        .iter()
        .map(|c| !valid.contains(&c.name))
        .collect();
    let mut flags = keep.iter();
    table.columns.retain(|_| *flags.next().unwrap_or(&true));
    for row in table.rows.iter_mut() {
        let mut flags = keep.iter();
        row.retain(|_| *flags.next().unwrap_or(&true));
    }
    format!("Dropped columns: {:?}", valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_text_records(["a", "b", "c"], [["1", "x", "2"], ["3", "y", "4"]])
    }

    fn pairs(p: &[(&str, &str)]) -> Vec<(String, String)> {
        p.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn rename_changes_only_mapped_columns() {
        let mut t = sample();
        let msg = rename_columns(&mut t, &pairs(&[("a", "id"), ("zzz", "q")]));
        assert_eq!(t.column_names(), vec!["id", "b", "c"]);
        assert!(msg.starts_with("Renamed columns: 'a' -> 'id'"), "{}", msg);
        assert!(msg.contains("zzz"), "{}", msg);
    }

    #[test]
    fn rename_swap_is_allowed() {
        let mut t = sample();
        rename_columns(&mut t, &pairs(&[("a", "b"), ("b", "a")]));
        assert_eq!(t.column_names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn rename_collision_is_rejected_without_mutation() {
        let mut t = sample();
        let before = t.clone();
        let msg = rename_columns(&mut t, &pairs(&[("a", "c")]));
        assert!(msg.contains("duplicate column names"), "{}", msg);
        assert!(msg.contains("No changes made"), "{}", msg);
        assert_eq!(t, before);
    }

    #[test]
    fn rename_with_no_matching_names_is_a_reported_no_op() {
        let mut t = sample();
        let before = t.clone();
        let msg = rename_columns(&mut t, &pairs(&[("nope", "x")]));
        assert!(msg.starts_with("No matching columns to rename"), "{}", msg);
        assert_eq!(t, before);
    }

    #[test]
    fn drop_removes_present_columns_and_their_cells() {
        let mut t = sample();
        let msg = drop_columns(&mut t, &["b".to_string(), "missing".to_string()]);
        assert_eq!(msg, "Dropped columns: [\"b\"]");
        assert_eq!(t.column_names(), vec!["a", "c"]);
        assert!(t.rows().iter().all(|r| r.len() == 2));
    }

    #[test]
    fn drop_with_no_valid_columns_leaves_table_unchanged() {
        let mut t = sample();
        let before = t.clone();
        assert_eq!(
            drop_columns(&mut t, &["nope".to_string()]),
            "No valid columns to drop"
        );
        assert_eq!(t, before);
    }
}

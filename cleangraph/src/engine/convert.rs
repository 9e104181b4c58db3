//! Column type coercion.
//!
//! Values that cannot be coerced become absent; the result message says how many.

use std::str::FromStr;

use crate::table::{parse_datetime, parse_number, Cell, ColumnType, Table, Value};

/// Target tag accepted by `convert_column_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetType {
    Numeric,
    Datetime,
    Categorical,
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "number" | "float" => Ok(Self::Numeric),
            "datetime" | "date" => Ok(Self::Datetime),
            "categorical" | "category" => Ok(Self::Categorical),
            other => Err(format!(
                "unsupported target type: {} (use numeric, datetime, or categorical)",
                other
            )),
        }
    }
}

impl From<TargetType> for ColumnType {
    fn from(t: TargetType) -> Self {
        match t {
            TargetType::Numeric => ColumnType::Numeric,
            TargetType::Datetime => ColumnType::Datetime,
            TargetType::Categorical => ColumnType::Categorical,
        }
    }
}

fn to_numeric(value: Value) -> Cell {
    match value {
        Value::Number(n) => Some(Value::Number(n)),
        Value::Text(s) => parse_number(&s).map(Value::Number),
        Value::DateTime(dt) => Some(Value::Number(dt.and_utc().timestamp() as f64)),
    }
}

fn to_datetime(value: Value) -> Cell {
    match value {
        Value::DateTime(dt) => Some(Value::DateTime(dt)),
        Value::Text(s) => parse_datetime(&s).map(Value::DateTime),
        Value::Number(_) => None,
    }
}

fn to_categorical(value: Value) -> Cell {
    match value {
        Value::Text(s) => Some(Value::Text(s)),
        other => Some(Value::Text(other.to_string())),
    }
}

/// Coerces `column` to `target_type`. Unknown column or unsupported target type
/// leave the table untouched.
pub(crate) fn convert_column_type(table: &mut Table, column: &str, target_type: &str) -> String {
    let Some(idx) = table.column_index(column) else {
        return format!("Column '{}' not found in table", column);
    };
    let target = match target_type.parse::<TargetType>() {
        Ok(t) => t,
        Err(_) => return format!("Unsupported target type: {}", target_type),
    };

    let original = table.columns[idx].kind;
    let convert: fn(Value) -> Cell = match target {
        TargetType::Numeric => to_numeric,
        TargetType::Datetime => to_datetime,
        TargetType::Categorical => to_categorical,
    };

    let mut lost = 0usize;
    for row in table.rows.iter_mut() {
        if let Some(value) = row[idx].take() {
            let converted = convert(value);
            if converted.is_none() {
                lost += 1;
            }
            row[idx] = converted;
        }
    }
    let new_kind = ColumnType::from(target);
    table.columns[idx].kind = new_kind;

    let mut msg = format!(
        "Converted column '{}' from {} to {}",
        column, original, new_kind
    );
    if lost > 0 {
        msg.push_str(&format!(
            " ({} values could not be converted and are now missing)",
            lost
        ));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_to_numeric_coerces_failures_to_missing() {
        let mut t = Table::from_text_records(["v"], [["1"], ["abc"], ["2.5"], [""]]);
        assert_eq!(t.columns()[0].kind, ColumnType::Text);
        let msg = convert_column_type(&mut t, "v", "numeric");
        assert_eq!(
            msg,
            "Converted column 'v' from text to numeric (1 values could not be converted and are now missing)"
        );
        assert_eq!(t.columns()[0].kind, ColumnType::Numeric);
        assert_eq!(t.rows()[0][0], Some(Value::Number(1.0)));
        assert_eq!(t.rows()[1][0], None);
        assert_eq!(t.rows()[2][0], Some(Value::Number(2.5)));
        assert_eq!(t.missing_count(0), 2);
    }

    #[test]
    fn text_to_datetime_parses_common_layouts() {
        let mut t = Table::from_text_records(["d"], [["2024-01-31"], ["soon"]]);
        convert_column_type(&mut t, "d", "datetime");
        assert_eq!(t.columns()[0].kind, ColumnType::Datetime);
        assert_eq!(t.rows()[0][0].as_ref().map(|v| v.to_string()), Some("2024-01-31".into()));
        assert_eq!(t.rows()[1][0], None);
    }

    #[test]
    fn category_alias_keeps_values_and_changes_tag() {
        let mut t = Table::from_text_records(["n"], [["1"], ["2"]]);
        let msg = convert_column_type(&mut t, "n", "category");
        assert_eq!(msg, "Converted column 'n' from numeric to categorical");
        assert_eq!(t.rows()[0][0], Some(Value::Text("1".into())));
    }

    #[test]
    fn unknown_column_and_unsupported_type_do_not_mutate() {
        let mut t = Table::from_text_records(["n"], [["1"]]);
        let before = t.clone();
        assert_eq!(
            convert_column_type(&mut t, "x", "numeric"),
            "Column 'x' not found in table"
        );
        assert_eq!(
            convert_column_type(&mut t, "n", "boolean"),
            "Unsupported target type: boolean"
        );
        assert_eq!(t, before);
    }

    #[test]
    fn numeric_to_numeric_changes_nothing() {
        let mut t = Table::from_text_records(["n"], [["1"], [""], ["3.5"]]);
        let before = t.clone();
        let msg = convert_column_type(&mut t, "n", "numeric");
        assert_eq!(msg, "Converted column 'n' from numeric to numeric");
        assert_eq!(t, before);
    }
}

//! Output formatting for statement results
//!
//! Supports table, JSON and raw output formats.

use comfy_table::{Cell, ContentArrangement, Table};
use serde::{Deserialize, Serialize};

use crate::sql::{executor::ResultSet, types::Row};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted table output
    #[default]
    Table,
    /// JSON output, one document per statement
    Json,
    /// Raw output (values separated by tabs)
    Raw,
}

/// Formats a statement result according to the specified format
pub fn format_result(result: &ResultSet, format: OutputFormat) -> String {
    match (result, format) {
        (_, OutputFormat::Json) => format_json(result),
        (ResultSet::Select { columns, rows }, OutputFormat::Table) => format_table(columns, rows),
        (ResultSet::Select { columns, rows }, OutputFormat::Raw) => format_raw(columns, rows),
        _ => result.to_string(),
    }
}

/// Formats rows as a table
fn format_table(columns: &[String], rows: &[Row]) -> String {
    let mut table = Table::new();

    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    if !columns.is_empty() {
        table.set_header(columns.iter().map(Cell::new));
    }

    for row in rows {
        table.add_row(row.iter().map(|v| Cell::new(v.to_string())));
    }

    format!("{}\n({} rows)", table, rows.len())
}

fn format_json(result: &ResultSet) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

/// Formats rows as tab separated lines with a header line
fn format_raw(columns: &[String], rows: &[Row]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join("\t"));
    for row in rows {
        lines.push(
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{OutputFormat, format_result};
    use crate::sql::{
        executor::ResultSet,
        types::{Row, Value},
    };

    fn select() -> ResultSet {
        ResultSet::Select {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                Row::from(vec![Value::Integer(1), Value::String("a".to_string())]),
                Row::from(vec![Value::Integer(2), Value::Null]),
            ],
        }
    }

    #[test]
    fn test_format_raw() {
        assert_eq!(
            format_result(&select(), OutputFormat::Raw),
            "id\tname\n1\ta\n2\tNULL"
        );
        assert_eq!(
            format_result(&ResultSet::Delete { count: 2 }, OutputFormat::Raw),
            "DELETE 2"
        );
    }

    #[test]
    fn test_format_table() {
        let output = format_result(&select(), OutputFormat::Table);
        assert!(output.contains("name"));
        assert!(output.contains("NULL"));
        assert!(output.ends_with("(2 rows)"));
        assert_eq!(
            format_result(&ResultSet::Insert { count: 1 }, OutputFormat::Table),
            "INSERT 1"
        );
    }

    #[test]
    fn test_format_json() {
        let output = format_result(&select(), OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["kind"], "select");
        assert_eq!(json["columns"][1], "name");
        assert_eq!(json["rows"][0][0], 1);
        assert!(json["rows"][1][1].is_null());

        let output = format_result(&ResultSet::Update { count: 4 }, OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["kind"], "update");
        assert_eq!(json["count"], 4);
    }
}

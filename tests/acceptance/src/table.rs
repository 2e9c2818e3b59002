//! Conversions from gherkin data tables.

use itemcheck_criteria::{CriterionRow, Record};
use serde_json::Value;

/// Criteria rows from a table whose first row is the header.
pub fn criteria_from_table(rows: &[Vec<String>]) -> Vec<CriterionRow> {
    match rows.split_first() {
        Some((header, body)) => CriterionRow::from_table(header, body),
        None => Vec::new(),
    }
}

/// Records from a table whose first row is the header. Blank cells are
/// left out and other cells are typed with [`typed_cell`].
pub fn records_from_table(rows: &[Vec<String>]) -> Vec<Record> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };
    body.iter()
        .map(|cells| {
            header
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !cell.trim().is_empty())
                .fold(Record::new(), |record, (field, cell)| {
                    record.with(field.trim(), typed_cell(cell))
                })
        })
        .collect()
}

/// Integers, then floats, then `true`/`false` in any case, else a string.
pub fn typed_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_typed_cell() {
        assert_eq!(typed_cell("10"), json!(10));
        assert_eq!(typed_cell(" 99.99 "), json!(99.99));
        assert_eq!(typed_cell("True"), json!(true));
        assert_eq!(typed_cell("false"), json!(false));
        assert_eq!(typed_cell("inf"), json!("inf"));
        assert_eq!(typed_cell("Item de Prueba"), json!("Item de Prueba"));
    }

    #[test]
    fn test_records_from_table() {
        let rows = table(&[
            &["id", "name", "price", "available", "category"],
            &["100", "Item de Prueba", "99.99", "True", ""],
        ]);
        let records = records_from_table(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), Some(100));
        assert_eq!(records[0].get("available"), Some(&json!(true)));
        assert!(!records[0].contains("category"));
    }

    #[test]
    fn test_criteria_from_table() {
        let rows = table(&[&["price", "available"], &[">100", "True"], &["", ""]]);
        let criteria = criteria_from_table(&rows);
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria[0].get("price"), Some(">100"));
        assert!(criteria[1].is_blank());
        assert!(criteria_from_table(&[]).is_empty());
    }
}

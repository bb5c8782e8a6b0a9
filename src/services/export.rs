//! Parsing of backend export output
//!
//! Export commands print CSV with a header row. Rows are padded or
//! truncated to the dashboard's column count so a ragged export cannot
//! shift cells between columns.

use anyhow::{Context, Result};

/// Parse CSV text into a header row and data rows
pub fn parse_export(raw: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .context("export output has no header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed export row")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok((headers, rows))
}

/// Pad or truncate every row to exactly `columns` cells
pub fn align_rows(mut rows: Vec<Vec<String>>, columns: usize) -> Vec<Vec<String>> {
    for row in &mut rows {
        row.resize(columns, String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let raw = "id,name,price\n1,جلابية,15000\n2,عطر صندل,8500\n";
        let (headers, rows) = parse_export(raw).unwrap();
        assert_eq!(headers, vec!["id", "name", "price"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1", "جلابية", "15000"]);
    }

    #[test]
    fn test_parse_export_quoted_cells() {
        let raw = "id,name\n1,\"متجر, فرع الخرطوم\"\n";
        let (_, rows) = parse_export(raw).unwrap();
        assert_eq!(rows[0][1], "متجر, فرع الخرطوم");
    }

    #[test]
    fn test_parse_empty_output() {
        let (headers, rows) = parse_export("").unwrap();
        assert!(headers.is_empty());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_align_rows_pads_and_truncates() {
        let rows = vec![
            vec!["1".to_string()],
            vec!["2".to_string(), "b".to_string(), "extra".to_string()],
        ];
        let aligned = align_rows(rows, 2);
        assert_eq!(aligned[0], vec!["1", ""]);
        assert_eq!(aligned[1], vec!["2", "b"]);
    }
}

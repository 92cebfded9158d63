//! Batch input normalization.
//!
//! Reading turns raw CSV bytes into a [`CustomerTable`] with lowercased
//! column names and per-column type inference. Cleaning then enforces the
//! required columns, coerces the numeric ones, derives `totalcharges` and
//! drops rows that still carry missing values.

use crate::domain::model::{CustomerTable, Record};
use crate::utils::error::{ChurnError, Result};
use serde_json::{Number, Value};
use std::collections::HashSet;

pub const TENURE: &str = "tenure";
pub const MONTHLY_CHARGES: &str = "monthlycharges";
pub const TOTAL_CHARGES: &str = "totalcharges";

pub const REQUIRED_COLUMNS: [&str; 2] = [TENURE, MONTHLY_CHARGES];

pub const MISSING_ROWS_WARNING: &str =
    "Some rows contain invalid or missing data. These rows will be skipped.";

/// Cell contents treated as missing, following the usual CSV/dataframe markers.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub table: CustomerTable,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell)
}

fn parse_number(cell: &str) -> Option<Number> {
    let trimmed = cell.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .and_then(Number::from_f64)
}

fn is_integer_cell(cell: &str) -> bool {
    cell.trim().parse::<i64>().is_ok()
}

/// Widens an integer to a float so a column is written in a single form.
fn to_float(n: Number) -> Number {
    n.as_f64().and_then(Number::from_f64).unwrap_or(n)
}

/// 讀取 CSV，欄位名稱統一轉小寫並去除空白
pub fn read_customer_table(bytes: &[u8]) -> Result<CustomerTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();

    let mut seen = HashSet::new();
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(ChurnError::processing(format!(
                "duplicate column '{}' after normalizing header names",
                column
            )));
        }
    }

    let mut raw_rows = Vec::new();
    for row in reader.records() {
        raw_rows.push(row?);
    }

    // 整欄皆可解析為數字才視為數值欄位
    let numeric: Vec<bool> = (0..columns.len())
        .map(|i| {
            raw_rows
                .iter()
                .map(|row| row.get(i).unwrap_or(""))
                .filter(|cell| !is_missing(cell))
                .all(|cell| parse_number(cell).is_some())
        })
        .collect();

    // 數值欄位中只要有一格是小數，整欄都以小數表示
    let float: Vec<bool> = (0..columns.len())
        .map(|i| {
            numeric[i]
                && raw_rows
                    .iter()
                    .map(|row| row.get(i).unwrap_or(""))
                    .filter(|cell| !is_missing(cell))
                    .any(|cell| !is_integer_cell(cell))
        })
        .collect();

    let records = raw_rows
        .iter()
        .map(|row| {
            let mut record = Record::new();
            for (i, column) in columns.iter().enumerate() {
                let cell = row.get(i).unwrap_or("");
                let value = if is_missing(cell) {
                    Value::Null
                } else if numeric[i] {
                    parse_number(cell)
                        .map(|n| if float[i] { to_float(n) } else { n })
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                } else {
                    Value::String(cell.to_string())
                };
                record.insert(column.clone(), value);
            }
            record
        })
        .collect();

    tracing::debug!(
        "Read {} rows with columns: {}",
        raw_rows.len(),
        columns.join(", ")
    );

    Ok(CustomerTable { columns, records })
}

pub fn check_required_columns(table: &CustomerTable) -> Result<()> {
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    Err(ChurnError::MissingColumnsError { columns: missing })
}

/// Numeric coercion: anything that is not a finite number becomes 0.
pub fn coerce_numeric(value: &Value) -> Number {
    match value {
        Value::Number(n) => n.clone(),
        Value::String(s) => parse_number(s).unwrap_or_else(|| Number::from(0)),
        _ => Number::from(0),
    }
}

fn as_f64(value: &Value) -> f64 {
    value.as_f64().unwrap_or(0.0)
}

pub fn clean_customer_table(mut table: CustomerTable) -> Result<CleanedTable> {
    check_required_columns(&table)?;

    for column in REQUIRED_COLUMNS {
        // 有任何一格被強制轉換或為小數時，整欄改為小數
        let mut promote = false;
        for record in &mut table.records {
            let original = record.get(column);
            if !matches!(original, Some(Value::Number(_))) {
                promote = true;
            }
            let coerced = original.map(coerce_numeric).unwrap_or_else(|| Number::from(0));
            promote |= coerced.is_f64();
            record.insert(column, Value::Number(coerced));
        }

        if promote {
            for record in &mut table.records {
                if let Some(Value::Number(n)) = record.data.remove(column) {
                    record.insert(column, Value::Number(to_float(n)));
                }
            }
        }
    }

    if !table.has_column(TOTAL_CHARGES) {
        tracing::debug!("Deriving {} as {} * {}", TOTAL_CHARGES, TENURE, MONTHLY_CHARGES);
        table.columns.push(TOTAL_CHARGES.to_string());
        for record in &mut table.records {
            let tenure = record.get(TENURE).map(as_f64).unwrap_or(0.0);
            let monthly = record.get(MONTHLY_CHARGES).map(as_f64).unwrap_or(0.0);
            let total = Number::from_f64(tenure * monthly).unwrap_or_else(|| Number::from(0));
            record.insert(TOTAL_CHARGES, Value::Number(total));
        }
    }

    let rows_read = table.records.len();
    table.records.retain(|r| !r.has_missing_values());
    let rows_dropped = rows_read - table.records.len();

    if rows_dropped > 0 {
        tracing::warn!("⚠️ {} ({} of {} rows)", MISSING_ROWS_WARNING, rows_dropped, rows_read);
    }

    Ok(CleanedTable {
        table,
        rows_read,
        rows_dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clean(csv: &str) -> Result<CleanedTable> {
        clean_customer_table(read_customer_table(csv.as_bytes())?)
    }

    #[test]
    fn test_headers_are_trimmed_and_lowercased() {
        let table = read_customer_table(b" Tenure ,MonthlyCharges,Contract\n1,2.5,one_year\n").unwrap();
        assert_eq!(table.columns, vec!["tenure", "monthlycharges", "contract"]);
        assert_eq!(table.records[0].get("contract").unwrap(), "one_year");
    }

    #[test]
    fn test_missing_tenure_is_rejected_by_name() {
        let err = clean("MonthlyCharges,gender\n10,male\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing columns in the uploaded file: tenure"
        );
    }

    #[test]
    fn test_both_required_columns_missing_are_listed() {
        let err = clean("gender\nmale\n").unwrap_err();
        match err {
            ChurnError::MissingColumnsError { columns } => {
                assert_eq!(columns, vec!["monthlycharges", "tenure"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_monthly_charges_become_zero() {
        let cleaned = clean("tenure,monthlycharges\n5,abc\n3,20.5\n").unwrap();
        let records = &cleaned.table.records;

        assert_eq!(records[0].get(MONTHLY_CHARGES).unwrap().as_f64(), Some(0.0));
        assert_eq!(records[1].get(MONTHLY_CHARGES).unwrap().as_f64(), Some(20.5));
        assert_eq!(cleaned.rows_dropped, 0);
    }

    #[test]
    fn test_empty_required_cells_are_coerced_not_dropped() {
        let cleaned = clean("tenure,monthlycharges\n,10\n").unwrap();
        assert_eq!(cleaned.table.len(), 1);
        assert_eq!(cleaned.table.records[0].get(TENURE), Some(&json!(0.0)));
    }

    #[test]
    fn test_total_charges_derived_when_absent() {
        let cleaned = clean("tenure,monthlycharges\n12,29.5\n").unwrap();
        assert_eq!(
            cleaned.table.columns,
            vec!["tenure", "monthlycharges", "totalcharges"]
        );
        assert_eq!(
            cleaned.table.records[0].get(TOTAL_CHARGES).unwrap().as_f64(),
            Some(354.0)
        );
    }

    #[test]
    fn test_existing_total_charges_are_kept() {
        let cleaned = clean("tenure,monthlycharges,totalcharges\n12,29.5,100\n").unwrap();
        assert_eq!(cleaned.table.columns.len(), 3);
        assert_eq!(cleaned.table.records[0].get(TOTAL_CHARGES), Some(&json!(100)));
    }

    #[test]
    fn test_rows_with_missing_values_are_dropped() {
        let csv = "tenure,monthlycharges,gender\n1,10,male\n2,20,\n3,30,NA\n4,40,female\n";
        let cleaned = clean(csv).unwrap();

        assert_eq!(cleaned.rows_read, 4);
        assert_eq!(cleaned.rows_dropped, 2);
        assert_eq!(cleaned.table.len(), 2);
        assert_eq!(cleaned.table.records[1].get("gender").unwrap(), "female");
    }

    #[test]
    fn test_mixed_column_stays_categorical() {
        let table = read_customer_table(b"tenure,monthlycharges,totalcharges\n1,2,29.85\n1,2, \n").unwrap();
        assert_eq!(table.records[0].get(TOTAL_CHARGES).unwrap(), "29.85");
        assert_eq!(table.records[1].get(TOTAL_CHARGES).unwrap(), " ");
    }

    #[test]
    fn test_header_only_input_yields_empty_table() {
        let cleaned = clean("tenure,monthlycharges\n").unwrap();
        assert!(cleaned.table.is_empty());
        assert_eq!(cleaned.rows_dropped, 0);
    }

    #[test]
    fn test_every_row_dropped_yields_empty_table() {
        let cleaned = clean("tenure,monthlycharges,gender\n1,2,\n3,4,NA\n").unwrap();
        assert_eq!(cleaned.table.len(), 0);
        assert_eq!(cleaned.rows_read, 2);
        assert_eq!(cleaned.rows_dropped, 2);
    }

    #[test]
    fn test_column_with_any_decimal_is_all_float() {
        let table = read_customer_table(b"tenure,monthlycharges,x\n1,2,1\n3,4,2.5\n").unwrap();
        assert_eq!(table.records[0].get("x"), Some(&json!(1.0)));
        assert_eq!(table.records[1].get("x"), Some(&json!(2.5)));
        assert_eq!(table.records[0].get(TENURE), Some(&json!(1)));
    }

    #[test]
    fn test_coerced_required_column_becomes_float() {
        let cleaned = clean("tenure,monthlycharges\nabc,10\n7,20\n").unwrap();
        let records = &cleaned.table.records;
        assert_eq!(records[0].get(TENURE), Some(&json!(0.0)));
        assert_eq!(records[1].get(TENURE), Some(&json!(7.0)));
        assert_eq!(records[1].get(MONTHLY_CHARGES), Some(&json!(20)));
    }

    #[test]
    fn test_non_finite_required_values_become_zero() {
        let cleaned = clean("tenure,monthlycharges\ninf,1e400\n").unwrap();
        let record = &cleaned.table.records[0];
        assert_eq!(record.get(TENURE).unwrap().as_f64(), Some(0.0));
        assert_eq!(record.get(MONTHLY_CHARGES).unwrap().as_f64(), Some(0.0));
    }

    #[test]
    fn test_duplicate_normalized_headers_are_rejected() {
        assert!(read_customer_table(b"Tenure,tenure\n1,2\n").is_err());
    }

    #[test]
    fn test_ragged_rows_are_csv_errors() {
        let err = read_customer_table(b"tenure,monthlycharges\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ChurnError::CsvError(_)));
    }
}

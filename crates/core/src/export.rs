//! CSV export of table and query results.

use thiserror::Error;

use crate::storage::TableData;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Serializes a result set as CSV: a header row of column names, then one
/// record per row. NULL becomes an empty field.
pub fn to_csv(data: &TableData) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&data.columns)?;
    for row in &data.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

/// `Content-Disposition` file name for a table download.
pub fn csv_file_name(table: &str) -> String {
    format!("{table}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Cell;

    #[test]
    fn test_to_csv_writes_header_and_rows() {
        let data = TableData::new(
            vec!["Provider_ID".to_string(), "Name".to_string(), "Contact".to_string()],
            vec![
                vec![
                    Cell::Integer(1),
                    Cell::Text("Green Bistro".to_string()),
                    Cell::Null,
                ],
                vec![
                    Cell::Integer(2),
                    Cell::Text("Smith, Jones & Co".to_string()),
                    Cell::Text("555-0101".to_string()),
                ],
            ],
        );

        let csv = to_csv(&data).unwrap();
        assert_eq!(
            csv,
            "Provider_ID,Name,Contact\n1,Green Bistro,\n2,\"Smith, Jones & Co\",555-0101\n"
        );
    }

    #[test]
    fn test_to_csv_keeps_real_decimals() {
        let data = TableData::new(
            vec!["City".to_string(), "Average".to_string()],
            vec![vec![Cell::Text("Springfield".to_string()), Cell::Real(17.0)]],
        );
        assert_eq!(to_csv(&data).unwrap(), "City,Average\nSpringfield,17.0\n");
    }

    #[test]
    fn test_to_csv_empty_table_keeps_header() {
        let data = TableData::new(vec!["Claim_ID".to_string()], vec![]);
        assert_eq!(to_csv(&data).unwrap(), "Claim_ID\n");
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(csv_file_name("food"), "food.csv");
    }
}

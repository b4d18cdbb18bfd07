// CSV reader - parses uploaded bytes into a raw header/row table
use crate::domain::columns::{RawRow, RawTable};
use crate::domain::error::IngestError;
use csv::ReaderBuilder;

/// Parse raw CSV bytes into headers plus per-row header->cell mappings.
///
/// Rows are allowed to be shorter or longer than the header row; cells
/// beyond the header width are ignored and missing cells stay absent so
/// numeric coercion treats them as failures downstream. Cell values are
/// kept exactly as written; only header matching normalizes.
pub fn read_csv(content: &[u8]) -> Result<RawTable, IngestError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(content);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::InvalidCsv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::InvalidCsv(e.to_string()))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

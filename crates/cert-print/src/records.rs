use crate::types::{PrintError, Result};
use cert_layout::DataRecord;
use std::path::Path;

/// Load data records from a CSV file. The header row names the field keys.
pub async fn load_records_from_csv(path: impl AsRef<Path>) -> Result<Vec<DataRecord>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let records = tokio::task::spawn_blocking(move || {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let headers = reader.headers()?.clone();
        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            let record: DataRecord = headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key.trim(), value.trim()))
                .collect();
            if !record.is_empty() {
                records.push(record);
            }
        }
        Ok::<_, PrintError>(records)
    })
    .await??;

    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

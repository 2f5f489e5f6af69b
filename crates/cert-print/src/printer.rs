use crate::pdf::write_certificates;
use cert_layout::{DataRecord, FieldValueResolver, PrintJob, PrintTrigger};
use std::path::{Path, PathBuf};

/// Print trigger that writes the certificates for a batch of records to a PDF
/// file. Without records it writes a single layout proof page.
#[derive(Debug, Clone)]
pub struct PdfPrinter<R> {
    output_path: PathBuf,
    resolver: R,
    records: Vec<DataRecord>,
}

impl<R: FieldValueResolver> PdfPrinter<R> {
    pub fn new(output_path: impl Into<PathBuf>, resolver: R) -> Self {
        Self {
            output_path: output_path.into(),
            resolver,
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<DataRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }
}

impl<R: FieldValueResolver> PrintTrigger for PdfPrinter<R> {
    async fn print(&self, job: &PrintJob) -> cert_layout::Result<()> {
        write_certificates(job, &self.records, &self.resolver, &self.output_path).await?;
        log::info!(
            "Wrote {} certificate page(s) for {} to {}",
            self.records.len().max(1),
            job.template_name,
            self.output_path.display()
        );
        Ok(())
    }
}

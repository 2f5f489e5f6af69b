use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PrintError>;

impl From<PrintError> for cert_layout::LayoutError {
    fn from(err: PrintError) -> Self {
        cert_layout::LayoutError::Print(err.to_string())
    }
}

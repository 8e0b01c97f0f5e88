use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("risk assessment needs at least {required} yearly records, got {actual}")]
    InvalidInput { required: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The dataset is empty once unusable rows are filtered out.
    #[error("no usable data: {rows_read} rows read, none passed the usable-row filter")]
    NoUsableData { rows_read: usize },

    #[error("failed to read dataset csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

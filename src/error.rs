use thiserror::Error;

/// Failures that abort an optimization run. No partial summary is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("Product not found: {code} for vendor {vendor}")]
    MaterialNotFound { code: String, vendor: String },

    #[error("piece of length {length} for material {code} does not fit in a rod of length {raw_length}")]
    PieceTooLong {
        code: String,
        length: f64,
        raw_length: f64,
    },

    #[error("invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

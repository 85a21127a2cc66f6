use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("entry ({row}, {col}) lies outside {n_rows}x{n_cols} matrix")]
    IndexOutOfBounds { row: usize, col: usize, n_rows: usize, n_cols: usize },

    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch { expected: Vec<usize>, found: Vec<usize> },

    #[error("couldn't reshape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("couldn't read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

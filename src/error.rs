use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported scale: {0}")]
    UnsupportedScale(String),

    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),

    #[error("missing accessor for depth {depth}")]
    MissingAccessor { depth: usize },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid include region '{pattern}'")]
    InvalidSegment {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("structurally malformed reading: {0}")]
    Structural(String),
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
    #[error("failed to read scoring configuration: {0}")]
    ConfigRead(std::io::Error),
    #[error("failed to parse scoring configuration: {0}")]
    ConfigParse(serde_yaml::Error),
}

pub type AssessmentResult<T> = std::result::Result<T, AssessmentError>;

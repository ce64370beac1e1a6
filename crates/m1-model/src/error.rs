use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("invalid patient id: {0:?}")]
    InvalidPatientId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

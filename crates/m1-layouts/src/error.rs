use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no layout named {0:?} is registered")]
    NotFound(String),
    #[error("a layout named {0:?} is already registered")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

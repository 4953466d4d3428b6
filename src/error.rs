use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("catalog entry '{0}' has no required skills")]
    EmptyCatalogEntry(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabopsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog edit failed: {0}")]
    CatalogEdit(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Monitor setup failed: {0}")]
    MonitorSetup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabopsError>;

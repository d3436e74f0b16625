use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacemarkError {
    #[error("Geo error: {0}")]
    Geo(#[from] crate::geo::GeoError),
    #[error("Place store error: {0}")]
    Store(#[from] crate::store::StoreError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlacemarkError>;

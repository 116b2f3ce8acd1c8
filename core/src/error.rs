use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Fixture file '{path}' could not be read: {source}")]
    FixtureIo {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Zone '{id}' not found")]
    ZoneNotFound { id: String },

    #[error("Sensor not found")]
    SensorNotFound { id: String },

    #[error("Sensor ID already exists")]
    SensorExists { id: String },

    #[error("Invalid API key")]
    Unauthorized,

    #[error("No view is registered for path '{path}'")]
    UnknownRoute { path: String },
}

pub type GridResult<T> = Result<T, GridError>;

use serde::{ser::Serializer, Serialize};
use thiserror::Error;

/**
 * Create the error type that represents all errors possible in our program
 */
#[derive(Debug, Error)]
pub enum PetflixError {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("An error occurred while manipulating the config: {0}")]
    Config(String),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /**
     * Custom errors
     */
    #[error("Video data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/**
 * Errors are rendered as their message when embedded in command output
 */
impl Serialize for PetflixError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type AnyResult<T, E = PetflixError> = Result<T, E>;

impl From<serde_json::Error> for PetflixError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_data() || error.is_syntax() || error.is_eof() {
            PetflixError::DeserializationError(error.to_string())
        } else {
            PetflixError::SerializationError(error.to_string())
        }
    }
}

impl From<pico_args::Error> for PetflixError {
    fn from(error: pico_args::Error) -> Self {
        PetflixError::InvalidArguments(error.to_string())
    }
}

impl From<toml::de::Error> for PetflixError {
    fn from(error: toml::de::Error) -> Self {
        PetflixError::Config(error.to_string())
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Player '{0}' does not exist")]
    PlayerNotFound(String),

    #[error("Player '{0}' already exists, choose another name")]
    PlayerExists(String),

    #[error("Player record for '{name}' is corrupt: {source}")]
    CorruptProfile {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid player name '{0}'")]
    InvalidPlayerName(String),

    #[error("Category '{0}' does not exist")]
    CategoryNotFound(String),

    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("No images available in {0}")]
    EmptyPool(String),

    #[error("No quiz is running")]
    NoActiveQuiz,

    #[error("The quiz is already complete")]
    QuizComplete,

    #[error("'{0}' is not available right now")]
    ChoiceUnavailable(&'static str),
}

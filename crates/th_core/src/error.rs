use std::fmt;

#[derive(Debug)]
pub enum GameError {
    InvalidPlayerCount { expected: String, found: usize },
    InvalidTeamAssignment(String),
    InvalidConfig(String),
    NoActiveGame,
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::InvalidPlayerCount { expected, found } => {
                write!(f, "Invalid player count: expected {}, found {}", expected, found)
            }
            GameError::InvalidTeamAssignment(msg) => {
                write!(f, "Invalid team assignment: {}", msg)
            }
            GameError::InvalidConfig(msg) => {
                write!(f, "Invalid game configuration: {}", msg)
            }
            GameError::NoActiveGame => {
                write!(f, "No active game")
            }
            GameError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            GameError::DeserializationError(err.to_string())
        } else {
            GameError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

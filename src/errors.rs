use std::path::PathBuf;

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to loading configuration or data files
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveDataError {
    /// The specified move was not found in the dex
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    /// Move data is malformed or incomplete
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeciesDataError {
    /// The specified species was not found in the dex
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    /// No species sits at the given position in load order
    #[error("No species at index {0}")]
    SpeciesIndexNotFound(usize),
    /// Species data is malformed or incomplete
    #[error("Malformed species data: {0}")]
    MalformedData(String),
    /// The dex holds no species to pick from
    #[error("No species available")]
    Empty,
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// A decision source returned a move slot outside 0..=3
    #[error("Invalid move choice: {index}")]
    InvalidChoice { index: usize },
    /// A decision source could not produce a choice at all
    #[error("No move choice available: {0}")]
    NoInput(String),
    /// A round was requested after the battle finished
    #[error("The battle is already over")]
    BattleOver,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_messages_nest() {
        let err: BattleEngineError = MoveDataError::MoveNotFound("Splash".to_string()).into();
        assert_eq!(err.to_string(), "Move data error: Move not found: Splash");

        let err: BattleEngineError = ActionError::InvalidChoice { index: 7 }.into();
        assert_eq!(err.to_string(), "Action error: Invalid move choice: 7");
    }
}

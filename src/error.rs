use std::path::PathBuf;

/// Errors that can occur when constructing a game board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    EmptyBoard,

    #[error("mine at ({row}, {col}) is outside a {rows}x{cols} board")]
    MineOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{mines} mines do not leave a safe cell on a {rows}x{cols} board")]
    TooManyMines {
        mines: usize,
        rows: usize,
        cols: usize,
    },

    #[error("duplicate mine at ({row}, {col})")]
    DuplicateMine { row: usize, col: usize },
}

/// Errors that can occur when constructing the solver.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot solve an empty {rows}x{cols} field")]
    EmptyField { rows: usize, cols: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unparseable event time {raw:?}")]
    EventTime { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected 2 team entries, found {found}")]
    TeamCount { found: usize },

    #[error("both team names are empty")]
    UnnamedTeams,
}

/// Why a single game was dropped from a pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl GameError {
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::Parse(_) => "parse",
            GameError::Shape(_) => "shape",
        }
    }
}

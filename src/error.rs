use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid leaderboard data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Keyboard has {naturals} natural keys but only {available} symbols are available")]
    AlphabetExhausted { naturals: usize, available: usize },

    #[error("MIDI error: {0}")]
    Midi(String),

    #[error("No stages configured")]
    NoStage,
}

pub type Result<T> = std::result::Result<T, TutorError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read corpus file {}: {source}", .path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Character {0:?} does not occur in the corpus")]
    CharacterNotInCorpus(char),

    #[error("Every occurrence of {0:?} has already been used")]
    AddressListExhausted(char),

    #[error("Address {0} does not exist in the reverse index")]
    AddressResolution(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;

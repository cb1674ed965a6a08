use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadabilityError {
    /// Requested input path does not exist.
    #[error("the file {} does not exist", .path.display())]
    MissingInputFile { path: PathBuf },

    /// Zero words or zero sentences after normalization.
    #[error("Can not compute metrics without words ({words} words, {sentences} sentences)")]
    DegenerateCorpus { words: usize, sentences: usize },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReadabilityError>;

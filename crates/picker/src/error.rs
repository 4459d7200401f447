use thiserror::Error;

pub type Result<T> = std::result::Result<T, PickerError>;

#[derive(Error, Debug)]
pub enum PickerError {
    /// The prompt itself failed or was cancelled; passed through untouched.
    #[error(transparent)]
    Prompt(#[from] std::io::Error),

    #[error("invalid selection {0}")]
    InvalidSelection(usize),
}

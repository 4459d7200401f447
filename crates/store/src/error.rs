use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KonfError>;

#[derive(Error, Debug)]
pub enum KonfError {
    /// Nothing selectable is left in the store after filtering. Completion treats this as
    /// "no suggestions", the picker as a hint to run `konf import`.
    #[error("The konf store at {store_dir:?} is empty. Please run 'konf import' to populate it")]
    EmptyStore { store_dir: PathBuf },

    #[error("Impure Store: The kubeconfig {path:?} contains multiple contexts and/or clusters. Please only use 'konf import' for populating the store")]
    StoreImpurity { path: PathBuf },

    /// Recovered locally by the indexer: the file is skipped with a warning.
    #[error("file {path:?} does not contain a valid kubeconfig: {reason}")]
    MalformedEntry { path: PathBuf, reason: String },

    #[error("no konf with id {id:?} found in the store (expected {path:?})")]
    NotFound { id: String, path: PathBuf },

    #[error("invalid konf id {0:?}")]
    InvalidIdentifier(String),

    #[error("could not select latest konf, because no konf was yet set")]
    NoPriorSelection,

    #[error("could not write active konf {path:?}: {source}")]
    ActivationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not save latest konf {path:?}: {source}")]
    LatestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KonfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_empty_store(&self) -> bool {
        matches!(self, Self::EmptyStore { .. })
    }
}

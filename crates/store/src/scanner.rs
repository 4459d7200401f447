use crate::fs::KonfFs;
use crate::{KonfError, Result};
use std::io;
use std::path::{Path, PathBuf};

/// A candidate konf found in the store, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFile {
    pub name: String,
    pub path: PathBuf,
}

/// Scanner for the flat konf store
pub struct StoreScanner<'a, F: KonfFs> {
    fs: &'a F,
    store_dir: PathBuf,
}

impl<'a, F: KonfFs> StoreScanner<'a, F> {
    pub fn new(fs: &'a F, store_dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            store_dir: store_dir.as_ref().to_path_buf(),
        }
    }

    /// List candidate konfs sorted by file name.
    ///
    /// Sub-directories are skipped without being visited and hidden files are dropped
    /// silently: `konf import` never writes either, so they are most likely OS artifacts
    /// such as `.DS_Store`.
    pub fn scan(&self) -> Result<Vec<StoreFile>> {
        let entries = match self.fs.read_dir(&self.store_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("Store dir {} does not exist", self.store_dir.display());
                return Err(self.empty());
            }
            Err(err) => return Err(KonfError::io(&self.store_dir, err)),
        };

        let mut files: Vec<StoreFile> = entries
            .into_iter()
            .filter(|entry| {
                if entry.is_dir {
                    log::debug!("Skipping directory {}", entry.path.display());
                    return false;
                }
                !entry.name.starts_with('.')
            })
            .map(|entry| StoreFile {
                name: entry.name,
                path: entry.path,
            })
            .collect();

        // same order as shell completion shows them
        files.sort_by(|a, b| a.name.cmp(&b.name));

        if files.is_empty() {
            return Err(self.empty());
        }

        log::debug!(
            "Found {} candidate konfs in {}",
            files.len(),
            self.store_dir.display()
        );
        Ok(files)
    }

    fn empty(&self) -> KonfError {
        KonfError::EmptyStore {
            store_dir: self.store_dir.clone(),
        }
    }
}

use crate::fs::KonfFs;
use crate::layout::{validate_id, KonfLayout, ScopeKey, KONF_PERM};
use crate::{KonfError, Result};
use std::io;
use std::path::PathBuf;

/// Makes store konfs active for a session and remembers the latest one.
///
/// Store files are only ever read; the active copy and the latest record are the only files
/// written.
pub struct Activator<F: KonfFs> {
    fs: F,
    layout: KonfLayout,
}

impl<F: KonfFs> Activator<F> {
    pub fn new(fs: F, layout: KonfLayout) -> Self {
        Self { fs, layout }
    }

    /// Copy the store konf for `id` to the active path of `scope` and return that path.
    pub fn activate(&self, id: &str, scope: &ScopeKey) -> Result<PathBuf> {
        validate_id(id)?;

        let store_path = self.layout.store_path_for_id(id);
        let konf = self.fs.read(&store_path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                KonfError::NotFound {
                    id: id.to_string(),
                    path: store_path.clone(),
                }
            } else {
                KonfError::io(&store_path, err)
            }
        })?;

        let active = self.layout.active_path_for_scope(scope);
        self.fs
            .write(&active, &konf, KONF_PERM)
            .map_err(|source| KonfError::ActivationWrite {
                path: active.clone(),
                source,
            })?;

        log::debug!(
            "Copied {} to {} ({} bytes)",
            store_path.display(),
            active.display(),
            konf.len()
        );
        Ok(active)
    }

    pub fn record_latest(&self, id: &str) -> Result<()> {
        let path = self.layout.latest_konf_file();
        self.fs
            .write(&path, id.as_bytes(), KONF_PERM)
            .map_err(|source| KonfError::LatestWrite { path, source })
    }

    pub fn recall_latest(&self) -> Result<String> {
        let path = self.layout.latest_konf_file();
        match self.fs.read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(KonfError::NoPriorSelection),
            Err(err) => Err(KonfError::io(path, err)),
        }
    }
}

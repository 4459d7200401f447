use crate::{KonfError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Permission bits for every file konf writes: the owning user only.
pub const KONF_PERM: u32 = 0o600;

const STORE_DIR_NAME: &str = "store";
const ACTIVE_DIR_NAME: &str = "active";
const LATEST_KONF_FILE_NAME: &str = "latestkonf";
const KONF_EXTENSION: &str = "yaml";

/// Paths below the konf root directory.
///
/// ```text
/// <konf-dir>/
///     store/<id>.yaml        one cluster + one context each
///     active/<scope>.yaml    copy of the konf active for a shell session
///     latestkonf             id of the last activated konf
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KonfLayout {
    konf_dir: PathBuf,
}

impl KonfLayout {
    pub fn new(konf_dir: impl Into<PathBuf>) -> Self {
        Self {
            konf_dir: konf_dir.into(),
        }
    }

    pub fn store_dir(&self) -> PathBuf {
        self.konf_dir.join(STORE_DIR_NAME)
    }

    pub fn active_dir(&self) -> PathBuf {
        self.konf_dir.join(ACTIVE_DIR_NAME)
    }

    pub fn latest_konf_file(&self) -> PathBuf {
        self.konf_dir.join(LATEST_KONF_FILE_NAME)
    }

    pub fn store_path_for_id(&self, id: &str) -> PathBuf {
        self.store_dir().join(format!("{id}.{KONF_EXTENSION}"))
    }

    pub fn active_path_for_scope(&self, scope: &ScopeKey) -> PathBuf {
        self.active_dir()
            .join(format!("{}.{KONF_EXTENSION}", scope.as_str()))
    }
}

/// Key of the session an active konf belongs to.
///
/// The CLI uses the id of the shell that spawned it, so every shell gets its own active konf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey(String);

impl ScopeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[cfg(unix)]
    pub fn from_parent_process() -> Self {
        Self(std::os::unix::process::parent_id().to_string())
    }

    #[cfg(not(unix))]
    pub fn from_parent_process() -> Self {
        Self(std::process::id().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn id_from_cluster_and_context(cluster: &str, context: &str) -> String {
    format!("{context}_{cluster}")
}

/// Store file name without its extension.
pub fn id_from_file_name(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Rejects ids that would resolve outside the store directory.
pub fn validate_id(id: &str) -> Result<()> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0');
    if bad {
        return Err(KonfError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

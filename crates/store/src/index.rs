use crate::fs::KonfFs;
use crate::kubeconfig::KubeConfig;
use crate::layout::{id_from_cluster_and_context, id_from_file_name, KonfLayout};
use crate::scanner::{StoreFile, StoreScanner};
use crate::{KonfError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One selectable konf: the single context and cluster of a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub context: String,
    pub cluster: String,
    pub file: PathBuf,
}

impl StoreEntry {
    pub fn new(
        context: impl Into<String>,
        cluster: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            context: context.into(),
            cluster: cluster.into(),
            file: file.into(),
        }
    }

    pub fn id(&self) -> String {
        id_from_cluster_and_context(&self.cluster, &self.context)
    }
}

/// Turns scanned store files into [`StoreEntry`] descriptors.
pub struct KonfIndexer<'a, F: KonfFs> {
    fs: &'a F,
}

impl<'a, F: KonfFs> KonfIndexer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Index `files` in order.
    ///
    /// Malformed files are skipped with a warning. A file holding more than one cluster or
    /// context aborts the whole run: ids derived from an impure store are ambiguous, so no
    /// partial result is returned.
    pub fn index(&self, files: &[StoreFile], store_dir: &Path) -> Result<Vec<StoreEntry>> {
        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            match self.index_file(file) {
                Ok(entry) => entries.push(entry),
                Err(KonfError::MalformedEntry { path, reason }) => {
                    log::warn!(
                        "file {:?} does not contain a valid kubeconfig. Skipping for evaluation ({reason})",
                        path
                    );
                }
                Err(err) => return Err(err),
            }
        }

        if entries.is_empty() {
            return Err(KonfError::EmptyStore {
                store_dir: store_dir.to_path_buf(),
            });
        }

        warn_on_id_anomalies(files, &entries);
        Ok(entries)
    }

    fn index_file(&self, file: &StoreFile) -> Result<StoreEntry> {
        let bytes = self
            .fs
            .read(&file.path)
            .map_err(|err| KonfError::io(&file.path, err))?;
        let konf = KubeConfig::parse(&bytes).map_err(|err| KonfError::MalformedEntry {
            path: file.path.clone(),
            reason: err.to_string(),
        })?;

        let (clusters, contexts) = (konf.clusters(), konf.contexts());
        if clusters.len() > 1 || contexts.len() > 1 {
            return Err(KonfError::StoreImpurity {
                path: file.path.clone(),
            });
        }
        let (Some(cluster), Some(context)) = (clusters.first(), contexts.first()) else {
            return Err(KonfError::MalformedEntry {
                path: file.path.clone(),
                reason: "expected exactly one cluster and one context".into(),
            });
        };
        if cluster.name.is_empty() || context.name.is_empty() {
            return Err(KonfError::MalformedEntry {
                path: file.path.clone(),
                reason: "cluster and context need a name".into(),
            });
        }

        Ok(StoreEntry::new(&context.name, &cluster.name, &file.path))
    }
}

// `set <id>` resolves through the file name, so both a name that disagrees with its content
// and two files yielding the same id make a konf unreachable.
fn warn_on_id_anomalies(files: &[StoreFile], entries: &[StoreEntry]) {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for entry in entries {
        let id = entry.id();
        let name = files
            .iter()
            .find(|f| f.path == entry.file)
            .map(|f| id_from_file_name(&f.name));
        if name.is_some_and(|name| name != id) {
            log::warn!(
                "file {:?} holds konf {id:?} but is not named after it; 'konf set {id}' will not find it",
                entry.file
            );
        }
        if let Some(first) = seen.insert(id.clone(), &entry.file) {
            log::warn!(
                "konf id {id:?} is provided by both {:?} and {:?}",
                first,
                entry.file
            );
        }
    }
}

/// Scan and index the store of `layout`.
pub fn fetch_konfs<F: KonfFs>(fs: &F, layout: &KonfLayout) -> Result<Vec<StoreEntry>> {
    let store_dir = layout.store_dir();
    let files = StoreScanner::new(fs, &store_dir).scan()?;
    KonfIndexer::new(fs).index(&files, &store_dir)
}

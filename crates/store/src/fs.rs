//! Minimal filesystem capability used by the store.
//!
//! Everything in this crate reads and writes through [`KonfFs`], so the scanner, the indexer
//! and the activation manager run unchanged against the real disk ([`OsFs`]) or an in-memory
//! tree ([`MemFs`]).

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

pub trait KonfFs {
    /// Immediate children of `dir`. Sub-directories are reported but never descended into.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FileInfo>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path`, creating missing parent directories.
    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()>;

    fn metadata(&self, path: &Path) -> io::Result<FileInfo>;
}

impl<T: KonfFs + ?Sized> KonfFs for &T {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FileInfo>> {
        (**self).read_dir(dir)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        (**self).write(path, contents, mode)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        (**self).metadata(path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl KonfFs for OsFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FileInfo>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry?;
            let meta = entry.metadata()?;
            out.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                is_dir: meta.is_dir(),
            });
        }
        Ok(out)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.truncate(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        let mut file = options.open(path)?;
        // the open mode only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(mode))?;
        }
        #[cfg(not(unix))]
        let _ = mode;
        file.write_all(contents)?;
        file.flush()?;
        Ok(())
    }

    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        let meta = std::fs::metadata(path)?;
        Ok(FileInfo {
            name: file_name_of(path),
            path: path.to_path_buf(),
            is_dir: meta.is_dir(),
        })
    }
}

#[derive(Debug, Clone)]
enum MemNode {
    Dir,
    File { data: Vec<u8>, mode: u32 },
}

/// In-memory filesystem. Paths are taken verbatim, no normalisation is applied.
#[derive(Debug, Default)]
pub struct MemFs {
    nodes: Mutex<BTreeMap<PathBuf, MemNode>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, dir: impl AsRef<Path>) -> Self {
        self.add_dir(dir);
        self
    }

    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.add_file(path, contents);
        self
    }

    pub fn add_dir(&self, dir: impl AsRef<Path>) {
        let mut nodes = self.lock();
        Self::insert_parents(&mut nodes, dir.as_ref());
        nodes.insert(dir.as_ref().to_path_buf(), MemNode::Dir);
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let mut nodes = self.lock();
        Self::insert_parents(&mut nodes, path.as_ref());
        nodes.insert(
            path.as_ref().to_path_buf(),
            MemNode::File {
                data: contents.as_ref().to_vec(),
                mode: 0o644,
            },
        );
    }

    /// Permission bits of a file, `None` for directories and missing paths.
    pub fn mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        match self.lock().get(path.as_ref()) {
            Some(MemNode::File { mode, .. }) => Some(*mode),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, MemNode>> {
        // A poisoned map is still structurally valid.
        self.nodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn insert_parents(nodes: &mut BTreeMap<PathBuf, MemNode>, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemNode::Dir);
        }
    }

    fn info(path: &Path, node: &MemNode) -> FileInfo {
        FileInfo {
            name: file_name_of(path),
            path: path.to_path_buf(),
            is_dir: matches!(node, MemNode::Dir),
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: file does not exist", path.display()),
    )
}

impl KonfFs for MemFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FileInfo>> {
        let nodes = self.lock();
        match nodes.get(dir) {
            Some(MemNode::Dir) => {}
            Some(MemNode::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("{}: not a directory", dir.display()),
                ))
            }
            None => return Err(not_found(dir)),
        }
        Ok(nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| Self::info(path, node))
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lock().get(path) {
            Some(MemNode::File { data, .. }) => Ok(data.clone()),
            Some(MemNode::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        let mut nodes = self.lock();
        if let Some(MemNode::Dir) = nodes.get(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{}: is a directory", path.display()),
            ));
        }
        Self::insert_parents(&mut nodes, path);
        nodes.insert(
            path.to_path_buf(),
            MemNode::File {
                data: contents.to_vec(),
                mode,
            },
        );
        Ok(())
    }

    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        self.lock()
            .get(path)
            .map(|node| Self::info(path, node))
            .ok_or_else(|| not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn mem_fs_lists_only_direct_children() {
        let fs = MemFs::new()
            .with_file("/konf/store/a.yaml", "a")
            .with_file("/konf/store/nested/b.yaml", "b");

        let names: Vec<String> = fs
            .read_dir(Path::new("/konf/store"))
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["a.yaml".to_string(), "nested".to_string()]);
    }

    #[test]
    fn mem_fs_write_overwrites_and_keeps_mode() {
        let fs = MemFs::new();
        let path = Path::new("/konf/active/42.yaml");
        fs.write(path, b"first", 0o600).unwrap();
        fs.write(path, b"second", 0o600).unwrap();

        assert_eq!(fs.read(path).unwrap(), b"second".to_vec());
        assert_eq!(fs.mode(path), Some(0o600));
        assert!(fs.metadata(Path::new("/konf/active")).unwrap().is_dir);
    }

    #[test]
    fn mem_fs_missing_paths_are_not_found() {
        let fs = MemFs::new();
        let err = fs.read(Path::new("/nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let err = fs.read_dir(Path::new("/nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn os_fs_lists_without_descending() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub").join("deep.yaml"), b"x").unwrap();
        std::fs::write(temp.path().join("top.yaml"), b"xyz").unwrap();

        let mut entries = OsFs.read_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "sub");
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].name, "top.yaml");
    }

    #[cfg(unix)]
    #[test]
    fn os_fs_write_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("active").join("1.yaml");
        OsFs.write(&path, b"data", 0o600).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"data".to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn os_fs_overwrite_tightens_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("4242.yaml");
        std::fs::write(&path, b"old konf").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        OsFs.write(&path, b"new", 0o600).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"new".to_vec());
    }
}

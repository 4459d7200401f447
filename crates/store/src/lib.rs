//! # Konf Store
//!
//! Resolution of the konf store and switching of the active konf.
//!
//! ## Pipeline
//!
//! ```text
//! <konf-dir>/store
//!     │
//!     ├──> Store Scanner (flat, hidden files and directories dropped)
//!     │      └─> Candidate files, sorted by name
//!     │
//!     ├──> Konf Indexer (one cluster + one context per file)
//!     │      └─> StoreEntry descriptors
//!     │
//!     └──> Activator
//!            └─> <konf-dir>/active/<scope>.yaml + <konf-dir>/latestkonf
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use konf_store::{fetch_konfs, Activator, KonfLayout, OsFs, ScopeKey};
//!
//! fn main() -> konf_store::Result<()> {
//!     let layout = KonfLayout::new("/home/me/.kube/konfs");
//!     let entries = fetch_konfs(&OsFs, &layout)?;
//!
//!     let activator = Activator::new(OsFs, layout);
//!     let path = activator.activate(&entries[0].id(), &ScopeKey::from_parent_process())?;
//!     println!("KUBECONFIGCHANGE:{}", path.display());
//!     Ok(())
//! }
//! ```

mod activation;
mod error;
mod fs;
mod index;
mod kubeconfig;
mod layout;
mod scanner;

#[cfg(test)]
mod samples;

pub use activation::Activator;
pub use error::{KonfError, Result};
pub use fs::{FileInfo, KonfFs, MemFs, OsFs};
pub use index::{fetch_konfs, KonfIndexer, StoreEntry};
pub use kubeconfig::{KubeConfig, NamedCluster, NamedContext};
pub use layout::{
    id_from_cluster_and_context, id_from_file_name, validate_id, KonfLayout, ScopeKey, KONF_PERM,
};
pub use scanner::{StoreFile, StoreScanner};

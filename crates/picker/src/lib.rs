//! # Konf Picker
//!
//! Interactive, fuzzy-filtered table for choosing a konf from the store.
//!
//! ```text
//! Search: eu
//!   Context                   | Cluster                   | File
//! ▸ dev-eu                    | dev-eu-1                  | /home/me/.kube/konfs/stor |
//! ```
//!
//! [`select`] only deals with positions; turning the chosen [`konf_store::StoreEntry`] into
//! an id is up to the caller. Tests drive it through a custom [`PromptDriver`] instead of
//! [`TerminalPrompt`].

mod error;
mod fuzzy;
mod prompt;
mod select;
mod table;

pub use error::{PickerError, Result};
pub use fuzzy::{search_surface, KonfMatcher};
pub use prompt::{KeyOutcome, PickerState, PromptDriver, SelectPrompt, Searcher, TerminalPrompt};
pub use select::{create_prompt, select, PickerOptions};
pub use table::{
    prepare_table, Color, RowTemplate, StyleSet, Styling, TableTemplates, UnknownStyle,
    MIN_COLUMN_LEN,
};

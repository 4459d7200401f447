//! Library side of the `konf` binary: settings resolution and the `set` command.
//!
//! The binary only parses arguments, sets up logging and wires the real filesystem and
//! terminal into [`command::SetCommand`].

pub mod command;
pub mod config;

pub use command::{complete_set, select_context, Selection, SetCommand};
pub use config::{resolve_konf_dir, KonfSettings, PickerSettings};

pub mod set;

pub use set::{complete_set, select_context, Selection, SetCommand, KUBECONFIG_CHANGE_PREFIX};

//! Message trees, their flattened form, and the per-locale file store.

mod store;
mod tree;

pub use store::{INDEX_FILE, KeepAll, MESSAGE_EXTENSION, MessageFilter, MessageStore};
pub use tree::{FlatMessages, MessageTree, flatten, get_path, set_path, traverse};

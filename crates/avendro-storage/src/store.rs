//! The key-value store seam

use crate::Result;

/// A persistent string-to-string store, shaped like browser local storage.
///
/// `set_items` and `remove_items` must apply all entries or none of them.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    /// Write `key` only while every key in `required` is present, checked
    /// and written as one step. Returns whether the write happened.
    fn set_item_if_present(&self, key: &str, value: &str, required: &[&str]) -> Result<bool>;

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<()>;

    fn remove_items(&self, keys: &[&str]) -> Result<()>;
}

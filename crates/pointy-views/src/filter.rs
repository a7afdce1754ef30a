//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Shared filter predicates."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// A dropdown filter: either everything or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn matches<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
        U: ?Sized,
    {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// Case-insensitive substring match against a record's name or id.
/// An empty needle matches everything.
pub(crate) fn name_or_id_matches(needle: &str, name: &str, id: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    name.to_lowercase().contains(&needle) || id.to_lowercase().contains(&needle)
}

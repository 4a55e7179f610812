//! List wrapper returned by collection queries.

use crate::metadata::ListMeta;
use serde::{Deserialize, Serialize};

/// A page of objects returned from a list call.
///
/// Besides the items themselves, it carries the collection's resource
/// version so a watch can be resumed from the point the list was taken.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ObjectList<T> {
    /// List metadata; carries the collection's `resourceVersion`
    #[serde(default)]
    pub metadata: ListMeta,

    /// The listed objects
    pub items: Vec<T>,
}

//! Watch stream envelope types.

use crate::error::ErrorResponse;
use serde::{Deserialize, Serialize};

/// One entry of a watch stream: a change to a single object, or an error
/// envelope the store sends in-band.
///
/// On the wire each entry is a `{"type": ..., "object": ...}` pair with an
/// uppercase type tag, delivered as newline separated JSON.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE")]
pub enum WatchEvent<K> {
    /// A new object appeared in the collection
    Added(K),
    /// An existing object changed
    Modified(K),
    /// An object was removed from the collection
    Deleted(K),
    /// The store reported a problem with the watch itself
    Error(ErrorResponse),
}

//! ReplicationController object model.

use crate::labels::Selector;
use crate::metadata::{ObjectMeta, ObjectReference};
use crate::pod::PodTemplateSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declaration that N replicas of a pod template should be running.
///
/// Ownership of pods is established purely by selector match within the
/// controller's namespace; there is no persisted back-reference from pod to
/// controller.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ReplicationController {
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired behavior
    pub spec: ReplicationControllerSpec,
    /// Most recently observed status
    #[serde(default)]
    pub status: ReplicationControllerStatus,
}

/// Desired behavior of a [`ReplicationController`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationControllerSpec {
    /// Desired number of active pods owned by this controller
    #[serde(default)]
    pub replicas: i32,

    /// Label equalities identifying owned pods
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,

    /// Template new replicas are materialized from
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// Most recently observed status of a [`ReplicationController`].
///
/// `replicas` is the count that was *seen* at the last reconcile, never the
/// count that was commanded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationControllerStatus {
    /// Number of active pods observed at the last reconcile
    #[serde(default)]
    pub replicas: i32,
}

impl ReplicationController {
    /// Kind stamped onto serialized controllers.
    pub const KIND: &'static str = "ReplicationController";

    /// The controller's name, or `""` for an unnamed controller.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// The controller's namespace, or `""` when unset.
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// Typed selector over the spec's label equalities.
    pub fn selector(&self) -> Selector {
        Selector::from(self.spec.selector.clone())
    }

    /// Reference used when recording events against this controller.
    pub fn object_ref(&self) -> ObjectReference {
        ObjectReference {
            kind: Self::KIND.to_string(),
            namespace: self.metadata.namespace.clone(),
            name: self.metadata.name.clone(),
            uid: self.metadata.uid.clone(),
        }
    }
}

//! Pod object model.

use crate::metadata::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Condition type reporting whether a pod is able to serve requests.
pub const READY_CONDITION: &str = "Ready";

/// The coarse lifecycle phase of a pod.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum PodPhase {
    /// Accepted but not all containers are running yet
    #[default]
    Pending,
    /// Bound to a node with all containers started
    Running,
    /// All containers terminated successfully
    Succeeded,
    /// All containers terminated, at least one in failure
    Failed,
    /// The pod's state could not be obtained
    Unknown,
}

impl PodPhase {
    /// Terminal pods no longer count as running replicas and are left for
    /// garbage collection.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, PodPhase::Succeeded | PodPhase::Failed)
    }
}

/// One entry of a pod's condition list, reduced to the fields consumed here.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodCondition {
    /// Condition type, e.g. [`READY_CONDITION`]
    #[serde(rename = "type")]
    pub type_: String,
    /// `"True"`, `"False"` or `"Unknown"`
    pub status: String,
}

/// Most recently observed pod state.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    /// Current lifecycle phase
    #[serde(default)]
    pub phase: PodPhase,
    /// Current service state details
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<PodCondition>,
}

/// A single container within a pod.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Name, unique within the pod
    pub name: String,
    /// Container image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The desired runtime shape of a pod.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Node the pod has been assigned to; unset until scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Containers belonging to the pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
}

/// A single replica workload.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Pod {
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: PodSpec,
    /// Observed state
    #[serde(default)]
    pub status: PodStatus,
}

impl Pod {
    /// The pod's name, or `""` for an unnamed pod.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Whether the pod has been assigned to a node.
    pub fn is_assigned(&self) -> bool {
        self.spec.host.as_deref().is_some_and(|host| !host.is_empty())
    }

    /// Whether the pod reports a true `Ready` condition.
    pub fn is_ready(&self) -> bool {
        self.status
            .conditions
            .iter()
            .any(|c| c.type_ == READY_CONDITION && c.status == "True")
    }
}

/// The template new replicas are materialized from.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PodTemplateSpec {
    /// Metadata stamped onto materialized pods (labels, annotations)
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Pod spec materialized pods run with
    #[serde(default)]
    pub spec: PodSpec,
}

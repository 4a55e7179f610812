//! Pod actuation on behalf of replication controllers.

use crate::client::{self, Client};
use crate::events::{Event, EventType, Recorder, REASON_FAILED_CREATE};
use async_trait::async_trait;
use replicator_core::{validation, ObjectMeta, Pod, ReplicationController, Selector};
use std::sync::Arc;
use tracing::warn;

/// A capability that knows how to add and delete pods.
///
/// Injectable so tests can substitute counting or failing stubs for the
/// store-bound implementation.
#[async_trait]
pub trait PodControl: Send + Sync + 'static {
    /// Create one new replica according to the controller's template.
    ///
    /// Best-effort: failures are recorded against the controller and
    /// absorbed, since the next sync retries by re-measuring.
    async fn create_replica(&self, namespace: &str, controller: &ReplicationController);

    /// Delete the pod identified by name.
    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), client::Error>;
}

/// The default [`PodControl`], bound to the store.
pub struct StorePodControl<C> {
    client: Arc<C>,
    recorder: Arc<dyn Recorder>,
}

impl<C> StorePodControl<C> {
    /// Create a pod control that actuates through `client` and records
    /// failures through `recorder`.
    pub fn new(client: Arc<C>, recorder: Arc<dyn Recorder>) -> Self {
        Self { client, recorder }
    }
}

#[async_trait]
impl<C: Client> PodControl for StorePodControl<C> {
    async fn create_replica(&self, namespace: &str, controller: &ReplicationController) {
        let template = controller.spec.template.clone();

        // Use the dash (if the name isn't too long) to make the pod name a
        // bit prettier.
        let mut prefix = format!("{}-", controller.name());
        if !validation::validate_pod_name(&prefix, true) {
            prefix = controller.name().to_string();
        }

        let pod = Pod {
            metadata: ObjectMeta {
                generate_name: Some(prefix),
                labels: template.metadata.labels.clone(),
                annotations: template.metadata.annotations.clone(),
                ..ObjectMeta::default()
            },
            spec: template.spec,
            ..Pod::default()
        };
        // A pod without labels would be selectable by every controller.
        if Selector::from(pod.metadata.labels.clone()).selects_all() {
            warn!(
                controller = controller.name(),
                "unable to create pod replica, no labels"
            );
            return;
        }
        if let Err(err) = self.client.create_pod(namespace, &pod).await {
            self.recorder
                .publish(&controller.object_ref(), Event {
                    event_type: EventType::Warning,
                    action: "Creating".to_string(),
                    reason: REASON_FAILED_CREATE.to_string(),
                    note: Some(format!("Error creating: {err}")),
                })
                .await;
            warn!(
                controller = controller.name(),
                "unable to create pod replica: {err}"
            );
        }
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), client::Error> {
        self.client.delete_pod(namespace, name).await
    }
}

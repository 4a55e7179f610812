//! Shared in-memory store and recorder stubs for tests.

use crate::client::{self, Client, WatchStream};
use crate::events::{Event, Recorder};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use replicator_core::pod::{Container, PodCondition, PodSpec, PodTemplateSpec, READY_CONDITION};
use replicator_core::replication_controller::ReplicationControllerSpec;
use replicator_core::{
    DynamicObject, ErrorResponse, ListMeta, ObjectList, ObjectMeta, ObjectReference, Pod, PodPhase,
    PodStatus, ReplicationController, Selector, Status, WatchEvent,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) fn controller(name: &str, replicas: i32) -> ReplicationController {
    ReplicationController {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("web".to_string()),
            ..ObjectMeta::default()
        },
        spec: ReplicationControllerSpec {
            replicas,
            selector: [("app".to_string(), name.to_string())].into(),
            template: PodTemplateSpec {
                metadata: ObjectMeta {
                    labels: [("app".to_string(), name.to_string())].into(),
                    ..ObjectMeta::default()
                },
                spec: PodSpec {
                    containers: vec![Container {
                        name: "app".to_string(),
                        image: Some("nginx".to_string()),
                    }],
                    ..PodSpec::default()
                },
            },
        },
        ..ReplicationController::default()
    }
}

pub(crate) fn pod(name: &str, labels: &[(&str, &str)], phase: PodPhase) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("web".to_string()),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..ObjectMeta::default()
        },
        status: PodStatus {
            phase,
            ..PodStatus::default()
        },
        ..Pod::default()
    }
}

pub(crate) fn ready_condition() -> PodCondition {
    PodCondition {
        type_: READY_CONDITION.to_string(),
        status: "True".to_string(),
    }
}

pub(crate) fn dyn_controller(rc: &ReplicationController) -> DynamicObject {
    DynamicObject::from_object(ReplicationController::KIND, rc).unwrap()
}

pub(crate) fn dyn_status(status: &Status) -> DynamicObject {
    DynamicObject::from_object(Status::KIND, status).unwrap()
}

pub(crate) fn dyn_foreign() -> DynamicObject {
    DynamicObject::from_object("Pod", &Pod::default()).unwrap()
}

pub(crate) fn api_error(code: u16, message: &str) -> client::Error {
    client::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: String::new(),
        code,
    })
}

pub(crate) fn service_error(message: &str) -> client::Error {
    client::Error::Service(message.into())
}

/// Recorder stub that keeps every published event.
#[derive(Default)]
pub(crate) struct RecordingRecorder {
    pub(crate) events: Mutex<Vec<(ObjectReference, Event)>>,
}

#[async_trait]
impl Recorder for RecordingRecorder {
    async fn publish(&self, reference: &ObjectReference, event: Event) {
        self.events
            .lock()
            .unwrap()
            .push((reference.clone(), event));
    }
}

/// In-memory [`Client`] that counts actuations and can optionally apply
/// them to its pod store, fail selected operations, or serve a scripted
/// watch stream.
#[derive(Default)]
pub(crate) struct TestClient {
    pub(crate) controllers: Mutex<Vec<ReplicationController>>,
    pub(crate) pods: Mutex<Vec<Pod>>,
    pub(crate) creates: Mutex<Vec<Pod>>,
    pub(crate) deletes: Mutex<Vec<String>>,
    pub(crate) updates: Mutex<Vec<ReplicationController>>,
    pub(crate) watch_versions: Mutex<Vec<String>>,
    watch: Mutex<Option<WatchStream>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    fail_pod_list: AtomicBool,
    fail_controller_list: AtomicBool,
    fail_update: AtomicBool,
    materialize: AtomicBool,
    name_seq: AtomicUsize,
}

impl TestClient {
    pub(crate) fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_pod_lists(&self) {
        self.fail_pod_list.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_controller_lists(&self) {
        self.fail_controller_list.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_updates(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }

    /// Apply creates and deletes to the pod store instead of only counting.
    pub(crate) fn materialize(&self) {
        self.materialize.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_watch(
        &self,
        stream: impl Stream<Item = client::Result<WatchEvent<DynamicObject>>> + Send + 'static,
    ) {
        *self.watch.lock().unwrap() = Some(stream.boxed());
    }
}

#[async_trait]
impl Client for TestClient {
    async fn list_controllers(&self) -> client::Result<ObjectList<ReplicationController>> {
        if self.fail_controller_list.load(Ordering::SeqCst) {
            return Err(service_error("controller list unavailable"));
        }
        Ok(ObjectList {
            metadata: ListMeta {
                resource_version: Some("1".to_string()),
            },
            items: self.controllers.lock().unwrap().clone(),
        })
    }

    async fn watch_controllers(&self, resource_version: &str) -> client::Result<WatchStream> {
        self.watch_versions
            .lock()
            .unwrap()
            .push(resource_version.to_string());
        self.watch
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| service_error("no watch scripted"))
    }

    async fn update_controller(
        &self,
        _namespace: &str,
        rc: &ReplicationController,
    ) -> client::Result<ReplicationController> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(api_error(409, "conflict"));
        }
        self.updates.lock().unwrap().push(rc.clone());
        Ok(rc.clone())
    }

    async fn list_pods(
        &self,
        namespace: &str,
        selector: &Selector,
    ) -> client::Result<ObjectList<Pod>> {
        if self.fail_pod_list.load(Ordering::SeqCst) {
            return Err(service_error("pod list unavailable"));
        }
        let items = self
            .pods
            .lock()
            .unwrap()
            .iter()
            .filter(|pod| {
                pod.metadata.namespace.as_deref() == Some(namespace)
                    && selector.matches(&pod.metadata.labels)
            })
            .cloned()
            .collect();
        Ok(ObjectList {
            metadata: ListMeta::default(),
            items,
        })
    }

    async fn create_pod(&self, namespace: &str, pod: &Pod) -> client::Result<Pod> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(api_error(500, "create failed"));
        }
        self.creates.lock().unwrap().push(pod.clone());
        let mut created = pod.clone();
        created.metadata.namespace = Some(namespace.to_string());
        let seq = self.name_seq.fetch_add(1, Ordering::SeqCst);
        created.metadata.name = Some(format!(
            "{}{seq}",
            created.metadata.generate_name.clone().unwrap_or_default()
        ));
        if self.materialize.load(Ordering::SeqCst) {
            self.pods.lock().unwrap().push(created.clone());
        }
        Ok(created)
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> client::Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(api_error(500, "delete failed"));
        }
        self.deletes.lock().unwrap().push(name.to_string());
        if self.materialize.load(Ordering::SeqCst) {
            let mut pods = self.pods.lock().unwrap();
            let before = pods.len();
            pods.retain(|pod| {
                !(pod.metadata.namespace.as_deref() == Some(namespace) && pod.name() == name)
            });
            if pods.len() == before {
                return Err(api_error(404, "pod not found"));
            }
        }
        Ok(())
    }
}

//! The store capability the controller consumes.

use async_trait::async_trait;
use futures::stream::BoxStream;
use replicator_core::{
    DynamicObject, ErrorResponse, ObjectList, Pod, ReplicationController, Selector, WatchEvent,
};
use thiserror::Error;

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum Error {
    /// The store processed the request and rejected it.
    #[error("api error: {0}")]
    Api(#[source] ErrorResponse),
    /// The request did not reach a conclusive answer.
    #[error("store unavailable: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Items produced by a controller watch.
///
/// Payloads are dynamic because a watch can deliver things other than
/// controllers: error statuses, or foreign kinds the consumer must skip.
pub type WatchStream = BoxStream<'static, Result<WatchEvent<DynamicObject>>>;

/// Typed access to the object store.
///
/// The controller is a pure consumer of this capability: swap in an
/// in-memory implementation for tests, or bind it to a real apiserver in
/// production. Objects returned from the store are treated as immutable
/// snapshots by the caller.
#[async_trait]
pub trait Client: Send + Sync + 'static {
    /// List replication controllers across all namespaces.
    async fn list_controllers(&self) -> Result<ObjectList<ReplicationController>>;

    /// Open a watch on replication controllers across all namespaces,
    /// starting at the given cursor; `""` requests a fresh stream head.
    ///
    /// The stream ends when the server closes the watch; the caller is
    /// expected to reconnect with the last resource version it observed.
    async fn watch_controllers(&self, resource_version: &str) -> Result<WatchStream>;

    /// Persist an updated controller; status write-backs use this.
    ///
    /// Conflicts are tolerated by the caller: a stale update is overwritten
    /// by the next sync.
    async fn update_controller(
        &self,
        namespace: &str,
        rc: &ReplicationController,
    ) -> Result<ReplicationController>;

    /// List pods in one namespace matching the selector.
    async fn list_pods(&self, namespace: &str, selector: &Selector) -> Result<ObjectList<Pod>>;

    /// Create a pod.
    async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod>;

    /// Delete a pod by name.
    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<()>;
}

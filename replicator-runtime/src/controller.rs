//! The replication manager: a watch-driven, level-triggered loop that keeps
//! every replication controller's active pod count at its declared target.

use crate::active::{deletion_order, filter_active};
use crate::client::{self, Client};
use crate::events::LogRecorder;
use crate::pod_control::{PodControl, StorePodControl};
use futures::future::{self, BoxFuture};
use futures::StreamExt;
use replicator_core::{DynamicObject, ReplicationController, Status, WatchEvent};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, warn};

/// Default period of the full resync sweep.
pub const DEFAULT_SYNC_PERIOD: Duration = Duration::from_secs(5);

/// Default delay before retrying a watch that could not be opened.
pub const DEFAULT_WATCH_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to list pods: {0}")]
    PodListFailed(#[source] client::Error),
    #[error("failed to update controller status: {0}")]
    StatusUpdateFailed(#[source] client::Error),
    #[error("failed to start watching controllers: {0}")]
    WatchStartFailed(#[source] client::Error),
}
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Tunables for the [`ReplicationManager`] loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Period of the full resync sweep
    pub sync_period: Duration,
    /// Delay before retrying a watch that could not be opened
    pub watch_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_period: DEFAULT_SYNC_PERIOD,
            watch_backoff: DEFAULT_WATCH_BACKOFF,
        }
    }
}

impl Config {
    /// Configure the full resync period.
    #[must_use]
    pub fn sync_period(mut self, period: Duration) -> Self {
        self.sync_period = period;
        self
    }

    /// Configure the watch reconnect backoff.
    #[must_use]
    pub fn watch_backoff(mut self, backoff: Duration) -> Self {
        self.watch_backoff = backoff;
        self
    }
}

/// Replacement for the per-controller sync function, for tests that observe
/// dispatch instead of effects.
pub type SyncHandler =
    Box<dyn Fn(ReplicationController) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Synchronizes replication controllers with the pods actually running.
///
/// One long-lived [`run`](ReplicationManager::run) task hosts the watch loop;
/// every watch event and every periodic sweep tick dispatches per-controller
/// syncs. The manager carries no state of its own between syncs beyond the
/// watch cursor, so it is safe to restart at any time.
pub struct ReplicationManager<C> {
    client: Arc<C>,
    pod_control: Arc<dyn PodControl>,
    config: Config,
    sync_handler: Option<SyncHandler>,
}

impl<C: Client> ReplicationManager<C> {
    /// Create a manager actuating through the store, with failure events
    /// going to the tracing log.
    pub fn new(client: Arc<C>) -> Self {
        let pod_control = Arc::new(StorePodControl::new(
            Arc::clone(&client),
            Arc::new(LogRecorder),
        ));
        Self {
            client,
            pod_control,
            config: Config::default(),
            sync_handler: None,
        }
    }

    /// Replace the tunables.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Substitute the pod actuator.
    #[must_use]
    pub fn with_pod_control(mut self, pod_control: Arc<dyn PodControl>) -> Self {
        self.pod_control = pod_control;
        self
    }

    /// Substitute the per-controller sync function.
    #[must_use]
    pub fn with_sync_handler(mut self, handler: SyncHandler) -> Self {
        self.sync_handler = Some(handler);
        self
    }

    /// Watch and sync forever.
    ///
    /// The watch is reopened whenever it ends, resuming from the last
    /// resource version observed on the stream; when it cannot be opened at
    /// all, the reconnect waits out the configured backoff first.
    pub async fn run(&self) {
        let mut resource_version = String::new();
        loop {
            if let Err(err) = self.watch_controllers(&mut resource_version).await {
                warn!("unable to watch: {err}");
                time::sleep(self.config.watch_backoff).await;
            }
        }
    }

    /// One watch invocation: select between the periodic resync tick and the
    /// event stream until the stream ends.
    async fn watch_controllers(&self, resource_version: &mut String) -> Result<()> {
        let mut events = self
            .client
            .watch_controllers(resource_version)
            .await
            .map_err(Error::WatchStartFailed)?;

        let mut sync_tick = time::interval_at(
            Instant::now() + self.config.sync_period,
            self.config.sync_period,
        );
        sync_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = sync_tick.tick() => self.synchronize().await,
                event = events.next() => match event {
                    // Watch closed, or something else went wrong with the
                    // call; return and let the supervisor reconnect.
                    None => return Ok(()),
                    Some(Err(err)) => {
                        warn!("watch stream failed: {err}");
                        return Ok(());
                    }
                    Some(Ok(event)) => self.handle_watch_event(event, resource_version).await,
                },
            }
        }
    }

    async fn handle_watch_event(
        &self,
        event: WatchEvent<DynamicObject>,
        resource_version: &mut String,
    ) {
        debug!("got watch: {event:?}");
        let object = match event {
            WatchEvent::Error(err) => {
                error!("error from watch during sync: {err}");
                // Clearing the resource version may skip some elements on
                // the watch, but the periodic synchronize() catches them.
                resource_version.clear();
                return;
            }
            WatchEvent::Added(obj) | WatchEvent::Modified(obj) | WatchEvent::Deleted(obj) => obj,
        };
        let kind = object.kind().unwrap_or_default().to_string();
        if kind == ReplicationController::KIND {
            match object.try_parse::<ReplicationController>() {
                Ok(rc) => {
                    // If we get disconnected, start where we left off.
                    *resource_version = rc.metadata.resource_version.clone().unwrap_or_default();
                    // Sync even on a deletion event, to ensure the final
                    // state is left as desired.
                    debug!(controller = rc.name(), "about to sync from watch");
                    if let Err(err) = self.sync(rc).await {
                        error!("unexpected sync error: {err}");
                    }
                }
                Err(err) => error!("unexpected object: {err}"),
            }
        } else if kind == Status::KIND {
            match object.try_parse::<Status>() {
                Ok(status) if status.is_failure() => {
                    error!(reason = %status.reason, "failed to watch: {}", status.message);
                    // Clear the resource version here as well; this won't
                    // hurt consistency, the next reconnect does a full list.
                    resource_version.clear();
                }
                _ => error!("unexpected object in watch event"),
            }
        } else {
            error!(kind = %kind, "unexpected object in watch event");
        }
    }

    /// Dispatch one controller to the sync function.
    async fn sync(&self, controller: ReplicationController) -> Result<()> {
        match &self.sync_handler {
            Some(handler) => handler(controller).await,
            None => self.sync_replication_controller(controller).await,
        }
    }

    /// Drive one controller's active pod count toward its declared target.
    ///
    /// The diff is computed from the counts measured on entry; the effects
    /// of this sync's own creates and deletes are only observed by the next
    /// one. Only pod-list and status-update failures are returned, all
    /// actuation failures are absorbed where they occur.
    pub async fn sync_replication_controller(
        &self,
        mut controller: ReplicationController,
    ) -> Result<()> {
        let namespace = controller.namespace().to_string();
        let selector = controller.selector();
        let pod_list = self
            .client
            .list_pods(&namespace, &selector)
            .await
            .map_err(Error::PodListFailed)?;

        let mut active = filter_active(pod_list.items);
        let active_count = active.len() as i32;
        let diff = active_count - controller.spec.replicas;
        if diff < 0 {
            let missing = diff.unsigned_abs() as usize;
            debug!(
                controller = controller.name(),
                "too few replicas, creating {missing}"
            );
            future::join_all(
                (0..missing).map(|_| self.pod_control.create_replica(&namespace, &controller)),
            )
            .await;
        } else if diff > 0 {
            debug!(
                controller = controller.name(),
                "too many replicas, deleting {diff}"
            );
            // Delete pods still in the earlier stages whenever possible:
            // unscheduled before scheduled, pending before running, not
            // ready before ready.
            active.sort_by(deletion_order);
            let ns = namespace.as_str();
            let pod_control = &self.pod_control;
            let results =
                future::join_all(active.iter().take(diff as usize).map(|pod| async move {
                    (pod.name(), pod_control.delete_pod(ns, pod.name()).await)
                }))
                .await;
            for (name, result) in results {
                if let Err(err) = result {
                    warn!(pod = name, "failed to delete pod: {err}");
                }
            }
        }

        // Status reflects the count seen on entry, not the count commanded.
        if controller.status.replicas != active_count {
            controller.status.replicas = active_count;
            self.client
                .update_controller(&namespace, &controller)
                .await
                .map_err(Error::StatusUpdateFailed)?;
        }
        Ok(())
    }

    /// Sweep every controller once, concurrently, as a safety net against
    /// missed watch events.
    // TODO: remove this method completely and rely on the watch once watch
    // resource-version tracking is trusted on its own.
    pub async fn synchronize(&self) {
        let list = match self.client.list_controllers().await {
            Ok(list) => list,
            Err(err) => {
                error!("synchronization error: {err}");
                return;
            }
        };
        future::join_all(list.items.into_iter().map(|controller| async move {
            debug!(controller = controller.name(), "periodic sync");
            if let Err(err) = self.sync(controller).await {
                error!("error synchronizing: {err}");
            }
        }))
        .await;
    }
}

//! User-visible audit events.

use async_trait::async_trait;
use replicator_core::ObjectReference;
use tracing::info;

/// Reason attached to events about replicas that could not be created.
pub const REASON_FAILED_CREATE: &str = "failedCreate";

/// The severity of an event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventType {
    /// Informational only
    Normal,
    /// Something is not working as intended
    Warning,
}

/// A single user-visible event about an object.
#[derive(Clone, Debug)]
pub struct Event {
    /// Severity of the event
    pub event_type: EventType,
    /// What the reporting component was doing, e.g. `Creating`
    pub action: String,
    /// Machine-readable reason code, e.g. [`REASON_FAILED_CREATE`]
    pub reason: String,
    /// Human-readable detail
    pub note: Option<String>,
}

/// A publisher for events attached to api objects.
///
/// Recording is best-effort by contract: implementations absorb their own
/// delivery failures, so callers never gate work on a publish.
#[async_trait]
pub trait Recorder: Send + Sync + 'static {
    /// Publish one event against the referenced object.
    async fn publish(&self, reference: &ObjectReference, event: Event);
}

/// A [`Recorder`] that emits events to the tracing log.
///
/// The default sink when no external recorder is wired up.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogRecorder;

#[async_trait]
impl Recorder for LogRecorder {
    async fn publish(&self, reference: &ObjectReference, event: Event) {
        info!(
            kind = %reference.kind,
            namespace = reference.namespace.as_deref().unwrap_or_default(),
            name = reference.name.as_deref().unwrap_or_default(),
            action = %event.action,
            reason = %event.reason,
            note = event.note.as_deref().unwrap_or_default(),
            "event"
        );
    }
}

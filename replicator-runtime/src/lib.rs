//! Replica reconciliation runtime.
//!
//! This crate contains the building blocks of a level-triggered controller
//! that keeps the number of running pods matching each replication
//! controller's selector equal to its declared replica count: the store
//! client capability, the pod actuator, the active-pod bookkeeping, and the
//! watch/resync loop that drives per-controller syncs.
//!
//! The controller is stateless across restarts and tolerates lost, duplicate
//! and stale watch events; every sync recomputes its diff from a fresh pod
//! list.

#![deny(unsafe_code)]

pub mod active;
pub mod client;
pub mod controller;
pub mod events;
pub mod pod_control;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::Client;
pub use controller::{Config, ReplicationManager};
pub use events::Recorder;
pub use pod_control::PodControl;

//! Active-pod accounting and deletion ordering.

use replicator_core::{Pod, PodPhase};
use std::cmp::Ordering;

/// Retain only pods that still count as running replicas.
///
/// Terminal pods are dropped: they are never deleted here (garbage
/// collection owns them) and must not be counted as active.
pub fn filter_active(pods: Vec<Pod>) -> Vec<Pod> {
    pods.into_iter()
        .filter(|pod| !pod.status.phase.is_terminal())
        .collect()
}

/// Order active pods most-deletable first.
///
/// Pods that have cost the cluster the least sort first:
/// 1. unassigned before assigned,
/// 2. `Pending` before `Unknown` before `Running`,
/// 3. not-ready before ready.
///
/// Ties beyond that are left to the sort's stability.
pub fn deletion_order(a: &Pod, b: &Pod) -> Ordering {
    match (a.is_assigned(), b.is_assigned()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    match phase_rank(a.status.phase).cmp(&phase_rank(b.status.phase)) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    match (a.is_ready(), b.is_ready()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn phase_rank(phase: PodPhase) -> u8 {
    match phase {
        PodPhase::Pending => 0,
        PodPhase::Unknown => 1,
        PodPhase::Running => 2,
        // Terminal phases never survive filter_active; ranked last to keep
        // the order total anyway.
        PodPhase::Succeeded | PodPhase::Failed => 3,
    }
}

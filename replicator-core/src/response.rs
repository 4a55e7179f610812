//! Generic api response types.

use serde::{Deserialize, Serialize};

/// A status object returned by the store in place of a resource.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
pub struct Status {
    /// Status of the operation, `Success` or `Failure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSummary>,

    /// Suggested HTTP return code (0 if unset)
    #[serde(default, skip_serializing_if = "is_u16_zero")]
    pub code: u16,

    /// A human-readable description of the status of this operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// A machine-readable description of why this operation is in the
    /// `Failure` status
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

/// Overall result of an operation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusSummary {
    /// Operation succeeded
    Success,
    /// Operation failed
    Failure,
}

impl Status {
    /// Kind stamped onto serialized status objects.
    pub const KIND: &'static str = "Status";

    /// Returns an unsuccessful `Status`.
    pub fn failure(message: &str, reason: &str) -> Self {
        Status {
            status: Some(StatusSummary::Failure),
            code: 0,
            message: message.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Checks if this `Status` represents success.
    ///
    /// Note that it is possible for `Status` to be in an indeterminate state
    /// when both `is_success` and `is_failure` return false.
    pub fn is_success(&self) -> bool {
        self.status == Some(StatusSummary::Success)
    }

    /// Checks if this `Status` represents failure.
    pub fn is_failure(&self) -> bool {
        self.status == Some(StatusSummary::Failure)
    }
}

fn is_u16_zero(value: &u16) -> bool {
    *value == 0
}

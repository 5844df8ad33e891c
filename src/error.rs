//! # Error types used by the tickvisor runtime and tasks.
//!
//! This module defines two main error enums:
//!
//! - [`RuntimeError`] errors raised by the scheduling runtime itself.
//! - [`TaskError`] errors raised by individual task cycles.
//!
//! Both types provide helper methods `as_label` for logs and metrics.

use thiserror::Error;

/// # Errors produced by the tickvisor runtime.
///
/// These represent failures of the scheduling system itself, surfaced by the
/// registry-facing API (`create` / `stop` / `update`). None of them mutate
/// scheduler state: a rejected call leaves the task set exactly as it was.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Attempted to create a task with a name that already exists in the registry.
    #[error("task '{name}' already exists in registry")]
    TaskAlreadyExists {
        /// The duplicate task name.
        name: String,
    },
    /// Attempted to stop or update a task that doesn't exist in the registry.
    #[error("task '{name}' not found in registry")]
    TaskNotFound {
        /// The missing task name.
        name: String,
    },
    /// A task factory declined to produce a task.
    #[error("factory for task '{name}' produced no task")]
    FactoryFailed {
        /// Name the task would have been registered under.
        name: String,
    },
    /// Configuration rejected at the API boundary.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable rejection reason.
        reason: String,
    },
    /// The scheduler has been shut down; no further operations are accepted.
    #[error("scheduler is shut down")]
    ShutDown,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::TaskAlreadyExists { .. } => "runtime_task_already_exists",
            RuntimeError::TaskNotFound { .. } => "runtime_task_not_found",
            RuntimeError::FactoryFailed { .. } => "runtime_factory_failed",
            RuntimeError::InvalidConfig { .. } => "runtime_invalid_config",
            RuntimeError::ShutDown => "runtime_shut_down",
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RuntimeError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// # Errors produced by task cycles.
///
/// These represent failures of the user callbacks (`plan`, `signal`, `act`).
/// A failing cycle is logged through the event bus and the task stays
/// scheduled; a single task's failure never terminates a worker.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// A callback reported a failure.
    #[error("cycle failed: {reason}")]
    Fail { reason: String },

    /// A callback panicked; the payload was captured at the cycle boundary.
    #[error("cycle panicked: {payload}")]
    Panicked { payload: String },
}

impl TaskError {
    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Convenience constructor for callback failures.
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail {
            reason: reason.into(),
        }
    }
}

/// Renders a panic payload into a loggable string.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let e = RuntimeError::TaskNotFound {
            name: "gone".into(),
        };
        assert_eq!(e.as_label(), "runtime_task_not_found");
        assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    }

    #[test]
    fn panic_payloads_render() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u32), "opaque panic payload");
    }
}

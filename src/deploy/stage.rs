use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::DeployError;

/// Lifecycle of one orchestrator operation.
///
/// Stages only move forward; `Failed` and `Succeeded` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Resolving,
    Composing,
    Submitting,
    Succeeded,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Failed)
    }

    pub fn can_advance_to(self, next: Stage) -> bool {
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Stage::Failed) => true,
            (Stage::Start, Stage::Resolving)
            | (Stage::Resolving, Stage::Composing)
            | (Stage::Composing, Stage::Submitting)
            | (Stage::Submitting, Stage::Succeeded) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Resolving => "resolving",
            Stage::Composing => "composing",
            Stage::Submitting => "submitting",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs the stage of a single operation run.
#[derive(Debug)]
pub(crate) struct Run {
    operation: &'static str,
    stage: Stage,
}

impl Run {
    pub(crate) fn start(operation: &'static str) -> Self {
        info!(operation, "starting");
        Self {
            operation,
            stage: Stage::Start,
        }
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn enter(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "invalid transition {} -> {}",
            self.stage,
            next
        );
        debug!(operation = self.operation, from = %self.stage, to = %next, "stage");
        self.stage = next;
    }

    pub(crate) fn fail(&mut self, err: DeployError) -> DeployError {
        warn!(
            operation = self.operation,
            stage = %err.stage(),
            error = %err,
            "failed"
        );
        self.stage = Stage::Failed;
        err
    }

    pub(crate) fn succeed(&mut self) {
        self.enter(Stage::Succeeded);
        info!(operation = self.operation, "succeeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order_only() {
        assert!(Stage::Start.can_advance_to(Stage::Resolving));
        assert!(Stage::Resolving.can_advance_to(Stage::Composing));
        assert!(Stage::Composing.can_advance_to(Stage::Submitting));
        assert!(Stage::Submitting.can_advance_to(Stage::Succeeded));

        assert!(!Stage::Start.can_advance_to(Stage::Submitting));
        assert!(!Stage::Submitting.can_advance_to(Stage::Resolving));
        assert!(!Stage::Resolving.can_advance_to(Stage::Succeeded));
    }

    #[test]
    fn any_live_stage_can_fail() {
        for s in [
            Stage::Start,
            Stage::Resolving,
            Stage::Composing,
            Stage::Submitting,
        ] {
            assert!(s.can_advance_to(Stage::Failed));
        }
    }

    #[test]
    fn terminal_stages_have_no_exit() {
        for next in [Stage::Start, Stage::Resolving, Stage::Failed, Stage::Succeeded] {
            assert!(!Stage::Failed.can_advance_to(next));
            assert!(!Stage::Succeeded.can_advance_to(next));
        }
    }

    #[test]
    fn run_ends_failed_after_fail() {
        let mut run = Run::start("test");
        run.enter(Stage::Resolving);
        let err = run.fail(DeployError::Cancelled {
            stage: Stage::Resolving,
        });
        assert_eq!(run.stage(), Stage::Failed);
        assert_eq!(err.stage(), Stage::Resolving);
    }
}

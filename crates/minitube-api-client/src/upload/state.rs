use minitube_core::UploadError;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Lifecycle of a single upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    ExtractingMetadata,
    RequestingGrant,
    Transferring,
    Completed,
    Failed(UploadError),
}

impl UploadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Completed | UploadState::Failed(_))
    }

    /// Position along the happy path; `Failed` sits outside it.
    fn step(&self) -> Option<u8> {
        match self {
            UploadState::Idle => Some(0),
            UploadState::Validating => Some(1),
            UploadState::ExtractingMetadata => Some(2),
            UploadState::RequestingGrant => Some(3),
            UploadState::Transferring => Some(4),
            UploadState::Completed => Some(5),
            UploadState::Failed(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Validating => "validating",
            UploadState::ExtractingMetadata => "extracting_metadata",
            UploadState::RequestingGrant => "requesting_grant",
            UploadState::Transferring => "transferring",
            UploadState::Completed => "completed",
            UploadState::Failed(_) => "failed",
        }
    }
}

impl Display for UploadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadState::Failed(err) => write!(f, "failed: {}", err),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid upload state transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub to: &'static str,
}

/// Checked state holder. Records every state it has been in.
#[derive(Debug, Clone)]
pub struct UploadStateMachine {
    current: UploadState,
    history: Vec<UploadState>,
}

impl Default for UploadStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadStateMachine {
    pub fn new() -> Self {
        Self {
            current: UploadState::Idle,
            history: vec![UploadState::Idle],
        }
    }

    pub fn current(&self) -> &UploadState {
        &self.current
    }

    pub fn history(&self) -> &[UploadState] {
        &self.history
    }

    /// Move to `next`. Only the next step forward, or `Failed` from a non-terminal state.
    pub fn advance(&mut self, next: UploadState) -> Result<(), InvalidTransition> {
        let allowed = match (self.current.step(), next.step()) {
            _ if self.current.is_terminal() => false,
            (Some(_), None) => true,
            (Some(from), Some(to)) => to == from + 1,
            (None, _) => false,
        };

        if !allowed {
            return Err(InvalidTransition {
                from: self.current.name(),
                to: next.name(),
            });
        }

        tracing::debug!(from = self.current.name(), to = next.name(), "Upload state transition");
        self.current = next.clone();
        self.history.push(next);
        Ok(())
    }

    pub fn into_parts(self) -> (UploadState, Vec<UploadState>) {
        (self.current, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut machine = UploadStateMachine::new();
        for next in [
            UploadState::Validating,
            UploadState::ExtractingMetadata,
            UploadState::RequestingGrant,
            UploadState::Transferring,
            UploadState::Completed,
        ] {
            machine.advance(next).unwrap();
        }
        assert_eq!(machine.current(), &UploadState::Completed);
        assert_eq!(machine.history().len(), 6);
    }

    #[test]
    fn test_cannot_skip_steps() {
        let mut machine = UploadStateMachine::new();
        let err = machine.advance(UploadState::Transferring).unwrap_err();
        assert_eq!(err.from, "idle");
        assert_eq!(err.to, "transferring");
        assert_eq!(machine.current(), &UploadState::Idle);
    }

    #[test]
    fn test_cannot_go_backwards_or_repeat() {
        let mut machine = UploadStateMachine::new();
        machine.advance(UploadState::Validating).unwrap();
        assert!(machine.advance(UploadState::Validating).is_err());
        assert!(machine.advance(UploadState::Idle).is_err());
    }

    #[test]
    fn test_failed_from_any_non_terminal_state() {
        let mut machine = UploadStateMachine::new();
        machine.advance(UploadState::Validating).unwrap();
        machine
            .advance(UploadState::Failed(UploadError::TransferAborted))
            .unwrap();
        assert!(machine.current().is_terminal());
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut machine = UploadStateMachine::new();
        machine
            .advance(UploadState::Failed(UploadError::InvalidRequest("x".to_string())))
            .unwrap();
        assert!(machine.advance(UploadState::Validating).is_err());
        assert!(machine
            .advance(UploadState::Failed(UploadError::TransferAborted))
            .is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(UploadState::RequestingGrant.to_string(), "requesting_grant");
        assert_eq!(
            UploadState::Failed(UploadError::TransferAborted).to_string(),
            "failed: Transfer aborted"
        );
    }
}

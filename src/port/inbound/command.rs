//! Command handling port used by source adapters.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    DepositDraft, DepositIntent, ParsedMarketRequest, RawCommand, SubmissionResult,
    ValidationFailure,
};

/// Stages of one market creation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Received,
    Extracted,
    Validated,
    Submitted,
    Confirmed,
    Replied,
    Failed,
}

impl PipelineState {
    /// Whether a run may end in this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Replied | Self::Failed)
    }

    /// Whether `next` is a legal successor of `self`.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Received, Self::Extracted)
                | (Self::Extracted, Self::Validated)
                | (Self::Validated, Self::Submitted)
                | (Self::Submitted, Self::Confirmed)
                | (Self::Confirmed, Self::Replied)
                | (
                    Self::Received | Self::Extracted | Self::Validated | Self::Submitted,
                    Self::Failed
                )
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Extracted => "extracted",
            Self::Validated => "validated",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Replied => "replied",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What happened to one command.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Every state the run passed through, starting at `Received`.
    pub trail: Vec<PipelineState>,
    /// The validated request, once validation succeeded.
    pub request: Option<ParsedMarketRequest>,
    /// The confirmed submission, on success.
    pub submission: Option<SubmissionResult>,
    /// Whether the final reply reached the user.
    pub reply_delivered: bool,
}

impl PipelineOutcome {
    /// State the run ended in.
    #[must_use]
    pub fn final_state(&self) -> PipelineState {
        self.trail.last().copied().unwrap_or(PipelineState::Received)
    }

    /// State the run was in when it failed, if it failed.
    #[must_use]
    pub fn failed_from(&self) -> Option<PipelineState> {
        match self.trail.as_slice() {
            [.., before, PipelineState::Failed] => Some(*before),
            _ => None,
        }
    }

    /// True when a market was confirmed on-chain, whether or not the reply arrived.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.submission.is_some()
    }
}

/// Runs market creation commands end to end.
#[async_trait]
pub trait MarketCommandHandler: Send + Sync {
    /// Process one command, replying to its origin exactly once.
    async fn handle(&self, command: RawCommand) -> PipelineOutcome;
}

/// Runs deposit-strategy commands.
#[async_trait]
pub trait DepositCommandHandler: Send + Sync {
    /// Validate a deposit request and reply to its origin exactly once.
    async fn handle_deposit(
        &self,
        command: &RawCommand,
        draft: DepositDraft,
    ) -> Result<DepositIntent, ValidationFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        let path = [
            PipelineState::Received,
            PipelineState::Extracted,
            PipelineState::Validated,
            PipelineState::Submitted,
            PipelineState::Confirmed,
            PipelineState::Replied,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn failed_is_absorbing_and_unreachable_after_confirmation() {
        assert!(!PipelineState::Failed.can_advance_to(PipelineState::Received));
        assert!(!PipelineState::Confirmed.can_advance_to(PipelineState::Failed));
        assert!(!PipelineState::Replied.can_advance_to(PipelineState::Failed));
        assert!(PipelineState::Submitted.can_advance_to(PipelineState::Failed));
    }

    #[test]
    fn failed_from_reports_previous_state() {
        let outcome = PipelineOutcome {
            trail: vec![
                PipelineState::Received,
                PipelineState::Extracted,
                PipelineState::Failed,
            ],
            request: None,
            submission: None,
            reply_delivered: true,
        };
        assert_eq!(outcome.final_state(), PipelineState::Failed);
        assert_eq!(outcome.failed_from(), Some(PipelineState::Extracted));
        assert!(!outcome.is_success());
    }

    #[test]
    fn terminal_states() {
        assert!(PipelineState::Confirmed.is_terminal());
        assert!(PipelineState::Replied.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(!PipelineState::Submitted.is_terminal());
    }
}

//! Review session state machine
//!
//! Models one reviewer session as explicit states with an enforced
//! transition table. The controller drives transitions; anything not in
//! the table is an `InvalidStateTransition` error rather than a silent
//! jump.

use std::fmt;

use crate::utils::errors::{EventDeskError, Result};

/// The states a review session moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// No identity established yet
    Unauthenticated,
    /// Identity lookup in progress
    Authenticating,
    /// Identity known, authorization not yet checked
    Authenticated,
    /// Identity not in the authorized users list. Terminal.
    Rejected,
    /// Identity cleared against the authorized users list
    Authorized,
    /// Queue loaded, reviewer picking a submission
    Reviewing,
    /// One submission checked out as an editable draft
    Editing,
}

impl ReviewState {
    /// Whether the table allows moving from `self` to `next`
    pub fn can_transition_to(self, next: ReviewState) -> bool {
        use ReviewState::*;
        matches!(
            (self, next),
            (Unauthenticated, Authenticating)
                | (Authenticating, Authenticated)
                | (Authenticating, Unauthenticated)
                | (Authenticated, Authorized)
                | (Authenticated, Rejected)
                | (Authorized, Reviewing)
                | (Reviewing, Editing)
                | (Reviewing, Reviewing)
                | (Editing, Reviewing)
                | (Editing, Editing)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ReviewState::Rejected
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReviewState::Unauthenticated => "unauthenticated",
            ReviewState::Authenticating => "authenticating",
            ReviewState::Authenticated => "authenticated",
            ReviewState::Rejected => "rejected",
            ReviewState::Authorized => "authorized",
            ReviewState::Reviewing => "reviewing",
            ReviewState::Editing => "editing",
        };
        f.write_str(name)
    }
}

/// Tracks the current state and enforces the transition table
#[derive(Debug)]
pub struct SessionStateMachine {
    state: ReviewState,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            state: ReviewState::Unauthenticated,
        }
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// Move to `next`, or fail without changing state when the table
    /// does not allow it
    pub fn transition(&mut self, next: ReviewState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(EventDeskError::InvalidStateTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

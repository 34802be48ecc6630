//! Submission lifecycle: Idle -> Submitting -> Completed.

use serde::Serialize;
use std::fmt;

use super::PredictionOutcome;
use crate::domain::foundation::{
    AttemptId, DomainError, ErrorCode, Generation, StateMachine, Timestamp,
};

/// What the display layer renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Completed(PredictionOutcome),
}

impl SubmissionState {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            SubmissionState::Idle => SubmissionPhase::Idle,
            SubmissionState::Submitting => SubmissionPhase::Submitting,
            SubmissionState::Completed(_) => SubmissionPhase::Completed,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            SubmissionState::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Data-free discriminant of [`SubmissionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Completed,
}

impl StateMachine for SubmissionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionPhase::*;
        matches!(
            (self, target),
            (Idle, Submitting) | (Submitting, Completed) | (Submitting, Idle) | (Completed, Submitting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionPhase::*;
        match self {
            Idle => vec![Submitting],
            Submitting => vec![Completed, Idle],
            Completed => vec![Submitting],
        }
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionPhase::Idle => "Idle",
            SubmissionPhase::Submitting => "Submitting",
            SubmissionPhase::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

/// Ticket for one in-flight attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub generation: Generation,
}

/// Submission aggregate: current state plus the generation guard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    state: SubmissionState,
    generation: Generation,
    attempt_id: Option<AttemptId>,
    updated_at: Timestamp,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            generation: Generation::INITIAL,
            attempt_id: None,
            updated_at: Timestamp::now(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn attempt_id(&self) -> Option<AttemptId> {
        self.attempt_id
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Starts a new attempt, discarding any previous outcome.
    ///
    /// # Errors
    ///
    /// `SubmissionInFlight` while another attempt is still pending. The
    /// submission is left untouched in that case.
    pub fn begin(&mut self) -> Result<Attempt, DomainError> {
        if self.state.is_submitting() {
            return Err(DomainError::new(
                ErrorCode::SubmissionInFlight,
                "A submission is already in progress",
            )
            .with_detail("generation", self.generation.to_string()));
        }
        self.state.phase().transition_to(SubmissionPhase::Submitting)?;

        let attempt = Attempt {
            id: AttemptId::new(),
            generation: self.generation.next(),
        };
        self.generation = attempt.generation;
        self.attempt_id = Some(attempt.id);
        self.state = SubmissionState::Submitting;
        self.updated_at = Timestamp::now();
        Ok(attempt)
    }

    /// Applies the outcome of `attempt`.
    ///
    /// # Errors
    ///
    /// `StaleAttempt` if the attempt was cancelled or superseded; the
    /// outcome is dropped and the state is unchanged.
    pub fn complete(
        &mut self,
        attempt: &Attempt,
        outcome: PredictionOutcome,
    ) -> Result<(), DomainError> {
        if attempt.generation != self.generation || !self.state.is_submitting() {
            return Err(DomainError::new(
                ErrorCode::StaleAttempt,
                "Result belongs to an abandoned attempt",
            )
            .with_detail("attempt_generation", attempt.generation.to_string())
            .with_detail("current_generation", self.generation.to_string()));
        }
        self.state.phase().transition_to(SubmissionPhase::Completed)?;

        self.state = SubmissionState::Completed(outcome);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Abandons the in-flight attempt and returns to Idle.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when nothing is in flight.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.state.phase().transition_to(SubmissionPhase::Idle)?;
        self.state = SubmissionState::Idle;
        self.attempt_id = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

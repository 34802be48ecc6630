//! SubmissionController - Drives one form through validation and prediction.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::assessment::{validate, FieldErrors, RiskAssessmentInput, ValidatedRiskAssessment};
use crate::domain::foundation::Generation;
use crate::domain::prediction::{
    Attempt, Classification, Confidence, FailureReason, PredictionOutcome, Submission,
    SubmissionState,
};
use crate::ports::{PredictionRequest, PredictionResponse, RiskPredictor};

/// Reasons a submit call produced no outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// The form failed validation; nothing was sent.
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),

    /// Another attempt is still in flight; nothing was sent.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The attempt was cancelled or replaced before its result arrived.
    #[error("attempt {generation} was cancelled or superseded")]
    Superseded { generation: Generation },
}

/// Owns the submission state of one form.
///
/// Each controller is independent; several forms can run side by side.
/// State lives in a watch channel so the display layer can follow it.
pub struct SubmissionController {
    predictor: Arc<dyn RiskPredictor>,
    submission: watch::Sender<Submission>,
}

impl SubmissionController {
    pub fn new(predictor: Arc<dyn RiskPredictor>) -> Self {
        let (submission, _) = watch::channel(Submission::new());
        Self {
            predictor,
            submission,
        }
    }

    /// Current display state.
    pub fn state(&self) -> SubmissionState {
        self.submission.borrow().state().clone()
    }

    /// Generation of the most recent attempt.
    pub fn generation(&self) -> Generation {
        self.submission.borrow().generation()
    }

    /// Full copy of the submission aggregate.
    pub fn snapshot(&self) -> Submission {
        self.submission.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<Submission> {
        self.submission.subscribe()
    }

    /// Validates raw form input, then submits it.
    ///
    /// On validation failure the state is left untouched and no call is made.
    pub async fn submit_raw(
        &self,
        raw: &RiskAssessmentInput,
    ) -> Result<PredictionOutcome, SubmitError> {
        let assessment = validate(raw).map_err(|errors| {
            tracing::debug!(fields = ?errors.fields(), "Assessment rejected by validation");
            SubmitError::Invalid(errors)
        })?;
        self.submit(assessment).await
    }

    /// Sends a validated assessment to the predictor and records the outcome.
    ///
    /// Exactly one predictor call is made per accepted submission. A
    /// failed call is an outcome (`RequestFailed`), not an error.
    pub async fn submit(
        &self,
        input: ValidatedRiskAssessment,
    ) -> Result<PredictionOutcome, SubmitError> {
        let attempt = self.begin()?;
        let mut in_flight = InFlight {
            controller: self,
            attempt,
            settled: false,
        };

        tracing::info!(
            attempt_id = %attempt.id,
            generation = %attempt.generation,
            "Submitting risk assessment"
        );

        let outcome = match self.predictor.predict(PredictionRequest::from(&input)).await {
            Ok(response) => interpret(response),
            Err(err) => {
                tracing::warn!(attempt_id = %attempt.id, error = %err, "Prediction request failed");
                PredictionOutcome::failed(err.into())
            }
        };

        in_flight.settled = true;
        self.finish(&attempt, outcome)
    }

    /// Abandons the in-flight attempt, if any. Returns true if one was cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.submission.send_if_modified(|s| s.cancel().is_ok());
        if cancelled {
            let submission = self.submission.borrow();
            tracing::info!(
                generation = %submission.generation(),
                updated_at = %submission.updated_at(),
                "Submission cancelled"
            );
        }
        cancelled
    }

    /// Starts an attempt; `Submission::begin` only refuses while one is in flight.
    fn begin(&self) -> Result<Attempt, SubmitError> {
        let mut result = Err(SubmitError::AlreadySubmitting);
        self.submission.send_if_modified(|s| match s.begin() {
            Ok(attempt) => {
                result = Ok(attempt);
                true
            }
            Err(err) => {
                tracing::warn!(code = %err.code, details = ?err.details, "Rejected submit while in flight");
                false
            }
        });
        result
    }

    fn finish(
        &self,
        attempt: &Attempt,
        outcome: PredictionOutcome,
    ) -> Result<PredictionOutcome, SubmitError> {
        let mut applied = Ok(());
        self.submission.send_if_modified(|s| {
            applied = s.complete(attempt, outcome.clone());
            applied.is_ok()
        });

        match applied {
            Ok(()) => {
                tracing::info!(
                    attempt_id = %attempt.id,
                    classification = ?outcome.classification(),
                    failure_code = ?outcome.failure().map(FailureReason::code),
                    updated_at = %self.submission.borrow().updated_at(),
                    "Submission completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::debug!(
                    attempt_id = %attempt.id,
                    code = %err.code,
                    details = ?err.details,
                    "Discarded stale result"
                );
                Err(SubmitError::Superseded {
                    generation: attempt.generation,
                })
            }
        }
    }
}

/// Returns the submission to Idle if its future is dropped mid-call.
struct InFlight<'a> {
    controller: &'a SubmissionController,
    attempt: Attempt,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.attempt.generation;
        self.controller.submission.send_if_modified(|s| {
            s.generation() == generation && s.state().is_submitting() && s.cancel().is_ok()
        });
    }
}

/// Maps a service response onto an outcome.
///
/// A missing or unknown label is a failed request, never a guess.
fn interpret(response: PredictionResponse) -> PredictionOutcome {
    let Some(label) = response.final_result else {
        return PredictionOutcome::failed(FailureReason::MalformedResponse(
            "missing classification field".to_string(),
        ));
    };
    let Some(classification) = Classification::from_label(&label) else {
        return PredictionOutcome::failed(FailureReason::UnrecognizedClassification(label));
    };
    let confidence = match response.confidence.map(Confidence::try_new).transpose() {
        Ok(confidence) => confidence,
        Err(err) => return PredictionOutcome::failed(FailureReason::MalformedResponse(err.to_string())),
    };
    PredictionOutcome::classified(classification, confidence)
}

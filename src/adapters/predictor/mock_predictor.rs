//! Mock Risk Predictor for testing.
//!
//! Queued responses and error injection, with call tracking. An optional
//! gate holds calls in flight until the test releases them.
//!
//! ```ignore
//! let predictor = MockPredictor::new()
//!     .with_label("Diabetic")
//!     .with_error(PredictorError::network("refused"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::ports::{PredictionRequest, PredictionResponse, PredictorError, RiskPredictor};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Success(PredictionResponse),
    Error(PredictorError),
}

/// Mock predictor for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MockPredictor {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, response: PredictionResponse) -> Self {
        self.push(MockReply::Success(response));
        self
    }

    /// Queues a response carrying only a label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.with_response(PredictionResponse::labelled(label))
    }

    /// Queues an error.
    pub fn with_error(self, error: PredictorError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    /// Holds each call until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    pub fn get_calls(&self) -> Vec<PredictionRequest> {
        self.lock_calls().clone()
    }

    fn push(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<PredictionRequest>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Next queued reply; an exhausted queue behaves like a dead server.
    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| MockReply::Error(PredictorError::network("no mock reply queued")))
    }
}

#[async_trait]
impl RiskPredictor for MockPredictor {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse, PredictorError> {
        self.lock_calls().push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.next_reply() {
            MockReply::Success(response) => Ok(response),
            MockReply::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictionRequest {
        PredictionRequest {
            gender: "male".to_string(),
            age: 60.0,
            hypertension: 1,
            heart_disease: 0,
            smoking_history: "former".to_string(),
            bmi: 31.0,
            hba1c_level: 7.2,
            blood_glucose_level: 180.0,
        }
    }

    #[tokio::test]
    async fn replies_in_order() {
        let predictor = MockPredictor::new()
            .with_label("Diabetic")
            .with_error(PredictorError::Timeout { timeout_secs: 1 });

        assert_eq!(
            predictor.predict(request()).await,
            Ok(PredictionResponse::labelled("Diabetic"))
        );
        assert_eq!(
            predictor.predict(request()).await,
            Err(PredictorError::Timeout { timeout_secs: 1 })
        );
    }

    #[tokio::test]
    async fn exhausted_queue_is_a_network_error() {
        let predictor = MockPredictor::new();
        assert!(matches!(
            predictor.predict(request()).await,
            Err(PredictorError::Network(_))
        ));
    }

    #[tokio::test]
    async fn records_every_call() {
        let predictor = MockPredictor::new().with_label("Diabetic");
        predictor.predict(request()).await.unwrap();

        assert_eq!(predictor.call_count(), 1);
        assert_eq!(predictor.get_calls()[0], request());
    }

    #[tokio::test]
    async fn gate_holds_the_call_until_released() {
        let gate = Arc::new(Notify::new());
        let predictor = MockPredictor::new()
            .with_label("Non-Diabetic")
            .with_gate(gate.clone());

        let handle = tokio::spawn({
            let predictor = predictor.clone();
            async move { predictor.predict(request()).await }
        });
        tokio::task::yield_now().await;
        assert!(!handle.is_finished());

        gate.notify_one();
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.final_result.as_deref(), Some("Non-Diabetic"));
    }
}

//! Evaluation requests with a busy flag and inline error.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{ApiError, HrApi};
use crate::models::{EvaluationKind, EvaluationResult};

/// What an evaluation panel shows at any moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationView {
    pub loading: bool,
    /// Candidate whose result is currently displayed.
    pub candidate_id: Option<String>,
    pub kind: Option<EvaluationKind>,
    pub result: Option<EvaluationResult>,
    pub error: Option<String>,
}

/// Issues evaluation calls and publishes every state change.
///
/// Requests are neither coalesced nor de-duplicated. Overlapping requests
/// race and whichever settles last owns the view.
pub struct EvaluationRequestor<A: ?Sized> {
    api: Arc<A>,
    state: watch::Sender<EvaluationView>,
}

impl<A> EvaluationRequestor<A>
where
    A: HrApi + ?Sized,
{
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(EvaluationView::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<EvaluationView> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> EvaluationView {
        self.state.borrow().clone()
    }

    /// Requests an evaluation. A success replaces the shown result verbatim;
    /// a failure sets `error` and leaves the previous result in place.
    pub async fn request(
        &self,
        candidate_id: &str,
        kind: EvaluationKind,
    ) -> Result<EvaluationResult, ApiError> {
        self.state.send_modify(|view| {
            view.loading = true;
            view.error = None;
        });

        let outcome = self.api.evaluate(candidate_id, kind).await;

        self.state.send_modify(|view| {
            view.loading = false;
            match &outcome {
                Ok(result) => {
                    view.candidate_id = Some(candidate_id.to_string());
                    view.kind = Some(kind);
                    view.result = Some(result.clone());
                    view.error = None;
                }
                Err(err) => view.error = Some(err.to_string()),
            }
        });

        match &outcome {
            Ok(_) => info!(candidate_id, kind = kind.label(), "evaluation received"),
            Err(err) => warn!(candidate_id, kind = kind.label(), error = %err, "evaluation failed"),
        }

        outcome
    }

    /// Forgets the shown result, as when a rejected candidate is discarded.
    pub fn clear(&self) {
        self.state.send_modify(|view| {
            view.candidate_id = None;
            view.kind = None;
            view.result = None;
            view.error = None;
        });
    }
}

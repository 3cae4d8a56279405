//! One analyze request/response cycle: validate input, call the remote
//! analysis endpoint, hand the decoded record back to the view. History and
//! chart mutation happen only after full success, in the analyze view.

use api::{AnalyzeBackend, AnalyzeRequest, ApiError, CaseRecord, OverrideBackend, OverrideRequest};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Empty symptom text is caught locally; no request leaves the client.
    #[error("enter symptoms before submitting")]
    EmptyInput,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Orchestrates analyze calls over a pluggable transport.
#[derive(Debug)]
pub struct AnalysisSession<B> {
    backend: B,
}

impl<B: AnalyzeBackend> AnalysisSession<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Validate, send, and strictly decode one analysis. The full response is
    /// awaited before anything is returned; on any failure the caller's state
    /// is untouched.
    pub async fn analyze(
        &self,
        raw_text: &str,
        village: &str,
    ) -> Result<CaseRecord, SessionError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let village = village.trim();
        let request = AnalyzeRequest {
            text: text.to_string(),
            village: if village.is_empty() {
                "Unknown".to_string()
            } else {
                village.to_string()
            },
        };

        Ok(self.backend.analyze(&request).await?)
    }
}

/// Outcome of one override attempt. `Abandoned` means validation stopped it
/// before any request left the client.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideOutcome {
    Abandoned,
    Recorded(String),
    Failed(ApiError),
}

/// Orchestrates the clinician override cycle: guard, one mutation request,
/// then an unconditional view reload so no stale classification survives.
#[derive(Debug)]
pub struct OverrideSession<B> {
    backend: B,
}

impl<B: OverrideBackend> OverrideSession<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Send one override and invoke `reload` once the server has answered,
    /// success or failure alike. An empty `case_id` or `new_risk` abandons
    /// the attempt with no network call and no reload. The risk label goes
    /// out as entered; the server is the source of truth for acceptance.
    pub async fn submit<R: FnOnce()>(
        &self,
        case_id: &str,
        new_risk: &str,
        reload: R,
    ) -> OverrideOutcome {
        let case_id = case_id.trim();
        if case_id.is_empty() || new_risk.trim().is_empty() {
            return OverrideOutcome::Abandoned;
        }

        let request = OverrideRequest {
            case_id: case_id.to_string(),
            new_risk: new_risk.to_string(),
        };

        let outcome = match self.backend.submit_override(&request).await {
            Ok(status) => OverrideOutcome::Recorded(status),
            Err(err) => OverrideOutcome::Failed(err),
        };
        reload();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Explanation, RiskLevel};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct RecordingBackend {
        requests: RefCell<Vec<AnalyzeRequest>>,
        response: Result<CaseRecord, ApiError>,
    }

    impl RecordingBackend {
        fn returning(response: Result<CaseRecord, ApiError>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                response,
            }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl AnalyzeBackend for RecordingBackend {
        async fn analyze(&self, request: &AnalyzeRequest) -> Result<CaseRecord, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            self.response.clone()
        }
    }

    fn sample_record() -> CaseRecord {
        CaseRecord {
            risk_level: RiskLevel::Low,
            risk_score: 3.0,
            explanation: Explanation {
                detected_symptoms: vec!["cold".to_string()],
                severity_words: Vec::new(),
                duration: "unknown".to_string(),
                emergency_flag: false,
                risk_reasoning: "Mild symptoms only.".to_string(),
            },
            village: "Unknown".to_string(),
            case_id: Some("case-1".to_string()),
            timestamp: None,
        }
    }

    #[test]
    fn empty_text_never_touches_the_network() {
        let session = AnalysisSession::new(RecordingBackend::returning(Ok(sample_record())));

        let result = block_on(session.analyze("", "Amli"));
        assert_eq!(result, Err(SessionError::EmptyInput));
        assert_eq!(session.backend.calls(), 0);
    }

    #[test]
    fn whitespace_only_text_is_empty_input() {
        let session = AnalysisSession::new(RecordingBackend::returning(Ok(sample_record())));

        let result = block_on(session.analyze("  \n\t ", ""));
        assert_eq!(result, Err(SessionError::EmptyInput));
        assert_eq!(session.backend.calls(), 0);
    }

    #[test]
    fn village_defaults_to_unknown() {
        let session = AnalysisSession::new(RecordingBackend::returning(Ok(sample_record())));

        block_on(session.analyze("fever and cough", "   ")).expect("analyze");
        let requests = session.backend.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].village, "Unknown");
        assert_eq!(requests[0].text, "fever and cough");
    }

    #[test]
    fn village_is_trimmed_and_forwarded() {
        let session = AnalysisSession::new(RecordingBackend::returning(Ok(sample_record())));

        block_on(session.analyze("chest pain", " Kotra ")).expect("analyze");
        assert_eq!(session.backend.requests.borrow()[0].village, "Kotra");
    }

    struct RecordingOverrideBackend {
        requests: RefCell<Vec<OverrideRequest>>,
        response: Result<String, ApiError>,
    }

    impl RecordingOverrideBackend {
        fn returning(response: Result<String, ApiError>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                response,
            }
        }
    }

    impl OverrideBackend for RecordingOverrideBackend {
        async fn submit_override(&self, request: &OverrideRequest) -> Result<String, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            self.response.clone()
        }
    }

    #[test]
    fn empty_case_id_abandons_without_network_or_reload() {
        let session = OverrideSession::new(RecordingOverrideBackend::returning(Ok(
            "Feedback recorded".to_string(),
        )));
        let reloads = Cell::new(0u32);

        let outcome = block_on(session.submit("   ", "HIGH RISK", || {
            reloads.set(reloads.get() + 1)
        }));
        assert_eq!(outcome, OverrideOutcome::Abandoned);
        assert_eq!(session.backend.requests.borrow().len(), 0);
        assert_eq!(reloads.get(), 0);
    }

    #[test]
    fn empty_risk_abandons_without_network_or_reload() {
        let session = OverrideSession::new(RecordingOverrideBackend::returning(Ok(
            "Feedback recorded".to_string(),
        )));
        let reloads = Cell::new(0u32);

        let outcome = block_on(session.submit("case-9", " \t", || {
            reloads.set(reloads.get() + 1)
        }));
        assert_eq!(outcome, OverrideOutcome::Abandoned);
        assert_eq!(session.backend.requests.borrow().len(), 0);
        assert_eq!(reloads.get(), 0);
    }

    #[test]
    fn accepted_override_sends_once_then_reloads_once() {
        let session = OverrideSession::new(RecordingOverrideBackend::returning(Ok(
            "Feedback recorded".to_string(),
        )));
        let reloads = Cell::new(0u32);

        let outcome = block_on(session.submit("case-9", "LOW RISK", || {
            reloads.set(reloads.get() + 1)
        }));
        assert_eq!(
            outcome,
            OverrideOutcome::Recorded("Feedback recorded".to_string())
        );

        let requests = session.backend.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].case_id, "case-9");
        assert_eq!(requests[0].new_risk, "LOW RISK");
        assert_eq!(reloads.get(), 1);
    }

    #[test]
    fn rejected_override_still_reloads_exactly_once() {
        let session = OverrideSession::new(RecordingOverrideBackend::returning(Err(
            ApiError::Rejected("Invalid case index".to_string()),
        )));
        let reloads = Cell::new(0u32);

        let outcome = block_on(session.submit("case-404", "HIGH RISK", || {
            reloads.set(reloads.get() + 1)
        }));
        assert_eq!(
            outcome,
            OverrideOutcome::Failed(ApiError::Rejected("Invalid case index".to_string()))
        );
        assert_eq!(session.backend.requests.borrow().len(), 1);
        assert_eq!(reloads.get(), 1);
    }

    #[test]
    fn backend_rejection_propagates_untouched() {
        let session = AnalysisSession::new(RecordingBackend::returning(Err(
            ApiError::Rejected("No symptoms provided".to_string()),
        )));

        let result = block_on(session.analyze("dizzy", ""));
        assert_eq!(
            result,
            Err(SessionError::Api(ApiError::Rejected(
                "No symptoms provided".to_string()
            )))
        );
        assert_eq!(session.backend.calls(), 1);
    }
}

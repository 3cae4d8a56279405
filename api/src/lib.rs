//! Client bindings for the remote triage service: wire types, strict response
//! decoding, and the fetch transport used by the wasm build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
mod http;

/// Risk classification returned by the analysis service. Any other wire value
/// is a decode error, never something we display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "LOW RISK")]
    Low,
    #[serde(rename = "MODERATE RISK")]
    Moderate,
    #[serde(rename = "HIGH RISK")]
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Moderate => "MODERATE RISK",
            RiskLevel::High => "HIGH RISK",
        }
    }
}

/// Structured reasoning attached to every assessment. Empty symptom lists are
/// legal; a missing field is a malformed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub detected_symptoms: Vec<String>,
    pub severity_words: Vec<String>,
    pub duration: String,
    pub emergency_flag: bool,
    pub risk_reasoning: String,
}

/// One analysis outcome, immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub explanation: Explanation,
    #[serde(default = "default_village")]
    pub village: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_village() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub village: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideRequest {
    pub case_id: String,
    #[serde(rename = "override")]
    pub new_risk: String,
}

/// Aggregate counts served by `/analytics`. Ordered maps so repeated renders
/// of unchanged data come out identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_cases: u64,
    pub risk_distribution: BTreeMap<String, u64>,
    pub village_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx status; carries the server-supplied message when present.
    #[error("{0}")]
    Rejected(String),
    /// 2xx status but the payload failed strict decoding.
    #[error("unexpected response from the analysis service: {0}")]
    Malformed(String),
    /// Transport-level failure before any response arrived.
    #[error("network failure: {0}")]
    Network(String),
}

/// Seam between the analyze workflow and the transport, so the session logic
/// can be exercised against a recording stub off-web.
pub trait AnalyzeBackend {
    fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> impl std::future::Future<Output = Result<CaseRecord, ApiError>>;
}

impl<B: AnalyzeBackend> AnalyzeBackend for &B {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<CaseRecord, ApiError> {
        (**self).analyze(request).await
    }
}

/// Same seam for the clinician override workflow.
pub trait OverrideBackend {
    fn submit_override(
        &self,
        request: &OverrideRequest,
    ) -> impl std::future::Future<Output = Result<String, ApiError>>;
}

impl<B: OverrideBackend> OverrideBackend for &B {
    async fn submit_override(&self, request: &OverrideRequest) -> Result<String, ApiError> {
        (**self).submit_override(request).await
    }
}

/// HTTP client for the triage endpoints. Requests are same-origin by default;
/// the base path is configurable for completeness.
#[derive(Debug, Clone, Default)]
pub struct TriageApi {
    base: String,
}

impl TriageApi {
    pub fn same_origin() -> Self {
        Self::default()
    }

    pub fn with_base<T: Into<String>>(base: T) -> Self {
        Self { base: base.into() }
    }

    pub async fn override_case(
        &self,
        case_id: &str,
        new_risk: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{}/doctor/override", self.base);
        let request = OverrideRequest {
            case_id: case_id.to_string(),
            new_risk: new_risk.to_string(),
        };

        #[cfg(target_arch = "wasm32")]
        {
            let (ok, body) = http::post_json(&url, &request).await?;
            decode_override(ok, &body)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = request;
            Err(ApiError::Network(format!(
                "no browser transport to reach {url}"
            )))
        }
    }

    pub async fn fetch_analytics(&self) -> Result<AnalyticsSummary, ApiError> {
        let url = format!("{}/analytics", self.base);

        #[cfg(target_arch = "wasm32")]
        {
            let (ok, body) = http::get(&url).await?;
            decode_analytics(ok, &body)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(ApiError::Network(format!(
                "no browser transport to reach {url}"
            )))
        }
    }
}

impl AnalyzeBackend for TriageApi {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<CaseRecord, ApiError> {
        let url = format!("{}/analyze", self.base);

        #[cfg(target_arch = "wasm32")]
        {
            let (ok, body) = http::post_json(&url, request).await?;
            decode_analysis(ok, &body)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = request;
            Err(ApiError::Network(format!(
                "no browser transport to reach {url}"
            )))
        }
    }
}

impl OverrideBackend for TriageApi {
    async fn submit_override(&self, request: &OverrideRequest) -> Result<String, ApiError> {
        self.override_case(&request.case_id, &request.new_risk).await
    }
}

/// Decode one `/analyze` response. `ok` is the transport-level success flag;
/// out-of-range scores are treated the same as unparseable payloads.
pub fn decode_analysis(ok: bool, body: &str) -> Result<CaseRecord, ApiError> {
    if !ok {
        return Err(ApiError::Rejected(server_error_message(body)));
    }

    let record: CaseRecord =
        serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))?;

    if !record.risk_score.is_finite() || record.risk_score < 0.0 {
        return Err(ApiError::Malformed(format!(
            "risk_score {} is out of range",
            record.risk_score
        )));
    }

    Ok(record)
}

/// Decode one `/doctor/override` response into its status line. The server is
/// the source of truth for acceptance, so a rejected override arrives as an
/// `error` field rather than a client-side validation failure.
pub fn decode_override(ok: bool, body: &str) -> Result<String, ApiError> {
    if !ok {
        return Err(ApiError::Rejected(server_error_message(body)));
    }

    #[derive(Deserialize)]
    struct OverrideResponse {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    let parsed: OverrideResponse =
        serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(ApiError::Rejected(error));
    }

    parsed
        .status
        .ok_or_else(|| ApiError::Malformed("override response carried no status".to_string()))
}

pub fn decode_analytics(ok: bool, body: &str) -> Result<AnalyticsSummary, ApiError> {
    if !ok {
        return Err(ApiError::Rejected(server_error_message(body)));
    }

    serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))
}

fn server_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| "the analysis service rejected the request".to_string())
}

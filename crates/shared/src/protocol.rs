//! Wire format of the evaluation endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::{EvaluationResult, TechnicalMetrics, MAX_SUITABILITY_SCORE};

pub const FILE_FIELD: &str = "file";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Envelope returned by the evaluation service on both the success and the
/// failure path. `detail` is what FastAPI puts in HTTP error bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub evaluation: Option<EvaluationPayload>,
    #[serde(default)]
    pub sections: Option<Map<String, Value>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl EvaluateResponse {
    /// Best human-readable failure text in the body, if any.
    pub fn failure_message(&self) -> Option<String> {
        if let Some(error) = self.error.as_deref().map(str::trim) {
            if !error.is_empty() {
                return Some(error.to_string());
            }
        }
        match self.detail.as_ref()? {
            Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

// Fields below accept an explicit `null` as well as an absent key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub suitability_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_metrics: TechnicalMetricsPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalMetricsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cosine_similarity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword_density: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub knockout_violations: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EvaluationPayload {
    /// Normalizes the payload into the client's result type. Out-of-range
    /// numbers are clamped rather than rejected.
    pub fn into_result(self, sections: Map<String, Value>) -> EvaluationResult {
        EvaluationResult {
            suitability_score: clamp_score(self.suitability_score),
            reasoning: self.reasoning,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            recommendations: self.recommendations,
            technical_metrics: self.technical_metrics.into(),
            sections,
        }
    }
}

impl From<TechnicalMetricsPayload> for TechnicalMetrics {
    fn from(value: TechnicalMetricsPayload) -> Self {
        Self {
            cosine_similarity: clamp_unit(value.cosine_similarity),
            keyword_density: clamp_unit(value.keyword_density),
            knockout_violations: value.knockout_violations.clamp(0, u32::MAX as i64) as u32,
        }
    }
}

fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, MAX_SUITABILITY_SCORE as f64) as u8
}

fn clamp_unit(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// HTTP Classifier Backend
// Text-classification inference served over HTTP (hosted or self-hosted endpoint)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use super::{ClassificationPipeline, ClassifierBackend, ClassifierError, ExecutionDevice, LabelScore};
use crate::services::config::ClassifierConfig;

const WARMUP_TEXT: &str = "Warmup request for the text classifier.";

#[derive(Debug, Clone, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Endpoints answer either with one list of labels or with one list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

fn parse_inference_response(body: &str) -> Result<Vec<LabelScore>, ClassifierError> {
    let parsed: InferenceResponse = serde_json::from_str(body.trim())
        .map_err(|e| ClassifierError::InvalidResponse(format!("{} - body: {}", e, preview(body))))?;

    Ok(match parsed {
        InferenceResponse::Batched(mut batches) => {
            if batches.is_empty() {
                Vec::new()
            } else {
                batches.swap_remove(0)
            }
        }
        InferenceResponse::Flat(scores) => scores,
    })
}

fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(200).collect();
    if body.chars().count() > 200 {
        out.push_str("...");
    }
    out
}

pub struct HttpClassifierBackend {
    config: ClassifierConfig,
}

impl HttpClassifierBackend {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self, device: ExecutionDevice) -> Option<&str> {
        let url = match device {
            ExecutionDevice::Accelerated => self.config.accelerated_url.as_deref(),
            ExecutionDevice::Cpu => Some(self.config.cpu_url.as_str()),
        };
        url.map(|u| u.trim()).filter(|u| !u.is_empty())
    }
}

#[async_trait]
impl ClassifierBackend for HttpClassifierBackend {
    async fn load(
        &self,
        device: ExecutionDevice,
    ) -> Result<Arc<dyn ClassificationPipeline>, ClassifierError> {
        let url = self.endpoint(device).ok_or_else(|| {
            ClassifierError::Backend(format!("no {} endpoint configured", device))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build()?;

        let pipeline = HttpPipeline {
            client,
            url: url.to_string(),
            api_key: self.config.api_key.clone(),
        };

        if self.config.warmup {
            let started = Instant::now();
            pipeline.classify(WARMUP_TEXT).await?;
            info!(
                "[CLASSIFIER] Warmup ok model={} device={} latency_ms={}",
                self.config.model,
                device,
                started.elapsed().as_millis()
            );
        }

        Ok(Arc::new(pipeline))
    }
}

struct HttpPipeline {
    client: Client,
    url: String,
    api_key: Option<String>,
}

#[async_trait]
impl ClassificationPipeline for HttpPipeline {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let mut request = self.client.post(&self.url).json(&InferenceRequest { inputs: text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        parse_inference_response(&body)
    }
}

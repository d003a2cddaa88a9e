// Classifier Adapter
// Lifecycle and output normalization for the pretrained real/fake text classifier

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

pub use http::HttpClassifierBackend;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Text to classify is empty")]
    EmptyInput,
    #[error("Classifier model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Classifier backend error: {0}")]
    Backend(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),
    #[error("Classification timed out after {0:?}")]
    Timeout(Duration),
}

/// Where the model runs. Loading is attempted on `Accelerated` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionDevice {
    Accelerated,
    Cpu,
}

impl fmt::Display for ExecutionDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionDevice::Accelerated => write!(f, "accelerated"),
            ExecutionDevice::Cpu => write!(f, "cpu"),
        }
    }
}

/// One label/probability pair as reported by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A loaded model ready for inference.
#[async_trait]
pub trait ClassificationPipeline: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError>;
}

/// Source of classification pipelines, e.g. a local runtime or a remote endpoint.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    async fn load(
        &self,
        device: ExecutionDevice,
    ) -> Result<Arc<dyn ClassificationPipeline>, ClassifierError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierLabel {
    Real,
    Fake,
}

impl ClassifierLabel {
    /// Labels denoting human-written or genuine content map to `Real`;
    /// every other label is treated as `Fake`.
    pub fn from_model_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "real" | "human" | "human-written" | "human_written" => Self::Real,
            _ => Self::Fake,
        }
    }
}

/// Normalized classifier verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOutput {
    pub label: ClassifierLabel,
    /// Probability that the content is real, whatever the model's label polarity.
    pub raw_score: f64,
}

impl ClassifierOutput {
    pub fn from_top_label(top: &LabelScore) -> Self {
        let label = ClassifierLabel::from_model_label(&top.label);
        let confidence = top.score.clamp(0.0, 1.0);
        let raw_score = match label {
            ClassifierLabel::Real => confidence,
            ClassifierLabel::Fake => 1.0 - confidence,
        };
        Self { label, raw_score }
    }
}

/// Pick the highest-scoring label and normalize it.
pub fn interpret_scores(scores: &[LabelScore]) -> Result<ClassifierOutput, ClassifierError> {
    scores
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(ClassifierOutput::from_top_label)
        .ok_or_else(|| ClassifierError::InvalidResponse("model returned no labels".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClassifierState {
    Uninitialized = 0,
    Initializing = 1,
    Ready = 2,
    Failed = 3,
}

impl ClassifierState {
    fn from_u8(val: u8) -> Self {
        match val {
            1 => Self::Initializing,
            2 => Self::Ready,
            3 => Self::Failed,
            _ => Self::Uninitialized,
        }
    }
}

/// Resets the state if a load is dropped before it finishes (runtime
/// shutdown or a panicking backend), so the next caller can start over.
struct LoadGuard<'a> {
    state: &'a AtomicU8,
    finished: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state
                .store(ClassifierState::Uninitialized as u8, Ordering::SeqCst);
        }
    }
}

/// Owns the classifier lifecycle: `Uninitialized -> Initializing -> Ready | Failed`.
///
/// The model is loaded once, on first use or through [`initialize`](Self::initialize).
/// Concurrent first callers wait on the same load. The load runs on its own task,
/// so a caller that stops waiting does not cancel it. A failed load is final:
/// every later call returns `ModelUnavailable` without touching the backend.
pub struct ClassifierAdapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    backend: Arc<dyn ClassifierBackend>,
    pipeline: OnceCell<Result<Arc<dyn ClassificationPipeline>, String>>,
    state: AtomicU8,
}

impl ClassifierAdapter {
    pub fn new(backend: Arc<dyn ClassifierBackend>) -> Self {
        Self {
            inner: Arc::new(AdapterInner {
                backend,
                pipeline: OnceCell::new(),
                state: AtomicU8::new(ClassifierState::Uninitialized as u8),
            }),
        }
    }

    pub fn state(&self) -> ClassifierState {
        ClassifierState::from_u8(self.inner.state.load(Ordering::SeqCst))
    }

    /// Load the model now instead of on the first `classify` call.
    pub async fn initialize(&self) -> Result<(), ClassifierError> {
        self.pipeline().await.map(|_| ())
    }

    pub async fn classify(&self, text: &str) -> Result<ClassifierOutput, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let pipeline = self.pipeline().await?;
        let scores = pipeline.classify(text).await?;
        interpret_scores(&scores)
    }

    async fn pipeline(&self) -> Result<Arc<dyn ClassificationPipeline>, ClassifierError> {
        let loaded = match self.inner.pipeline.get() {
            Some(loaded) => loaded.clone(),
            None => {
                let inner = self.inner.clone();
                tokio::spawn(async move {
                    inner.pipeline.get_or_init(|| inner.load()).await.clone()
                })
                .await
                .map_err(|e| ClassifierError::Backend(format!("initialization task failed: {}", e)))?
            }
        };
        loaded.map_err(ClassifierError::ModelUnavailable)
    }
}

impl AdapterInner {
    async fn load(&self) -> Result<Arc<dyn ClassificationPipeline>, String> {
        let mut guard = LoadGuard {
            state: &self.state,
            finished: false,
        };
        self.state
            .store(ClassifierState::Initializing as u8, Ordering::SeqCst);

        let started = Instant::now();
        info!("[CLASSIFIER] Initializing model (accelerated)");

        let result = match self.backend.load(ExecutionDevice::Accelerated).await {
            Ok(pipeline) => Ok(pipeline),
            Err(e) => {
                warn!(
                    "[CLASSIFIER] Accelerated initialization failed, retrying on CPU: {}",
                    e
                );
                match self.backend.load(ExecutionDevice::Cpu).await {
                    Ok(pipeline) => Ok(pipeline),
                    Err(fallback) => {
                        error!("[CLASSIFIER] CPU fallback initialization failed: {}", fallback);
                        Err(format!(
                            "accelerated: {}; cpu: {}",
                            e, fallback
                        ))
                    }
                }
            }
        };

        let state = if result.is_ok() {
            info!(
                "[CLASSIFIER] Model ready, elapsed_ms={}",
                started.elapsed().as_millis()
            );
            ClassifierState::Ready
        } else {
            ClassifierState::Failed
        };
        self.state.store(state as u8, Ordering::SeqCst);
        guard.finished = true;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tokio::task::JoinSet;

    struct FixedPipeline {
        scores: Vec<LabelScore>,
    }

    #[async_trait]
    impl ClassificationPipeline for FixedPipeline {
        async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
            Ok(self.scores.clone())
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        fail_accelerated: bool,
        fail_cpu: bool,
        delay: Option<Duration>,
        gate: Option<Arc<Notify>>,
        loads: AtomicUsize,
        devices: Mutex<Vec<ExecutionDevice>>,
        scores: Vec<LabelScore>,
    }

    #[async_trait]
    impl ClassifierBackend for FakeBackend {
        async fn load(
            &self,
            device: ExecutionDevice,
        ) -> Result<Arc<dyn ClassificationPipeline>, ClassifierError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.devices.lock().unwrap().push(device);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let fail = match device {
                ExecutionDevice::Accelerated => self.fail_accelerated,
                ExecutionDevice::Cpu => self.fail_cpu,
            };
            if fail {
                return Err(ClassifierError::Backend(format!("{} unavailable", device)));
            }
            Ok(Arc::new(FixedPipeline {
                scores: self.scores.clone(),
            }))
        }
    }

    fn real(score: f64) -> Vec<LabelScore> {
        vec![LabelScore::new("REAL", score), LabelScore::new("FAKE", 1.0 - score)]
    }

    #[test]
    fn test_label_interpretation() {
        let out = interpret_scores(&real(0.9)).unwrap();
        assert_eq!(out.label, ClassifierLabel::Real);
        assert!((out.raw_score - 0.9).abs() < 1e-9);

        let out = interpret_scores(&[LabelScore::new("Fake", 0.9), LabelScore::new("Real", 0.1)]).unwrap();
        assert_eq!(out.label, ClassifierLabel::Fake);
        assert!((out.raw_score - 0.1).abs() < 1e-9);

        let out = interpret_scores(&[LabelScore::new("Human", 0.7)]).unwrap();
        assert_eq!(out.label, ClassifierLabel::Real);
        assert!((out.raw_score - 0.7).abs() < 1e-9);

        let out = interpret_scores(&[LabelScore::new("machine", 0.75)]).unwrap();
        assert!((out.raw_score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_top_label_is_highest_score() {
        // unsorted model output
        let out = interpret_scores(&[LabelScore::new("REAL", 0.2), LabelScore::new("FAKE", 0.8)]).unwrap();
        assert_eq!(out.label, ClassifierLabel::Fake);
        assert!((out.raw_score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_output_is_invalid() {
        assert!(matches!(
            interpret_scores(&[]),
            Err(ClassifierError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_lazy_single_initialization() {
        let backend = Arc::new(FakeBackend {
            scores: real(0.8),
            ..Default::default()
        });
        let adapter = ClassifierAdapter::new(backend.clone());
        assert_eq!(adapter.state(), ClassifierState::Uninitialized);

        adapter.classify("first").await.unwrap();
        adapter.classify("second").await.unwrap();
        adapter.initialize().await.unwrap();

        assert_eq!(adapter.state(), ClassifierState::Ready);
        assert_eq!(backend.loads.load(Ordering::SeqCst), 1);
        assert_eq!(*backend.devices.lock().unwrap(), vec![ExecutionDevice::Accelerated]);
    }

    #[tokio::test]
    async fn test_falls_back_to_cpu() {
        let backend = Arc::new(FakeBackend {
            fail_accelerated: true,
            scores: real(0.6),
            ..Default::default()
        });
        let adapter = ClassifierAdapter::new(backend.clone());

        let out = adapter.classify("some text").await.unwrap();
        assert!((out.raw_score - 0.6).abs() < 1e-9);
        assert_eq!(adapter.state(), ClassifierState::Ready);
        assert_eq!(
            *backend.devices.lock().unwrap(),
            vec![ExecutionDevice::Accelerated, ExecutionDevice::Cpu]
        );
    }

    #[tokio::test]
    async fn test_failed_initialization_is_final() {
        let backend = Arc::new(FakeBackend {
            fail_accelerated: true,
            fail_cpu: true,
            ..Default::default()
        });
        let adapter = ClassifierAdapter::new(backend.clone());

        for _ in 0..3 {
            let err = adapter.classify("some text").await.unwrap_err();
            assert!(matches!(err, ClassifierError::ModelUnavailable(_)));
        }
        assert_eq!(adapter.state(), ClassifierState::Failed);
        // one accelerated attempt plus one CPU attempt, never retried
        assert_eq!(backend.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_load() {
        let backend = Arc::new(FakeBackend {
            delay: Some(Duration::from_millis(50)),
            scores: real(0.9),
            ..Default::default()
        });
        let adapter = Arc::new(ClassifierAdapter::new(backend.clone()));

        let mut set = JoinSet::new();
        for i in 0..8 {
            let adapter = adapter.clone();
            set.spawn(async move { adapter.classify(&format!("text {}", i)).await });
        }
        while let Some(res) = set.join_next().await {
            assert!(res.unwrap().is_ok());
        }

        assert_eq!(backend.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_state_is_initializing_while_loading() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(FakeBackend {
            gate: Some(gate.clone()),
            scores: real(0.9),
            ..Default::default()
        });
        let adapter = Arc::new(ClassifierAdapter::new(backend));

        let task = {
            let adapter = adapter.clone();
            tokio::spawn(async move { adapter.initialize().await })
        };

        for _ in 0..100 {
            if adapter.state() == ClassifierState::Initializing {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(adapter.state(), ClassifierState::Initializing);

        gate.notify_one();
        task.await.unwrap().unwrap();
        assert_eq!(adapter.state(), ClassifierState::Ready);
    }

    #[tokio::test]
    async fn test_abandoned_wait_does_not_cancel_load() {
        let backend = Arc::new(FakeBackend {
            delay: Some(Duration::from_millis(300)),
            scores: real(0.9),
            ..Default::default()
        });
        let adapter = ClassifierAdapter::new(backend.clone());

        for _ in 0..3 {
            let waited =
                tokio::time::timeout(Duration::from_millis(20), adapter.classify("some text")).await;
            assert!(waited.is_err());
        }
        assert_eq!(adapter.state(), ClassifierState::Initializing);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(adapter.state(), ClassifierState::Ready);
        adapter.classify("some text").await.unwrap();
        assert_eq!(backend.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_loading() {
        let backend = Arc::new(FakeBackend::default());
        let adapter = ClassifierAdapter::new(backend.clone());
        assert!(matches!(
            adapter.classify("   ").await,
            Err(ClassifierError::EmptyInput)
        ));
        assert_eq!(backend.loads.load(Ordering::SeqCst), 0);
    }
}

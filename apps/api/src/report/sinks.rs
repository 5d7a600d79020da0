//! Report sinks: side-effecting consumers of a finished summary string.
//!
//! A sink failure is logged and reported back to the caller, but never fails
//! the analysis that produced the report.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook rejected report (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// A finished report handed to every configured sink.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDelivery<'a> {
    pub analysis_id: Uuid,
    /// Optional address supplied with the analysis request.
    pub recipient: Option<&'a str>,
    pub summary: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Skipped,
    Failed,
}

/// Per-sink result surfaced in the API response.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    pub sink: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `Skipped` when the sink has nothing to do for this delivery.
    async fn deliver(&self, delivery: &ReportDelivery<'_>) -> Result<DeliveryStatus, SinkError>;
}

/// Sends a report to every sink in order and collects the outcomes.
pub async fn dispatch(
    sinks: &[Arc<dyn ReportSink>],
    delivery: &ReportDelivery<'_>,
) -> Vec<DeliveryOutcome> {
    let mut outcomes = Vec::with_capacity(sinks.len());
    for sink in sinks {
        let outcome = match sink.deliver(delivery).await {
            Ok(status) => DeliveryOutcome {
                sink: sink.name().to_string(),
                status,
                detail: None,
            },
            Err(e) => {
                warn!(
                    sink = sink.name(),
                    analysis_id = %delivery.analysis_id,
                    "Report delivery failed: {e}"
                );
                DeliveryOutcome {
                    sink: sink.name().to_string(),
                    status: DeliveryStatus::Failed,
                    detail: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}

// ────────────────────────────────────────────────────────────────────────────
// LogSink
// ────────────────────────────────────────────────────────────────────────────

/// Writes the summary to the structured log. Always enabled.
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, delivery: &ReportDelivery<'_>) -> Result<DeliveryStatus, SinkError> {
        info!(
            analysis_id = %delivery.analysis_id,
            "Match report ready\n{}",
            delivery.summary
        );
        Ok(DeliveryStatus::Delivered)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileSink
// ────────────────────────────────────────────────────────────────────────────

/// Exports `match_summary_<analysis_id>.txt` into a directory.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, analysis_id: Uuid) -> PathBuf {
        self.dir.join(format!("match_summary_{analysis_id}.txt"))
    }
}

#[async_trait]
impl ReportSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn deliver(&self, delivery: &ReportDelivery<'_>) -> Result<DeliveryStatus, SinkError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(delivery.analysis_id);
        tokio::fs::write(&path, delivery.summary).await?;
        info!("Match report exported to {}", path.display());
        Ok(DeliveryStatus::Delivered)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WebhookSink
// ────────────────────────────────────────────────────────────────────────────

/// POSTs the report as JSON to a notification service (e.g. an e-mail relay).
/// Only fires when the request named a recipient.
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ReportSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, delivery: &ReportDelivery<'_>) -> Result<DeliveryStatus, SinkError> {
        if delivery.recipient.is_none() {
            return Ok(DeliveryStatus::Skipped);
        }

        let response = self.client.post(&self.url).json(delivery).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(analysis_id = %delivery.analysis_id, "Match report sent to webhook");
        Ok(DeliveryStatus::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    #[async_trait]
    impl ReportSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn deliver(&self, _delivery: &ReportDelivery<'_>) -> Result<DeliveryStatus, SinkError> {
            Err(SinkError::Rejected {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn delivery<'a>(summary: &'a str, recipient: Option<&'a str>) -> ReportDelivery<'a> {
        ReportDelivery {
            analysis_id: Uuid::new_v4(),
            recipient,
            summary,
        }
    }

    #[tokio::test]
    async fn test_file_sink_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("exports"));
        let d = delivery("alice.pdf - Match: 46.29%", None);

        let status = sink.deliver(&d).await.unwrap();
        assert_eq!(status, DeliveryStatus::Delivered);

        let written = std::fs::read_to_string(sink.path_for(d.analysis_id)).unwrap();
        assert_eq!(written, "alice.pdf - Match: 46.29%");
    }

    #[tokio::test]
    async fn test_webhook_sink_skips_without_recipient() {
        let sink = WebhookSink::new("http://127.0.0.1:9/unused".to_string()).unwrap();
        let status = sink.deliver(&delivery("summary", None)).await.unwrap();
        assert_eq!(status, DeliveryStatus::Skipped);
    }

    #[tokio::test]
    async fn test_dispatch_collects_failures_without_stopping() {
        let sinks: Vec<Arc<dyn ReportSink>> = vec![Arc::new(FailingSink), Arc::new(LogSink)];
        let outcomes = dispatch(&sinks, &delivery("summary", None)).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].sink, "failing");
        assert_eq!(outcomes[0].status, DeliveryStatus::Failed);
        assert!(outcomes[0].detail.as_deref().unwrap().contains("503"));
        assert_eq!(outcomes[1].status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_delivery_serializes_for_webhook() {
        let d = delivery("text", Some("jane@example.com"));
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["recipient"], "jane@example.com");
        assert_eq!(json["summary"], "text");
    }
}

//! HTTP client for the scheduling backend.
//!
//! The schedule endpoints (`/api/schedule/*`) are typed; the
//! collaborating endpoints (upload, solve, config, results, export)
//! are consumed as opaque success/failure signals and passed through
//! as JSON values.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::negotiate::{classify, BatchMoveRequest, BatchOutcome, BatchResponse, UpdateRequest};
use crate::schedule::{ExamGroup, Snapshot};

/// Wire shape of `GET /api/schedule/data`.
#[derive(Debug, Deserialize)]
struct ScheduleData {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    days: Vec<String>,
    #[serde(default)]
    shifts: Vec<u32>,
    #[serde(default)]
    rooms: Vec<String>,
    #[serde(default)]
    schedule: Vec<ExamGroup>,
}

/// Plain acknowledgment shared by the mutation endpoints.
#[derive(Debug, Deserialize)]
struct Ack {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// One entry of `GET /api/results`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultFile {
    pub filename: String,
    pub size: u64,
    /// ISO timestamp as the backend reports it (no timezone).
    pub created: String,
}

impl ResultFile {
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Client for the scheduling backend API.
pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let base = Url::parse(server_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { base, http })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.server_url, config.timeout_secs)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    // ── Schedule endpoints ───────────────────────────────────────────

    /// Fetch the authoritative schedule and index it into a snapshot.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let data: ScheduleData = self
            .http
            .get(self.endpoint("/api/schedule/data")?)
            .send()
            .await?
            .json()
            .await?;
        if !data.success {
            return Err(ApiError::Backend(
                data.error.unwrap_or_else(|| "no schedule data".to_string()),
            ));
        }
        Ok(Snapshot::new(data.days, data.shifts, data.rooms, data.schedule)?)
    }

    /// Submit a single move or swap. Returns the backend's message on
    /// success; a rejection surfaces its reason verbatim.
    pub async fn submit_update(&self, request: &UpdateRequest) -> Result<String, ApiError> {
        let ack: Ack = self
            .http
            .post(self.endpoint("/api/schedule/update")?)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        if ack.success {
            Ok(ack.message.unwrap_or_else(|| "schedule updated".to_string()))
        } else {
            Err(ApiError::Backend(
                ack.error.unwrap_or_else(|| "update rejected".to_string()),
            ))
        }
    }

    /// Submit one batch-move attempt and classify the response. The
    /// caller decides whether to submit a returned soft-conflict retry.
    pub async fn submit_batch(
        &self,
        request: &BatchMoveRequest,
    ) -> Result<BatchOutcome, ApiError> {
        let response: BatchResponse = self
            .http
            .post(self.endpoint("/api/schedule/batch-update")?)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        Ok(classify(request, response))
    }

    // ── Collaborating endpoints (opaque) ─────────────────────────────

    /// Upload one input spreadsheet under its backend type key.
    pub async fn upload(&self, kind: &str, path: &Path) -> Result<Value, ApiError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_string());
        let form = reqwest::multipart::Form::new()
            .text("type", kind.to_string())
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));
        let value: Value = self
            .http
            .post(self.endpoint("/api/upload")?)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    /// Kick off the solver. Long-running; relies on the HTTP timeout.
    pub async fn solve(&self) -> Result<Value, ApiError> {
        let value: Value = self
            .http
            .post(self.endpoint("/api/solve")?)
            .json(&json!({}))
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    pub async fn remote_config(&self) -> Result<Value, ApiError> {
        let value: Value = self
            .http
            .get(self.endpoint("/api/config")?)
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    pub async fn update_remote_config(&self, patch: &Value) -> Result<Value, ApiError> {
        let value: Value = self
            .http
            .post(self.endpoint("/api/config")?)
            .json(patch)
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    pub async fn list_results(&self) -> Result<Vec<ResultFile>, ApiError> {
        #[derive(Deserialize)]
        struct Results {
            success: bool,
            #[serde(default)]
            error: Option<String>,
            #[serde(default)]
            results: Vec<ResultFile>,
        }
        let data: Results = self
            .http
            .get(self.endpoint("/api/results")?)
            .send()
            .await?
            .json()
            .await?;
        if data.success {
            Ok(data.results)
        } else {
            Err(ApiError::Backend(
                data.error.unwrap_or_else(|| "listing failed".to_string()),
            ))
        }
    }

    pub async fn export_students(&self) -> Result<Value, ApiError> {
        let value: Value = self
            .http
            .post(self.endpoint("/api/export-students")?)
            .json(&json!({}))
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    /// Upload status of the four input spreadsheets, keyed by kind.
    pub async fn file_status(&self) -> Result<Value, ApiError> {
        let value: Value = self
            .http
            .get(self.endpoint("/api/files")?)
            .send()
            .await?
            .json()
            .await?;
        check_success(value)
    }

    /// Retrieve a result file's contents. A missing file comes back as
    /// a JSON failure body instead of the spreadsheet bytes.
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/download/{filename}"))?)
            .send()
            .await?;
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let bytes = response.bytes().await?;
        if is_json {
            let error = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| "download failed".to_string());
            return Err(ApiError::Backend(error));
        }
        Ok(bytes.to_vec())
    }
}

/// Treat an opaque endpoint response as a success/failure signal.
fn check_success(value: Value) -> Result<Value, ApiError> {
    if value["success"].as_bool().unwrap_or(false) {
        Ok(value)
    } else {
        let error = value["error"]
            .as_str()
            .unwrap_or("request failed")
            .to_string();
        Err(ApiError::Backend(error))
    }
}

//! In-memory orchestrator used by unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use orchestra_core::{ChatRequest, QuotaReport, RequestHandle, RequestState, RequestStatus};
use tokio::time::Instant;

use crate::api::OrchestratorApi;
use crate::error::{ClientError, TransportError};

/// Scripted orchestrator.
///
/// A submitted prompt becomes its own request id. Each id answers status
/// polls from its script in order and repeats the last entry once the
/// script runs out. Ids without a script complete immediately with
/// `"<id>-result"`.
#[derive(Default)]
pub struct ScriptedApi {
    scripts: Mutex<HashMap<String, VecDeque<RequestStatus>>>,
    rejected: HashSet<String>,
    quotas: QuotaReport,
    submitted: Mutex<Vec<(ChatRequest, Instant)>>,
    polled: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, id: &str, statuses: Vec<RequestStatus>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(id.to_string(), statuses.into());
        self
    }

    pub fn reject_submit(mut self, prompt: &str) -> Self {
        self.rejected.insert(prompt.to_string());
        self
    }

    pub fn quotas(mut self, report: QuotaReport) -> Self {
        self.quotas = report;
        self
    }

    /// Requests in submission order.
    pub fn submitted(&self) -> Vec<ChatRequest> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Submission instants in submission order.
    pub fn submitted_at(&self) -> Vec<Instant> {
        self.submitted.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    /// Number of status calls made for `id`.
    pub fn status_calls(&self, id: &str) -> usize {
        self.polled.lock().unwrap().iter().filter(|p| *p == id).count()
    }

    /// Ids in the order they were polled.
    pub fn poll_order(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrchestratorApi for ScriptedApi {
    async fn submit(&self, request: &ChatRequest) -> Result<RequestHandle, ClientError> {
        if self.rejected.contains(&request.prompt) {
            return Err(TransportError::Status {
                endpoint: "/chat".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            }
            .into());
        }

        self.submitted
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));
        Ok(RequestHandle::new(request.prompt.clone()))
    }

    async fn status(&self, handle: &RequestHandle) -> Result<RequestStatus, ClientError> {
        self.polled.lock().unwrap().push(handle.id.clone());

        let mut scripts = self.scripts.lock().unwrap();
        let Some(script) = scripts.get_mut(handle.as_str()) else {
            return Ok(RequestStatus::completed(format!("{handle}-result")));
        };

        let status = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };

        Ok(status.unwrap_or_else(|| RequestStatus::new(RequestState::Pending)))
    }

    async fn quotas(&self) -> Result<QuotaReport, ClientError> {
        Ok(self.quotas.clone())
    }
}

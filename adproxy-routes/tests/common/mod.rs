//! Shared test fixtures: a scripted, recording cluster client.

#![allow(dead_code)]

use adproxy::{ClusterAction, ClusterClient, ClusterError, RequestContext};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Answers each action with the next scripted result for its name and
/// records every call it receives.
#[derive(Default)]
pub struct MockClusterClient {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<Value, ClusterError>>>>,
    calls: Mutex<Vec<(RequestContext, ClusterAction)>>,
}

impl MockClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next call of `action`
    pub fn respond(self, action: &'static str, result: Result<Value, ClusterError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(action)
            .or_default()
            .push_back(result);
        self
    }

    pub fn actions(&self) -> Vec<ClusterAction> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, a)| a.clone())
            .collect()
    }

    pub fn action_names(&self) -> Vec<&'static str> {
        self.actions().iter().map(ClusterAction::name).collect()
    }

    pub fn contexts(&self) -> Vec<RequestContext> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }
}

#[async_trait]
impl ClusterClient for MockClusterClient {
    async fn call(
        &self,
        ctx: &RequestContext,
        action: ClusterAction,
    ) -> Result<Value, ClusterError> {
        let name = action.name();
        self.calls.lock().unwrap().push((ctx.clone(), action));

        self.responses
            .lock()
            .unwrap()
            .get_mut(name)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(ClusterError::transport(format!(
                    "no response scripted for {}",
                    name
                )))
            })
    }
}

pub fn index_not_found() -> ClusterError {
    ClusterError::new(
        Some(404),
        Some("index_not_found_exception".to_string()),
        "[index_not_found_exception] no such index [missing]",
    )
}

pub fn cluster_error(status: u16, error_type: &str, message: &str) -> ClusterError {
    ClusterError::new(Some(status), Some(error_type.to_string()), message)
}

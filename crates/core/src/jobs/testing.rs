//! Scripted in-memory gateway for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use daasgateway_domain::{GatewayError, GatewayOperation, Result};
use serde_json::Value;

use super::ports::GatewayService;

/// Answers each operation from its own queue; the last entry repeats.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    scripts: Mutex<HashMap<GatewayOperation, VecDeque<Result<Value>>>>,
    calls: Mutex<Vec<(GatewayOperation, Option<Vec<Value>>)>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, operation: GatewayOperation, body: Value) -> Self {
        self.push(operation, Ok(body))
    }

    pub(crate) fn fail(self, operation: GatewayOperation, status: u16) -> Self {
        let err = GatewayError::request(operation.failure_message(), Some(status));
        self.push(operation, Err(err))
    }

    fn push(self, operation: GatewayOperation, result: Result<Value>) -> Self {
        self.scripts.lock().unwrap().entry(operation).or_default().push_back(result);
        self
    }

    pub(crate) fn calls_to(&self, operation: GatewayOperation) -> usize {
        self.calls.lock().unwrap().iter().filter(|(op, _)| *op == operation).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_body(&self, operation: GatewayOperation) -> Option<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(op, _)| *op == operation)
            .and_then(|(_, body)| body.clone())
    }
}

#[async_trait]
impl GatewayService for ScriptedGateway {
    async fn invoke(&self, operation: GatewayOperation, body: Option<&[Value]>) -> Result<Value> {
        self.calls.lock().unwrap().push((operation, body.map(<[Value]>::to_vec)));

        let mut scripts = self.scripts.lock().unwrap();
        let Some(queue) = scripts.get_mut(&operation) else {
            return Err(GatewayError::request(operation.failure_message(), Some(404)));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

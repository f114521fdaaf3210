//! Shared test helpers for `daasgateway-core` integration tests.
//!
//! In-memory ports that behave like the real adapters: the gateway asks the
//! credential manager for a bearer value before answering each call.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daasgateway_core::{CredentialManager, GatewayService, IdentityProvider};
use daasgateway_domain::{
    AuthenticationResult, GatewayError, GatewayOperation, Result, SecretString, UserCredentials,
};
use serde_json::Value;

pub fn credentials() -> UserCredentials {
    UserCredentials {
        username: "shop@example.com".to_string(),
        password: SecretString::new("correct-password"),
        client_id: SecretString::new("client-id"),
        region: "ap-northeast-2".to_string(),
    }
}

/// Issues numbered tokens with a fixed lifetime; rejects a wrong password.
pub struct CountingIdentityProvider {
    lifetime_secs: i64,
    refresh_lifetime_secs: i64,
    logins: AtomicUsize,
    refreshes: AtomicUsize,
}

impl CountingIdentityProvider {
    pub fn new(lifetime_secs: i64) -> Self {
        Self {
            lifetime_secs,
            refresh_lifetime_secs: lifetime_secs,
            logins: AtomicUsize::new(0),
            refreshes: AtomicUsize::new(0),
        }
    }

    /// Give refreshed tokens a different lifetime than login tokens.
    pub fn with_refresh_lifetime(mut self, lifetime_secs: i64) -> Self {
        self.refresh_lifetime_secs = lifetime_secs;
        self
    }

    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn issue(&self, n: usize, with_refresh: bool) -> AuthenticationResult {
        AuthenticationResult {
            id_token: format!("id-{n}"),
            refresh_token: with_refresh.then(|| format!("refresh-{n}")),
            expires_in: if with_refresh { self.lifetime_secs } else { self.refresh_lifetime_secs },
        }
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentityProvider {
    async fn password_grant(&self, credentials: &UserCredentials) -> Result<AuthenticationResult> {
        // Yield so concurrent callers really overlap
        tokio::task::yield_now().await;
        if credentials.password.expose() != "correct-password" {
            return Err(GatewayError::auth("Failed to login to Cognito", Some(400)));
        }
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.issue(n, true))
    }

    async fn refresh_grant(
        &self,
        _credentials: &UserCredentials,
        _refresh_token: &str,
    ) -> Result<AuthenticationResult> {
        tokio::task::yield_now().await;
        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.issue(100 + n, false))
    }
}

/// Gateway that authorizes every call and answers from per-operation scripts
pub struct AuthorizingGateway {
    credentials: Arc<CredentialManager>,
    scripts: Mutex<HashMap<GatewayOperation, VecDeque<Value>>>,
    seen: Mutex<Vec<(GatewayOperation, String)>>,
}

impl AuthorizingGateway {
    pub fn new(credentials: Arc<CredentialManager>) -> Self {
        Self { credentials, scripts: Mutex::new(HashMap::new()), seen: Mutex::new(Vec::new()) }
    }

    /// Queue a body for `operation`; the last queued body repeats.
    pub fn respond(self, operation: GatewayOperation, body: Value) -> Self {
        self.scripts.lock().unwrap().entry(operation).or_default().push_back(body);
        self
    }

    /// `(operation, Authorization header)` of every call, in order
    pub fn seen(&self) -> Vec<(GatewayOperation, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayService for AuthorizingGateway {
    async fn invoke(&self, operation: GatewayOperation, _body: Option<&[Value]>) -> Result<Value> {
        let bearer = self.credentials.authorize().await?;
        self.seen.lock().unwrap().push((operation, bearer));

        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts
            .get_mut(&operation)
            .ok_or_else(|| GatewayError::request(operation.failure_message(), Some(404)))?;
        let body = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        body.ok_or_else(|| GatewayError::request(operation.failure_message(), Some(404)))
    }
}

//! Test harness: the real router over an in-memory store and a scripted LLM.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::TokenService;
use crate::config::test_config;
use crate::llm_client::{LlmError, LlmGateway};
use crate::models::user::{Role, User};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryStore;

/// An `LlmGateway` that answers every call with the same canned outcome and
/// records the prompts it was sent. Clones share the record.
#[derive(Clone)]
pub struct ScriptedLlm {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Arc::default(),
        }
    }

    /// Every call fails as if the provider returned a 503.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| LlmError::Api {
            status: 503,
            message: "scripted outage".to_string(),
        })
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    /// An app whose LLM is always down, so every generator takes its fallback.
    pub fn new() -> Self {
        Self::with_llm(ScriptedLlm::failing())
    }

    pub fn with_llm(llm: ScriptedLlm) -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::default());
        let state = AppState {
            store: store.clone(),
            llm: Arc::new(llm),
            tokens: TokenService::new(&config.jwt_secret),
            config,
        };
        Self {
            router: build_router(state.clone()),
            state,
            store,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn register_student(&self, email: &str) -> (User, String) {
        self.register(email, Role::Student).await
    }

    pub async fn register_teacher(&self, email: &str) -> (User, String) {
        self.register(email, Role::Teacher).await
    }

    /// Stores a user directly, skipping password hashing, and returns a valid token.
    async fn register(&self, email: &str, role: Role) -> (User, String) {
        let user = User::new(
            email.to_string(),
            "Test User".to_string(),
            role,
            "x".to_string(),
        );
        self.state.store.insert_user(&user).await.unwrap();
        let token = self.token_for(&user);
        (user, token)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .tokens
            .issue(user.id, &user.email, user.role)
            .unwrap()
    }
}

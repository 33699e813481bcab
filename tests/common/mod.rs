// Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use dm_relay::config::AppConfig;
use dm_relay::knowledge::KnowledgeBase;
use dm_relay::llm::{GenerateRequest, GenerateResponse, LlmError, LlmProvider, UsageMetadata};
use dm_relay::messenger::{MessageSender, SendError};
use dm_relay::state::AppState;
use std::future::Future;
use std::sync::{Arc, Mutex};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::{Filter, Reply};

pub const VERIFY_TOKEN: &str = "test_verify_token";

/// Provider that records every prompt and replies with a fixed text or an error
pub struct FakeProvider {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt);

        match &self.reply {
            Some(text) => Ok(GenerateResponse {
                text: text.clone(),
                finish_reason: None,
                usage: UsageMetadata::default(),
            }),
            None => Err(LlmError::HttpError {
                status: 503,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

/// Sender that records deliveries, optionally rejecting all of them
pub struct FakeSender {
    reject: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl FakeSender {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            reject: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reject: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for FakeSender {
    async fn send(&self, recipient_id: &str, text: &str) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), text.to_string()));

        if self.reject {
            Err(SendError::Rejected {
                status: 400,
                body: "Invalid OAuth access token".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        verify_token: VERIFY_TOKEN.to_string(),
        page_access_token: Some("page-token".to_string()),
        gemini_api_key: Some("api-key".to_string()),
        ..AppConfig::default()
    }
}

pub fn build_state(
    config: AppConfig,
    knowledge: KnowledgeBase,
    provider: Arc<FakeProvider>,
    sender: Arc<FakeSender>,
) -> AppState {
    AppState::new(config, knowledge, provider, sender)
}

/// Instagram payload with one text message per `(sender_id, text)` pair
pub fn instagram_payload(messages: &[(&str, &str)]) -> serde_json::Value {
    let messaging: Vec<serde_json::Value> = messages
        .iter()
        .map(|(sender, text)| {
            serde_json::json!({
                "sender": {"id": sender},
                "recipient": {"id": "17841400000000000"},
                "timestamp": 1700000000000u64,
                "message": {"mid": "m_1", "text": text}
            })
        })
        .collect();

    serde_json::json!({
        "object": "instagram",
        "entry": [{"id": "17841400000000000", "time": 1700000000, "messaging": messaging}]
    })
}

/// A request received by [`StubApi`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

/// Local HTTP server standing in for a remote JSON API
///
/// Answers every POST with a fixed status and JSON body, recording what it
/// received.
pub struct StubApi {
    status: StatusCode,
    body: serde_json::Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubApi {
    pub fn new(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn routes(&self) -> BoxedFilter<(warp::reply::Response,)> {
        let status = self.status;
        let reply_body = self.body.clone();
        let requests = self.requests.clone();

        warp::post()
            .and(warp::path::full())
            .and(warp::query::raw().or(warp::any().map(String::new)).unify())
            .and(warp::header::optional::<String>("x-goog-api-key"))
            .and(warp::body::json())
            .map(
                move |path: FullPath, query: String, api_key: Option<String>, body: serde_json::Value| {
                    requests.lock().unwrap().push(RecordedRequest {
                        path: path.as_str().to_string(),
                        query,
                        api_key,
                        body,
                    });
                    warp::reply::with_status(warp::reply::json(&reply_body), status).into_response()
                },
            )
            .boxed()
    }

    /// Serve on an ephemeral local port while `call` runs against its base URL
    pub async fn serve_during<C, Fut, T>(&self, call: C) -> T
    where
        C: FnOnce(String) -> Fut,
        Fut: Future<Output = T>,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("Failed to get local addr"));

        tokio::select! {
            _ = warp::serve(self.routes()).incoming(listener).run() => {
                panic!("stub server stopped")
            }
            result = call(base_url) => result,
        }
    }
}

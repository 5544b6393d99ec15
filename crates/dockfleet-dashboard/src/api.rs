//! API client for the Dockfleet Dashboard
//!
//! [`DashboardApi`] is the seam between the controller and the backend. The
//! browser build talks HTTP through [`HttpClient`]; tests substitute an
//! in-memory implementation.

use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::types::{
    ActionRequest, ConnectionTestResult, Container, ContainerAction, MessageResponse, NodePayload, ServerNode,
};
use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

// =============================================================================
// Capabilities
// =============================================================================

/// Backend operations the dashboard consumes.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    /// `GET /api/containers?node_id=&all=true`
    async fn list_containers(&self, node_id: &str) -> Result<Vec<Container>, ApiError>;

    /// `POST /api/containers/{action}`
    async fn container_action(&self, action: ContainerAction, request: &ActionRequest) -> Result<(), ApiError>;

    /// `GET /api/nodes/status`
    async fn list_server_status(&self) -> Result<Vec<ServerNode>, ApiError>;

    /// `GET /api/nodes`
    async fn list_nodes(&self) -> Result<Vec<ServerNode>, ApiError>;

    /// `GET /api/nodes/{id}`
    async fn get_node(&self, id: &str) -> Result<ServerNode, ApiError>;

    /// `POST /api/nodes`
    async fn create_node(&self, payload: &NodePayload) -> Result<MessageResponse, ApiError>;

    /// `PUT /api/nodes/{id}`
    async fn update_node(&self, id: &str, payload: &NodePayload) -> Result<MessageResponse, ApiError>;

    /// `DELETE /api/nodes/{id}`
    async fn delete_node(&self, id: &str) -> Result<MessageResponse, ApiError>;

    /// `POST /api/nodes/{id}/test`
    async fn test_node(&self, id: &str) -> Result<ConnectionTestResult, ApiError>;

    /// Sleep between retry attempts.
    async fn pause(&self, duration: Duration);
}

/// Blocking yes/no prompt shown before destructive or state-changing
/// operations.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm`. A missing window counts as "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// gloo-net backed client. Every request is bounded by the configured
/// timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Await `send` within the timeout and return the body of a 2xx
    /// response. Non-2xx responses become [`ApiError::Http`] carrying the
    /// most specific message the body offers.
    async fn fetch<F>(&self, what: &str, send: F) -> Result<String, ApiError>
    where
        F: Future<Output = Result<Response, gloo_net::Error>>,
    {
        let exchange = async {
            let response = send.await?;
            let status = response.status();
            let body = response.text().await?;
            if response.ok() {
                Ok(body)
            } else {
                Err(ApiError::from_response(status, &body))
            }
        };
        let timer = TimeoutFuture::new(self.timeout.as_millis().min(u32::MAX as u128) as u32);
        pin_mut!(exchange);
        pin_mut!(timer);

        let result = match select(exchange, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ApiError::Timeout(self.timeout)),
        };
        if let Err(err) = &result {
            log::error!("{} failed ({:?}): {}", what, err.kind(), err);
        }
        result
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(Into::into)
}

/// Mutation acknowledgements may come back empty. An explicit `ok: false`
/// is a refusal even though the status was 2xx.
fn decode_message(body: &str) -> Result<MessageResponse, ApiError> {
    if body.trim().is_empty() {
        return Ok(MessageResponse::default());
    }
    let response: MessageResponse = decode(body)?;
    if response.ok == Some(false) {
        let reason = response
            .error
            .or(response.message)
            .unwrap_or_else(|| "request rejected".to_string());
        return Err(ApiError::Rejected(reason));
    }
    Ok(response)
}

/// Decode a list endpoint. Valid JSON that is not an array is a shape error,
/// distinct from a decode error.
fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_array() {
        let kind = match &value {
            serde_json::Value::Object(_) => "object",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Null => "null",
            _ => "scalar",
        };
        return Err(ApiError::UnexpectedShape(format!("expected an array, got {}", kind)));
    }
    serde_json::from_value(value).map_err(Into::into)
}

impl DashboardApi for HttpClient {
    async fn list_containers(&self, node_id: &str) -> Result<Vec<Container>, ApiError> {
        let url = self.url("/api/containers");
        let body = self
            .fetch(
                "list containers",
                Request::get(&url)
                    .query([("node_id", node_id), ("all", "true")])
                    .send(),
            )
            .await?;
        decode_list(&body)
    }

    async fn container_action(&self, action: ContainerAction, request: &ActionRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/containers/{}", action.as_path()));
        let req = Request::post(&url).json(request)?;
        let body = self
            .fetch(&format!("{} container {}", action, request.container_id), req.send())
            .await?;
        decode_message(&body)?;
        Ok(())
    }

    async fn list_server_status(&self) -> Result<Vec<ServerNode>, ApiError> {
        let url = self.url("/api/nodes/status");
        let body = self.fetch("load server status", Request::get(&url).send()).await?;
        decode_list(&body)
    }

    async fn list_nodes(&self) -> Result<Vec<ServerNode>, ApiError> {
        let url = self.url("/api/nodes");
        let body = self.fetch("list nodes", Request::get(&url).send()).await?;
        decode_list(&body)
    }

    async fn get_node(&self, id: &str) -> Result<ServerNode, ApiError> {
        let url = self.url(&format!("/api/nodes/{}", id));
        let body = self.fetch(&format!("get node {}", id), Request::get(&url).send()).await?;
        decode(&body)
    }

    async fn create_node(&self, payload: &NodePayload) -> Result<MessageResponse, ApiError> {
        let url = self.url("/api/nodes");
        let req = Request::post(&url).json(payload)?;
        let body = self.fetch(&format!("create node {}", payload.id), req.send()).await?;
        decode_message(&body)
    }

    async fn update_node(&self, id: &str, payload: &NodePayload) -> Result<MessageResponse, ApiError> {
        let url = self.url(&format!("/api/nodes/{}", id));
        let req = Request::put(&url).json(payload)?;
        let body = self.fetch(&format!("update node {}", id), req.send()).await?;
        decode_message(&body)
    }

    async fn delete_node(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let url = self.url(&format!("/api/nodes/{}", id));
        let body = self
            .fetch(&format!("delete node {}", id), Request::delete(&url).send())
            .await?;
        decode_message(&body)
    }

    async fn test_node(&self, id: &str) -> Result<ConnectionTestResult, ApiError> {
        let url = self.url(&format!("/api/nodes/{}/test", id));
        let body = self
            .fetch(&format!("test node {}", id), Request::post(&url).send())
            .await?;
        decode(&body)
    }

    async fn pause(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32).await;
    }
}

//! Browser HTTP transport for the grid engine
//!
//! Sends [`AjaxConfig`] requests through `gloo-net` and reports request
//! lifecycle to optional `before_send`/`complete` hooks, which screens use to
//! drive their loading indicator.

use async_trait::async_trait;
use contracts::shared::grid::{AjaxConfig, HttpMethod, Payload, Transport, TransportError};
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde_json::Value;
use web_sys::FormData;

#[derive(Clone, Default)]
pub struct AjaxClient {
    before_send: Option<Callback<()>>,
    complete: Option<Callback<()>>,
}

impl AjaxClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks that toggle `loading` around every request.
    /// Overlapping requests keep the flag up until the last one finishes.
    pub fn with_loading(loading: RwSignal<usize>) -> Self {
        Self {
            before_send: Some(Callback::new(move |_| loading.update(|n| *n += 1))),
            complete: Some(Callback::new(move |_| {
                loading.update(|n| *n = n.saturating_sub(1))
            })),
        }
    }

    async fn dispatch(&self, config: AjaxConfig) -> Result<Value, TransportError> {
        let builder = match config.method {
            HttpMethod::Get => Request::get(&config.url),
            HttpMethod::Post => Request::post(&config.url),
        };
        let response = send_payload(builder, config.payload).await?;
        read_json(response).await
    }
}

#[async_trait(?Send)]
impl Transport for AjaxClient {
    async fn send(&self, config: AjaxConfig) -> Result<Value, TransportError> {
        log::debug!("{} {}", config.method.as_str(), config.url);
        if let Some(hook) = self.before_send {
            hook.run(());
        }

        let url = config.url.clone();
        let result = self.dispatch(config).await;

        if let Err(e) = &result {
            log::error!("Request to {} failed: {}", url, e);
        }
        if let Some(hook) = self.complete {
            hook.run(());
        }
        result
    }
}

async fn send_payload(builder: RequestBuilder, payload: Payload) -> Result<Response, TransportError> {
    let sent = match payload {
        Payload::Empty => builder.send().await,
        Payload::Json(body) => builder
            .json(&body)
            .map_err(|e| TransportError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await,
        Payload::Form(pairs) => builder
            .body(form_data(&pairs)?)
            .map_err(|e| TransportError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await,
    };
    sent.map_err(|e| TransportError::Network(format!("Failed to send request: {}", e)))
}

fn form_data(pairs: &[(String, String)]) -> Result<FormData, TransportError> {
    let data = FormData::new()
        .map_err(|e| TransportError::Network(format!("Failed to create form data: {:?}", e)))?;
    for (key, value) in pairs {
        data.append_with_str(key, value)
            .map_err(|e| TransportError::Network(format!("Failed to append {}: {:?}", key, e)))?;
    }
    Ok(data)
}

async fn read_json(response: Response) -> Result<Value, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Decode(format!("Failed to read response: {}", e)))?;

    if !response.ok() {
        return Err(TransportError::Status { status, body });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|e| TransportError::Decode(format!("Failed to parse response: {}", e)))
}

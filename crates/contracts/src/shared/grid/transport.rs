//! Request shape handed to the HTTP collaborator

use async_trait::async_trait;
use serde_json::Value;

use super::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    /// Flat key/value pairs sent as `multipart/form-data`
    Form(Vec<(String, String)>),
    Json(Value),
}

impl Payload {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Form(_) => Some("multipart/form-data"),
            Self::Json(_) => Some("application/json"),
        }
    }

    /// Value of a form field, first occurrence
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AjaxConfig {
    pub url: String,
    pub method: HttpMethod,
    pub payload: Payload,
}

impl AjaxConfig {
    pub fn post_form(url: impl Into<String>, pairs: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            payload: Payload::Form(pairs),
        }
    }
}

/// Sends one request and yields the decoded JSON response body.
///
/// Retries, timeouts and loading indicators are the implementation's business.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, config: AjaxConfig) -> Result<Value, TransportError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Records requests and answers from a queue; an empty queue answers `{}`
    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: RefCell<Vec<AjaxConfig>>,
        pub responses: RefCell<VecDeque<Result<Value, TransportError>>>,
    }

    impl RecordingTransport {
        pub fn answer(&self, response: Result<Value, TransportError>) {
            self.responses.borrow_mut().push_back(response);
        }

        pub fn requests(&self) -> Vec<AjaxConfig> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, config: AjaxConfig) -> Result<Value, TransportError> {
            self.requests.borrow_mut().push(config);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Value::Object(Default::default())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_payload() {
        let cfg = AjaxConfig::post_form("/x", vec![("a".into(), "1".into()), ("a".into(), "2".into())]);
        assert_eq!(cfg.method.as_str(), "POST");
        assert_eq!(cfg.payload.content_type(), Some("multipart/form-data"));
        assert_eq!(cfg.payload.form_value("a"), Some("1"));
        assert_eq!(cfg.payload.form_value("b"), None);
    }
}

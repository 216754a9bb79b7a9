//! [`DataSource`] over a conventional controller route family
//!
//! Every entity served by the backend exposes the same five POST routes under
//! `{base}/{Controller}/`. Bodies are form encoded and always carry the
//! caller's `email` and `token`.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::data_source::{ColumnFilter, DataSource, PageFilter};
use super::error::TransportError;
use super::record::RecordEntity;
use super::schema::GridSchema;
use super::transport::{AjaxConfig, Transport};
use crate::system::auth::Credentials;

/// Route family of one entity, e.g. controller `TranslationRecordControllerImpl`
/// and entity `translation-record`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRoutes {
    /// Scheme, host, port and controller prefix, e.g. `http://localhost:3000/api`
    pub base: String,
    pub controller: String,
    pub entity: String,
}

impl EntityRoutes {
    pub fn new(base: &str, controller: &str, entity: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            controller: controller.to_string(),
            entity: entity.to_string(),
        }
    }

    fn url(&self, action: &str) -> String {
        format!("{}/{}/{}", self.base, self.controller, action)
    }

    pub fn select_page(&self) -> String {
        self.url(&format!("get-page-{}s", self.entity))
    }

    pub fn select_count(&self) -> String {
        self.url(&format!("get-{}-count", self.entity))
    }

    pub fn create(&self) -> String {
        self.url(&format!("create-{}", self.entity))
    }

    pub fn update(&self) -> String {
        self.url(&format!("save-{}", self.entity))
    }

    pub fn delete(&self) -> String {
        self.url(&format!("delete-{}", self.entity))
    }
}

pub struct EndpointDataSource {
    routes: EntityRoutes,
    credentials: Credentials,
    transport: Rc<dyn Transport>,
    schema: Arc<GridSchema>,
    order_by: Vec<String>,
    default_filters: Vec<ColumnFilter>,
}

impl EndpointDataSource {
    pub fn new(
        routes: EntityRoutes,
        credentials: Credentials,
        transport: Rc<dyn Transport>,
        schema: Arc<GridSchema>,
    ) -> Self {
        Self {
            routes,
            credentials,
            transport,
            schema,
            order_by: vec!["Id".to_string()],
            default_filters: Vec::new(),
        }
    }

    pub fn with_order_by(mut self, columns: &[&str]) -> Self {
        self.order_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Filters sent with every page and count request, ahead of the grid's own
    pub fn with_default_filters(mut self, filters: Vec<ColumnFilter>) -> Self {
        self.default_filters = filters;
        self
    }

    pub fn routes(&self) -> &EntityRoutes {
        &self.routes
    }

    /// Credentials first; record pairs reusing a credential key are dropped
    fn body(&self, extra: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut pairs = self.credentials.form_pairs();
        let reserved: Vec<String> = pairs.iter().map(|(key, _)| key.clone()).collect();
        for (key, value) in extra {
            if reserved.contains(&key) {
                log::warn!("field '{}' shadows a credential key, not sent", key);
                continue;
            }
            pairs.push((key, value));
        }
        pairs
    }

    fn filter_json(&self, filter: &PageFilter) -> Result<String, TransportError> {
        let all: Vec<&ColumnFilter> = self
            .default_filters
            .iter()
            .chain(filter.filters.iter())
            .collect();
        serde_json::to_string(&all).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn post(&self, url: String, pairs: Vec<(String, String)>) -> Result<Value, TransportError> {
        log::debug!("POST {}", url);
        let response = self.transport.send(AjaxConfig::post_form(url, self.body(pairs))).await?;
        check_rejected(&response)?;
        Ok(response)
    }

    /// Server response of a write, falling back to what was sent
    fn saved_record(response: Value, sent: RecordEntity) -> RecordEntity {
        RecordEntity::from_json(response)
            .filter(|r| !r.is_empty())
            .unwrap_or(sent)
    }
}

#[async_trait(?Send)]
impl DataSource for EndpointDataSource {
    async fn select_page(&self, filter: &PageFilter) -> Result<Vec<RecordEntity>, TransportError> {
        let pairs = vec![
            ("page".to_string(), filter.page.to_string()),
            ("pageSize".to_string(), filter.page_size.to_string()),
            ("filterByColumns".to_string(), self.filter_json(filter)?),
            ("orderByColumns".to_string(), self.order_by.join(",")),
        ];
        let response = self.post(self.routes.select_page(), pairs).await?;
        parse_rows(response)
    }

    async fn select_count(&self, filter: &PageFilter) -> Result<usize, TransportError> {
        let pairs = vec![("filterByColumns".to_string(), self.filter_json(filter)?)];
        let response = self.post(self.routes.select_count(), pairs).await?;
        Ok(parse_count(&response))
    }

    async fn create(&self, draft: RecordEntity) -> Result<RecordEntity, TransportError> {
        let draft = draft.without_id();
        let response = self.post(self.routes.create(), draft.to_form_pairs()).await?;
        Ok(Self::saved_record(response, draft))
    }

    async fn update(&self, record: RecordEntity) -> Result<RecordEntity, TransportError> {
        let response = self.post(self.routes.update(), record.to_form_pairs()).await?;
        Ok(Self::saved_record(response, record))
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        if id.is_empty() {
            log::debug!("delete skipped: record has no id");
            return Ok(());
        }
        let pairs = vec![(RecordEntity::ID_FIELD.to_string(), id.to_string())];
        self.post(self.routes.delete(), pairs).await?;
        Ok(())
    }

    fn new_entity(&self) -> RecordEntity {
        let mut draft = self.schema.blank_entity();
        draft.set(RecordEntity::ID_FIELD, "");
        draft
    }
}

/// `{"success": false, "message": ..}` is a backend-reported failure
fn check_rejected(response: &Value) -> Result<(), TransportError> {
    if response.get("success").and_then(Value::as_bool) == Some(false) {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("operation failed");
        return Err(TransportError::Rejected(message.to_string()));
    }
    Ok(())
}

/// Page rows: a bare array, or an array under `data`
fn parse_rows(response: Value) -> Result<Vec<RecordEntity>, TransportError> {
    let items = match response {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(TransportError::Decode("expected an array of records".into())),
        },
        other => {
            return Err(TransportError::Decode(format!(
                "expected an array of records, got {}",
                other
            )))
        }
    };
    Ok(items.into_iter().filter_map(RecordEntity::from_json).collect())
}

/// `{"count": n}` with `n` a number or numeric string; anything else is 0
pub fn parse_count(response: &Value) -> usize {
    let count = match response.get("count").unwrap_or(response) {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match count {
        Some(n) => n as usize,
        None => {
            log::warn!("unparsable record count {}, using 0", response);
            0
        }
    }
}

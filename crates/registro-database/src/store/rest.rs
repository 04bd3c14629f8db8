//! PostgREST-style REST store provider.
//!
//! Each [`Query`] becomes one HTTP request against
//! `{url}/rest/v1/{table}`: predicates as `column=op.value` parameters,
//! ordering as `order=column.dir`, row ranges via the `Range` header and
//! exact counts via `Prefer: count=exact` plus the `Content-Range` total.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Request, StatusCode, Url};
use tracing::{debug, info, warn};

use registro_core::config::StoreConfig;
use registro_core::error::{AppError, ErrorKind};
use registro_core::result::AppResult;
use registro_core::traits::store::{StoreHealth, StoreProvider};
use registro_core::types::{FilterOp, FilterValue, Query, QueryAction, QueryResponse, Row};

/// Store provider speaking the PostgREST dialect over HTTP.
#[derive(Debug, Clone)]
pub struct RestStoreProvider {
    client: Client,
    base_url: String,
    key: String,
    health_table: String,
}

impl RestStoreProvider {
    /// Create a provider from configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to create HTTP client", e)
            })?;

        info!(
            url = %config.url,
            key = %mask_key(&config.key),
            timeout_seconds = config.timeout_seconds,
            "Initializing REST store provider"
        );

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            health_table: config.health_table.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        let raw = format!("{}/{path}", self.base_url);
        Url::parse(&raw).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, format!("Invalid store URL '{raw}'"), e)
        })
    }

    fn auth_headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", self.key))?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Render a query as an HTTP request without sending it.
    pub fn build_request(&self, query: &Query) -> AppResult<Request> {
        let mut url = self.endpoint(&format!("rest/v1/{}", query.table))?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("select", &query.columns);
            for predicate in &query.predicates {
                params.append_pair(&predicate.field, &predicate_param(predicate.op, &predicate.value));
            }
            if let Some(order) = &query.order {
                params.append_pair(
                    "order",
                    &format!("{}.{}", order.field, order.direction.as_str()),
                );
            }
        }

        let method = match (&query.action, query.head) {
            (QueryAction::Select, true) => Method::HEAD,
            (QueryAction::Select, false) => Method::GET,
            (QueryAction::Insert(_), _) => Method::POST,
            (QueryAction::Update(_), _) => Method::PATCH,
            (QueryAction::Delete, _) => Method::DELETE,
        };

        let mut headers = self.auth_headers()?;
        let mut prefer = Vec::new();
        if query.is_mutation() {
            prefer.push("return=representation");
        }
        if query.count {
            prefer.push("count=exact");
        }
        if !prefer.is_empty() {
            headers.insert("prefer", header_value(&prefer.join(","))?);
        }
        if let Some((from, to)) = query.range {
            headers.insert("range-unit", HeaderValue::from_static("items"));
            headers.insert("range", header_value(&format!("{from}-{to}"))?);
        }

        let builder = self.client.request(method, url).headers(headers);
        let builder = match &query.action {
            QueryAction::Insert(rows) => builder.json(rows),
            QueryAction::Update(changes) => builder.json(changes),
            QueryAction::Select | QueryAction::Delete => builder,
        };
        builder.build().map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to build store request", e)
        })
    }

    async fn probe_auth(&self) -> bool {
        let request = match (self.endpoint("auth/v1/user"), self.auth_headers()) {
            (Ok(url), Ok(headers)) => self.client.get(url).headers(headers),
            _ => return false,
        };
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Store auth check failed");
                false
            }
        }
    }
}

#[async_trait]
impl StoreProvider for RestStoreProvider {
    async fn execute(&self, query: Query) -> AppResult<QueryResponse> {
        let request = self.build_request(&query)?;
        debug!(method = %request.method(), url = %request.url(), "Store request");

        let response = self.client.execute(request).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Store,
                format!("Store request on '{}' failed", query.table),
                e,
            )
        })?;

        let status = response.status();
        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        // Ranges past the last row are reported as unsatisfiable.
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(QueryResponse {
                rows: Vec::new(),
                count,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::store(format!(
                "Store rejected request on '{}' ({status}): {body}",
                query.table
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to read store response", e)
        })?;
        let rows: Vec<Row> = if query.head || body.is_empty() {
            Vec::new()
        } else {
            serde_json::from_slice(&body).map_err(|e| {
                AppError::with_source(ErrorKind::Conversion, "Store returned malformed rows", e)
            })?
        };

        Ok(QueryResponse { rows, count })
    }

    async fn health_check(&self, verify_auth: bool) -> AppResult<StoreHealth> {
        let mut url = self.endpoint(&format!("rest/v1/{}", self.health_table))?;
        url.query_pairs_mut().append_pair("limit", "0");

        let mut health = match self.client.get(url).headers(self.auth_headers()?).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let (connected, message) = classify_probe(status, &self.health_table);
                StoreHealth {
                    connected,
                    status_code: Some(status),
                    auth_ok: None,
                    message,
                }
            }
            Err(e) => StoreHealth {
                connected: false,
                status_code: None,
                auth_ok: None,
                message: format!("Could not reach store REST endpoint: {e}"),
            },
        };

        if verify_auth && health.connected {
            let ok = self.probe_auth().await;
            health.auth_ok = Some(ok);
            health.message.push_str(if ok {
                "; auth check succeeded"
            } else {
                "; auth check failed or no active session"
            });
        }

        Ok(health)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

fn header_value(raw: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(raw).map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "Invalid characters in store header", e)
    })
}

/// `op.value`, or `is.null` for null equality.
fn predicate_param(op: FilterOp, value: &FilterValue) -> String {
    match (op, value) {
        (FilterOp::Eq, FilterValue::Null) => "is.null".to_string(),
        (op, value) => format!("{}.{}", op.as_str(), value.as_literal()),
    }
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`.
fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/').and_then(|(_, total)| total.parse().ok())
}

fn classify_probe(status: u16, table: &str) -> (bool, String) {
    match status {
        200..=299 => (
            true,
            format!("REST endpoint reachable on table '{table}' (status {status})"),
        ),
        401 => (
            false,
            format!("Authentication error: API key invalid or expired (status {status})"),
        ),
        403 => (
            false,
            format!("Permission error: API key lacks privileges (status {status})"),
        ),
        400..=499 => (
            false,
            format!("Client error on REST endpoint (status {status}); check that table '{table}' exists"),
        ),
        _ => (false, format!("Server error on REST endpoint (status {status})")),
    }
}

/// Mask all but the first few characters of an access key for logging.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

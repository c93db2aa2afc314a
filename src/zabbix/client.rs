//! JSON-RPC client for the Zabbix frontend API.
//!
//! Every call is a single `POST` to the configured `api_jsonrpc.php`
//! endpoint. The whole exchange (connect, send, read body) runs under one
//! timeout so a stalled frontend cannot hold a REST request open.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Uri};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::OnceCell;

use super::model::{RawHost, RpcRequest, RpcResponse};
use super::HostSource;
use crate::config::model::{AuthMode, ZabbixConfig};
use crate::error::ZabbixMapError;
use crate::server::HttpClient;

const CONTENT_TYPE_JSON_RPC: &str = "application/json-rpc";

/// Inventory fields the normalizer reads.
pub const INVENTORY_FIELDS: &[&str] = &[
    "location",
    "location_lat",
    "location_lon",
    "site_address_a",
    "site_address_b",
    "site_address_c",
    "notes",
    "os",
    "type",
];

#[derive(Clone)]
pub struct ZabbixClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: HttpClient,
    api_url: String,
    endpoint: Uri,
    token: String,
    timeout: Duration,
    auth_mode: AuthMode,
    next_id: AtomicU64,
    version: OnceCell<String>,
}

impl std::fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("endpoint", &self.inner.api_url)
            .field("timeout", &self.inner.timeout)
            .field("auth_mode", &self.inner.auth_mode)
            .finish_non_exhaustive()
    }
}

impl ZabbixClient {
    pub fn from_config(config: &ZabbixConfig, http: HttpClient) -> Result<Self, ZabbixMapError> {
        let api_url = config
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ZabbixMapError::ZabbixNotConfigured {
                hint: "Set zabbix.api_url in the config file or ZABBIX_API_URL.".into(),
            })?;
        let token = config
            .auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ZabbixMapError::ZabbixNotConfigured {
                hint: "Set zabbix.auth_token in the config file or ZABBIX_AUTH_TOKEN.".into(),
            })?;
        let endpoint = api_url
            .parse::<Uri>()
            .map_err(|e| ZabbixMapError::UriParse {
                source: Box::new(e),
            })?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                api_url: api_url.to_string(),
                endpoint,
                token: token.to_string(),
                timeout: Duration::from_millis(config.timeout),
                auth_mode: config.auth_mode,
                next_id: AtomicU64::new(1),
                version: OnceCell::new(),
            }),
        })
    }

    /// Invoke `method` and decode its `result` member.
    pub async fn call<P, R>(
        &self,
        method: &str,
        params: P,
        authenticated: bool,
    ) -> Result<R, ZabbixMapError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let inner = &self.inner;
        let id = inner.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope_auth =
            (authenticated && inner.auth_mode == AuthMode::Envelope).then_some(inner.token.as_str());
        let body = serde_json::to_vec(&RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: envelope_auth,
        })
        .map_err(|e| ZabbixMapError::HttpRequest {
            source: Box::new(e),
        })?;

        let mut builder = hyper::Request::builder()
            .method(Method::POST)
            .uri(inner.endpoint.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_RPC);
        if authenticated && inner.auth_mode == AuthMode::Header {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", inner.token));
        }
        let request = builder
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| ZabbixMapError::HttpRequest {
                source: Box::new(e),
            })?;

        tracing::debug!(method, id, "zabbix call");

        let exchange = async {
            let response =
                inner
                    .http
                    .request(request)
                    .await
                    .map_err(|e| ZabbixMapError::HttpRequest {
                        source: Box::new(e),
                    })?;
            let status = response.status();
            if !status.is_success() {
                return Err(ZabbixMapError::ZabbixStatus(status));
            }
            let collected =
                response
                    .into_body()
                    .collect()
                    .await
                    .map_err(|e| ZabbixMapError::HttpRequest {
                        source: Box::new(e),
                    })?;
            Ok(collected.to_bytes())
        };

        let bytes = tokio::time::timeout(inner.timeout, exchange)
            .await
            .map_err(|_| ZabbixMapError::ZabbixTimeout {
                timeout_ms: u64::try_from(inner.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        decode_response(&bytes)
    }
}

fn decode_response<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, ZabbixMapError> {
    let envelope: RpcResponse<R> =
        serde_json::from_slice(bytes).map_err(|e| ZabbixMapError::ZabbixMalformed {
            reason: e.to_string(),
        })?;
    if let Some(error) = envelope.error {
        return Err(ZabbixMapError::ZabbixRpc {
            code: error.code,
            message: error.message,
            data: error.data,
        });
    }
    envelope
        .result
        .ok_or_else(|| ZabbixMapError::ZabbixMalformed {
            reason: "response carries neither result nor error".into(),
        })
}

/// Zabbix 6.2 renamed `selectGroups` to `selectHostGroups`.
fn groups_selector(version: &str) -> &'static str {
    let mut parts = version.trim().split('.').map(|p| p.parse::<u32>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    if (major, minor) >= (6, 2) {
        "selectHostGroups"
    } else {
        "selectGroups"
    }
}

/// `countOutput` results come back as a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Text(String),
    Number(u64),
}

impl Count {
    fn value(self) -> Result<u64, ZabbixMapError> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s.trim().parse().map_err(|_| ZabbixMapError::ZabbixMalformed {
                reason: format!("host count is not a number: {s:?}"),
            }),
        }
    }
}

#[async_trait]
impl HostSource for ZabbixClient {
    fn endpoint(&self) -> &str {
        &self.inner.api_url
    }

    async fn api_version(&self) -> Result<String, ZabbixMapError> {
        self.inner
            .version
            .get_or_try_init(|| async {
                self.call::<_, String>("apiinfo.version", json!([]), false)
                    .await
            })
            .await
            .cloned()
    }

    async fn hosts(&self) -> Result<Vec<RawHost>, ZabbixMapError> {
        let version = self.api_version().await?;
        let mut params = json!({
            "output": "extend",
            "selectInterfaces": "extend",
            "selectInventory": INVENTORY_FIELDS,
        });
        params[groups_selector(&version)] = json!(["groupid", "name"]);

        let hosts: Vec<RawHost> = self.call("host.get", params, true).await?;
        tracing::debug!(count = hosts.len(), version = %version, "fetched hosts");
        Ok(hosts
            .into_iter()
            .map(RawHost::with_interface_availability)
            .collect())
    }

    async fn host_count(&self) -> Result<u64, ZabbixMapError> {
        let count: Count = self
            .call("host.get", json!({ "countOutput": true }), true)
            .await?;
        count.value()
    }
}

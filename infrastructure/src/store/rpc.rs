//! JSON-RPC Map store adapter
//!
//! Talks to a Map store endpoint that exposes `map_value` (read) and
//! `map_store` (write) methods for a contract address. Transaction
//! mechanics (signing, fees, receipts) are the endpoint's concern; this
//! adapter only carries the two operations and surfaces errors as-is.

use async_trait::async_trait;
use mapsync_application::{StoreError, ValueStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    fn new(method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// [`ValueStore`] adapter for a Map contract behind a JSON-RPC endpoint.
#[derive(Debug)]
pub struct RpcMapStore {
    client: reqwest::Client,
    rpc_url: String,
    address: String,
}

impl RpcMapStore {
    /// Create a store client for the Map contract at `address`.
    ///
    /// The address is validated only for shape (`0x` + 40 hex digits);
    /// whether a contract lives there is discovered on first use.
    pub fn new(rpc_url: impl Into<String>, address: impl Into<String>) -> Result<Self, StoreError> {
        let address = address.into();
        if !is_valid_address(&address) {
            return Err(StoreError::InvalidAddress(address));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            address,
        })
    }

    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, StoreError> {
        debug!("Map store call: {} {}", method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&RpcRequest::new(method, params))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Transport(format!(
                "HTTP error: {}",
                status.as_u16()
            )));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(StoreError::Rejected(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        Ok(body.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl ValueStore for RpcMapStore {
    async fn read(&self, key: &str) -> Result<String, StoreError> {
        let result = self
            .call("map_value", json!([self.address, key]))
            .await?;

        // An absent key reads as the contract's default value, the empty
        // string; tolerate endpoints reporting it as null.
        match result {
            serde_json::Value::Null => Ok(String::new()),
            serde_json::Value::String(s) => Ok(s),
            other => Err(StoreError::Rejected(format!(
                "unexpected read result: {}",
                other
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.call("map_store", json!([self.address, key, value]))
            .await?;
        Ok(())
    }
}

/// Shape check for a Map contract address: `0x` followed by 40 hex digits.
fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

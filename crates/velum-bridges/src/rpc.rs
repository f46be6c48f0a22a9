//! JSON-RPC transport for eth_call queries

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{DirectoryError, Result};
use velum_sdk::EthAddress;

#[derive(Clone)]
pub struct JsonRpcClient {
    url: String,
    client: Client,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl JsonRpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "velum",
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DirectoryError::Rpc(e.to_string()))?;

        let json: RpcResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Rpc(e.to_string()))?;

        if let Some(error) = json.error {
            return Err(DirectoryError::Rpc(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        json.result
            .ok_or_else(|| DirectoryError::Rpc("no result in response".into()))
    }

    /// read-only contract call against the latest block, returns raw bytes
    pub async fn eth_call(&self, to: EthAddress, calldata: &[u8]) -> Result<Vec<u8>> {
        let params = vec![
            json!({
                "to": to.to_string(),
                "data": format!("0x{}", hex::encode(calldata)),
            }),
            json!("latest"),
        ];

        let result = self.call("eth_call", params).await?;
        let text: String = serde_json::from_value(result)
            .map_err(|e| DirectoryError::Rpc(e.to_string()))?;
        let stripped = text.strip_prefix("0x").unwrap_or(&text);
        hex::decode(stripped).map_err(|e| DirectoryError::Rpc(format!("bad result hex: {e}")))
    }
}

//! Kubo RPC adapter: content-addressed uploads and mutable name pointers
//! through a local or remote IPFS node.

use async_trait::async_trait;
use permapress_domain::{
    BoundName, ContentStore, ContentStoreError, NameService, NameServiceError, NamingKey,
    StoredObject,
};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

/// Client for the Kubo RPC API (`/api/v0`). One node serves both ports:
/// it stores content and owns the naming keys.
pub struct KuboNode {
    client: Client,
    api_base: String,
    gateway: String,
}

impl KuboNode {
    /// `api_endpoint` is the node RPC root, e.g. `http://127.0.0.1:5001`;
    /// `gateway` is the public content gateway, e.g. `https://ipfs.io/ipfs/`.
    pub fn new(api_endpoint: &str, gateway: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_base: format!("{}/api/v0", api_endpoint.trim_end_matches('/')),
            gateway: gateway.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

#[derive(Deserialize)]
struct KeyListResponse {
    #[serde(rename = "Keys", default)]
    keys: Vec<KeyEntry>,
}

#[derive(Deserialize)]
struct KeyEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Id")]
    id: String,
}

impl From<KeyEntry> for NamingKey {
    fn from(entry: KeyEntry) -> Self {
        NamingKey {
            name: entry.name,
            id: entry.id,
        }
    }
}

#[derive(Deserialize)]
struct NamePublishResponse {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

#[async_trait]
impl ContentStore for KuboNode {
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        media_type: &str,
    ) -> Result<StoredObject, ContentStoreError> {
        let part = Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(media_type)
            .map_err(|e| ContentStoreError::Rejected(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = format!("{}/add", self.api_base);
        let response = self
            .client
            .post(&url)
            .query(&[("pin", "true")])
            .multipart(form)
            .send()
            .await
            .map_err(|e| ContentStoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentStoreError::Rejected(format!(
                "add returned status {}",
                response.status()
            )));
        }

        // The add endpoint streams NDJSON, one object per entry; the last
        // line carries the root hash.
        let text = response
            .text()
            .await
            .map_err(|e| ContentStoreError::Transport(e.to_string()))?;
        let last_line = text
            .trim()
            .lines()
            .next_back()
            .ok_or_else(|| ContentStoreError::Rejected("empty add response".to_string()))?;
        let parsed: AddResponse = serde_json::from_str(last_line)
            .map_err(|e| ContentStoreError::Rejected(format!("bad add response: {e}")))?;

        tracing::debug!(cid = %parsed.hash, name = %name, "Stored object");
        Ok(StoredObject {
            url: format!("{}{}", self.gateway, parsed.hash),
            cid: parsed.hash,
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/id", self.api_base);
        match self.client.post(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl NameService for KuboNode {
    async fn list_keys(&self) -> Result<Vec<NamingKey>, NameServiceError> {
        let url = format!("{}/key/list", self.api_base);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| NameServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NameServiceError::Api(format!(
                "key/list returned status {}",
                response.status()
            )));
        }

        let parsed: KeyListResponse = response
            .json()
            .await
            .map_err(|e| NameServiceError::Api(e.to_string()))?;
        Ok(parsed.keys.into_iter().map(NamingKey::from).collect())
    }

    async fn create_key(&self, name: &str) -> Result<NamingKey, NameServiceError> {
        let url = format!("{}/key/gen", self.api_base);
        let response = self
            .client
            .post(&url)
            .query(&[("arg", name), ("type", "ed25519")])
            .send()
            .await
            .map_err(|e| NameServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NameServiceError::Api(format!(
                "key/gen returned status {}",
                response.status()
            )));
        }

        let entry: KeyEntry = response
            .json()
            .await
            .map_err(|e| NameServiceError::Api(e.to_string()))?;
        Ok(entry.into())
    }

    async fn bind(&self, cid: &str, key_name: &str) -> Result<BoundName, NameServiceError> {
        let url = format!("{}/name/publish", self.api_base);
        let response = self
            .client
            .post(&url)
            .query(&[("arg", cid), ("key", key_name)])
            .send()
            .await
            .map_err(|e| NameServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NameServiceError::Api(format!(
                "name/publish returned status {}",
                response.status()
            )));
        }

        let parsed: NamePublishResponse = response
            .json()
            .await
            .map_err(|e| NameServiceError::Api(e.to_string()))?;
        Ok(BoundName {
            name: parsed.name,
            value: parsed.value,
        })
    }

    fn public_url(&self, ipns_id: &str) -> String {
        // Swap the content-address path segment for the naming one
        format!("{}{}", self.gateway.replace("/ipfs/", "/ipns/"), ipns_id)
    }
}

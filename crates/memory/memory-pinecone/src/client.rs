//! Pinecone REST client.
//!
//! Control plane: `https://controller.<environment>.pinecone.io` (`/databases`).
//! Data plane: `https://<index host>` (`/vectors/*`, `/query`, `/describe_index_stats`).
//! Every request carries the `Api-Key` header; non-2xx responses become errors with the
//! status and response body.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::config::PineconeConfig;
use crate::index::{DeleteTarget, ScoredVector, Vector, VectorIndex, VectorStore};
use crate::index_spec::IndexSpec;

const API_KEY_HEADER: &str = "Api-Key";

/// Sends the request and fails on non-2xx status.
async fn send_checked(request: RequestBuilder, what: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("Pinecone {} request failed", what))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, what, "Pinecone API error");
        return Err(anyhow!("Pinecone API error on {} ({}): {}", what, status, body));
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let response = send_checked(request, what).await?;
    response
        .json::<T>()
        .await
        .with_context(|| format!("Pinecone {} response is not valid JSON", what))
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    status: IndexStatus,
}

#[derive(Debug, Deserialize)]
struct IndexStatus {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    host: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    namespace: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredVector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: u64,
}

#[derive(Debug, Deserialize)]
struct FetchResponse {
    #[serde(default)]
    vectors: Map<String, Value>,
}

/// Pinecone control-plane client. Hands out [`PineconeIndex`] handles.
#[derive(Debug, Clone)]
pub struct PineconeClient {
    http: Client,
    api_key: String,
    controller_url: String,
    ready_timeout: Duration,
    ready_poll_interval: Duration,
}

impl PineconeClient {
    /// Creates a client for the environment in `config`.
    pub fn new(config: &PineconeConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("Pinecone API key is empty");
        }
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            controller_url: config.controller_base_url(),
            ready_timeout: config.ready_timeout,
            ready_poll_interval: config.ready_poll_interval,
        })
    }

    /// Control-plane base URL in use.
    pub fn controller_url(&self) -> &str {
        &self.controller_url
    }

    async fn describe_index(&self, name: &str) -> Result<IndexStatus> {
        let url = format!("{}/databases/{}", self.controller_url, name);
        let response: DescribeIndexResponse = send_json(
            self.http.get(url).header(API_KEY_HEADER, &self.api_key),
            "describe_index",
        )
        .await?;
        Ok(response.status)
    }

    /// Polls `describe_index` until the index reports ready or `ready_timeout` elapses.
    async fn wait_until_ready(&self, name: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.ready_timeout;
        loop {
            let status = self.describe_index(name).await?;
            if status.ready {
                info!(index = name, "step: pinecone index ready");
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!(
                    "Pinecone index {} not ready after {} seconds",
                    name,
                    self.ready_timeout.as_secs()
                ));
            }
            debug!(index = name, "pinecone index not ready yet");
            tokio::time::sleep(self.ready_poll_interval).await;
        }
    }
}

#[async_trait]
impl VectorStore for PineconeClient {
    #[instrument(skip(self), fields(controller = %self.controller_url))]
    async fn list_indexes(&self) -> Result<Vec<String>> {
        let url = format!("{}/databases", self.controller_url);
        send_json(
            self.http.get(url).header(API_KEY_HEADER, &self.api_key),
            "list_indexes",
        )
        .await
    }

    /// Creates the index and waits until it is ready to serve requests.
    #[instrument(skip(self, spec), fields(index = %spec.name, dimension = spec.dimension))]
    async fn create_index(&self, spec: &IndexSpec) -> Result<()> {
        info!(index = %spec.name, metric = ?spec.metric, pod_type = ?spec.pod_type, "step: pinecone create index");
        let url = format!("{}/databases", self.controller_url);
        send_checked(
            self.http
                .post(url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(spec),
            "create_index",
        )
        .await?;
        self.wait_until_ready(&spec.name).await
    }

    #[instrument(skip(self))]
    async fn index(&self, name: &str) -> Result<Arc<dyn VectorIndex>> {
        let status = self.describe_index(name).await?;
        let host = status
            .host
            .filter(|h| !h.is_empty())
            .ok_or_else(|| anyhow!("Pinecone index {} has no host yet", name))?;
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", host)
        };
        debug!(index = name, %base_url, "pinecone index handle");
        Ok(Arc::new(PineconeIndex {
            http: self.http.clone(),
            api_key: self.api_key.clone(),
            base_url,
        }))
    }
}

/// Data-plane handle to one Pinecone index.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    http: Client,
    api_key: String,
    base_url: String,
}

impl PineconeIndex {
    /// Index host URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, vectors), fields(count = vectors.len()))]
    async fn upsert(&self, namespace: &str, vectors: Vec<Vector>) -> Result<u64> {
        let body = json!({ "vectors": vectors, "namespace": namespace });
        let response: UpsertResponse =
            send_json(self.post("/vectors/upsert").json(&body), "upsert").await?;
        Ok(response.upserted_count)
    }

    #[instrument(skip(self, vector), fields(dimension = vector.len()))]
    async fn query(
        &self,
        namespace: &str,
        vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<ScoredVector>> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata,
            include_values: false,
            namespace,
        };
        let response: QueryResponse = send_json(self.post("/query").json(&body), "query").await?;
        debug!(matches = response.matches.len(), "pinecone query done");
        Ok(response.matches)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn fetch(&self, namespace: &str, ids: &[String]) -> Result<Vec<Vector>> {
        let mut params: Vec<(&str, &str)> = ids.iter().map(|id| ("ids", id.as_str())).collect();
        params.push(("namespace", namespace));
        let response: FetchResponse = send_json(
            self.http
                .get(format!("{}/vectors/fetch", self.base_url))
                .header(API_KEY_HEADER, &self.api_key)
                .query(&params),
            "fetch",
        )
        .await?;

        response
            .vectors
            .into_iter()
            .map(|(_, v)| serde_json::from_value(v).context("Pinecone fetch returned a malformed vector"))
            .collect()
    }

    #[instrument(skip(self, target))]
    async fn delete(&self, namespace: &str, target: DeleteTarget) -> Result<()> {
        let body = match target {
            DeleteTarget::Ids(ids) => json!({ "ids": ids, "namespace": namespace }),
            DeleteTarget::All => json!({ "deleteAll": true, "namespace": namespace }),
        };
        send_checked(self.post("/vectors/delete").json(&body), "delete").await?;
        Ok(())
    }

    #[instrument(skip(self, values, set_metadata))]
    async fn update(
        &self,
        namespace: &str,
        id: &str,
        values: Vec<f32>,
        set_metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        let mut body = json!({ "id": id, "values": values, "namespace": namespace });
        if let Some(metadata) = set_metadata {
            body["setMetadata"] = Value::Object(metadata);
        }
        send_checked(self.post("/vectors/update").json(&body), "update").await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn describe_index_stats(&self) -> Result<Value> {
        send_json(
            self.post("/describe_index_stats").json(&json!({})),
            "describe_index_stats",
        )
        .await
    }
}

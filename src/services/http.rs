//! Shared HTTP plumbing for the backend clients
//!
//! Builds the reqwest client from an [`ApiConfig`], joins paths onto the
//! configured base URL and maps every outcome onto [`ApiError`].

use std::path::Path;
use std::time::{Duration, Instant};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;
use crate::config::ApiConfig;
use crate::utils::errors::{ApiError, AssetDeskError, Result};
use crate::utils::logging::log_api_request;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    name: &'static str,
}

impl HttpBackend {
    /// Create a client for the backend at `config.api_base_url`
    pub fn new(name: &'static str, config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.api_base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("asset-desk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AssetDeskError::Http)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            name,
        })
    }

    /// Absolute URL for an API path such as `/users/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.client.get(self.url(path)), "GET", path).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AssetDeskError::Api(ApiError::InvalidResponse(e.to_string())))
    }

    /// Send a JSON body; only the status code of the reply matters
    pub async fn send_json<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<()> {
        let label = method.as_str().to_string();
        let request = self.client.request(method, self.url(path)).json(body);
        self.execute(request, &label, path).await?;
        Ok(())
    }

    /// Send a request without a body; only the status code of the reply matters
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        let label = method.as_str().to_string();
        let request = self.client.request(method, self.url(path));
        self.execute(request, &label, path).await?;
        Ok(())
    }

    /// POST a multipart form
    pub async fn upload(&self, path: &str, form: Form) -> Result<()> {
        let request = self.client.post(self.url(path)).multipart(form);
        self.execute(request, "POST", path).await?;
        Ok(())
    }

    /// Stream the body of a GET into `dest`, returning the number of bytes written
    pub async fn download(&self, path: &str, dest: &Path) -> Result<u64> {
        let mut response = self.execute(self.client.get(self.url(path)), "GET", path).await?;
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            AssetDeskError::Api(ApiError::from_transport(e))
        })? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(path = path, dest = %dest.display(), bytes = written, "Download finished");
        Ok(written)
    }

    async fn execute(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            log_api_request(self.name, method, path, None, started.elapsed().as_millis() as u64);
            AssetDeskError::Api(ApiError::from_transport(e))
        })?;

        let status = response.status();
        log_api_request(
            self.name,
            method,
            path,
            Some(status.as_u16()),
            started.elapsed().as_millis() as u64,
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetDeskError::Api(ApiError::Status {
                status: status.as_u16(),
                body,
            }));
        }

        Ok(response)
    }
}

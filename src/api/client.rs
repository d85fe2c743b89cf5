//! Cookie-carrying JSON client shared by the draft and task adapters.

use super::{ApiError, ApiResult, ErrorDetail, detail::ErrorBody};
use crate::config::ClientConfig;
use reqwest::{Method, RequestBuilder, cookie::Jar, header::HeaderValue};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Generic `{success, detail?, message?}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ack {
    /// Whether the backend accepted the request.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Failure detail when `success` is `false`.
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    /// Informational message.
    #[serde(default)]
    pub message: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// JSON client bound to one backend base URL.
///
/// The inner `reqwest` client keeps a cookie store, so a session cookie set
/// by any response is replayed on later requests. A configured session
/// cookie only seeds that store and is replaced when the backend rotates it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Setup`] when the session cookie is not a valid
    /// header value or the TLS backend fails to initialise.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = as_directory(&config.base_url);
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            HeaderValue::from_str(cookie)
                .map_err(|err| ApiError::Setup(format!("invalid session cookie: {err}")))?;
            for pair in cookie.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ApiError::Setup(err.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Returns the base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path below the base URL.
    ///
    /// A leading `/` is ignored, so `/api/tasks/inbox` under
    /// `http://host/dashboard` resolves to `http://host/dashboard/api/tasks/inbox`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] when the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::InvalidEndpoint {
                path: path.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Issues a `GET` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute::<(), T>(Method::GET, path, None).await
    }

    /// Issues a `POST` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Issues a `PUT` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Issues a `DELETE` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute::<(), T>(Method::DELETE, path, None).await
    }

    async fn execute<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(payload) = body {
            request = request.json(payload);
        }
        send(request, method_name(&method), &url).await
    }
}

/// Appends a trailing `/` so relative joins keep the base path.
fn as_directory(base: &Url) -> Url {
    let mut directory = base.clone();
    if !directory.path().ends_with('/') {
        let path = format!("{}/", directory.path());
        directory.set_path(&path);
    }
    directory
}

async fn send<T: DeserializeOwned>(
    request: RequestBuilder,
    method: &'static str,
    url: &Url,
) -> ApiResult<T> {
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::transport(url.as_str(), err))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ApiError::transport(url.as_str(), err))?;

    debug!(method, url = %url, status = status.as_u16(), "backend responded");

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.detail);
        return Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            detail,
        });
    }

    let payload = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(payload).map_err(|err| ApiError::Decode {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "GET",
    }
}

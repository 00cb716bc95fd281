//! Client layer: builds requests, dispatches them and maps every outcome to an [`ApiResult`].

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiKey, ApiResult, ErrorInfo, HttpMethod, OutgoingRequest, RequestOptions, SendMessage,
    SendMessageResponse, ValidationError,
};
use crate::transport::{
    BodyReadError, DecodeError, KeyCase, decode_error_body, decode_success_body, encode_body,
};

const DEFAULT_BASE_URL: &str = "https://api.textfully.dev/v1";
const DEFAULT_USER_AGENT: &str = concat!("textfully-rust/", env!("CARGO_PKG_VERSION"));
const MESSAGES_PATH: &str = "/messages";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    status_text: String,
    body: Result<String, BodyReadError>,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        url: Url,
        request: OutgoingRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        url: Url,
        request: OutgoingRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(reqwest_method(request.method), url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let status_text = status.canonical_reason().unwrap_or_default().to_owned();
            let body = response
                .text()
                .await
                .map_err(|err| BodyReadError::new(err.to_string()));
            Ok(HttpResponse {
                status: status.as_u16(),
                status_text,
                body,
            })
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned while constructing a [`TextfullyClient`].
///
/// Calls on a built client never fail this way; they report problems through
/// [`ApiResult::error`].
pub enum TextfullyError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A configured value cannot be sent as an HTTP header.
    #[error("invalid value for header {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The HTTP client could not be initialized.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Resolved client configuration. Fixed for the lifetime of a client.
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: String,
    user_agent: String,
}

impl ClientConfig {
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn default_headers(&self) -> Result<HeaderMap, TextfullyError> {
        let mut auth = HeaderValue::try_from(format!("Bearer {}", self.api_key.as_str()))
            .map_err(|source| TextfullyError::InvalidHeader {
                name: "Authorization",
                source,
            })?;
        auth.set_sensitive(true);
        let user_agent = HeaderValue::try_from(self.user_agent.as_str()).map_err(|source| {
            TextfullyError::InvalidHeader {
                name: "User-Agent",
                source,
            }
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, user_agent);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TextfullyClient`].
///
/// Defaults: base URL `https://api.textfully.dev/v1`, user agent
/// `textfully-rust/<version>`, a fresh `reqwest::Client`.
pub struct TextfullyClientBuilder {
    api_key: ApiKey,
    base_url: String,
    user_agent: String,
    http_client: Option<reqwest::Client>,
}

impl TextfullyClientBuilder {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            http_client: None,
        }
    }

    /// Override the API base URL (requests go to `{base_url}{path}`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a preconfigured `reqwest::Client`, e.g. one with a request timeout.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build a [`TextfullyClient`].
    pub fn build(self) -> Result<TextfullyClient, TextfullyError> {
        Url::parse(&self.base_url)?;

        let config = ClientConfig {
            api_key: self.api_key,
            base_url: self.base_url,
            user_agent: self.user_agent,
        };
        let default_headers = config.default_headers()?;

        let client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|err| TextfullyError::Transport(Box::new(err)))?,
        };

        Ok(TextfullyClient {
            config,
            default_headers,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Textfully API client.
///
/// Every method performs exactly one HTTP exchange and returns an
/// [`ApiResult`] holding either the decoded data or an [`ErrorInfo`]; no
/// method returns `Err` or retries. Request bodies are snake-cased on the way
/// out and response keys camel-cased on the way in.
///
/// The client holds only immutable state and can be cloned and shared across
/// tasks freely.
pub struct TextfullyClient {
    config: ClientConfig,
    default_headers: HeaderMap,
    http: Arc<dyn HttpTransport>,
}

impl TextfullyClient {
    /// Create a client with default settings.
    pub fn new(api_key: ApiKey) -> Result<Self, TextfullyError> {
        Self::builder(api_key).build()
    }

    /// Create a client with the key from `TEXTFULLY_API_KEY`.
    pub fn from_env() -> Result<Self, TextfullyError> {
        Self::new(ApiKey::from_env()?)
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> TextfullyClientBuilder {
        TextfullyClientBuilder::new(api_key)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a text message (`POST /messages`).
    pub async fn send(&self, message: &SendMessage) -> ApiResult<SendMessageResponse> {
        self.post(MESSAGES_PATH, message, RequestOptions::default())
            .await
    }

    pub async fn get<T>(&self, path: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Get, path, None, options);
        self.dispatch(request).await
    }

    /// `POST` with `entity` snake-cased into the body. A `null` entity sends no body.
    pub async fn post<T, B>(&self, path: &str, entity: &B, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(HttpMethod::Post, path, entity, KeyCase::Wire, options)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, entity: &B, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(HttpMethod::Put, path, entity, KeyCase::Wire, options)
            .await
    }

    pub async fn patch<T, B>(&self, path: &str, entity: &B, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(HttpMethod::Patch, path, entity, KeyCase::Wire, options)
            .await
    }

    /// `DELETE` with `query` as the body.
    ///
    /// Unlike the write verbs the body keeps its keys as given (no snake-casing).
    /// Pass `&()` for no body.
    pub async fn delete<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_with_body(
            HttpMethod::Delete,
            path,
            query,
            KeyCase::Raw,
            RequestOptions::default(),
        )
        .await
    }

    async fn send_with_body<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        entity: &B,
        case: KeyCase,
        options: RequestOptions,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match encode_body(entity, case) {
            Ok(body) => body,
            Err(err) => {
                warn!(%method, path, error = %err, "request body could not be serialized");
                return ApiResult::err(ErrorInfo::unresolved());
            }
        };
        let request = self.build_request(method, path, body, options);
        self.dispatch(request).await
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        options: RequestOptions,
    ) -> OutgoingRequest {
        let mut headers = self.default_headers.clone();
        headers.extend(options.headers);
        OutgoingRequest {
            method,
            path: path.to_owned(),
            query: options.query,
            headers,
            body,
        }
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, url::ParseError> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn dispatch<T>(&self, request: OutgoingRequest) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let method = request.method;
        let url = match self.endpoint(&request.path, &request.query) {
            Ok(url) => url,
            Err(err) => {
                warn!(%method, path = %request.path, error = %err, "request URL is invalid");
                return ApiResult::err(ErrorInfo::unresolved());
            }
        };

        debug!(%method, %url, "sending request");
        let response = match self.http.execute(url, request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, error = %err, "request could not be resolved");
                return ApiResult::err(ErrorInfo::unresolved());
            }
        };

        if !response.is_success() {
            let error = decode_error_body(response.body.as_deref(), &response.status_text);
            debug!(
                %method,
                status = response.status,
                name = %error.name,
                "request returned an error status"
            );
            return ApiResult::err(error);
        }

        let decoded = match response.body {
            Ok(body) => decode_success_body(&body),
            Err(err) => Err(DecodeError::Body(err.message.unwrap_or_default())),
        };
        match decoded {
            Ok(data) => ApiResult::ok(data),
            Err(err) => {
                warn!(
                    %method,
                    status = response.status,
                    error = %err,
                    "response body could not be decoded"
                );
                ApiResult::err(ErrorInfo::unresolved())
            }
        }
    }
}

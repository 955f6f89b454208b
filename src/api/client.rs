//! Typed handle over the Top.gg REST API.

use std::sync::LazyLock;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::transport::{HttpClient, HttpRequest, ReqwestClient};

use super::{ApiError, BotsQuery, Stats, StatsPayload, token};

/// Base address of the public Top.gg API.
pub const DEFAULT_BASE_URL: &str = "https://top.gg/api";

static DEFAULT_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"));

fn json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Options for [`Client`] construction.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    base_url: Url,
}

impl ClientOptions {
    /// Creates options pointing at [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the client at another API address (a mock server, a proxy).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the configured base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.clone(),
        }
    }
}

/// Top.gg API client.
///
/// Holds the token, the transport and the base address for its whole
/// lifetime; every call reuses them and nothing else is kept between
/// calls, so a single client can be shared freely across tasks.
///
/// # Type Parameters
///
/// - `H`: the transport executing requests (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use topgg::api::{Client, ClientOptions};
///
/// # async fn example(token: &str) -> Result<(), topgg::api::ApiError> {
/// let client = Client::new(token, ClientOptions::default())?;
/// let stats = client.get_stats().await?;
/// println!("{:?}", stats.server_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<H = ReqwestClient> {
    token: HeaderValue,
    transport: H,
    base_url: Url,
}

impl Client<ReqwestClient> {
    /// Creates a client using a fresh reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedToken`] or [`ApiError::InvalidTokenState`]
    /// if the token is not JWT-shaped. The signature is never verified.
    pub fn new(token: &str, options: ClientOptions) -> Result<Self, ApiError> {
        Self::with_transport(token, ReqwestClient::new(), options)
    }
}

impl<H> Client<H> {
    /// Creates a client over the given transport.
    ///
    /// # Errors
    ///
    /// Same as [`Client::new`].
    pub fn with_transport(
        token: &str,
        transport: H,
        options: ClientOptions,
    ) -> Result<Self, ApiError> {
        token::check_shape(token)?;

        let mut token = HeaderValue::from_str(token).map_err(|_| ApiError::MalformedToken)?;
        token.set_sensitive(true);

        Ok(Self {
            token,
            transport,
            base_url: options.base_url,
        })
    }

    /// Returns the base address every request is sent under.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.transport
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl<H: HttpClient> Client<H> {
    /// Posts bot statistics and returns them unchanged.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingOrInvalidServerCount`] before any request is made;
    /// otherwise [`ApiError::Http`] or [`ApiError::Transport`].
    pub async fn post_stats(&self, stats: StatsPayload) -> Result<StatsPayload, ApiError> {
        stats.validate()?;
        self.post(&["bots", "stats"], &stats).await?;
        Ok(stats)
    }

    /// Fetches the statistics currently recorded for the bot.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Transport`], or
    /// [`ApiError::UnexpectedResponse`] when a reported field is mistyped.
    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        let body = self.get(&["bots", "stats"], &[]).await?;
        Stats::from_response(&body)
    }

    /// Fetches a bot by id.
    ///
    /// # Errors
    ///
    /// [`ApiError::IdMissing`] for an empty id; otherwise HTTP/transport errors.
    pub async fn get_bot(&self, id: &str) -> Result<Value, ApiError> {
        if id.is_empty() {
            return Err(ApiError::IdMissing);
        }
        self.get(&["bots", id], &[]).await
    }

    /// Fetches a user by id.
    ///
    /// The current API version no longer serves this endpoint; the call is
    /// still made so callers see the API's own answer.
    ///
    /// # Errors
    ///
    /// [`ApiError::IdMissing`] for an empty id; otherwise HTTP/transport errors.
    pub async fn get_user(&self, id: &str) -> Result<Value, ApiError> {
        if id.is_empty() {
            return Err(ApiError::IdMissing);
        }
        tracing::warn!("get_user is deprecated: the Top.gg API no longer supports /users/{{id}}");
        self.get(&["users", id], &[]).await
    }

    /// Searches bots.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Transport`].
    pub async fn get_bots(&self, query: &BotsQuery) -> Result<Value, ApiError> {
        self.get(&["bots"], &query.to_params()).await
    }

    /// Fetches one page of the bot's last votes; `None` means page 1.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Transport`].
    pub async fn get_votes(&self, page: Option<u32>) -> Result<Value, ApiError> {
        let page = page.unwrap_or(1).to_string();
        self.get(&["bots", "votes"], &[("page", page)]).await
    }

    /// Returns whether the user voted for the bot in the last 12 hours.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingId`] for an empty id; otherwise HTTP/transport errors.
    pub async fn has_voted(&self, user_id: &str) -> Result<bool, ApiError> {
        if user_id.is_empty() {
            return Err(ApiError::MissingId);
        }
        let body = self
            .get(&["bots", "check"], &[("userId", user_id.to_string())])
            .await?;

        Ok(match body.get("voted") {
            Some(Value::Bool(voted)) => *voted,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        })
    }

    /// Returns whether the weekend vote multiplier is active.
    ///
    /// # Errors
    ///
    /// HTTP/transport errors, or [`ApiError::UnexpectedResponse`] when the
    /// body carries no boolean `is_weekend`.
    pub async fn is_weekend(&self) -> Result<bool, ApiError> {
        let body = self.get(&["weekend"], &[]).await?;
        body.get("is_weekend")
            .and_then(Value::as_bool)
            .ok_or_else(|| ApiError::UnexpectedResponse("missing boolean is_weekend".to_string()))
    }

    async fn get(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Value, ApiError> {
        let mut url = self.endpoint(segments)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        self.send(HttpRequest::get(url)).await
    }

    async fn post<T: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        let body = encode(body)?;

        let request = HttpRequest::new(Method::POST, url)
            .with_header(CONTENT_TYPE, json())
            .with_body(body);
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let request = request
            .with_header(AUTHORIZATION, self.token.clone())
            .with_header(ACCEPT, json());

        tracing::debug!(method = %request.method, path = request.path(), "Sending Top.gg API request");

        let response = self.transport.request(request).await?;

        if !response.is_success() {
            tracing::debug!(status = %response.status, "Top.gg API request failed");
            return Err(ApiError::Http {
                status: response.status,
                body: response.body_text(),
            });
        }

        Ok(decode_body(&response.body))
    }
}

/// Encodes a request body as JSON.
pub(super) fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(ApiError::Encode)
}

/// Decodes a 2xx body: JSON when possible, raw text otherwise, `null` when empty.
fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

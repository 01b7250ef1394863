//! Address validation async client implementation.

use crate::{ArgumentError, Error, ParseResult, Result, ValidationResult};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Maximum length, in UTF-16 code units, of an address passed to [`Client::validate`].
pub const MAX_ADDRESS_LEN: usize = 512;

/// Maximum length, in UTF-16 code units, of the `;`-joined batch sent by [`Client::parse`].
pub const MAX_BATCH_LEN: usize = 524_288;

/// Async client for the address validation service.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like a different endpoint, proxies, timeouts, and a custom user agent.
///
/// The client holds a reusable HTTP session. It is released by [`Client::close`]
/// or when the client is dropped, whichever comes first.
pub struct Client {
    http: Option<reqwest::Client>,
    api_key: String,
    base_url: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a new client for the default Mailgun endpoint.
    ///
    /// No request is made here; a bad key is only reported by the first call.
    ///
    /// # Errors
    /// [`ArgumentError::MissingApiKey`] when `api_key` is empty or blank.
    ///
    /// # Examples
    /// ```no_run
    /// # use addressguard_client::Client;
    /// # fn main() -> Result<(), addressguard_client::Error> {
    /// let client = Client::new("pubkey-0123456789")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Base endpoint requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Whether [`Client::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Validate a single address against syntax, DNS and ESP rules.
    ///
    /// # Arguments
    /// * `address` - The candidate address (at most 512 UTF-16 code units)
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] for a blank or over-long address
    /// * [`Error::InvalidCredential`] when the service rejects the key
    /// * [`Error::UnknownService`] for any other non-200 status
    /// * [`Error::Transport`] / [`Error::Decode`] for I/O and payload failures
    ///
    /// # Examples
    /// ```no_run
    /// # use addressguard_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), addressguard_client::Error> {
    /// let client = Client::new("pubkey-0123456789")?;
    /// let result = client.validate("johnsmith@gmail.com").await?;
    /// if let Some(suggestion) = result.did_you_mean {
    ///     println!("did you mean {suggestion}?");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate(&self, address: &str) -> Result<ValidationResult> {
        check_address(address)?;

        tracing::debug!(len = address.len(), "validating address");
        self.get_api("validate", &[("address", address)]).await
    }

    /// Split a batch of candidate strings into parsed and unparseable items.
    ///
    /// With `syntax_only` set, the service checks grammar only. Otherwise it
    /// also runs DNS and ESP checks, which may move syntactically valid
    /// addresses into `unparseable`. The classification is returned as-is.
    ///
    /// Addresses are joined with `;` without escaping, so an address that
    /// itself contains `;` is split by the service.
    ///
    /// An empty batch returns an empty [`ParseResult`] without a request.
    ///
    /// # Examples
    /// ```no_run
    /// # use addressguard_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), addressguard_client::Error> {
    /// let client = Client::new("pubkey-0123456789")?;
    /// let result = client
    ///     .parse(["johnsmith@gmail.com", "gmail.com"], true)
    ///     .await?;
    /// println!("{:?} / {:?}", result.parsed, result.unparseable);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn parse<I, S>(&self, addresses: I, syntax_only: bool) -> Result<ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some((joined, count)) = join_batch(addresses)? else {
            tracing::trace!("empty batch, skipping request");
            return Ok(ParseResult::default());
        };

        tracing::debug!(count, len = joined.len(), syntax_only, "parsing addresses");
        let syntax_only = if syntax_only { "true" } else { "false" };
        self.get_api(
            "parse",
            &[("syntax_only", syntax_only), ("addresses", joined.as_str())],
        )
        .await
    }

    /// Release the HTTP session.
    ///
    /// Calling this more than once is a no-op. Later network operations fail
    /// with [`Error::Closed`].
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!("address validation client closed");
        }
    }

    /// Common GET API request pattern: one round trip, then status dispatch.
    async fn get_api<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let http = self.http.as_ref().ok_or(Error::Closed)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = http
            .get(&url)
            .query(query)
            .basic_auth("api", Some(&self.api_key))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(endpoint, %status, "address validation service responded");
        let body = response.text().await?;

        match status {
            StatusCode::OK => Ok(serde_json::from_str(&body)?),
            StatusCode::UNAUTHORIZED => Err(Error::InvalidCredential),
            status => Err(Error::UnknownService { status, body }),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

fn check_address(address: &str) -> std::result::Result<(), ArgumentError> {
    if address.trim().is_empty() {
        return Err(ArgumentError::MissingAddress);
    }

    let len = address.encode_utf16().count();
    if len > MAX_ADDRESS_LEN {
        return Err(ArgumentError::AddressTooLong {
            len,
            max: MAX_ADDRESS_LEN,
        });
    }

    Ok(())
}

/// Join a batch with `;`, returning `None` for an empty batch.
///
/// The size limit applies to the joined string, separators included.
fn join_batch<I, S>(addresses: I) -> std::result::Result<Option<(String, usize)>, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    let mut count = 0;
    for address in addresses {
        if count > 0 {
            joined.push(';');
        }
        joined.push_str(address.as_ref());
        count += 1;
    }

    if count == 0 {
        return Ok(None);
    }

    let len = joined.encode_utf16().count();
    if len > MAX_BATCH_LEN {
        return Err(ArgumentError::BatchTooLarge {
            len,
            max: MAX_BATCH_LEN,
        });
    }

    Ok(Some((joined, count)))
}

const BASE_URL: &str = "https://api.mailgun.net/v2/address";
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring an address validation client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    proxy: Option<String>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Mailgun address endpoint
    /// - No proxy
    /// - `addressguard-client/<version>` user agent
    /// - No timeout beyond reqwest's own
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
        }
    }

    /// Override the base endpoint (e.g. "http://127.0.0.1:8080/v2/address").
    ///
    /// Useful for testing or for a regional endpoint.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Abort requests that take longer than `timeout`.
    ///
    /// An elapsed timeout is reported as [`Error::Transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Validates the API key and sets up the HTTP session. No request is sent.
    ///
    /// # Examples
    /// ```no_run
    /// # use addressguard_client::Client;
    /// # fn main() -> Result<(), addressguard_client::Error> {
    /// let client = Client::builder("pubkey-0123456789")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        if self.api_key.trim().is_empty() {
            return Err(ArgumentError::MissingApiKey.into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build()?;

        Ok(Client {
            http: Some(http),
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            proxy: self.proxy,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

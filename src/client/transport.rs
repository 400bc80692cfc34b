//! HTTP transport for authentication requests.
//!
//! Each request builds its own `reqwest::Client`, so no connection, TLS
//! context or pool outlives the call. There are no retries and redirects
//! are not followed.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{ApiConfig, TlsConfig, DEFAULT_TIMEOUT_SECS};
use crate::errors::{ClientError, ClientResult};

/// Header sent with every authentication request.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// One outgoing POST.
pub struct PostRequest<'a> {
    pub url: &'a str,
    pub headers: &'a [(&'a str, &'a str)],
    pub body: String,
    pub tls: TlsConfig,
}

/// Something that can deliver a POST and hand back the response body.
///
/// Implementations return the body text for any HTTP status and reserve
/// `Err` for requests that never produced a response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, request: PostRequest<'_>) -> ClientResult<String>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
    ipv4_only: bool,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ipv4_only: true,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.timeout()).with_ipv4_only(config.ipv4_only)
    }

    /// Restrict name resolution to IPv4 addresses.
    pub fn with_ipv4_only(mut self, ipv4_only: bool) -> Self {
        self.ipv4_only = ipv4_only;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_client(&self, tls: TlsConfig) -> ClientResult<Client> {
        if !tls.verify_peer || !tls.verify_host {
            warn!(
                verify_peer = tls.verify_peer,
                verify_host = tls.verify_host,
                "TLS certificate verification is weakened"
            );
        }

        let mut builder = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(!tls.verify_peer)
            .danger_accept_invalid_hostnames(!tls.verify_host);

        if self.ipv4_only {
            builder = builder.dns_resolver(Arc::new(Ipv4Resolver));
        }

        builder
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: PostRequest<'_>) -> ClientResult<String> {
        let client = self.build_client(request.tls)?;

        let mut builder = client.post(request.url).body(request.body);
        for (name, value) in request.headers {
            builder = builder.header(*name, *value);
        }

        debug!(url = %request.url, "sending authentication request");
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            debug!(status = %status.as_u16(), "authentication endpoint returned non-success status");
        }

        Ok(resp.text().await?)
    }
}

/// Resolver that discards IPv6 results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Resolver;

impl Resolve for Ipv4Resolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(resolve_ipv4(name.as_str().to_string()))
    }
}

async fn resolve_ipv4(host: String) -> Result<Addrs, Box<dyn Error + Send + Sync>> {
    // Port is replaced by the connector.
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await?
        .filter(SocketAddr::is_ipv4)
        .collect();

    if addrs.is_empty() {
        return Err(format!("no IPv4 address found for {host}").into());
    }

    Ok(Box::new(addrs.into_iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds() {
        let transport = HttpTransport::default();
        assert_eq!(transport.timeout(), Duration::from_secs(10));
        assert!(transport.ipv4_only);
    }

    #[test]
    fn from_config_copies_settings() {
        let config = ApiConfig {
            timeout_secs: 3,
            ipv4_only: false,
            ..ApiConfig::default()
        };
        let transport = HttpTransport::from_config(&config);
        assert_eq!(transport.timeout(), Duration::from_secs(3));
        assert!(!transport.ipv4_only);
    }

    #[tokio::test]
    async fn ipv4_resolver_returns_only_ipv4() {
        let addrs = resolve_ipv4("localhost".to_string()).await;
        if let Ok(addrs) = addrs {
            for addr in addrs {
                assert!(addr.is_ipv4());
            }
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let transport = HttpTransport::new(Duration::from_secs(2));
        let err = transport
            .post(PostRequest {
                // Port 9 on loopback: nothing listens there.
                url: "http://127.0.0.1:9/api/auth",
                headers: &[JSON_CONTENT_TYPE],
                body: "{}".to_string(),
                tls: TlsConfig::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}

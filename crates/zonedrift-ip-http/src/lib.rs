// # HTTP IP Checker
//
// HTTP implementation of the `IpChecker` capability: one GET per check
// against a configured endpoint that answers with the caller's public
// address (e.g. https://api.ipify.org).
//
// The canonical body is a bare IP literal, optionally newline-terminated.
// A JSON object carrying the address under an `"ip"` field is accepted
// for compatibility with wrapper-style endpoints.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use zonedrift_core::{Error, IpCheck, IpChecker, Result};

/// HTTP client timeout for lookup requests
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based external IP checker
///
/// Each check performs exactly one GET; nothing is cached between calls.
/// The request timeout bounds how long one check can stall the caller.
pub struct HttpIpChecker {
    /// URL answering with the caller's public IP
    endpoint: String,

    /// HTTP client
    client: reqwest::Client,
}

/// JSON wrapper form some lookup endpoints answer with
#[derive(Deserialize)]
struct WrappedIp {
    ip: String,
}

impl HttpIpChecker {
    /// Create a new checker for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the externally visible address from the endpoint
    async fn lookup(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::lookup(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::lookup(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::lookup(format!("failed to read response: {e}")))?;

        parse_ip_body(&body)
    }
}

#[async_trait]
impl IpChecker for HttpIpChecker {
    async fn ip_has_changed(&self, known_ip: Option<IpAddr>) -> Result<IpCheck> {
        let observed = self.lookup().await?;

        Ok(IpCheck {
            observed,
            changed: known_ip != Some(observed),
        })
    }
}

/// Decodes a lookup response body: a bare IP literal with at most one
/// trailing newline, or a JSON `{"ip": "..."}` wrapper.
fn parse_ip_body(body: &str) -> Result<IpAddr> {
    let bare = body
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(body);

    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(ip);
    }

    if let Ok(wrapped) = serde_json::from_str::<WrappedIp>(body) {
        return wrapped.ip.parse::<IpAddr>().map_err(|_| {
            Error::lookup(format!("invalid IP address in JSON body: {}", wrapped.ip))
        });
    }

    Err(Error::lookup(format!(
        "response body is not an IP address: {body:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn parses_bare_ip() {
        assert_eq!(parse_ip_body("1.2.3.4").unwrap(), IpAddr::from([1, 2, 3, 4]));
    }

    #[test]
    fn trims_exactly_one_trailing_newline() {
        assert_eq!(parse_ip_body("1.2.3.4\n").unwrap(), IpAddr::from([1, 2, 3, 4]));
        assert_eq!(parse_ip_body("1.2.3.4\r\n").unwrap(), IpAddr::from([1, 2, 3, 4]));
        assert!(parse_ip_body("1.2.3.4\n\n").is_err());
    }

    #[test]
    fn parses_ipv6_literal() {
        assert_eq!(
            parse_ip_body("2001:db8::1\n").unwrap(),
            "2001:db8::1".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn parses_json_wrapper() {
        assert_eq!(
            parse_ip_body(r#"{"ip": "5.6.7.8"}"#).unwrap(),
            IpAddr::from([5, 6, 7, 8])
        );
    }

    #[test]
    fn rejects_junk_bodies() {
        assert!(matches!(parse_ip_body("not an ip"), Err(Error::Lookup(_))));
        assert!(matches!(
            parse_ip_body(r#"{"ip": "not an ip"}"#),
            Err(Error::Lookup(_))
        ));
        assert!(matches!(parse_ip_body(""), Err(Error::Lookup(_))));
    }

    #[tokio::test]
    async fn unchanged_when_body_matches_known_ip() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/ip");
                then.status(200).body("1.2.3.4\n");
            })
            .await;

        let checker = HttpIpChecker::new(server.url("/ip"));
        let known: IpAddr = "1.2.3.4".parse().unwrap();

        let check = checker.ip_has_changed(Some(known)).await.unwrap();
        assert_eq!(check.observed, known);
        assert!(!check.changed);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn first_run_always_counts_as_changed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ip");
                then.status(200).body("5.6.7.8");
            })
            .await;

        let checker = HttpIpChecker::new(server.url("/ip"));

        let check = checker.ip_has_changed(None).await.unwrap();
        assert_eq!(check.observed, IpAddr::from([5, 6, 7, 8]));
        assert!(check.changed);
    }

    #[tokio::test]
    async fn changed_when_observed_differs_from_known() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ip");
                then.status(200).body("5.6.7.8");
            })
            .await;

        let checker = HttpIpChecker::new(server.url("/ip"));
        let known: IpAddr = "1.2.3.4".parse().unwrap();

        let check = checker.ip_has_changed(Some(known)).await.unwrap();
        assert_eq!(check.observed, IpAddr::from([5, 6, 7, 8]));
        assert!(check.changed);
    }

    #[tokio::test]
    async fn non_success_status_is_a_lookup_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ip");
                then.status(503).body("1.2.3.4");
            })
            .await;

        let checker = HttpIpChecker::new(server.url("/ip"));

        let err = checker.ip_has_changed(None).await.unwrap_err();
        assert!(matches!(err, Error::Lookup(_)));
    }

    #[tokio::test]
    async fn unparseable_body_is_a_lookup_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ip");
                then.status(200).body("<html>definitely not an ip</html>");
            })
            .await;

        let checker = HttpIpChecker::new(server.url("/ip"));

        let err = checker.ip_has_changed(None).await.unwrap_err();
        assert!(matches!(err, Error::Lookup(_)));
    }
}

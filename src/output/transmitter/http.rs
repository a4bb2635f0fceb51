use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use tracing::{debug, info};

use super::retry::{retry, RetryPolicy, SingleAttempt};
use super::transmitter::Transmitter;
use crate::config::{Config, TlsPolicy};
use crate::error::{Error, ErrorKind, Result};

pub const REMOTE_WRITE_VERSION_HEADER: &str = "x-prometheus-remote-write-version";
pub const REMOTE_WRITE_VERSION: &str = "0.1.0";

// Only this much of an error response makes it into the error message.
const MAX_ERROR_MSG_LEN: usize = 512;

/// Uploads remote-write payloads over HTTP(S).
pub struct HttpTransmitter {
    client: Client,
    url: Url,
    bearer_token: Option<String>,
    retry_policy: Box<dyn RetryPolicy>,
}

impl HttpTransmitter {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("snappy"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-protobuf"),
        );
        headers.insert(
            REMOTE_WRITE_VERSION_HEADER,
            HeaderValue::from_static(REMOTE_WRITE_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("omb-remote-write/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.tls() == TlsPolicy::SkipVerify)
            .build()
            .map_err(|e| (ErrorKind::Config, "couldn't build HTTP client", e))?;

        Ok(Self {
            client,
            url: config.endpoint().clone(),
            bearer_token: config.bearer_token().map(String::from),
            retry_policy: Box::new(SingleAttempt),
        })
    }

    pub fn with_retry_policy(mut self, policy: Box<dyn RetryPolicy>) -> Self {
        self.retry_policy = policy;
        self
    }

    fn attempt(&self, payload: &[u8]) -> Result<()> {
        let mut request = self.client.post(self.url.clone()).body(payload.to_vec());
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(request_error)?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, "remote write accepted");
            return Ok(());
        }

        let err = Error::transmission(&format!(
            "server returned HTTP status {}: {}",
            status,
            error_line(response)
        ));
        if status.is_server_error() {
            Err(err.recoverable())
        } else {
            Err(err)
        }
    }
}

impl Transmitter for HttpTransmitter {
    fn transmit(&self, payload: &[u8]) -> Result<()> {
        info!(url = %self.url, bytes = payload.len(), "sending remote write request");
        retry(self.retry_policy.as_ref(), || self.attempt(payload))
    }
}

fn request_error(err: reqwest::Error) -> Error {
    let recoverable = err.is_timeout() || err.is_connect() || err.is_request();
    let message = if err.is_timeout() {
        "remote write request timed out"
    } else {
        "remote write request failed"
    };

    let err = Error::with_source(ErrorKind::Transmission, message, err);
    if recoverable {
        err.recoverable()
    } else {
        err
    }
}

// First line of the response body, cut at MAX_ERROR_MSG_LEN bytes.
fn error_line(response: Response) -> String {
    let body = response.text().unwrap_or_default();
    let line = body.lines().next().unwrap_or("");
    truncate(line, MAX_ERROR_MSG_LEN).to_owned()
}

fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

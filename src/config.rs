use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use crate::cliopt::CliOpt;
use crate::error::{Error, ErrorKind, Result};
use crate::model::Label;
use crate::parser::parse_label_pairs;

pub const RECEIVE_PATH: &str = "/api/v1/receive";

pub const RECEIVER_URL_ENV: &str = "THANOS_RECEIVER_URL";

pub const BEARER_TOKEN_ENV: &str = "THANOS_BEARER_TOKEN";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TlsPolicy {
    Verify,
    SkipVerify,
}

/// Everything a run needs, resolved once from flags and environment.
#[derive(Clone)]
pub struct Config {
    endpoint: Url,
    results_path: PathBuf,
    labels: Vec<Label>,
    tls: TlsPolicy,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl Config {
    pub fn builder(base_url: &str, results_path: impl Into<PathBuf>) -> Result<ConfigBuilder> {
        Ok(ConfigBuilder {
            config: Config {
                endpoint: endpoint_url(base_url)?,
                results_path: results_path.into(),
                labels: vec![],
                tls: TlsPolicy::Verify,
                bearer_token: None,
                timeout: DEFAULT_TIMEOUT,
            },
        })
    }

    pub fn resolve(opt: &CliOpt) -> Result<Self> {
        Self::resolve_with(opt, |name| env::var(name).ok())
    }

    /// Like `resolve`, but environment lookups go through `env`.
    pub fn resolve_with<F>(opt: &CliOpt, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = flag_or_env(&opt.thanos, RECEIVER_URL_ENV, &env);
        let token = flag_or_env(&opt.token, BEARER_TOKEN_ENV, &env);

        let mut builder = Self::builder(&base_url, opt.results.clone())?
            .labels(parse_label_pairs(&opt.labels)?)
            .timeout(opt.timeout);
        if opt.insecure {
            builder = builder.tls(TlsPolicy::SkipVerify);
        }
        if !token.is_empty() {
            builder = builder.bearer_token(token);
        }
        Ok(builder.build())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn tls(&self) -> TlsPolicy {
        self.tls
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint.as_str())
            .field("results_path", &self.results_path)
            .field("labels", &self.labels)
            .field("tls", &self.tls)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn labels(mut self, labels: Vec<Label>) -> Self {
        self.config.labels = labels;
        self
    }

    pub fn tls(mut self, tls: TlsPolicy) -> Self {
        self.config.tls = tls;
        self
    }

    pub fn bearer_token<S: Into<String>>(mut self, token: S) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// A non-empty flag wins over the environment variable.
pub fn flag_or_env<F>(flag: &str, var: &str, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !flag.is_empty() {
        return flag.to_owned();
    }
    env(var).unwrap_or_default()
}

/// `base` with the receive path appended.
pub fn endpoint_url(base: &str) -> Result<Url> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::config(&format!(
            "receiver URL is not set, use --thanos or ${}",
            RECEIVER_URL_ENV
        )));
    }

    let url = format!("{}{}", base, RECEIVE_PATH);
    let parsed = Url::parse(&url).map_err(|e| {
        Error::with_source(
            ErrorKind::Config,
            &format!("couldn't parse receiver URL '{}'", url),
            e,
        )
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(Error::config(&format!(
            "receiver URL '{}' must be an absolute http(s) URL",
            url
        ))),
    }
}

use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use crate::parser::parse_duration;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "omb-remote-write",
    about = "Push OpenMessaging Benchmark results to a Prometheus remote-write endpoint"
)]
pub struct CliOpt {
    /// Receiver base URL. Falls back to $THANOS_RECEIVER_URL.
    #[structopt(long = "thanos", short = "t", default_value = "")]
    pub thanos: String,

    /// OMB results JSON path.
    #[structopt(long = "results", short = "r", parse(from_os_str))]
    pub results: PathBuf,

    /// Additional name:value label pairs, separated by commas.
    #[structopt(long = "labels", short = "l", default_value = "")]
    pub labels: String,

    /// Skip TLS certificate verification.
    #[structopt(long = "insecure")]
    pub insecure: bool,

    /// Bearer token. Falls back to $THANOS_BEARER_TOKEN.
    #[structopt(long = "token", default_value = "")]
    pub token: String,

    /// Request timeout, e.g. 1s or 500ms.
    #[structopt(long = "timeout", default_value = "1s", parse(try_from_str = parse_duration))]
    pub timeout: Duration,

    /// Log debug events to stderr.
    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}

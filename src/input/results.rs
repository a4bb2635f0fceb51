use serde::{Deserialize, Deserializer};

use crate::error::{ErrorKind, Result};
use crate::model::MetricKind;

/// The part of an OpenMessaging Benchmark result file this tool publishes.
///
/// Every array holds one point per 10s reporting window, most recent last.
/// Missing and `null` fields decode as empty arrays, unknown fields are
/// ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenchmarkResults {
    #[serde(deserialize_with = "null_as_empty")]
    pub consume_rate: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub end_to_end_latency_avg: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub publish_latency_99pct: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub publish_rate: Vec<f64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<f64>>::deserialize(deserializer)?.unwrap_or_default())
}

impl BenchmarkResults {
    pub fn from_slice(buf: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(buf)
            .map_err(|e| (ErrorKind::Input, "JSON decoding failed", e))?)
    }

    pub fn values(&self, kind: MetricKind) -> &[f64] {
        match kind {
            MetricKind::ConsumeRate => &self.consume_rate,
            MetricKind::EndToEndLatencyAvg => &self.end_to_end_latency_avg,
            MetricKind::PublishLatency99pct => &self.publish_latency_99pct,
            MetricKind::PublishRate => &self.publish_rate,
        }
    }
}

/// The four series every benchmark run produces, in wire order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MetricKind {
    ConsumeRate,
    EndToEndLatencyAvg,
    PublishLatency99pct,
    PublishRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::ConsumeRate,
        MetricKind::EndToEndLatencyAvg,
        MetricKind::PublishLatency99pct,
        MetricKind::PublishRate,
    ];

    pub fn metric_name(&self) -> &'static str {
        match self {
            MetricKind::ConsumeRate => "omb_results_consume_rate",
            MetricKind::EndToEndLatencyAvg => "omb_results_end_to_end_latency_avg",
            MetricKind::PublishLatency99pct => "omb_results_publish_latency_99pct",
            MetricKind::PublishRate => "omb_results_publish_rate",
        }
    }

    /// Field name in the benchmark results JSON.
    pub fn field_name(&self) -> &'static str {
        match self {
            MetricKind::ConsumeRate => "consumeRate",
            MetricKind::EndToEndLatencyAvg => "endToEndLatencyAvg",
            MetricKind::PublishLatency99pct => "publishLatency99pct",
            MetricKind::PublishRate => "publishRate",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.metric_name())
    }
}

use std::convert::TryFrom;
use std::time::Duration;

use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::input::BenchmarkResults;
use crate::model::{
    Label, Labels, MetricKind, Sample, TimeSeries, Timestamp, TimestampTrait, WriteBatch,
};

/// Cadence at which the benchmark reports a point.
pub const REPORTING_INTERVAL: Duration = Duration::from_secs(10);

/// Turns flat benchmark arrays into time series ending at "now".
///
/// The clock is read once per sample rather than once per series, so
/// consecutive timestamps are at least one interval apart and drift by
/// whatever time passes between reads.
pub struct Synthesizer<C> {
    clock: C,
    interval: Duration,
}

impl<C: Clock> Synthesizer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            interval: REPORTING_INTERVAL,
        }
    }

    pub fn synthesize(
        &self,
        data: &[f64],
        metric_name: &str,
        additional_labels: &[Label],
    ) -> Result<TimeSeries> {
        let labels = Labels::for_metric(metric_name, additional_labels)?;

        let n = data.len();
        let samples: Vec<Sample> = data
            .iter()
            .enumerate()
            .map(|(i, &value)| Sample::new(self.timestamp_at(i, n), value))
            .collect();

        if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
            debug!(
                metric = metric_name,
                samples = n,
                "synthesized series from {} to {}",
                first.timestamp().to_string_millis(),
                last.timestamp().to_string_millis(),
            );
        } else {
            debug!(metric = metric_name, "synthesized empty series");
        }

        Ok(TimeSeries::new(labels, samples))
    }

    /// One series per metric kind, in wire order, all sharing the same
    /// additional labels.
    pub fn synthesize_batch(
        &self,
        results: &BenchmarkResults,
        additional_labels: &[Label],
    ) -> Result<WriteBatch> {
        let series = MetricKind::ALL
            .iter()
            .map(|kind| self.synthesize(results.values(*kind), kind.metric_name(), additional_labels))
            .collect::<Result<Vec<_>>>()?;

        Ok(WriteBatch::new(series))
    }

    // Sample i of n sits (n - i) intervals before the current time.
    fn timestamp_at(&self, i: usize, n: usize) -> Timestamp {
        let steps = u32::try_from(n - i).unwrap_or(u32::MAX);
        let offset = self.interval.checked_mul(steps).unwrap_or(Duration::MAX);
        self.clock.now().sub(offset)
    }
}

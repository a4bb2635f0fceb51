use super::labels::Labels;
use super::sample::Sample;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    labels: Labels,
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(labels: Labels, samples: Vec<Sample>) -> Self {
        Self { labels, samples }
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.labels.metric_name()
    }
}

/// Everything submitted in one upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteBatch {
    series: Vec<TimeSeries>,
}

impl WriteBatch {
    pub fn new(series: Vec<TimeSeries>) -> Self {
        Self { series }
    }

    #[inline]
    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    pub fn series_by_name(&self, metric_name: &str) -> Option<&TimeSeries> {
        self.series
            .iter()
            .find(|s| s.metric_name() == Some(metric_name))
    }

    pub fn sample_count(&self) -> usize {
        self.series.iter().map(|s| s.samples().len()).sum()
    }
}

use prost::Message;
use tracing::debug;

use super::encoder::Encoder;
use super::proto;
use crate::error::{ErrorKind, Result};
use crate::model::{Label, Labels, Sample, TimeSeries, WriteBatch};

/// Protobuf `WriteRequest` compressed with the snappy block format.
///
/// The whole batch always goes into a single message.
#[derive(Debug, Default)]
pub struct RemoteWriteEncoder {}

impl RemoteWriteEncoder {
    pub fn new() -> Self {
        Self {}
    }

    /// Inverse of `encode`. Used to verify payloads.
    pub fn decode(&self, buf: &[u8]) -> Result<WriteBatch> {
        let raw = snap::raw::Decoder::new()
            .decompress_vec(buf)
            .map_err(|e| (ErrorKind::Encoding, "snappy decompression failed", e))?;

        let request = proto::WriteRequest::decode(raw.as_slice())
            .map_err(|e| (ErrorKind::Encoding, "protobuf decoding failed", e))?;

        let series = request
            .timeseries
            .into_iter()
            .map(from_proto)
            .collect::<Result<Vec<_>>>()?;

        Ok(WriteBatch::new(series))
    }

    fn to_proto(&self, batch: &WriteBatch) -> proto::WriteRequest {
        proto::WriteRequest {
            timeseries: batch
                .series()
                .iter()
                .map(|series| proto::TimeSeries {
                    labels: series
                        .labels()
                        .iter()
                        .map(|l| proto::Label {
                            name: l.name().to_owned(),
                            value: l.value().to_owned(),
                        })
                        .collect(),
                    samples: series
                        .samples()
                        .iter()
                        .map(|s| proto::Sample {
                            value: s.value(),
                            timestamp: s.timestamp(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Encoder for RemoteWriteEncoder {
    fn encode(&self, batch: &WriteBatch) -> Result<Vec<u8>> {
        let request = self.to_proto(batch);

        let mut buf = Vec::with_capacity(request.encoded_len());
        request
            .encode(&mut buf)
            .map_err(|e| (ErrorKind::Encoding, "protobuf encoding failed", e))?;

        let compressed = snap::raw::Encoder::new()
            .compress_vec(&buf)
            .map_err(|e| (ErrorKind::Encoding, "snappy compression failed", e))?;

        debug!(
            series = batch.series().len(),
            samples = batch.sample_count(),
            raw_bytes = buf.len(),
            compressed_bytes = compressed.len(),
            "encoded write request"
        );

        Ok(compressed)
    }
}

fn from_proto(series: proto::TimeSeries) -> Result<TimeSeries> {
    let labels = Labels::builder()
        .extend(
            series
                .labels
                .into_iter()
                .map(|l| Label::new(l.name, l.value)),
        )
        .build()?;

    let samples = series
        .samples
        .into_iter()
        .map(|s| Sample::new(s.timestamp, s.value))
        .collect();

    Ok(TimeSeries::new(labels, samples))
}
